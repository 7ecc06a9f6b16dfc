//! 2-opt local search preserving time-window feasibility.

use pathfinder_core::geodesy::path_distance_km;
use pathfinder_core::{Route, Stop, TimeOfDay, TravelModel};

/// Outcome of [`two_opt`].
#[derive(Debug, Clone, PartialEq)]
pub struct Improvement {
    /// The improved route.
    pub route: Route,
    /// Segment reversals that were accepted.
    pub reversals: usize,
    /// Full sweeps over the route, including the final sweep that found
    /// nothing.
    pub passes: usize,
}

/// Shorten `route` by reversing interior segments.
///
/// Every interior segment `i..=k` (the depot at either end never moves) is
/// tried in turn. A reversal is kept as soon as the reversed route's total
/// great-circle length is strictly below the best length so far and the
/// reversed route still meets every window when leaving at `start`; the
/// sweep then carries on from the next segment against the updated route.
/// Sweeps repeat until one accepts nothing.
///
/// Routes of three positions or fewer have nothing to reverse and are
/// returned unchanged. The result is never longer than the input and is
/// feasible whenever the input was.
///
/// # Examples
///
/// ```
/// use pathfinder_core::{Route, Stop, TimeOfDay, TravelModel};
/// use pathfinder_solver::two_opt;
///
/// let depot = Stop::from_lat_lng(0.0, 0.0);
/// let crossed = Route::new(vec![
///     depot.clone(),
///     Stop::from_lat_lng(0.0, 2.0),
///     Stop::from_lat_lng(0.0, 1.0),
///     Stop::from_lat_lng(0.0, 3.0),
///     depot,
/// ]);
///
/// let improved = two_opt(&crossed, &TravelModel::default(), TimeOfDay::DEFAULT_START);
/// assert!(improved.route.distance_km() < crossed.distance_km());
/// assert_eq!(improved.reversals, 1);
/// ```
#[must_use]
pub fn two_opt(route: &Route, model: &TravelModel, start: TimeOfDay) -> Improvement {
    let len = route.len();
    if len <= 3 {
        return Improvement {
            route: route.clone(),
            reversals: 0,
            passes: 0,
        };
    }

    let mut best: Vec<&Stop> = route.stops().iter().collect();
    let mut best_km = sequence_km(&best);
    let mut reversals = 0_usize;
    let mut passes = 0_usize;
    let mut improved = true;

    while improved {
        improved = false;
        passes = passes.saturating_add(1);

        for i in 1..len.saturating_sub(2) {
            for k in i.saturating_add(1)..len.saturating_sub(1) {
                let Some(segment) = best.get_mut(i..=k) else {
                    continue;
                };
                segment.reverse();
                let candidate_km = sequence_km(&best);
                if candidate_km < best_km && model.is_feasible(best.as_slice(), start) {
                    best_km = candidate_km;
                    reversals = reversals.saturating_add(1);
                    improved = true;
                } else if let Some(restored) = best.get_mut(i..=k) {
                    restored.reverse();
                }
            }
        }
    }

    log::trace!("2-opt accepted {reversals} reversals over {passes} passes ({best_km:.3} km)");
    Improvement {
        route: Route::new(best.into_iter().cloned().collect()),
        reversals,
        passes,
    }
}

fn sequence_km(sequence: &[&Stop]) -> f64 {
    path_distance_km(sequence.iter().map(|stop| stop.location))
}
