//! Greedy route construction under time windows.

use pathfinder_core::{Route, Stop, TimeOfDay, TravelModel};
use thiserror::Error;

/// The greedy construction reached a point where every unvisited stop would
/// be reached after its window closes.
///
/// This is a limitation of the heuristic: a different partial order might
/// still have met every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no unvisited stop is reachable in time at {clock} after placing {placed} of {total} stops")]
pub struct DeadEnd {
    /// Stops placed before the dead end.
    pub placed: usize,
    /// Stops in the request.
    pub total: usize,
    /// Simulated clock when construction stopped.
    pub clock: TimeOfDay,
}

/// Build a route visiting every stop once, meeting all delivery windows.
///
/// Starting at `depot` and `start`, the nearest-neighbour step considers every
/// unvisited stop, discards those that would be reached after their window
/// closes, and moves to the one with the smallest travel plus waiting time.
/// Ties go to the stop listed first in `stops`. The route is closed by
/// returning to the depot; with no stops the route is just `[depot]`.
///
/// # Errors
///
/// Returns [`DeadEnd`] as soon as no unvisited stop is reachable in time.
/// Construction does not backtrack.
///
/// # Examples
///
/// ```
/// use pathfinder_core::{Stop, TimeOfDay, TravelModel};
/// use pathfinder_solver::nearest_neighbour;
///
/// let depot = Stop::from_lat_lng(0.0, 0.0);
/// let stops = [Stop::from_lat_lng(0.0, 2.0), Stop::from_lat_lng(0.0, 1.0)];
/// let route = nearest_neighbour(&depot, &stops, &TravelModel::default(), TimeOfDay::DEFAULT_START)?;
///
/// let longitudes: Vec<f64> = route.stops().iter().map(Stop::lng).collect();
/// assert_eq!(longitudes, [0.0, 1.0, 2.0, 0.0]);
/// # Ok::<(), pathfinder_solver::DeadEnd>(())
/// ```
pub fn nearest_neighbour(
    depot: &Stop,
    stops: &[Stop],
    model: &TravelModel,
    start: TimeOfDay,
) -> Result<Route, DeadEnd> {
    if stops.is_empty() {
        return Ok(Route::new(vec![depot.clone()]));
    }

    let mut remaining: Vec<&Stop> = stops.iter().collect();
    let mut sequence = Vec::with_capacity(stops.len().saturating_add(2));
    sequence.push(depot.clone());
    let mut current = depot.location;
    let mut clock = start;

    while !remaining.is_empty() {
        let best = remaining
            .iter()
            .enumerate()
            .filter_map(|(position, stop)| {
                model
                    .visit(clock, current, stop)
                    .map(|visit| (position, visit))
            })
            .min_by_key(|(_, visit)| visit.cost());

        let Some((position, visit)) = best else {
            return Err(DeadEnd {
                placed: sequence.len().saturating_sub(1),
                total: stops.len(),
                clock,
            });
        };

        let next = remaining.remove(position);
        current = next.location;
        clock = visit.departure;
        sequence.push(next.clone());
    }

    sequence.push(depot.clone());
    Ok(Route::new(sequence))
}
