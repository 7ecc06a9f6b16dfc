//! `SequencingSolver`: greedy construction, 2-opt, then best-effort geometry.

use std::time::Instant;

use geo::Coord;
use pathfinder_core::{
    Diagnostics, Route, RouteGeometry, RouteGeometryProvider, SequenceRequest, SequenceResponse,
    SolveError, Solver, TravelModel,
};

use crate::{nearest_neighbour, two_opt};

/// Configuration for [`SequencingSolver`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SequencingSolverConfig {
    /// Converts great-circle distances into driving time.
    pub travel_model: TravelModel,
}

/// Native solver sequencing stops under delivery windows.
///
/// The ordering is computed locally from great-circle distances. The
/// optional geometry provider is only asked to draw the finished route; when
/// it is absent or fails the response simply carries no geometry.
///
/// # Examples
///
/// ```
/// use pathfinder_core::test_support::StraightLineGeometryProvider;
/// use pathfinder_core::{SequenceRequest, Solver, Stop};
/// use pathfinder_solver::SequencingSolver;
///
/// let solver = SequencingSolver::new(StraightLineGeometryProvider);
/// let request = SequenceRequest::new(
///     Stop::from_lat_lng(0.0, 0.0),
///     vec![Stop::from_lat_lng(0.0, 2.0), Stop::from_lat_lng(0.0, 1.0)],
/// );
///
/// let response = solver.solve(&request)?;
/// assert_eq!(response.route.len(), 4);
/// assert!(response.geometry.is_some());
/// # Ok::<(), pathfinder_core::SolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SequencingSolver<G> {
    geometry: Option<G>,
    config: SequencingSolverConfig,
}

impl<G> SequencingSolver<G>
where
    G: RouteGeometryProvider,
{
    /// Construct a solver using default configuration.
    pub const fn new(geometry: G) -> Self {
        Self::with_config(Some(geometry), SequencingSolverConfig {
            travel_model: TravelModel::DEFAULT,
        })
    }

    /// Construct a solver with explicit configuration.
    ///
    /// Passing `None` for `geometry` skips the geometry lookup entirely.
    pub const fn with_config(geometry: Option<G>, config: SequencingSolverConfig) -> Self {
        Self { geometry, config }
    }

    /// The configuration this solver was built with.
    pub const fn config(&self) -> &SequencingSolverConfig {
        &self.config
    }

    fn resolve_geometry(&self, route: &Route) -> Option<RouteGeometry> {
        let provider = self.geometry.as_ref()?;
        let waypoints: Vec<Coord<f64>> = route.locations().collect();
        match provider.get_route_geometry(&waypoints) {
            Ok(geometry) => Some(geometry),
            Err(err) => {
                log::warn!("route geometry unavailable, returning the ordering only: {err}");
                None
            }
        }
    }
}

impl<G> Solver for SequencingSolver<G>
where
    G: RouteGeometryProvider + Send + Sync,
{
    fn solve(&self, request: &SequenceRequest) -> Result<SequenceResponse, SolveError> {
        let (depot, stops) = request.validate()?;
        let started_at = Instant::now();
        let model = &self.config.travel_model;
        let start = request.start_time;

        let constructed = nearest_neighbour(depot, stops, model, start).map_err(|dead_end| {
            log::debug!("greedy construction failed: {dead_end}");
            SolveError::Infeasible { start }
        })?;
        log::debug!(
            "constructed route over {} stops, {:.3} km",
            stops.len(),
            constructed.distance_km()
        );

        let improvement = two_opt(&constructed, model, start);
        let route = improvement.route;
        let schedule = route
            .schedule(model, start)
            .ok_or(SolveError::Infeasible { start })?;
        let distance_km = route.distance_km();
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            stops_sequenced: stops.len(),
            reversals_applied: improvement.reversals,
        };
        log::debug!(
            "improved route to {distance_km:.3} km with {} reversals in {:?}",
            improvement.reversals,
            diagnostics.solve_time
        );

        let geometry = self.resolve_geometry(&route);
        Ok(SequenceResponse {
            route,
            schedule,
            distance_km,
            geometry,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests;
