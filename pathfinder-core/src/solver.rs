//! The solver contract: requests in, ordered routes out.

use std::time::Duration;

use thiserror::Error;

use crate::{Route, RouteGeometry, Schedule, SequenceRequest, SequenceRequestError, TimeOfDay};

/// Summary statistics describing a solve run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Wall-clock time spent sequencing, excluding the geometry lookup.
    pub solve_time: Duration,
    /// Number of stops placed between the depot positions.
    pub stops_sequenced: usize,
    /// Segment reversals accepted by local search.
    pub reversals_applied: usize,
}

/// Response from a successful solve.
///
/// The ordering in [`route`](Self::route) is authoritative. Road geometry is
/// best-effort and absent whenever the geometry collaborator failed.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceResponse {
    /// The visiting order, depot first and last.
    pub route: Route,
    /// Simulated arrivals, waits and departures along the route.
    pub schedule: Schedule,
    /// Great-circle length of the route in kilometres.
    pub distance_km: f64,
    /// Driving geometry for the route, when available.
    pub geometry: Option<RouteGeometry>,
    /// Solver diagnostics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The request was malformed and no computation was attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] SequenceRequestError),
    /// No visiting order meeting every time window was found.
    #[error("could not find a route meeting every time window when departing at {start}")]
    Infeasible {
        /// Departure time the search started from.
        start: TimeOfDay,
    },
}

/// Alias for the solver error type.
pub type Error = SolveError;

/// Order a request's stops into a route.
///
/// Implementations must return [`SolveError::InvalidRequest`] for malformed
/// input rather than panicking, and must be deterministic for a given
/// request. Solvers must be `Send + Sync` so separate requests can be served
/// concurrently.
pub trait Solver: Send + Sync {
    /// Solve a request, producing a route or an error.
    fn solve(&self, request: &SequenceRequest) -> Result<SequenceResponse, Error>;
}
