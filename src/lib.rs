//! Facade crate for the Pathfinder route-sequencing engine.
//!
//! This crate re-exports the core domain types and exposes the native
//! sequencing solver and the HTTP geometry provider behind feature flags.
//!
//! # Examples
//!
//! ```
//! use pathfinder_core::test_support::StraightLineGeometryProvider;
//! use pathfinder_engine::{SequenceRequest, SequencingSolver, Solver, Stop};
//!
//! let request = SequenceRequest::new(
//!     Stop::from_lat_lng(9.4981, 76.3388),
//!     vec![Stop::from_lat_lng(9.5120, 76.3410)],
//! );
//! let response = SequencingSolver::new(StraightLineGeometryProvider).solve(&request)?;
//! assert_eq!(response.route.len(), 3);
//! # Ok::<(), pathfinder_engine::SolveError>(())
//! ```

#![forbid(unsafe_code)]

pub use pathfinder_core::{
    Diagnostics, GeometryError, Route, RouteGeometry, RouteGeometryProvider, Schedule,
    SequenceRequest, SequenceRequestError, SequenceResponse, SolveError, Solver, Stop, TimeOfDay,
    TimeOfDayParseError, TimeWindow, TravelModel, TravelModelError, Visit,
};

#[cfg(feature = "test-support")]
pub use pathfinder_core::test_support;

#[cfg(feature = "solver")]
pub use pathfinder_solver::{SequencingSolver, SequencingSolverConfig};

#[cfg(feature = "http")]
pub use pathfinder_data::routing::{
    DirectionsApi, HttpRouteGeometryProvider, HttpRouteGeometryProviderConfig, ProviderBuildError,
};
