//! Core domain types for the Pathfinder route-sequencing engine.
//!
//! A single vehicle leaves a depot, visits every delivery stop once and
//! returns. Stops may carry a delivery time window. This crate defines the
//! shared vocabulary: stops and windows, the great-circle distance and path
//! cost functions, the clock simulation deciding whether a sequence meets
//! every window, the [`Solver`] trait, and the [`RouteGeometryProvider`]
//! collaborator that draws the final route on real roads.
//!
//! # Examples
//!
//! ```
//! use pathfinder_core::{Route, Stop, TimeOfDay, TimeWindow, TravelModel};
//!
//! let depot = Stop::from_lat_lng(0.0, 0.0);
//! let late_morning = Stop::from_lat_lng(0.0, 0.1)
//!     .with_window(TimeWindow::opening_at(TimeOfDay::from_hm(11, 0)?));
//! let route = Route::new(vec![depot.clone(), late_morning, depot]);
//!
//! let schedule = route
//!     .schedule(&TravelModel::default(), TimeOfDay::DEFAULT_START)
//!     .expect("waiting for a window never makes a route infeasible");
//! assert!(schedule.total_wait().as_secs() > 0);
//! # Ok::<(), pathfinder_core::TimeOfDayParseError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod geodesy;
pub mod geometry;
mod request;
mod route;
mod schedule;
pub mod solver;
mod stop;
mod time;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use geometry::{GeometryError, RouteGeometry, RouteGeometryProvider};
pub use request::{SequenceRequest, SequenceRequestError};
pub use route::Route;
pub use schedule::{DEFAULT_AVERAGE_SPEED_KMH, Schedule, TravelModel, TravelModelError, Visit};
pub use solver::{Diagnostics, SequenceResponse, SolveError, Solver};
pub use stop::Stop;
pub use time::{TimeOfDay, TimeOfDayParseError, TimeWindow};
