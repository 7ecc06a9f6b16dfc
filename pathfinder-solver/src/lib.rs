//! Time-window-aware route sequencing for a single vehicle.
//!
//! This crate provides [`SequencingSolver`], the default implementation of the
//! [`Solver`](pathfinder_core::Solver) trait. Sequencing runs in two phases:
//!
//! 1. [`nearest_neighbour`] greedily builds a route that meets every delivery
//!    window, choosing at each step the reachable stop with the least travel
//!    plus waiting time. It gives up at the first dead end rather than
//!    backtracking.
//! 2. [`two_opt`] shortens that route by reversing interior segments, keeping
//!    only reversals that still meet every window.
//!
//! Both phases are deterministic and keep their simulated clock local to the
//! call. Once the order is fixed the solver asks an optional
//! [`RouteGeometryProvider`](pathfinder_core::RouteGeometryProvider) for road
//! geometry; failures there only drop the geometry from the response.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod construct;
mod improve;
mod solver;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use construct::{DeadEnd, nearest_neighbour};
pub use improve::{Improvement, two_opt};
pub use solver::{SequencingSolver, SequencingSolverConfig};
