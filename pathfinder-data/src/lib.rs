//! Adapters connecting the route sequencing engine to external services.
//!
//! Responsibilities:
//! - Fetch road geometry for a finished route from a directions service.
//! - Translate transport and service failures into
//!   [`GeometryError`](pathfinder_core::GeometryError) values.
//!
//! Boundaries:
//! - Do not encode sequencing rules (live in `pathfinder-core` and
//!   `pathfinder-solver`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Access tokens never appear in errors or logs.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
