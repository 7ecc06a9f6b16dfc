//! Resolve real driving geometry for a solved route.
//!
//! The `RouteGeometryProvider` trait abstracts an external directions service.
//! Callers supply the route's coordinates in visiting order and receive the
//! drawn road path with its driving distance and duration. Sequencing never
//! depends on this collaborator; its failures only cost the caller the
//! geometry.

mod error;
mod provider;

pub use error::GeometryError;
pub use provider::{RouteGeometry, RouteGeometryProvider};
