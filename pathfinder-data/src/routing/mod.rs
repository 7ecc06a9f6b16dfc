//! Road geometry from external directions services.
//!
//! This module provides [`HttpRouteGeometryProvider`], an implementation of
//! [`pathfinder_core::RouteGeometryProvider`] that draws a solved route along
//! real roads using either the Mapbox Directions API or an OSRM Route service.
//!
//! # Architecture
//!
//! One request is made per solved route, carrying every waypoint in visiting
//! order. The synchronous [`RouteGeometryProvider`] trait is implemented by
//! blocking on async HTTP calls internally, keeping the core library
//! embeddable in synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use pathfinder_core::RouteGeometryProvider;
//! use pathfinder_data::routing::{HttpRouteGeometryProvider, HttpRouteGeometryProviderConfig};
//!
//! let config = HttpRouteGeometryProviderConfig::mapbox("pk.example")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpRouteGeometryProvider::with_config(config)?;
//!
//! let waypoints = [
//!     Coord { x: 76.3388, y: 9.6890 },
//!     Coord { x: 76.3422, y: 9.6820 },
//!     Coord { x: 76.3388, y: 9.6890 },
//! ];
//! let geometry = provider.get_route_geometry(&waypoints)?;
//! println!("{} points over {} m", geometry.line.0.len(), geometry.distance_m);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`RouteGeometryProvider`]: pathfinder_core::RouteGeometryProvider

mod directions;
mod provider;

pub use provider::{
    DEFAULT_USER_AGENT, DirectionsApi, HttpRouteGeometryProvider,
    HttpRouteGeometryProviderConfig, ParseDirectionsApiError, ProviderBuildError,
};
