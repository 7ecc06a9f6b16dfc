//! Directions API response types shared by Mapbox and OSRM.
//!
//! Both services answer a route request with a status `code`, an optional
//! `message`, and a list of `routes`. With `geometries=geojson` each route
//! carries a GeoJSON `LineString` of `[lng, lat]` pairs, a driving distance in
//! metres and a duration in seconds.
//!
//! See: <https://docs.mapbox.com/api/navigation/directions/> and
//! <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code from the service.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route connects the waypoints
    /// - `"InvalidInput"` / `"InvalidQuery"` - The request was rejected
    #[serde(default)]
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if the service found no route through the waypoints.
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        self.code == "NoRoute"
    }
}

/// A single route in a [`DirectionsResponse`].
#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    /// GeoJSON geometry of the route.
    pub geometry: LineGeometry,
    /// Driving distance in metres.
    pub distance: f64,
    /// Driving duration in seconds.
    pub duration: f64,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// `[lng, lat]` pairs in driving order.
    pub coordinates: Vec<[f64; 2]>,
}
