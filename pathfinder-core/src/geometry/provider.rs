//! Route-geometry provider trait and its result type.

use std::time::Duration;

use geo::{Coord, LineString};

use super::error::GeometryError;

/// Driving geometry for an ordered list of waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// Road path in visiting order.
    pub line: LineString<f64>,
    /// Driving distance in metres.
    pub distance_m: f64,
    /// Driving duration.
    pub duration: Duration,
}

/// Fetch driving geometry through a sequence of waypoints.
///
/// Waypoints are visited in the order given. Implementations must return
/// `Err(GeometryError::EmptyInput)` for an empty slice.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::{Coord, LineString};
/// use pathfinder_core::{GeometryError, RouteGeometry, RouteGeometryProvider};
///
/// struct StraightLines;
///
/// impl RouteGeometryProvider for StraightLines {
///     fn get_route_geometry(
///         &self,
///         waypoints: &[Coord<f64>],
///     ) -> Result<RouteGeometry, GeometryError> {
///         if waypoints.is_empty() {
///             return Err(GeometryError::EmptyInput);
///         }
///         Ok(RouteGeometry {
///             line: LineString::from(waypoints.to_vec()),
///             distance_m: 0.0,
///             duration: Duration::ZERO,
///         })
///     }
/// }
///
/// let geometry = StraightLines.get_route_geometry(&[Coord { x: 0.0, y: 0.0 }])?;
/// assert_eq!(geometry.line.0.len(), 1);
/// # Ok::<(), GeometryError>(())
/// ```
pub trait RouteGeometryProvider {
    /// Return the driving geometry through `waypoints`.
    fn get_route_geometry(&self, waypoints: &[Coord<f64>]) -> Result<RouteGeometry, GeometryError>;
}
