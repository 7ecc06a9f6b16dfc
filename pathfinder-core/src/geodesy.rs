//! Great-circle distances on a spherical Earth.
//!
//! Coordinates are WGS84 degrees with `x = longitude` and `y = latitude`. No
//! datum correction is applied; the sphere is only used to rank sequences.

use geo::Coord;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// Great-circle distance between two coordinates in kilometres.
///
/// The haversine term is clamped to `[0, 1]` so rounding near antipodal
/// points cannot produce `NaN`.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use pathfinder_core::geodesy::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let one_degree_north = Coord { x: 0.0, y: 1.0 };
/// let km = haversine_km(origin, one_degree_north);
/// assert!((km - 111.195).abs() < 1e-3);
/// assert_eq!(haversine_km(origin, origin), 0.0);
/// ```
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let d_lat = (to.y - from.y).to_radians();
    let d_lng = (to.x - from.x).to_radians();
    let half_chord = (d_lat / 2.0).sin().powi(2)
        + from.y.to_radians().cos() * to.y.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let half_chord = half_chord.clamp(0.0, 1.0);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_RADIUS_KM * angle
}

/// Sum of great-circle legs between consecutive points.
///
/// Sequences with fewer than two points cost nothing.
#[must_use]
pub fn path_distance_km<I>(points: I) -> f64
where
    I: IntoIterator<Item = Coord<f64>>,
{
    let mut points = points.into_iter();
    let Some(mut previous) = points.next() else {
        return 0.0;
    };
    points.fold(0.0, |total, next| {
        let leg = haversine_km(previous, next);
        previous = next;
        total + leg
    })
}

/// Whether a coordinate is finite and inside the latitude/longitude ranges.
#[must_use]
pub fn is_valid_coordinate(coord: Coord<f64>) -> bool {
    coord.x.is_finite()
        && coord.y.is_finite()
        && coord.x.abs() <= MAX_LONGITUDE
        && coord.y.abs() <= MAX_LATITUDE
}
