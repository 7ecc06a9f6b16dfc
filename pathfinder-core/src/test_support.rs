//! Test doubles for the geometry collaborator, used by unit and behaviour
//! tests.

use geo::{Coord, LineString};

use crate::geodesy::path_distance_km;
use crate::{GeometryError, RouteGeometry, RouteGeometryProvider, TravelModel};

const METRES_PER_KM: f64 = 1_000.0;

/// Deterministic `RouteGeometryProvider` drawing straight lines between
/// waypoints.
///
/// Distance is the great-circle length and duration follows the default
/// [`TravelModel`].
#[derive(Default, Debug, Copy, Clone)]
pub struct StraightLineGeometryProvider;

impl RouteGeometryProvider for StraightLineGeometryProvider {
    fn get_route_geometry(&self, waypoints: &[Coord<f64>]) -> Result<RouteGeometry, GeometryError> {
        if waypoints.is_empty() {
            return Err(GeometryError::EmptyInput);
        }
        let model = TravelModel::default();
        let duration = waypoints
            .windows(2)
            .filter_map(|leg| match leg {
                [from, to] => Some(model.travel_time(*from, *to)),
                _ => None,
            })
            .sum();
        Ok(RouteGeometry {
            line: LineString::from(waypoints.to_vec()),
            distance_m: path_distance_km(waypoints.iter().copied()) * METRES_PER_KM,
            duration,
        })
    }
}

/// `RouteGeometryProvider` that always fails as if the service were down.
#[derive(Default, Debug, Copy, Clone)]
pub struct FailingGeometryProvider;

impl RouteGeometryProvider for FailingGeometryProvider {
    fn get_route_geometry(&self, waypoints: &[Coord<f64>]) -> Result<RouteGeometry, GeometryError> {
        if waypoints.is_empty() {
            return Err(GeometryError::EmptyInput);
        }
        Err(GeometryError::NetworkError {
            url: "http://directions.invalid/route".to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}
