//! JSON document printed by the `solve` command.
//!
//! The field names follow the delivery front end: `optimizedPath` lists the
//! stops depot first and last, `routeGeometry` is a GeoJSON `LineString`,
//! and `totalDistance`/`totalDuration` are the driving metres and seconds
//! reported by the directions service.

use pathfinder_core::{RouteGeometry, SequenceResponse, Stop, TimeOfDay};
use serde::{Deserialize, Serialize};

/// Message when the route and its geometry were both produced.
pub(crate) const MESSAGE_COMPLETE: &str = "Route optimized and fetched successfully!";
/// Message when the directions service failed.
pub(crate) const MESSAGE_DEGRADED: &str =
    "Path optimized, but failed to fetch route geometry from the directions service.";
/// Message when no geometry was requested.
pub(crate) const MESSAGE_SKIPPED: &str = "Path optimized; route geometry was not requested.";

/// Output document of a successful solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SolveOutput {
    pub(crate) message: String,
    pub(crate) optimized_path: Vec<Stop>,
    pub(crate) route_geometry: Option<LineStringGeometry>,
    pub(crate) total_distance: Option<f64>,
    pub(crate) total_duration: Option<f64>,
    /// Great-circle length the ordering was optimised for.
    pub(crate) great_circle_distance_km: f64,
    pub(crate) schedule: Vec<ScheduledVisit>,
    pub(crate) reversals_applied: usize,
}

/// GeoJSON `LineString`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LineStringGeometry {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) coordinates: Vec<[f64; 2]>,
}

/// Timing of one stop after the depot departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScheduledVisit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) address: Option<String>,
    pub(crate) arrival: TimeOfDay,
    pub(crate) wait_seconds: u64,
    pub(crate) departure: TimeOfDay,
}

impl From<&RouteGeometry> for LineStringGeometry {
    fn from(geometry: &RouteGeometry) -> Self {
        Self {
            kind: "LineString".to_owned(),
            coordinates: geometry
                .line
                .coords()
                .map(|coord| [coord.x, coord.y])
                .collect(),
        }
    }
}

impl SolveOutput {
    /// Build the output for `response`.
    ///
    /// `geometry_requested` tells a skipped lookup apart from a failed one.
    pub(crate) fn new(response: SequenceResponse, geometry_requested: bool) -> Self {
        let message = match (&response.geometry, geometry_requested) {
            (Some(_), _) => MESSAGE_COMPLETE,
            (None, true) => MESSAGE_DEGRADED,
            (None, false) => MESSAGE_SKIPPED,
        };
        let schedule = response
            .route
            .stops()
            .iter()
            .skip(1)
            .zip(&response.schedule.visits)
            .map(|(stop, visit)| ScheduledVisit {
                address: stop.address.clone(),
                arrival: visit.arrival,
                wait_seconds: visit.wait.as_secs(),
                departure: visit.departure,
            })
            .collect();
        Self {
            message: message.to_owned(),
            route_geometry: response.geometry.as_ref().map(LineStringGeometry::from),
            total_distance: response.geometry.as_ref().map(|geometry| geometry.distance_m),
            total_duration: response
                .geometry
                .as_ref()
                .map(|geometry| geometry.duration.as_secs_f64()),
            great_circle_distance_km: response.distance_km,
            schedule,
            reversals_applied: response.diagnostics.reversals_applied,
            optimized_path: response.route.into_stops(),
        }
    }
}
