//! Tests for the `SequencingSolver`.

use std::sync::Mutex;

use super::*;
use pathfinder_core::test_support::{FailingGeometryProvider, StraightLineGeometryProvider};
use pathfinder_core::{GeometryError, SequenceRequestError, Stop, TimeOfDay};
use rstest::rstest;

use crate::test_support::{at, longitudes, stop, windowed_stop};

/// Records the waypoints it is asked to draw.
#[derive(Default)]
struct RecordingGeometryProvider {
    calls: Mutex<Vec<Vec<Coord<f64>>>>,
}

impl RouteGeometryProvider for RecordingGeometryProvider {
    fn get_route_geometry(&self, waypoints: &[Coord<f64>]) -> Result<RouteGeometry, GeometryError> {
        self.calls
            .lock()
            .expect("recording lock poisoned")
            .push(waypoints.to_vec());
        StraightLineGeometryProvider.get_route_geometry(waypoints)
    }
}

fn request(stops: Vec<Stop>) -> SequenceRequest {
    SequenceRequest::new(stop(0.0, 0.0), stops)
}

#[rstest]
fn orders_unconstrained_stops_by_proximity() {
    let solver = SequencingSolver::new(StraightLineGeometryProvider);
    let response = solver
        .solve(&request(vec![stop(0.0, 2.0), stop(0.0, 1.0)]))
        .expect("solve should succeed");

    assert_eq!(longitudes(response.route.stops()), [0.0, 1.0, 2.0, 0.0]);
    assert_eq!(response.diagnostics.stops_sequenced, 2);
    assert_eq!(response.schedule.visits.len(), 3);
    assert!((response.distance_km - response.route.distance_km()).abs() < f64::EPSILON);
}

#[rstest]
fn geometry_follows_the_final_order() {
    let provider = RecordingGeometryProvider::default();
    let solver = SequencingSolver::new(provider);
    let response = solver
        .solve(&request(vec![stop(0.0, 3.0), stop(0.0, 1.0), stop(0.0, 2.0)]))
        .expect("solve should succeed");

    let expected: Vec<Coord<f64>> = response.route.locations().collect();
    let calls = solver
        .geometry
        .as_ref()
        .expect("provider configured")
        .calls
        .lock()
        .expect("recording lock poisoned")
        .clone();
    assert_eq!(calls, vec![expected.clone()]);
    let geometry = response.geometry.expect("geometry should be present");
    assert_eq!(geometry.line.0, expected);
}

#[rstest]
fn geometry_failure_keeps_the_ordering() {
    let degraded = SequencingSolver::new(FailingGeometryProvider)
        .solve(&request(vec![stop(0.0, 2.0), stop(0.0, 1.0)]))
        .expect("geometry failures must not fail the solve");
    let healthy = SequencingSolver::new(StraightLineGeometryProvider)
        .solve(&request(vec![stop(0.0, 2.0), stop(0.0, 1.0)]))
        .expect("solve should succeed");

    assert!(degraded.geometry.is_none());
    assert_eq!(degraded.route, healthy.route);
    assert_eq!(degraded.schedule, healthy.schedule);
}

#[rstest]
fn skipping_geometry_never_calls_the_provider() {
    let solver = SequencingSolver::<RecordingGeometryProvider>::with_config(
        None,
        SequencingSolverConfig::default(),
    );
    let response = solver
        .solve(&request(vec![stop(0.0, 1.0)]))
        .expect("solve should succeed");
    assert!(response.geometry.is_none());
}

#[rstest]
fn unreachable_window_is_infeasible() {
    let solver = SequencingSolver::new(StraightLineGeometryProvider);
    let err = solver
        .solve(&request(vec![
            windowed_stop(0.0, 5.0, None, Some(at(0, 1))),
            stop(0.0, 1.0),
        ]))
        .expect_err("stop closes before departure");
    assert_eq!(
        err,
        SolveError::Infeasible {
            start: TimeOfDay::DEFAULT_START
        }
    );
}

#[rstest]
fn inverted_window_waits_for_its_opening() {
    // Closes at 11:00 but opens at 12:00: the arrival is checked against the
    // close, then the vehicle idles until the open.
    let solver = SequencingSolver::new(StraightLineGeometryProvider);
    let response = solver
        .solve(&request(vec![windowed_stop(
            0.0,
            0.01,
            Some(at(12, 0)),
            Some(at(11, 0)),
        )]))
        .expect("inverted window is accepted");

    let visit = response.schedule.visits.first().expect("one visit");
    assert_eq!(visit.arrival.to_string(), "09:01");
    assert_eq!(visit.departure, at(12, 0));
    assert!(visit.departure > at(11, 0));
}

#[rstest]
fn invalid_requests_are_rejected_before_solving() {
    let provider = RecordingGeometryProvider::default();
    let solver = SequencingSolver::new(provider);
    let err = solver
        .solve(&request(Vec::new()))
        .expect_err("empty stop list");
    assert_eq!(err, SolveError::InvalidRequest(SequenceRequestError::NoStops));
    let calls = solver
        .geometry
        .as_ref()
        .expect("provider configured")
        .calls
        .lock()
        .expect("recording lock poisoned")
        .len();
    assert_eq!(calls, 0);
}

#[rstest]
fn later_start_time_can_make_a_request_infeasible() {
    let solver = SequencingSolver::new(StraightLineGeometryProvider);
    let stops = vec![windowed_stop(0.0, 0.1, None, Some(at(10, 0)))];

    let early = solver.solve(&request(stops.clone()));
    assert!(early.is_ok());

    let late = solver.solve(&request(stops).with_start_time(at(11, 0)));
    assert_eq!(late, Err(SolveError::Infeasible { start: at(11, 0) }));
}

#[rstest]
fn slower_vehicle_misses_a_window_a_faster_one_meets() {
    // 0.5 degrees is ~55.6 km: about 83 minutes at 40 km/h, 111 at 30 km/h.
    let stops = vec![windowed_stop(0.0, 0.5, None, Some(at(10, 30)))];
    let fast = SequencingSolver::new(StraightLineGeometryProvider);
    let slow = SequencingSolver::with_config(
        Some(StraightLineGeometryProvider),
        SequencingSolverConfig {
            travel_model: TravelModel::new(30.0).expect("valid speed"),
        },
    );

    assert!(fast.solve(&request(stops.clone())).is_ok());
    assert!(matches!(
        slow.solve(&request(stops)),
        Err(SolveError::Infeasible { .. })
    ));
}

#[rstest]
fn solving_twice_gives_the_same_route() {
    let solver = SequencingSolver::new(StraightLineGeometryProvider);
    let stops = vec![
        stop(0.3, 0.2),
        windowed_stop(-0.2, 0.4, Some(at(10, 0)), None),
        stop(0.1, -0.3),
        windowed_stop(0.4, -0.1, None, Some(at(13, 0))),
    ];
    let first = solver
        .solve(&request(stops.clone()))
        .expect("solve should succeed");
    let second = solver
        .solve(&request(stops))
        .expect("solve should succeed");
    assert_eq!(first.route, second.route);
    assert_eq!(first.schedule, second.schedule);
}
