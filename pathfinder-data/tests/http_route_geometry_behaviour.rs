//! Behavioural tests for [`HttpRouteGeometryProvider`].
//!
//! Each scenario points the provider at a local one-shot server that
//! answers with a canned directions response.

mod support;

use std::cell::RefCell;

use geo::Coord;
use pathfinder_core::{GeometryError, RouteGeometry, RouteGeometryProvider};
use pathfinder_data::routing::{HttpRouteGeometryProvider, HttpRouteGeometryProviderConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use support::{CannedServer, closed_base_url};

const ACCESS_TOKEN: &str = "pk.behaviour-secret";

const ROUTE_BODY: &str = r#"{
    "code": "Ok",
    "routes": [{
        "geometry": {"type": "LineString", "coordinates": [[76.33, 9.68], [76.335, 9.684], [76.34, 9.69], [76.33, 9.68]]},
        "distance": 2841.7,
        "duration": 412.3
    }]
}"#;

#[derive(Default)]
struct GeometryWorld {
    server: RefCell<Option<CannedServer>>,
    provider: RefCell<Option<HttpRouteGeometryProvider>>,
    result: RefCell<Option<Result<RouteGeometry, GeometryError>>>,
}

impl GeometryWorld {
    fn serve_osrm(&self, status: &str, body: &str) {
        let server = CannedServer::start(status, body);
        let config = HttpRouteGeometryProviderConfig::osrm(server.base_url());
        let provider =
            HttpRouteGeometryProvider::with_config(config).expect("provider should build");
        self.server.replace(Some(server));
        self.provider.replace(Some(provider));
    }

    fn request(&self, waypoints: &[Coord<f64>]) {
        let guard = self.provider.borrow();
        let provider = guard.as_ref().expect("provider must be initialised");
        self.result.replace(Some(provider.get_route_geometry(waypoints)));
    }

    fn expect_error(&self) -> GeometryError {
        self.result
            .borrow()
            .clone()
            .expect("geometry should be requested")
            .expect_err("expected a geometry error")
    }
}

#[fixture]
fn world() -> GeometryWorld {
    GeometryWorld::default()
}

fn sample_waypoints() -> Vec<Coord<f64>> {
    vec![
        Coord { x: 76.33, y: 9.68 },
        Coord { x: 76.34, y: 9.69 },
        Coord { x: 76.33, y: 9.68 },
    ]
}

// --- Given steps ---

#[given("an OSRM service returning a route")]
fn service_returning_route(world: &GeometryWorld) {
    world.serve_osrm("200 OK", ROUTE_BODY);
}

#[given("an OSRM service reporting no route")]
fn service_without_route(world: &GeometryWorld) {
    world.serve_osrm(
        "200 OK",
        r#"{"code": "NoRoute", "message": "Impossible route between points", "routes": []}"#,
    );
}

#[given("an OSRM service rejecting the request")]
fn service_rejecting_request(world: &GeometryWorld) {
    world.serve_osrm(
        "200 OK",
        r#"{"code": "InvalidQuery", "message": "Query string malformed"}"#,
    );
}

#[given("a Mapbox service rejecting the access token")]
fn mapbox_rejecting_token(world: &GeometryWorld) {
    let server = CannedServer::start(
        "401 Unauthorized",
        r#"{"message": "Not Authorized - Invalid Token"}"#,
    );
    let config =
        HttpRouteGeometryProviderConfig::mapbox(ACCESS_TOKEN).with_base_url(server.base_url());
    let provider = HttpRouteGeometryProvider::with_config(config).expect("provider should build");
    world.server.replace(Some(server));
    world.provider.replace(Some(provider));
}

#[given("a directions service that is not running")]
fn service_not_running(world: &GeometryWorld) {
    let config = HttpRouteGeometryProviderConfig::osrm(closed_base_url());
    let provider = HttpRouteGeometryProvider::with_config(config).expect("provider should build");
    world.provider.replace(Some(provider));
}

// --- When steps ---

#[when("geometry is requested for three waypoints")]
fn request_three(world: &GeometryWorld) {
    world.request(&sample_waypoints());
}

#[when("geometry is requested for no waypoints")]
fn request_none(world: &GeometryWorld) {
    world.request(&[]);
}

// --- Then steps ---

#[then("the road line is returned")]
fn then_road_line(world: &GeometryWorld) {
    let geometry = world
        .result
        .borrow()
        .clone()
        .expect("geometry should be requested")
        .expect("expected geometry");
    assert_eq!(geometry.line.0.len(), 4);
    assert_eq!(geometry.line.0.first(), Some(&Coord { x: 76.33, y: 9.68 }));
    assert_eq!(geometry.distance_m, 2841.7);
    assert_eq!(geometry.duration.as_millis(), 412_300);
}

#[then("the request lists the waypoints as longitude and latitude pairs")]
fn then_request_lists_waypoints(world: &GeometryWorld) {
    let server = world.server.take().expect("server should be running");
    let request_line = server.request_line();
    assert!(
        request_line.starts_with(
            "GET /route/v1/driving/76.33,9.68;76.34,9.69;76.33,9.68?geometries=geojson&overview=full"
        ),
        "unexpected request line {request_line}"
    );
}

#[then("an empty input error is returned")]
fn then_empty_error(world: &GeometryWorld) {
    assert_eq!(world.expect_error(), GeometryError::EmptyInput);
}

#[then("a no route error is returned")]
fn then_no_route(world: &GeometryWorld) {
    assert_eq!(world.expect_error(), GeometryError::NoRoute);
}

#[then("an HTTP error with status 401 is returned")]
fn then_http_error(world: &GeometryWorld) {
    let err = world.expect_error();
    assert!(
        matches!(err, GeometryError::HttpError { status: 401, .. }),
        "expected HttpError 401, got {err:?}"
    );
}

#[then("the error does not reveal the access token")]
fn then_token_hidden(world: &GeometryWorld) {
    let err = world.expect_error();
    let rendered = format!("{err} {err:?}");
    assert!(!rendered.contains(ACCESS_TOKEN), "token leaked in {rendered}");
    assert!(rendered.contains("access_token=REDACTED"));
}

#[then("a network error is returned")]
fn then_network_error(world: &GeometryWorld) {
    let err = world.expect_error();
    assert!(
        matches!(err, GeometryError::NetworkError { .. }),
        "expected NetworkError, got {err:?}"
    );
}

#[then("a service error is returned")]
fn then_service_error(world: &GeometryWorld) {
    let err = world.expect_error();
    assert!(
        matches!(&err, GeometryError::ServiceError { code, .. } if code == "InvalidQuery"),
        "expected ServiceError, got {err:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/http_route_geometry.feature", name = $title)]
        fn $fn_name(world: GeometryWorld) {
            let _ = world;
        }
    };
}

register_scenario!(drawing_a_route, "drawing a route through the stops");
register_scenario!(
    returning_error_for_empty_input,
    "returning an error for empty input"
);
register_scenario!(handling_no_route, "handling a service without a route");
register_scenario!(handling_rejected_token, "handling a rejected access token");
register_scenario!(handling_unreachable_service, "handling an unreachable service");
register_scenario!(handling_service_error, "handling a service error response");
