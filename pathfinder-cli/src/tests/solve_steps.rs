//! Behaviour-driven step definitions driving the solve CLI scenarios.

use super::helpers::{sample_request, write_request, write_utf8};
use super::*;
use crate::output::{MESSAGE_DEGRADED, MESSAGE_SKIPPED, SolveOutput};
use crate::solve::{DefaultSolveSolverBuilder, SolveConfig, SolveSolverBuilder, run_solve_with};
use camino::Utf8PathBuf;
use geo::Coord;
use pathfinder_core::test_support::{FailingGeometryProvider, StraightLineGeometryProvider};
use pathfinder_core::{
    GeometryError, RouteGeometry, RouteGeometryProvider, SequenceRequest, SequenceRequestError,
    SolveError, Solver, Stop, TimeOfDay, TimeWindow,
};
use pathfinder_solver::{SequencingSolver, SequencingSolverConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy)]
enum ProviderChoice {
    StraightLine,
    Offline,
}

impl RouteGeometryProvider for ProviderChoice {
    fn get_route_geometry(&self, waypoints: &[Coord<f64>]) -> Result<RouteGeometry, GeometryError> {
        match self {
            Self::StraightLine => StraightLineGeometryProvider.get_route_geometry(waypoints),
            Self::Offline => FailingGeometryProvider.get_route_geometry(waypoints),
        }
    }
}

struct StubGeometrySolverBuilder {
    choice: ProviderChoice,
}

impl SolveSolverBuilder for StubGeometrySolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError> {
        Ok(Box::new(SequencingSolver::with_config(
            Some(self.choice),
            SequencingSolverConfig {
                travel_model: config.travel_model,
            },
        )))
    }
}

#[derive(Debug)]
struct SolveWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: Cell<bool>,
    provider: Cell<Option<ProviderChoice>>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SolveWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");

        Self {
            _tmp: tmp,
            request_path,
            include_request: Cell::new(true),
            provider: Cell::new(None),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["pathfinder".to_owned(), "solve".to_owned()];
        if self.include_request.get() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend([format!("--{ARG_SOLVE_API}"), "osrm".to_owned()]);
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn output(&self) -> SolveOutput {
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON solve document")
    }

    fn error(&self) -> CliError {
        self.result
            .take()
            .expect("result recorded")
            .expect_err("expected error")
    }
}

#[fixture]
fn world() -> SolveWorld {
    SolveWorld::new()
}

#[given("a valid sequencing request exists on disk")]
fn valid_request_exists(#[from(world)] world: &SolveWorld) {
    write_request(&world.request_path, &sample_request());
}

#[given("I skip the route geometry")]
fn skip_geometry(#[from(world)] world: &SolveWorld) {
    world
        .cli_args
        .borrow_mut()
        .push(format!("--{ARG_SOLVE_SKIP_GEOMETRY}"));
}

#[given("a geometry provider that draws straight lines")]
fn straight_line_provider(#[from(world)] world: &SolveWorld) {
    world.provider.set(Some(ProviderChoice::StraightLine));
}

#[given("a geometry provider that is offline")]
fn offline_provider(#[from(world)] world: &SolveWorld) {
    world.provider.set(Some(ProviderChoice::Offline));
}

#[given("the sequencing request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &SolveWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("the sequencing request has no stops")]
fn request_has_no_stops(#[from(world)] world: &SolveWorld) {
    let request = SequenceRequest::new(Stop::from_lat_lng(9.4981, 76.3388), Vec::new());
    write_request(&world.request_path, &request);
}

#[given("I omit the request path")]
fn omit_request_path(#[from(world)] world: &SolveWorld) {
    world.include_request.set(false);
}

#[given("the sequencing request has a stop that closes before departure")]
fn request_with_closed_stop(#[from(world)] world: &SolveWorld) {
    let closed = TimeWindow::closing_at(TimeOfDay::from_hm(8, 0).expect("valid time"));
    let request = SequenceRequest::new(
        Stop::from_lat_lng(9.4981, 76.3388),
        vec![Stop::from_lat_lng(9.5120, 76.3410).with_window(closed)],
    );
    write_request(&world.request_path, &request);
}

#[when("I run the solve command")]
fn run_solve_command(#[from(world)] world: &SolveWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Solve(args) => {
            let mut buffer = world.stdout.borrow_mut();
            match world.provider.get() {
                Some(choice) => {
                    run_solve_with(args, &StubGeometrySolverBuilder { choice }, &mut *buffer)
                }
                None => run_solve_with(args, &DefaultSolveSolverBuilder, &mut *buffer),
            }
        }
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints JSON output")]
fn command_succeeds_and_prints_json(#[from(world)] world: &SolveWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }

    let output = world.output();
    let stop_count = sample_request().stops.map_or(0, |stops| stops.len());
    assert_eq!(output.optimized_path.len(), stop_count + 2);
    assert_eq!(output.schedule.len(), output.optimized_path.len() - 1);
}

#[then("the optimized path starts and ends at the warehouse")]
fn path_starts_and_ends_at_warehouse(#[from(world)] world: &SolveWorld) {
    let output = world.output();
    let warehouse = sample_request().depot;
    assert_eq!(output.optimized_path.first().cloned(), warehouse);
    assert_eq!(output.optimized_path.last().cloned(), warehouse);
}

#[then("the output explains that geometry was not requested")]
fn geometry_not_requested(#[from(world)] world: &SolveWorld) {
    let output = world.output();
    assert_eq!(output.message, MESSAGE_SKIPPED);
    assert!(output.route_geometry.is_none());
    assert!(output.total_distance.is_none());
}

#[then("the output carries a GeoJSON line through every stop")]
fn geojson_line(#[from(world)] world: &SolveWorld) {
    let output = world.output();
    let geometry = output.route_geometry.expect("route geometry should be present");
    assert_eq!(geometry.kind, "LineString");
    let expected: Vec<[f64; 2]> = output
        .optimized_path
        .iter()
        .map(|stop| [stop.lng(), stop.lat()])
        .collect();
    assert_eq!(geometry.coordinates, expected);
    assert!(output.total_distance.is_some_and(|metres| metres > 0.0));
    assert!(output.total_duration.is_some_and(|seconds| seconds > 0.0));
}

#[then("the output explains that geometry could not be fetched")]
fn geometry_degraded(#[from(world)] world: &SolveWorld) {
    let output = world.output();
    assert_eq!(output.message, MESSAGE_DEGRADED);
    assert!(output.route_geometry.is_none());
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &SolveWorld) {
    match world.error() {
        CliError::ParseRequest { .. } => {}
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[then("the command fails because the request has no stops")]
fn command_fails_no_stops(#[from(world)] world: &SolveWorld) {
    match world.error() {
        CliError::InvalidRequest { source, .. } => {
            assert_eq!(source, SequenceRequestError::NoStops);
        }
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &SolveWorld) {
    match world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(field, ARG_SOLVE_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because no route meets every window")]
fn command_fails_infeasible(#[from(world)] world: &SolveWorld) {
    match world.error() {
        CliError::Solve {
            source: SolveError::Infeasible { start },
        } => assert_eq!(start, TimeOfDay::DEFAULT_START),
        other => panic!("expected an infeasible solve, found {other:?}"),
    }
}

macro_rules! register_solve_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/solve_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SolveWorld) {
            let _ = world;
        }
    };
}

register_solve_scenario!(solve_happy_path, "solving a request from JSON");
register_solve_scenario!(solve_with_geometry, "drawing the route with a geometry provider");
register_solve_scenario!(solve_degraded_geometry, "reporting degraded geometry");
register_solve_scenario!(solve_invalid_json, "rejecting invalid JSON input");
register_solve_scenario!(solve_no_stops, "rejecting requests without stops");
register_solve_scenario!(solve_missing_request, "rejecting missing request paths");
register_solve_scenario!(solve_infeasible, "reporting unreachable windows");
