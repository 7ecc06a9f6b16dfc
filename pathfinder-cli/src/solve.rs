//! Solve command implementation for the Pathfinder CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pathfinder_core::{SequenceRequest, Solver, TravelModel};
use pathfinder_data::routing::{
    DirectionsApi, HttpRouteGeometryProvider, HttpRouteGeometryProviderConfig,
};
use pathfinder_solver::{SequencingSolver, SequencingSolverConfig};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::output::SolveOutput;
use crate::{
    ARG_SOLVE_ACCESS_TOKEN, ARG_SOLVE_API, ARG_SOLVE_AVERAGE_SPEED, ARG_SOLVE_BASE_URL,
    ARG_SOLVE_PROFILE, ARG_SOLVE_REQUEST, ARG_SOLVE_SKIP_GEOMETRY, CliError,
    ENV_MAPBOX_ACCESS_TOKEN, ENV_SOLVE_ACCESS_TOKEN, ENV_SOLVE_REQUEST,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the stops of a JSON request ({\"warehouse\": ..., \
                 \"stops\": [...]}) into a round trip that meets every \
                 delivery window, then draw it on real roads through the \
                 Mapbox Directions API or an OSRM server.",
    about = "Sequence delivery stops from a JSON request"
)]
#[ortho_config(prefix = "PATHFINDER")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing the sequencing request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Directions service used for road geometry: `mapbox` or `osrm`.
    #[arg(long = ARG_SOLVE_API, value_name = "api")]
    #[serde(default)]
    pub(crate) api: Option<String>,
    /// Base URL of the directions service.
    #[arg(long = ARG_SOLVE_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Routing profile, e.g. `mapbox/driving` or `driving`.
    #[arg(long = ARG_SOLVE_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Mapbox access token.
    #[arg(long = ARG_SOLVE_ACCESS_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) access_token: Option<String>,
    /// Average driving speed used to simulate arrival times.
    #[arg(long = ARG_SOLVE_AVERAGE_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) average_speed_kmh: Option<f64>,
    /// Order the stops without asking a directions service for geometry.
    #[arg(
        long = ARG_SOLVE_SKIP_GEOMETRY,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) skip_geometry: Option<bool>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let mut merged = self.load_and_merge().map_err(CliError::Configuration)?;
        if merged.access_token.is_none() {
            merged.access_token = std::env::var(ENV_MAPBOX_ACCESS_TOKEN).ok();
        }
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Directions service flavour.
    pub(crate) api: DirectionsApi,
    /// Base URL of the directions service.
    pub(crate) base_url: String,
    /// Routing profile.
    pub(crate) profile: String,
    /// Mapbox access token.
    pub(crate) access_token: Option<String>,
    /// Driving speed model.
    pub(crate) travel_model: TravelModel,
    /// Whether to skip the geometry lookup.
    pub(crate) skip_geometry: bool,
}

impl std::fmt::Debug for SolveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveConfig")
            .field("request_path", &self.request_path)
            .field("api", &self.api)
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("access_token", &self.access_token.as_ref().map(|_| "REDACTED"))
            .field("travel_model", &self.travel_model)
            .field("skip_geometry", &self.skip_geometry)
            .finish()
    }
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_SOLVE_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Provider configuration, or `None` when geometry is skipped.
    pub(crate) fn geometry_config(&self) -> Option<HttpRouteGeometryProviderConfig> {
        if self.skip_geometry {
            return None;
        }
        let config = HttpRouteGeometryProviderConfig::for_api(self.api)
            .with_base_url(self.base_url.clone())
            .with_profile(self.profile.clone());
        Some(match &self.access_token {
            Some(token) => config.with_access_token(token.clone()),
            None => config,
        })
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;

        let api = args
            .api
            .as_deref()
            .map(str::parse::<DirectionsApi>)
            .transpose()?
            .unwrap_or_default();
        let skip_geometry = args.skip_geometry.unwrap_or(false);
        let access_token = args
            .access_token
            .filter(|token| !token.trim().is_empty());
        if api == DirectionsApi::Mapbox && !skip_geometry && access_token.is_none() {
            return Err(CliError::MissingArgument {
                field: ARG_SOLVE_ACCESS_TOKEN,
                env: ENV_SOLVE_ACCESS_TOKEN,
            });
        }

        let travel_model = args
            .average_speed_kmh
            .map(TravelModel::new)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            request_path,
            api,
            base_url: args
                .base_url
                .unwrap_or_else(|| api.default_base_url().to_owned()),
            profile: args
                .profile
                .unwrap_or_else(|| api.default_profile().to_owned()),
            access_token,
            travel_model,
            skip_geometry,
        })
    }
}

/// Builds a solver instance for the current solve invocation.
pub(super) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError>;
}

pub(super) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError> {
        let solver_config = SequencingSolverConfig {
            travel_model: config.travel_model,
        };
        let provider = config
            .geometry_config()
            .map(HttpRouteGeometryProvider::with_config)
            .transpose()
            .map_err(|source| CliError::BuildGeometryProvider {
                base_url: config.base_url.clone(),
                source,
            })?;
        Ok(Box::new(SequencingSolver::with_config(
            provider,
            solver_config,
        )))
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let output = execute_solve(&config, builder)?;
    write_solve_output(writer, &output)
}

fn execute_solve(
    config: &SolveConfig,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolveOutput, CliError> {
    let request = load_sequence_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let solver = builder.build(config)?;
    let response = solver
        .solve(&request)
        .map_err(|source| CliError::Solve { source })?;
    log::info!(
        "sequenced {} stops over {:.3} km",
        response.diagnostics.stops_sequenced,
        response.distance_km
    );
    Ok(SolveOutput::new(response, !config.skip_geometry))
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`SequenceRequest`] from disk.
pub(super) fn load_sequence_request(path: &Utf8Path) -> Result<SequenceRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solve_output(writer: &mut dyn Write, output: &SolveOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
