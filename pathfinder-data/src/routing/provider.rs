//! HTTP-based `RouteGeometryProvider` using a directions service.
//!
//! This module provides [`HttpRouteGeometryProvider`], an implementation of
//! the [`RouteGeometryProvider`] trait that fetches driving geometry from the
//! Mapbox Directions API or an OSRM Route service via HTTP.
//!
//! # Architecture
//!
//! The [`RouteGeometryProvider`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use pathfinder_data::routing::{HttpRouteGeometryProvider, HttpRouteGeometryProviderConfig};
//! use pathfinder_core::RouteGeometryProvider;
//! use geo::Coord;
//!
//! let config = HttpRouteGeometryProviderConfig::osrm("http://localhost:5000");
//! let provider = HttpRouteGeometryProvider::with_config(config)?;
//! let waypoints = [Coord { x: 76.33, y: 9.68 }, Coord { x: 76.34, y: 9.69 }];
//!
//! let geometry = provider.get_route_geometry(&waypoints)?;
//! println!("{} m", geometry.distance_m);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use geo::{Coord, LineString};
use pathfinder_core::{GeometryError, RouteGeometry, RouteGeometryProvider};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::directions::DirectionsResponse;

/// Error type for [`HttpRouteGeometryProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The Mapbox API was selected without an access token.
    #[error("the Mapbox directions API requires an access token")]
    MissingAccessToken,
}

/// Default user agent for directions requests.
pub const DEFAULT_USER_AGENT: &str = "pathfinder-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Placeholder written in place of the access token in reported URLs.
const REDACTED: &str = "REDACTED";

/// Directions service flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionsApi {
    /// Mapbox Directions API v5.
    #[default]
    Mapbox,
    /// OSRM Route service v1.
    Osrm,
}

impl DirectionsApi {
    /// Base URL used when none is configured.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Mapbox => "https://api.mapbox.com",
            Self::Osrm => "http://localhost:5000",
        }
    }

    /// Routing profile used when none is configured.
    #[must_use]
    pub const fn default_profile(self) -> &'static str {
        match self {
            Self::Mapbox => "mapbox/driving",
            Self::Osrm => "driving",
        }
    }
}

impl fmt::Display for DirectionsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mapbox => "mapbox",
            Self::Osrm => "osrm",
        })
    }
}

/// Error returned when parsing an unknown [`DirectionsApi`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown directions API `{0}`, expected `mapbox` or `osrm`")]
pub struct ParseDirectionsApiError(String);

impl FromStr for DirectionsApi {
    type Err = ParseDirectionsApiError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "mapbox" => Ok(Self::Mapbox),
            "osrm" => Ok(Self::Osrm),
            _ => Err(ParseDirectionsApiError(input.to_owned())),
        }
    }
}

/// Configuration for [`HttpRouteGeometryProvider`].
#[derive(Clone)]
pub struct HttpRouteGeometryProviderConfig {
    /// Which directions service the base URL points at.
    pub api: DirectionsApi,
    /// Base URL for the service (e.g., `"https://api.mapbox.com"`).
    pub base_url: String,
    /// Routing profile, e.g. `mapbox/driving` or `driving`.
    pub profile: String,
    /// Mapbox access token. Ignored by OSRM.
    pub access_token: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for HttpRouteGeometryProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRouteGeometryProviderConfig")
            .field("api", &self.api)
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("access_token", &self.access_token.as_ref().map(|_| REDACTED))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpRouteGeometryProviderConfig {
    fn default() -> Self {
        Self::for_api(DirectionsApi::default())
    }
}

impl HttpRouteGeometryProviderConfig {
    /// Create a configuration for `api` with its default URL and profile.
    #[must_use]
    pub fn for_api(api: DirectionsApi) -> Self {
        Self {
            api,
            base_url: api.default_base_url().to_owned(),
            profile: api.default_profile().to_owned(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Create a Mapbox configuration using `access_token`.
    #[must_use]
    pub fn mapbox(access_token: impl Into<String>) -> Self {
        Self::for_api(DirectionsApi::Mapbox).with_access_token(access_token)
    }

    /// Create an OSRM configuration for the service at `base_url`.
    #[must_use]
    pub fn osrm(base_url: impl Into<String>) -> Self {
        Self::for_api(DirectionsApi::Osrm).with_base_url(base_url)
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the access token.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// A request URL alongside the form that is safe to report.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteUrl {
    request: String,
    redacted: String,
}

/// HTTP-based route geometry provider for Mapbox or OSRM.
///
/// This provider implements the synchronous [`RouteGeometryProvider`] trait
/// by internally blocking on asynchronous HTTP requests. It owns a Tokio
/// runtime that is reused across calls, avoiding the overhead of creating
/// a new runtime per request.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// When called from within a `current_thread` Tokio runtime, the provider
/// falls back to using its own internal runtime. This may deadlock if the
/// caller's runtime is driving IO that this request depends on.
///
/// # Credentials
///
/// The access token is appended to the request URL only. Every URL carried
/// by a [`GeometryError`] has the token replaced by `REDACTED`.
pub struct HttpRouteGeometryProvider {
    client: Client,
    config: HttpRouteGeometryProviderConfig,
    runtime: Runtime,
}

impl fmt::Debug for HttpRouteGeometryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRouteGeometryProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRouteGeometryProvider {
    /// Create a Mapbox provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is blank or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn mapbox(access_token: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteGeometryProviderConfig::mapbox(access_token))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError::MissingAccessToken`] when Mapbox is
    /// selected without a token, or an error if the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(
        config: HttpRouteGeometryProviderConfig,
    ) -> Result<Self, ProviderBuildError> {
        if config.api == DirectionsApi::Mapbox && config.token().is_none() {
            return Err(ProviderBuildError::MissingAccessToken);
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The configuration this provider was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteGeometryProviderConfig {
        &self.config
    }

    /// Build the route URL for the given waypoints.
    ///
    /// Coordinates are semicolon-separated `lng,lat` pairs.
    fn build_route_url(&self, waypoints: &[Coord<f64>]) -> RouteUrl {
        let coords = waypoints
            .iter()
            .map(|coord| format!("{},{}", coord.x, coord.y))
            .collect::<Vec<_>>()
            .join(";");
        let base_url = self.config.base_url.trim_end_matches('/');
        let profile = self.config.profile.trim_matches('/');

        match self.config.api {
            DirectionsApi::Mapbox => {
                let prefix =
                    format!("{base_url}/directions/v5/{profile}/{coords}?geometries=geojson");
                let token = self.config.token().unwrap_or_default();
                RouteUrl {
                    request: format!("{prefix}&access_token={token}"),
                    redacted: format!("{prefix}&access_token={REDACTED}"),
                }
            }
            DirectionsApi::Osrm => {
                let url =
                    format!("{base_url}/route/v1/{profile}/{coords}?geometries=geojson&overview=full");
                RouteUrl {
                    request: url.clone(),
                    redacted: url,
                }
            }
        }
    }

    /// Fetch the route geometry asynchronously.
    async fn fetch_geometry_async(
        &self,
        waypoints: &[Coord<f64>],
    ) -> Result<RouteGeometry, GeometryError> {
        let url = self.build_route_url(waypoints);
        log::debug!("requesting route geometry from {}", url.redacted);

        let response = self
            .client
            .get(&url.request)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &url.redacted))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &url.redacted))?;

        let directions: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| GeometryError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        Self::convert_response(directions)
    }

    /// Convert a reqwest error to a `GeometryError`.
    ///
    /// Reqwest embeds the request URL in its error text, so it is stripped
    /// and `url` (already redacted) is reported instead.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> GeometryError {
        if error.is_timeout() {
            return GeometryError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        let status = error.status();
        let message = error.without_url().to_string();
        if let Some(code) = status {
            return GeometryError::HttpError {
                url: url.to_owned(),
                status: code.as_u16(),
                message,
            };
        }

        GeometryError::NetworkError {
            url: url.to_owned(),
            message,
        }
    }

    /// Convert a directions response into a `RouteGeometry`.
    fn convert_response(response: DirectionsResponse) -> Result<RouteGeometry, GeometryError> {
        if response.is_no_route() {
            return Err(GeometryError::NoRoute);
        }
        if !response.is_ok() {
            return Err(GeometryError::ServiceError {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or(GeometryError::NoRoute)?;

        if !(route.distance.is_finite() && route.distance >= 0.0) {
            return Err(GeometryError::ParseError {
                message: format!("invalid route distance {}", route.distance),
            });
        }
        let duration =
            Duration::try_from_secs_f64(route.duration).map_err(|err| GeometryError::ParseError {
                message: format!("invalid route duration {}: {err}", route.duration),
            })?;

        let line: LineString<f64> = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| Coord { x: lng, y: lat })
            .collect();

        Ok(RouteGeometry {
            line,
            distance_m: route.distance,
            duration,
        })
    }
}

impl RouteGeometryProvider for HttpRouteGeometryProvider {
    /// Fetch driving geometry through the given waypoints.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyInput`] for an empty slice, a
    /// transport error when the service cannot be reached, or
    /// [`GeometryError::NoRoute`] when it finds no route.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime the runtime must be multi-threaded.
    /// From a `current_thread` runtime the provider blocks on its own
    /// runtime instead.
    fn get_route_geometry(&self, waypoints: &[Coord<f64>]) -> Result<RouteGeometry, GeometryError> {
        if waypoints.is_empty() {
            return Err(GeometryError::EmptyInput);
        }

        // block_in_place requires a multi-threaded runtime.
        let future = self.fetch_geometry_async(waypoints);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
