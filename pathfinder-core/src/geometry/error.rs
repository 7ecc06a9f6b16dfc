use thiserror::Error;

/// Errors from [`crate::geometry::RouteGeometryProvider::get_route_geometry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// No waypoints were provided.
    ///
    /// Providers need at least one coordinate to draw a route. Callers
    /// should never request geometry for an empty route.
    #[error("at least one waypoint is required")]
    EmptyInput,
    /// The request could not reach the service.
    #[error("network error calling {url}: {message}")]
    NetworkError {
        /// Request URL with credentials redacted.
        url: String,
        /// Underlying transport error.
        message: String,
    },
    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL with credentials redacted.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL with credentials redacted.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Underlying error text.
        message: String,
    },
    /// The service reported an error in its response body.
    #[error("directions service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `InvalidInput`.
        code: String,
        /// Service error message.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse directions response: {message}")]
    ParseError {
        /// Decoder error text.
        message: String,
    },
    /// The service found no route through the waypoints.
    #[error("no route found through the waypoints")]
    NoRoute,
}
