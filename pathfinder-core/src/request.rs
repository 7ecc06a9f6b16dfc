//! Sequencing requests and their validation.

use thiserror::Error;

use crate::geodesy::is_valid_coordinate;
use crate::{Stop, TimeOfDay};

/// Parameters for a sequencing request.
///
/// On the wire the depot is called `warehouse`:
/// `{"warehouse": {...}, "stops": [...], "startTime"?: "HH:MM"}`. Both the
/// depot and the stop list are optional at this level so that a missing
/// field is reported by [`SequenceRequest::validate`] rather than silently
/// defaulted.
///
/// # Examples
/// ```
/// use pathfinder_core::{SequenceRequest, Stop};
///
/// let request = SequenceRequest::new(
///     Stop::from_lat_lng(0.0, 0.0),
///     vec![Stop::from_lat_lng(0.0, 1.0)],
/// );
/// let (depot, stops) = request.validate()?;
/// assert_eq!(depot.lat(), 0.0);
/// assert_eq!(stops.len(), 1);
/// # Ok::<(), pathfinder_core::SequenceRequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SequenceRequest {
    /// Start and end of the route.
    #[cfg_attr(feature = "serde", serde(rename = "warehouse", default))]
    pub depot: Option<Stop>,
    /// Stops to visit, in no particular order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stops: Option<Vec<Stop>>,
    /// Departure time from the depot. Absent, `null` or `""` on the wire all
    /// mean [`TimeOfDay::DEFAULT_START`].
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "deserialize_start_time")
    )]
    pub start_time: TimeOfDay,
}

#[cfg(feature = "serde")]
fn deserialize_start_time<'de, D>(deserializer: D) -> Result<TimeOfDay, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;

    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(TimeOfDay::default()),
        Some(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

/// Reasons a [`SequenceRequest`] is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceRequestError {
    /// No depot was supplied.
    #[error("a warehouse is required")]
    MissingDepot,
    /// The stop list was absent or empty.
    #[error("at least one stop is required")]
    NoStops,
    /// The depot carries a delivery window.
    #[error("the warehouse must not have a time window")]
    DepotHasTimeWindow,
    /// The depot coordinate is not finite or out of range.
    #[error("warehouse coordinate (lat {lat}, lng {lng}) is invalid")]
    InvalidDepotCoordinate {
        /// Rejected latitude.
        lat: f64,
        /// Rejected longitude.
        lng: f64,
    },
    /// A stop coordinate is not finite or out of range.
    #[error("stop {index} coordinate (lat {lat}, lng {lng}) is invalid")]
    InvalidStopCoordinate {
        /// Position of the stop in the request.
        index: usize,
        /// Rejected latitude.
        lat: f64,
        /// Rejected longitude.
        lng: f64,
    },
}

impl SequenceRequest {
    /// Build a request departing at [`TimeOfDay::DEFAULT_START`].
    #[must_use]
    pub const fn new(depot: Stop, stops: Vec<Stop>) -> Self {
        Self {
            depot: Some(depot),
            stops: Some(stops),
            start_time: TimeOfDay::DEFAULT_START,
        }
    }

    /// Override the departure time.
    #[must_use]
    pub const fn with_start_time(mut self, start_time: TimeOfDay) -> Self {
        self.start_time = start_time;
        self
    }

    /// Check the request and return its depot and stops.
    ///
    /// # Errors
    ///
    /// Returns the first [`SequenceRequestError`] found. Inverted time windows
    /// are not errors.
    pub fn validate(&self) -> Result<(&Stop, &[Stop]), SequenceRequestError> {
        let depot = self
            .depot
            .as_ref()
            .ok_or(SequenceRequestError::MissingDepot)?;
        let stops = self
            .stops
            .as_deref()
            .filter(|stops| !stops.is_empty())
            .ok_or(SequenceRequestError::NoStops)?;

        if !is_valid_coordinate(depot.location) {
            return Err(SequenceRequestError::InvalidDepotCoordinate {
                lat: depot.lat(),
                lng: depot.lng(),
            });
        }
        if !depot.window.is_unbounded() {
            return Err(SequenceRequestError::DepotHasTimeWindow);
        }
        if let Some((index, stop)) = stops
            .iter()
            .enumerate()
            .find(|(_, stop)| !is_valid_coordinate(stop.location))
        {
            return Err(SequenceRequestError::InvalidStopCoordinate {
                index,
                lat: stop.lat(),
                lng: stop.lng(),
            });
        }
        Ok((depot, stops))
    }
}
