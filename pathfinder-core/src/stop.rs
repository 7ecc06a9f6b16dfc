//! Delivery stops and the depot.

use geo::Coord;

use crate::TimeWindow;

/// A location to visit, optionally constrained by a delivery window.
///
/// The depot is an ordinary `Stop` without a window; its role comes from its
/// position at both ends of a [`Route`](crate::Route).
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. On the wire
/// a stop is `{"lat", "lng", "address"?, "startTime"?, "endTime"?}`, where an
/// empty time string means the bound is absent.
///
/// # Examples
/// ```
/// use pathfinder_core::{Stop, TimeOfDay, TimeWindow};
///
/// let stop = Stop::from_lat_lng(9.68, 76.33)
///     .with_window(TimeWindow::closing_at(TimeOfDay::from_hm(11, 0)?))
///     .with_address("Boat jetty");
///
/// assert_eq!(stop.lat(), 9.68);
/// assert_eq!(stop.lng(), 76.33);
/// assert!(!stop.window.is_unbounded());
/// # Ok::<(), pathfinder_core::TimeOfDayParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::StopRecord", into = "wire::StopRecord")
)]
pub struct Stop {
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Delivery window; unbounded when unconstrained.
    pub window: TimeWindow,
    /// Free-form label carried through to the output untouched.
    pub address: Option<String>,
}

impl Stop {
    /// Construct an unconstrained stop at `location`.
    #[must_use]
    pub const fn new(location: Coord<f64>) -> Self {
        Self {
            location,
            window: TimeWindow::UNBOUNDED,
            address: None,
        }
    }

    /// Construct an unconstrained stop from latitude and longitude degrees.
    #[must_use]
    pub const fn from_lat_lng(lat: f64, lng: f64) -> Self {
        Self::new(Coord { x: lng, y: lat })
    }

    /// Replace the delivery window.
    #[must_use]
    pub const fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Attach an address label.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.location.x
    }
}

#[cfg(feature = "serde")]
mod wire {
    use serde::{Deserialize, Serialize};

    use super::Stop;
    use crate::{TimeOfDay, TimeOfDayParseError, TimeWindow};

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct StopRecord {
        lat: f64,
        lng: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_time: Option<String>,
    }

    fn parse_bound(raw: Option<String>) -> Result<Option<TimeOfDay>, TimeOfDayParseError> {
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some),
        }
    }

    impl TryFrom<StopRecord> for Stop {
        type Error = TimeOfDayParseError;

        fn try_from(record: StopRecord) -> Result<Self, Self::Error> {
            let window = TimeWindow::new(
                parse_bound(record.start_time)?,
                parse_bound(record.end_time)?,
            );
            Ok(Self {
                location: geo::Coord {
                    x: record.lng,
                    y: record.lat,
                },
                window,
                address: record.address,
            })
        }
    }

    impl From<Stop> for StopRecord {
        fn from(stop: Stop) -> Self {
            Self {
                lat: stop.location.y,
                lng: stop.location.x,
                address: stop.address,
                start_time: stop.window.start.map(|time| time.to_string()),
                end_time: stop.window.end.map(|time| time.to_string()),
            }
        }
    }
}
