//! Test-only utilities for `pathfinder-solver`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use pathfinder_core::{Stop, TimeOfDay, TimeWindow};

/// Build a [`TimeOfDay`] from an hour and minute known to be valid.
///
/// Out-of-range components clamp to the latest representable minute so that
/// test tables cannot panic.
///
/// # Examples
/// ```rust
/// use pathfinder_solver::test_support::at;
///
/// assert_eq!(at(9, 30).to_string(), "09:30");
/// ```
#[must_use]
pub fn at(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::from_hm(hour.min(23), minute.min(59)).unwrap_or(TimeOfDay::MIDNIGHT)
}

/// Construct an unconstrained stop at `(lat, lng)`.
///
/// # Examples
/// ```rust
/// use pathfinder_solver::test_support::stop;
///
/// let stop = stop(9.68, 76.33);
/// assert_eq!(stop.lat(), 9.68);
/// assert!(stop.window.is_unbounded());
/// ```
#[must_use]
pub fn stop(lat: f64, lng: f64) -> Stop {
    Stop::from_lat_lng(lat, lng)
}

/// Construct a stop at `(lat, lng)` with the given delivery window bounds.
#[must_use]
pub fn windowed_stop(
    lat: f64,
    lng: f64,
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
) -> Stop {
    Stop::from_lat_lng(lat, lng).with_window(TimeWindow::new(start, end))
}

/// Longitudes of `stops` in order; handy for asserting visit order along the
/// equator.
#[must_use]
pub fn longitudes(stops: &[Stop]) -> Vec<f64> {
    stops.iter().map(Stop::lng).collect()
}
