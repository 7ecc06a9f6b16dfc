//! Clock simulation along a visiting sequence.
//!
//! [`TravelModel`] turns great-circle distances into travel durations at a
//! constant average speed. Walking a sequence with it yields a [`Schedule`],
//! or nothing when some stop would be reached after its window closes. The
//! simulated clock is local to each walk and never shared.

use std::borrow::Borrow;
use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::geodesy::haversine_km;
use crate::{Stop, TimeOfDay};

/// Average driving speed assumed when none is configured.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;

const SECS_PER_HOUR: f64 = 3_600.0;

/// Errors returned by [`TravelModel::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TravelModelError {
    /// The speed was zero, negative or not finite.
    #[error("average speed must be a positive finite number of km/h, got {speed_kmh}")]
    InvalidSpeed {
        /// The rejected speed.
        speed_kmh: f64,
    },
}

/// Converts distances into travel durations at a constant speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelModel {
    average_speed_kmh: f64,
}

impl Default for TravelModel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The outcome of driving onto one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Driving time from the previous stop.
    pub travel: Duration,
    /// When the vehicle reaches the stop.
    pub arrival: TimeOfDay,
    /// Idle time before the stop's window opens.
    pub wait: Duration,
    /// When the vehicle leaves for the next stop.
    pub departure: TimeOfDay,
}

impl Visit {
    /// Travel plus waiting time; the greedy cost of choosing this stop.
    #[must_use]
    pub const fn cost(&self) -> Duration {
        self.travel.saturating_add(self.wait)
    }
}

impl TravelModel {
    /// A model driving at [`DEFAULT_AVERAGE_SPEED_KMH`].
    pub const DEFAULT: Self = Self {
        average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
    };

    /// Construct a model driving at `average_speed_kmh`.
    ///
    /// # Errors
    ///
    /// Returns [`TravelModelError::InvalidSpeed`] unless the speed is a
    /// positive finite number.
    pub fn new(average_speed_kmh: f64) -> Result<Self, TravelModelError> {
        if !(average_speed_kmh.is_finite() && average_speed_kmh > 0.0) {
            return Err(TravelModelError::InvalidSpeed {
                speed_kmh: average_speed_kmh,
            });
        }
        Ok(Self { average_speed_kmh })
    }

    /// Configured average speed.
    #[must_use]
    pub const fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    /// Driving time between two coordinates.
    ///
    /// Durations too large to represent saturate at [`Duration::MAX`].
    #[must_use]
    pub fn travel_time(&self, from: Coord<f64>, to: Coord<f64>) -> Duration {
        let hours = haversine_km(from, to) / self.average_speed_kmh;
        Duration::try_from_secs_f64(hours * SECS_PER_HOUR).unwrap_or(Duration::MAX)
    }

    /// Drive from `from`, leaving at `departure`, onto `stop`.
    ///
    /// Returns `None` when the arrival is strictly after the stop's window
    /// closes. An early arrival waits until the window opens.
    #[must_use]
    pub fn visit(&self, departure: TimeOfDay, from: Coord<f64>, stop: &Stop) -> Option<Visit> {
        let travel = self.travel_time(from, stop.location);
        let arrival = departure.saturating_add(travel);
        if stop.window.is_late(arrival) {
            return None;
        }
        let wait = stop.window.waiting_time(arrival);
        Some(Visit {
            travel,
            arrival,
            wait,
            departure: arrival.saturating_add(wait),
        })
    }

    /// Simulate `sequence` from `start`, reporting every visit after the first stop.
    ///
    /// Returns `None` as soon as any stop is reached late.
    #[must_use]
    pub fn schedule<S: Borrow<Stop>>(&self, sequence: &[S], start: TimeOfDay) -> Option<Schedule> {
        let mut visits = Vec::with_capacity(sequence.len().saturating_sub(1));
        self.walk(sequence, start, |visit| visits.push(visit))
            .then_some(Schedule { start, visits })
    }

    /// Whether every stop in `sequence` is reached before its window closes.
    ///
    /// Sequences with fewer than two stops are trivially feasible.
    #[must_use]
    pub fn is_feasible<S: Borrow<Stop>>(&self, sequence: &[S], start: TimeOfDay) -> bool {
        self.walk(sequence, start, |_| {})
    }

    fn walk<S, F>(&self, sequence: &[S], start: TimeOfDay, mut on_visit: F) -> bool
    where
        S: Borrow<Stop>,
        F: FnMut(Visit),
    {
        let mut clock = start;
        for leg in sequence.windows(2) {
            let [from, to] = leg else {
                continue;
            };
            let Some(visit) = self.visit(clock, from.borrow().location, to.borrow()) else {
                return false;
            };
            clock = visit.departure;
            on_visit(visit);
        }
        true
    }
}

/// Timed visits produced by walking a feasible sequence.
///
/// `visits[i]` describes the stop at position `i + 1` of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Departure time from the first stop.
    pub start: TimeOfDay,
    /// One entry per stop after the first.
    pub visits: Vec<Visit>,
}

impl Schedule {
    /// Time the last stop is left, or the start time for an empty schedule.
    #[must_use]
    pub fn finish(&self) -> TimeOfDay {
        self.visits
            .last()
            .map_or(self.start, |visit| visit.departure)
    }

    /// Total time spent waiting for windows to open.
    #[must_use]
    pub fn total_wait(&self) -> Duration {
        self.visits.iter().map(|visit| visit.wait).sum()
    }
}
