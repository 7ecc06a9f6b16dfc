//! Wall-clock times of day and delivery windows.
//!
//! Times carry no date or timezone. A [`TimeOfDay`] is the elapsed time since
//! midnight of a single service day, so simulated clocks may run past `24:00`
//! but never wrap back round.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const MAX_HOUR: u8 = 23;
const MAX_MINUTE: u8 = 59;

/// Errors returned when parsing a [`TimeOfDay`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOfDayParseError {
    /// The input was not two digits, a colon and two digits.
    #[error("time {input:?} is not in HH:MM format")]
    Format {
        /// The rejected text.
        input: String,
    },
    /// The hour component was larger than 23.
    #[error("hour {hour} is out of range 00-23")]
    HourOutOfRange {
        /// The rejected hour.
        hour: u8,
    },
    /// The minute component was larger than 59.
    #[error("minute {minute} is out of range 00-59")]
    MinuteOutOfRange {
        /// The rejected minute.
        minute: u8,
    },
}

/// A same-day wall-clock time, stored as the elapsed time since midnight.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pathfinder_core::TimeOfDay;
///
/// let nine: TimeOfDay = "09:00".parse()?;
/// assert_eq!(nine, TimeOfDay::DEFAULT_START);
///
/// let later = nine.saturating_add(Duration::from_secs(90 * 60));
/// assert_eq!(later.to_string(), "10:30");
/// # Ok::<(), pathfinder_core::TimeOfDayParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(Duration);

impl TimeOfDay {
    /// `00:00`.
    pub const MIDNIGHT: Self = Self(Duration::ZERO);

    /// `09:00`, the departure time used when a request does not name one.
    pub const DEFAULT_START: Self = Self(Duration::from_secs(9 * SECS_PER_HOUR));

    /// Construct a time from an hour and minute.
    ///
    /// # Errors
    ///
    /// Returns an error when `hour > 23` or `minute > 59`.
    pub const fn from_hm(hour: u8, minute: u8) -> Result<Self, TimeOfDayParseError> {
        if hour > MAX_HOUR {
            return Err(TimeOfDayParseError::HourOutOfRange { hour });
        }
        if minute > MAX_MINUTE {
            return Err(TimeOfDayParseError::MinuteOutOfRange { minute });
        }
        let secs = hour as u64 * SECS_PER_HOUR + minute as u64 * SECS_PER_MINUTE;
        Ok(Self(Duration::from_secs(secs)))
    }

    /// Construct a time from the elapsed duration since midnight.
    #[must_use]
    pub const fn from_since_midnight(elapsed: Duration) -> Self {
        Self(elapsed)
    }

    /// Elapsed time since midnight.
    #[must_use]
    pub const fn since_midnight(self) -> Duration {
        self.0
    }

    /// Advance the clock, saturating at [`Duration::MAX`].
    #[must_use]
    pub const fn saturating_add(self, elapsed: Duration) -> Self {
        Self(self.0.saturating_add(elapsed))
    }

    /// Time from `earlier` until `self`, or zero when `earlier` is later.
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::DEFAULT_START
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        let hours = secs / SECS_PER_HOUR;
        let minutes = (secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
        write!(f, "{hours:02}:{minutes:02}")
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let format_error = || TimeOfDayParseError::Format {
            input: input.to_owned(),
        };
        let (hour, minute) = input.split_once(':').ok_or_else(format_error)?;
        let hour = parse_two_digits(hour).ok_or_else(format_error)?;
        let minute = parse_two_digits(minute).ok_or_else(format_error)?;
        Self::from_hm(hour, minute)
    }
}

fn parse_two_digits(part: &str) -> Option<u8> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(feature = "serde")]
impl serde::Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// An optional `[start, end]` constraint on when a stop may be reached.
///
/// Either bound may be absent. Arriving after `end` makes a visit late;
/// arriving before `start` means idling until `start`. Only the arrival is
/// compared with `end`, so an inverted window is accepted as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Earliest time service may begin.
    pub start: Option<TimeOfDay>,
    /// Latest acceptable arrival time.
    pub end: Option<TimeOfDay>,
}

impl TimeWindow {
    /// A window with neither bound.
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    /// Construct a window from optional bounds.
    #[must_use]
    pub const fn new(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Self {
        Self { start, end }
    }

    /// A window that only opens at `start`.
    #[must_use]
    pub const fn opening_at(start: TimeOfDay) -> Self {
        Self::new(Some(start), None)
    }

    /// A window that only closes at `end`.
    #[must_use]
    pub const fn closing_at(end: TimeOfDay) -> Self {
        Self::new(None, Some(end))
    }

    /// Whether neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether arriving at `arrival` is strictly after the window closes.
    #[must_use]
    pub fn is_late(&self, arrival: TimeOfDay) -> bool {
        self.end.is_some_and(|end| arrival > end)
    }

    /// Idle time spent when arriving at `arrival` before the window opens.
    #[must_use]
    pub fn waiting_time(&self, arrival: TimeOfDay) -> Duration {
        self.start
            .map_or(Duration::ZERO, |start| start.saturating_duration_since(arrival))
    }
}
