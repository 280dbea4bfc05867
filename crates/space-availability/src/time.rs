//! Timezone-less wall-clock values.
//!
//! [`Time`] is an hour/minute pair interpreted relative to a space's own
//! timezone. Comparisons and slot arithmetic happen on minutes since midnight,
//! so two times on "the same day" can be ordered without anchoring them to any
//! calendar date (and therefore without inheriting that date's DST rules).
//!
//! [`IsoWeekday`] is the ISO 8601 day-of-week code used to key weekly
//! schedules: `1` is Monday, `7` is Sunday.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::AvailabilityError;

/// Minutes in a civil day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

// ── Time ────────────────────────────────────────────────────────────────────

/// A wall-clock time of day, `{hour: 0-23, minute: 0-59}`.
///
/// Ordering is chronological within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTime")]
pub struct Time {
    hour: u32,
    minute: u32,
}

/// Unvalidated wire form of [`Time`].
#[derive(Deserialize)]
struct RawTime {
    hour: u32,
    minute: u32,
}

impl TryFrom<RawTime> for Time {
    type Error = AvailabilityError;

    fn try_from(raw: RawTime) -> Result<Self, Self::Error> {
        Time::new(raw.hour, raw.minute)
    }
}

impl Time {
    /// 00:00, the reference time for every day after the first in a query.
    pub const MIDNIGHT: Time = Time { hour: 0, minute: 0 };

    /// Build a time, rejecting hours outside 0-23 and minutes outside 0-59.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::InvalidTime`] for out-of-range components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, AvailabilityError> {
        if hour > 23 || minute > 59 {
            return Err(AvailabilityError::InvalidTime(format!(
                "{hour:02}:{minute:02} is not a valid time of day"
            )));
        }
        Ok(Time { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Position of this time within its day, in minutes (0..1440).
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Inverse of [`Time::minutes_since_midnight`]. `None` once the value
    /// reaches the next day.
    pub fn from_minutes_since_midnight(minutes: u32) -> Option<Self> {
        if minutes >= MINUTES_PER_DAY {
            return None;
        }
        Some(Time {
            hour: minutes / 60,
            minute: minutes % 60,
        })
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ── IsoWeekday ──────────────────────────────────────────────────────────────

/// ISO 8601 weekday code: Monday = 1 … Sunday = 7.
///
/// Serialized as the code's decimal string (`"1"` … `"7"`), which is how
/// opening-times maps are keyed. Parsing additionally accepts English weekday
/// names so hand-written configuration can say `"Monday"` or `"tue"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoWeekday(u8);

impl IsoWeekday {
    pub const MONDAY: IsoWeekday = IsoWeekday(1);
    pub const TUESDAY: IsoWeekday = IsoWeekday(2);
    pub const WEDNESDAY: IsoWeekday = IsoWeekday(3);
    pub const THURSDAY: IsoWeekday = IsoWeekday(4);
    pub const FRIDAY: IsoWeekday = IsoWeekday(5);
    pub const SATURDAY: IsoWeekday = IsoWeekday(6);
    pub const SUNDAY: IsoWeekday = IsoWeekday(7);

    /// The numeric code, 1-7.
    pub fn number(&self) -> u8 {
        self.0
    }
}

impl From<Weekday> for IsoWeekday {
    fn from(weekday: Weekday) -> Self {
        // number_from_monday() is 1..=7, always fits
        IsoWeekday(weekday.number_from_monday() as u8)
    }
}

impl TryFrom<u8> for IsoWeekday {
    type Error = AvailabilityError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        if (1..=7).contains(&code) {
            Ok(IsoWeekday(code))
        } else {
            Err(AvailabilityError::InvalidWeekday(format!(
                "ISO weekday code must be 1-7, got {code}"
            )))
        }
    }
}

impl FromStr for IsoWeekday {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return IsoWeekday::try_from(code);
        }
        parse_weekday_name(&trimmed.to_lowercase())
            .map(IsoWeekday::from)
            .ok_or_else(|| AvailabilityError::InvalidWeekday(format!("'{s}'")))
    }
}

impl TryFrom<String> for IsoWeekday {
    type Error = AvailabilityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IsoWeekday> for String {
    fn from(weekday: IsoWeekday) -> Self {
        weekday.to_string()
    }
}

impl fmt::Display for IsoWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a lowercase weekday name, full or abbreviated.
fn parse_weekday_name(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
