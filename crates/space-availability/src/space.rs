//! Bookable space configuration.
//!
//! A [`Space`] is supplied by the caller, usually deserialized from a JSON
//! document shaped like:
//!
//! ```json
//! {
//!   "timeZone": "Europe/London",
//!   "minimumNotice": 30,
//!   "openingTimes": {
//!     "1": { "open": { "hour": 9, "minute": 0 }, "close": { "hour": 17, "minute": 0 } }
//!   }
//! }
//! ```
//!
//! Weekdays missing from `openingTimes`, mapped to `null`, or missing either
//! `open` or `close` are closed.

use std::collections::BTreeMap;
use std::fmt;

use chrono_tz::Tz;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AvailabilityError;
use crate::localizer::parse_timezone;
use crate::time::{IsoWeekday, Time};

/// One weekday's opening window. Either bound may be absent, in which case
/// the day is treated as closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<Time>,
}

impl DaySchedule {
    pub fn new(open: Time, close: Time) -> Self {
        DaySchedule {
            open: Some(open),
            close: Some(close),
        }
    }

    /// The `(open, close)` pair when both bounds are configured.
    pub fn window(&self) -> Option<(Time, Time)> {
        Some((self.open?, self.close?))
    }
}

/// A bookable space: its timezone, minimum-notice policy, and weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    /// IANA timezone name the schedule is expressed in.
    pub time_zone: String,
    /// Minutes of lead time required before a slot may start. Absent = 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_notice: Option<u32>,
    /// Weekly schedule keyed by ISO weekday.
    #[serde(default, deserialize_with = "deserialize_opening_times")]
    pub opening_times: BTreeMap<IsoWeekday, DaySchedule>,
}

impl Space {
    /// A space in `time_zone` with no notice and no opening hours.
    pub fn new(time_zone: impl Into<String>) -> Self {
        Space {
            time_zone: time_zone.into(),
            minimum_notice: None,
            opening_times: BTreeMap::new(),
        }
    }

    pub fn with_minimum_notice(mut self, minutes: u32) -> Self {
        self.minimum_notice = Some(minutes);
        self
    }

    /// Open on `weekday` from `open` until `close`.
    pub fn with_opening_times(mut self, weekday: IsoWeekday, open: Time, close: Time) -> Self {
        self.opening_times
            .insert(weekday, DaySchedule::new(open, close));
        self
    }

    /// Parse a space from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::InvalidSpace`] when the document is not
    /// valid JSON or does not match the expected shape (including invalid
    /// weekday keys or out-of-range times).
    pub fn from_json(json: &str) -> Result<Self, AvailabilityError> {
        serde_json::from_str(json).map_err(|e| AvailabilityError::InvalidSpace(e.to_string()))
    }

    /// Check that the configured timezone exists in the tz database.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::InvalidTimezone`] for unknown zones.
    pub fn validate(&self) -> Result<(), AvailabilityError> {
        self.timezone().map(|_| ())
    }

    /// The parsed timezone.
    pub fn timezone(&self) -> Result<Tz, AvailabilityError> {
        parse_timezone(&self.time_zone)
    }

    pub fn minimum_notice_minutes(&self) -> u32 {
        self.minimum_notice.unwrap_or(0)
    }

    /// The `(open, close)` window for `weekday`, or `None` if the space is
    /// closed that day.
    pub fn schedule_for(&self, weekday: IsoWeekday) -> Option<(Time, Time)> {
        self.opening_times.get(&weekday)?.window()
    }
}

/// Accept `null` entries in `openingTimes` as closed days and reject a
/// weekday given twice (`"1"` and `"Monday"` name the same day).
fn deserialize_opening_times<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<IsoWeekday, DaySchedule>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(OpeningTimesVisitor)
}

struct OpeningTimesVisitor;

impl<'de> Visitor<'de> for OpeningTimesVisitor {
    type Value = BTreeMap<IsoWeekday, DaySchedule>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from weekday to opening times")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = Vec::new();
        let mut opening_times = BTreeMap::new();

        while let Some((weekday, schedule)) =
            map.next_entry::<IsoWeekday, Option<DaySchedule>>()?
        {
            if seen.contains(&weekday) {
                return Err(de::Error::custom(format!(
                    "opening times for weekday {weekday} given more than once"
                )));
            }
            seen.push(weekday);
            if let Some(schedule) = schedule {
                opening_times.insert(weekday, schedule);
            }
        }

        Ok(opening_times)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
