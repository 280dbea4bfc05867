//! Zoned-time localization.
//!
//! Converts an absolute instant plus an IANA timezone name into the local
//! calendar parts the availability engine works with. Timezone rules
//! (including DST) come from the `chrono-tz` database; weekday is taken
//! directly as an ISO number rather than from a formatted name.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::AvailabilityError;
use crate::time::IsoWeekday;

/// The local decomposition of an instant in a particular timezone.
///
/// `hour` and `minute` are the reference "now" for slot search. The query
/// layer uses 00:00 for every day after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub weekday: IsoWeekday,
    pub hour: u32,
    pub minute: u32,
}

impl LocalParts {
    /// Parts for a local (wall-clock) datetime.
    pub fn from_naive(local: &NaiveDateTime) -> Self {
        LocalParts {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            weekday: local.weekday().into(),
            hour: local.hour(),
            minute: local.minute(),
        }
    }

    /// Parts for 00:00 on a local calendar date.
    pub fn start_of(date: NaiveDate) -> Self {
        LocalParts {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday().into(),
            hour: 0,
            minute: 0,
        }
    }

    /// Reference time of day in minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Result-map key for this day: `"YYYY-M-D"`, without zero padding.
    pub fn date_key(&self) -> String {
        format!("{}-{}-{}", self.year, self.month, self.day)
    }
}

/// Localize `instant` into the IANA timezone `time_zone`.
///
/// # Errors
///
/// Returns [`AvailabilityError::InvalidTimezone`] if `time_zone` is not a
/// known IANA timezone name, or [`AvailabilityError::Localization`] if the
/// local wall-clock time falls outside the representable calendar range.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use space_availability::localizer::localize;
///
/// // 15:22 UTC on Monday 7 September 2020 is 16:22 BST in London.
/// let instant = Utc.with_ymd_and_hms(2020, 9, 7, 15, 22, 0).unwrap();
/// let parts = localize(instant, "Europe/London").unwrap();
/// assert_eq!((parts.hour, parts.minute), (16, 22));
/// assert_eq!(parts.weekday.number(), 1);
/// assert_eq!(parts.date_key(), "2020-9-7");
/// ```
pub fn localize(instant: DateTime<Utc>, time_zone: &str) -> Result<LocalParts, AvailabilityError> {
    let tz = parse_timezone(time_zone)?;
    local_datetime(instant, &tz).map(|local| LocalParts::from_naive(&local))
}

/// The wall-clock datetime of `instant` in `tz`.
///
/// Instants near the ends of chrono's range can have no local
/// representation once the zone's offset is applied; those are errors
/// rather than panics.
pub fn local_datetime(instant: DateTime<Utc>, tz: &Tz) -> Result<NaiveDateTime, AvailabilityError> {
    let utc = instant.naive_utc();
    let offset = tz.offset_from_utc_datetime(&utc).fix();
    utc.checked_add_offset(offset).ok_or_else(|| {
        AvailabilityError::Localization(format!(
            "{instant} has no local time in {} (offset {offset})",
            tz.name()
        ))
    })
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz, AvailabilityError> {
    s.parse::<Tz>()
        .map_err(|_| AvailabilityError::InvalidTimezone(format!("'{}'", s)))
}

// ── Tests ───────────────────────────────────────────────────────────────────
