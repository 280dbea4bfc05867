//! Multi-day availability query.
//!
//! The entry point for consumers: given a space, a number of days and the
//! current instant, produce the first bookable slot for each local calendar
//! day starting today, keyed by `"YYYY-M-D"` in day order.
//!
//! Day `0` uses the real local time of `now` as its notice reference. Every
//! later day is computed from its own local midnight, so the result for those
//! days depends only on the calendar date of `now`. Days are added on the
//! space's local calendar, not as multiples of 24 hours, which keeps the
//! sequence correct across DST transitions.

use std::num::NonZeroU32;

use chrono::{DateTime, Days, Utc};
use indexmap::IndexMap;

use crate::engine::{find_first_slot, OpeningTimes};
use crate::error::AvailabilityError;
use crate::localizer::{local_datetime, LocalParts};
use crate::space::Space;

/// Slot length used when none is configured: 15 minutes.
pub const DEFAULT_SLOT_INTERVAL: NonZeroU32 = NonZeroU32::new(15).unwrap();

/// Day-keyed availability, in ascending day order.
pub type AvailabilityResult = IndexMap<String, OpeningTimes>;

/// Options for [`fetch_availability_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Length of a bookable slot.
    pub slot_interval: NonZeroU32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            slot_interval: DEFAULT_SLOT_INTERVAL,
        }
    }
}

impl QueryOptions {
    /// Options with a slot length of `minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::InvalidSlotInterval`] for zero.
    pub fn with_slot_minutes(minutes: u32) -> Result<Self, AvailabilityError> {
        let slot_interval =
            NonZeroU32::new(minutes).ok_or(AvailabilityError::InvalidSlotInterval(minutes))?;
        Ok(QueryOptions { slot_interval })
    }
}

/// Fetch upcoming availability for `space` using 15-minute slots.
///
/// See [`fetch_availability_with_options`].
pub fn fetch_availability(
    space: &Space,
    number_of_days: u32,
    now: DateTime<Utc>,
) -> Result<AvailabilityResult, AvailabilityError> {
    fetch_availability_with_options(space, number_of_days, now, &QueryOptions::default())
}

/// Fetch upcoming availability for `space`.
///
/// # Arguments
///
/// * `space` — The space to compute availability for
/// * `number_of_days` — How many local days, starting with today, to include
/// * `now` — The reference instant; the library never reads the clock itself
/// * `options` — Slot length
///
/// # Returns
///
/// Exactly `number_of_days` entries. Days with nothing bookable map to
/// [`OpeningTimes::Unavailable`]; that is a successful answer, not an error.
///
/// # Errors
///
/// Returns [`AvailabilityError::InvalidTimezone`] if the space's timezone is
/// unknown, or [`AvailabilityError::Localization`] if `now` or a requested
/// day falls outside the representable calendar range. No partial result is returned.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use space_availability::{fetch_availability, IsoWeekday, Space, Time};
///
/// let space = Space::new("Europe/London").with_opening_times(
///     IsoWeekday::MONDAY,
///     Time::new(9, 0).unwrap(),
///     Time::new(17, 0).unwrap(),
/// );
/// let now = Utc.with_ymd_and_hms(2020, 9, 7, 15, 22, 0).unwrap();
///
/// let availability = fetch_availability(&space, 2, now).unwrap();
/// let keys: Vec<&str> = availability.keys().map(String::as_str).collect();
/// assert_eq!(keys, ["2020-9-7", "2020-9-8"]);
/// assert_eq!(availability["2020-9-7"].open(), Some(Time::new(16, 30).unwrap()));
/// // Tuesday has no opening hours configured
/// assert!(!availability["2020-9-8"].is_available());
/// ```
pub fn fetch_availability_with_options(
    space: &Space,
    number_of_days: u32,
    now: DateTime<Utc>,
    options: &QueryOptions,
) -> Result<AvailabilityResult, AvailabilityError> {
    let tz = space.timezone()?;

    tracing::debug!(
        time_zone = %space.time_zone,
        number_of_days,
        %now,
        slot_interval = options.slot_interval.get(),
        "fetching availability"
    );

    let local_now = local_datetime(now, &tz)?;
    let today = LocalParts::from_naive(&local_now);
    let today_date = local_now.date();

    let mut availability = AvailabilityResult::with_capacity(number_of_days as usize);

    for offset in 0..number_of_days {
        // Later days ignore the current time of day
        let parts = if offset == 0 {
            today
        } else {
            let date = today_date
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| {
                    AvailabilityError::Localization(format!(
                        "{today_date} + {offset} days is out of range"
                    ))
                })?;
            LocalParts::start_of(date)
        };

        let times = find_first_slot(space, &parts, options.slot_interval);

        tracing::debug!(
            date = %parts.date_key(),
            weekday = %parts.weekday,
            available = times.is_available(),
            "day resolved"
        );

        availability.insert(parts.date_key(), times);
    }

    Ok(availability)
}

// ── Tests ───────────────────────────────────────────────────────────────────
