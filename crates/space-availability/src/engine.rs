//! First-slot search for a single day.
//!
//! Slots form a grid anchored on the day's configured opening time: with a
//! 15-minute interval and a 09:00 open, valid starts are 09:00, 09:15, 09:30
//! and so on, whatever the current time. The first start that is no earlier
//! than `now + minimum notice` and strictly before close wins.
//!
//! All comparisons are on minutes since midnight of the space's local day.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::localizer::LocalParts;
use crate::space::Space;
use crate::time::Time;

/// The outcome for one day.
///
/// Serializes as `{}` when nothing is bookable and as
/// `{"open": {...}, "close": {...}}` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OpeningTimesRepr", into = "OpeningTimesRepr")]
pub enum OpeningTimes {
    /// Closed, incompletely configured, or no slot clears the notice window.
    Unavailable,
    /// `open` is the first bookable slot start; `close` is the schedule's
    /// close time, unmodified.
    Available { open: Time, close: Time },
}

impl OpeningTimes {
    pub fn is_available(&self) -> bool {
        matches!(self, OpeningTimes::Available { .. })
    }

    pub fn open(&self) -> Option<Time> {
        match self {
            OpeningTimes::Available { open, .. } => Some(*open),
            OpeningTimes::Unavailable => None,
        }
    }

    pub fn close(&self) -> Option<Time> {
        match self {
            OpeningTimes::Available { close, .. } => Some(*close),
            OpeningTimes::Unavailable => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OpeningTimesRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    open: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    close: Option<Time>,
}

impl From<OpeningTimesRepr> for OpeningTimes {
    fn from(repr: OpeningTimesRepr) -> Self {
        match (repr.open, repr.close) {
            (Some(open), Some(close)) => OpeningTimes::Available { open, close },
            _ => OpeningTimes::Unavailable,
        }
    }
}

impl From<OpeningTimes> for OpeningTimesRepr {
    fn from(times: OpeningTimes) -> Self {
        OpeningTimesRepr {
            open: times.open(),
            close: times.close(),
        }
    }
}

/// Find the first bookable slot on the day described by `now`.
///
/// `now.weekday` selects the schedule and `now.hour`/`now.minute` are the
/// reference time the space's minimum notice is added to. A candidate exactly
/// equal to `now + notice` qualifies.
///
/// Returns [`OpeningTimes::Unavailable`] when the day has no complete
/// schedule or every slot start before close falls inside the notice window.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU32;
/// use space_availability::{find_first_slot, IsoWeekday, LocalParts, OpeningTimes, Space, Time};
///
/// let space = Space::new("Europe/London").with_opening_times(
///     IsoWeekday::MONDAY,
///     Time::new(9, 0).unwrap(),
///     Time::new(17, 0).unwrap(),
/// );
/// let now = LocalParts {
///     year: 2020, month: 9, day: 7,
///     weekday: IsoWeekday::MONDAY,
///     hour: 16, minute: 22,
/// };
///
/// let slot = find_first_slot(&space, &now, NonZeroU32::new(15).unwrap());
/// assert_eq!(
///     slot,
///     OpeningTimes::Available {
///         open: Time::new(16, 30).unwrap(),
///         close: Time::new(17, 0).unwrap(),
///     }
/// );
/// ```
pub fn find_first_slot(space: &Space, now: &LocalParts, slot_interval: NonZeroU32) -> OpeningTimes {
    let Some((open, close)) = space.schedule_for(now.weekday) else {
        return OpeningTimes::Unavailable;
    };

    let minimum_start = now
        .minutes_since_midnight()
        .saturating_add(space.minimum_notice_minutes());

    let first_start = (open.minutes_since_midnight()..close.minutes_since_midnight())
        .step_by(slot_interval.get() as usize)
        .find(|&start| start >= minimum_start)
        .and_then(Time::from_minutes_since_midnight);

    tracing::trace!(
        weekday = %now.weekday,
        %open,
        %close,
        minimum_start,
        found = first_start.is_some(),
        "slot search"
    );

    match first_start {
        Some(start) => OpeningTimes::Available { open: start, close },
        None => OpeningTimes::Unavailable,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
