//! # space-availability
//!
//! Next-available-slot computation for bookable spaces.
//!
//! Given a space's IANA timezone, weekly opening schedule, and minimum-notice
//! policy, this crate answers "what is the earliest bookable slot on each of
//! the next N days?" as a pure, clock-free query.
//!
//! ## Modules
//!
//! - [`localizer`] — instant + IANA timezone → local calendar parts
//! - [`engine`] — first slot on one day, on a grid anchored to opening time
//! - [`query`] — multi-day orchestration keyed by local date
//! - [`space`] — space configuration and its JSON form
//! - [`time`] — wall-clock times and ISO weekday codes
//! - [`error`] — Error types

pub mod engine;
pub mod error;
pub mod localizer;
pub mod query;
pub mod space;
pub mod time;

pub use engine::{find_first_slot, OpeningTimes};
pub use error::AvailabilityError;
pub use localizer::{localize, LocalParts};
pub use query::{
    fetch_availability, fetch_availability_with_options, AvailabilityResult, QueryOptions,
    DEFAULT_SLOT_INTERVAL,
};
pub use space::{DaySchedule, Space};
pub use time::{IsoWeekday, Time};
