//! Error types for space-availability operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Localization error: {0}")]
    Localization(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid space: {0}")]
    InvalidSpace(String),

    #[error("Invalid slot interval: {0} minutes")]
    InvalidSlotInterval(u32),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
