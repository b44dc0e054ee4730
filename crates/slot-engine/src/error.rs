//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during availability aggregation and placement.
#[derive(Error, Debug)]
pub enum SlotError {
    /// A busy interval whose end precedes its start. The whole day's
    /// computation is rejected because the sweep's frontier relies on
    /// well-formed input.
    #[error("Invalid busy interval: end {end} precedes start {start}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Timezone string is not a valid IANA timezone.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SlotError>;
