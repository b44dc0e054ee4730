//! The half-open UTC time range primitive shared across the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time range `[start, end)` in UTC.
///
/// All instants in the engine are absolute UTC; timezone resolution
/// happens once, at the window/plan boundary, and never inside the
/// interval math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of the range in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// True when the range contains no time at all.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True when `self` and `other` share any instant. Adjacent ranges
    /// (one ends exactly where the other starts) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Truncate the range to `window`. Callers filter for overlap first;
    /// a range touching the window only at an edge clamps to empty.
    pub fn clamp_to(&self, window: &TimeInterval) -> TimeInterval {
        TimeInterval {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        }
    }
}
