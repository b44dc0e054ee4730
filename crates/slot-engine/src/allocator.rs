//! First-fit placement of desired events into free windows.
//!
//! Events are processed strictly in input order. Each takes the earliest
//! feasible slot at or after its preferred start on its own day, and the
//! consumed window is split into whatever remains. There is no
//! backtracking and no search: an event that would fit under some other
//! ordering may still be dropped under this one. That order dependence is
//! intentional -- callers detect drops by comparing output length to
//! input length.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::availability::AvailabilityMap;
use crate::interval::TimeInterval;

/// Fallback session length when a desired event does not carry one.
pub const DEFAULT_SESSION_MINUTES: u32 = 30;

/// A study session that wants calendar time but has none yet.
///
/// `preferred_start` pins both the day the event belongs to (its UTC date
/// portion) and the earliest acceptable start within that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredEvent {
    pub summary: String,
    pub description: String,
    pub preferred_start: DateTime<Utc>,
    /// Requested length in minutes. Absent or zero on the wire falls back
    /// to [`DEFAULT_SESSION_MINUTES`].
    #[serde(
        default = "default_session_minutes",
        deserialize_with = "minutes_or_default"
    )]
    pub duration_minutes: u32,
}

fn default_session_minutes() -> u32 {
    DEFAULT_SESSION_MINUTES
}

/// Treat an explicit zero on the wire the same as an absent duration.
fn minutes_or_default<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = u32::deserialize(deserializer)?;
    Ok(if minutes == 0 {
        DEFAULT_SESSION_MINUTES
    } else {
        minutes
    })
}

impl DesiredEvent {
    /// The duration the allocator actually reserves. Zero falls back to
    /// the default here too, so programmatically built events behave the
    /// same as deserialized ones.
    pub fn effective_minutes(&self) -> u32 {
        if self.duration_minutes == 0 {
            DEFAULT_SESSION_MINUTES
        } else {
            self.duration_minutes
        }
    }
}

/// A desired event bound to concrete calendar time.
///
/// `end - start` always equals `duration_minutes`, and `[start, end)` lay
/// inside a free window at the moment of assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedEvent {
    pub summary: String,
    pub description: String,
    /// The anchor the event was placed from.
    pub preferred_start: DateTime<Utc>,
    pub duration_minutes: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<&PlacedEvent> for DesiredEvent {
    /// Re-anchor at the slot the event last occupied. A replay then
    /// searches from where the event ended up, not from its original
    /// preference.
    fn from(placed: &PlacedEvent) -> Self {
        DesiredEvent {
            summary: placed.summary.clone(),
            description: placed.description.clone(),
            preferred_start: placed.start,
            duration_minutes: placed.duration_minutes,
        }
    }
}

/// Place each desired event, in order, into the earliest feasible free
/// window on its preferred day.
///
/// The allocator clones `availability` once and consumes capacity only
/// from the clone, so the caller's snapshot survives for later
/// regeneration. Events whose day has no availability entry, and events no
/// remaining window can hold, are silently dropped from the output; the
/// two cases are indistinguishable by design.
///
/// Placement is deterministic: identical events, order, and availability
/// always produce identical output, in input order.
pub fn place_events(events: &[DesiredEvent], availability: &AvailabilityMap) -> Vec<PlacedEvent> {
    let mut remaining = availability.clone();
    let mut placed = Vec::with_capacity(events.len());

    for event in events {
        let date = event.preferred_start.date_naive();
        let Some(windows) = remaining.free_for_mut(date) else {
            // No availability was computed for this day.
            continue;
        };

        let minutes = event.effective_minutes();
        let Some((index, start)) = first_fit(windows, event.preferred_start, minutes) else {
            // Nothing at or after the preferred start can hold the event.
            continue;
        };
        let end = start + Duration::minutes(i64::from(minutes));

        // Replace the consumed window with its unused leading and trailing
        // remainders. They occupy the same position, so the day's ascending
        // order survives without a re-sort.
        let consumed = windows[index];
        let mut remainders = Vec::with_capacity(2);
        if consumed.start < start {
            remainders.push(TimeInterval::new(consumed.start, start));
        }
        if end < consumed.end {
            remainders.push(TimeInterval::new(end, consumed.end));
        }
        windows.splice(index..=index, remainders);

        placed.push(PlacedEvent {
            summary: event.summary.clone(),
            description: event.description.clone(),
            preferred_start: event.preferred_start,
            duration_minutes: minutes,
            start,
            end,
        });
    }

    placed
}

/// Scan a day's free windows for the earliest slot of `minutes` starting
/// at or after `preferred_start`.
///
/// The cursor begins at the preferred start and never moves backward: it
/// jumps forward to a window's start when the window begins later, and the
/// fit test is `cursor + minutes <= window.end`. Returns the index of the
/// window that fits and the start instant within it.
fn first_fit(
    windows: &[TimeInterval],
    preferred_start: DateTime<Utc>,
    minutes: u32,
) -> Option<(usize, DateTime<Utc>)> {
    let needed = Duration::minutes(i64::from(minutes));
    let mut cursor = preferred_start;

    for (index, window) in windows.iter().enumerate() {
        if cursor < window.start {
            cursor = window.start;
        }
        if cursor + needed <= window.end {
            return Some((index, cursor));
        }
    }

    None
}
