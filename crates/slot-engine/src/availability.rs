//! Free-window aggregation -- busy intervals in, ordered free windows out.
//!
//! Sorts a day's busy intervals by start time and sweeps a monotone
//! frontier across them, emitting the gaps as free windows within a
//! bounded day window. Busy input may arrive unordered, overlapping, or
//! nested; the sweep never produces negative-length gaps and never moves
//! the frontier backward.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;

/// One day's busy input, as supplied by the calendar collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyDay {
    pub date: NaiveDate,
    pub busy: Vec<TimeInterval>,
}

/// One day's free capacity within its query window.
///
/// The `free` list is sorted ascending by start and pairwise
/// non-overlapping, covering exactly the window minus busy time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub free: Vec<TimeInterval>,
}

/// Wall-clock bounds of a day's scheduling window, in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WindowHours {
    /// The 09:00-17:00 window used when a request does not pin its own.
    pub const DEFAULT: WindowHours = WindowHours {
        start_hour: 9,
        end_hour: 17,
    };

    /// Build window bounds from optional request parameters.
    ///
    /// Falls back to [`WindowHours::DEFAULT`] when either bound is missing
    /// or the pair does not describe a forward window (`start >= end`, or
    /// `end > 24`). An end hour of 24 means midnight at the start of the
    /// next day.
    pub fn resolve(start_hour: Option<u32>, end_hour: Option<u32>) -> WindowHours {
        match (start_hour, end_hour) {
            (Some(start), Some(end)) if start < end && end <= 24 => WindowHours {
                start_hour: start,
                end_hour: end,
            },
            _ => WindowHours::DEFAULT,
        }
    }
}

impl Default for WindowHours {
    fn default() -> Self {
        WindowHours::DEFAULT
    }
}

/// Resolve a day's window hours to concrete UTC instants in `timezone`.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if `timezone` is not a valid IANA
/// identifier.
pub fn day_window(date: NaiveDate, hours: WindowHours, timezone: &str) -> Result<TimeInterval> {
    let tz = parse_timezone(timezone)?;
    Ok(TimeInterval::new(
        local_hour(tz, date, hours.start_hour),
        local_hour(tz, date, hours.end_hour),
    ))
}

/// Validate and parse an IANA timezone identifier.
pub(crate) fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))
}

/// Map a wall-clock hour on `date` to a UTC instant.
///
/// Hours erased by a DST spring-forward shift to the next valid hour;
/// hours repeated by a fall-back resolve to the earlier offset. Hour 24
/// wraps to midnight of the following day.
pub(crate) fn local_hour(tz: Tz, date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let (date, hour) = if hour >= 24 {
        (date + Duration::days(1), hour - 24)
    } else {
        (date, hour)
    };
    match tz.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        // The hour does not exist in this timezone on this date.
        LocalResult::None => local_hour(tz, date, hour + 1),
    }
}

/// Compute the free windows within `window`, given a day's busy intervals.
///
/// Busy intervals may arrive unordered and overlapping. Intervals
/// partially outside the window are truncated to the window bounds;
/// intervals entirely outside contribute nothing. The result is sorted
/// ascending by start, pairwise non-overlapping, and covers exactly the
/// window minus busy time. An empty window yields no free windows.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if any busy interval ends before
/// it starts (checked before clipping). The whole day is rejected rather
/// than skipping the malformed entry.
pub fn free_windows(busy: &[TimeInterval], window: TimeInterval) -> Result<Vec<TimeInterval>> {
    for interval in busy {
        if interval.end < interval.start {
            return Err(SlotError::InvalidInterval {
                start: interval.start,
                end: interval.end,
            });
        }
    }

    // Collect intervals clipped to the window, discarding those entirely outside.
    let mut clipped: Vec<TimeInterval> = busy
        .iter()
        .filter(|b| b.start < window.end && b.end > window.start)
        .map(|b| b.clamp_to(&window))
        .collect();

    // Sort by start time (then by end time for stability).
    clipped.sort_by_key(|iv| (iv.start, iv.end));

    let mut free = Vec::new();
    let mut frontier = window.start;

    for period in &clipped {
        if period.start > frontier {
            free.push(TimeInterval::new(frontier, period.start));
        }
        // max() keeps the frontier monotone across nested busy intervals.
        frontier = frontier.max(period.end);
    }

    // Trailing free window after the last busy interval.
    if frontier < window.end {
        free.push(TimeInterval::new(frontier, window.end));
    }

    Ok(free)
}

/// Aggregate one day's busy intervals into its free windows.
///
/// The window hours are resolved to UTC instants on `day.date` in
/// `timezone` and the busy list is swept within them.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` for an unknown timezone and
/// `SlotError::InvalidInterval` for a busy interval ending before it
/// starts; either rejects the whole day.
pub fn day_availability(day: &BusyDay, hours: WindowHours, timezone: &str) -> Result<DayAvailability> {
    let window = day_window(day.date, hours, timezone)?;
    Ok(DayAvailability {
        date: day.date,
        free: free_windows(&day.busy, window)?,
    })
}

/// Aggregate a batch of days, failing on the first malformed one.
pub fn availability_for_days(
    days: &[BusyDay],
    hours: WindowHours,
    timezone: &str,
) -> Result<Vec<DayAvailability>> {
    days.iter()
        .map(|day| day_availability(day, hours, timezone))
        .collect()
}

/// Free windows keyed by calendar date, owned by a single allocation run.
///
/// The allocator consumes capacity destructively, so it always works on a
/// clone of the map it is given; the caller's snapshot is never aliased.
/// That keeps regeneration replayable from the original snapshot no matter
/// how many runs came before.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityMap {
    days: BTreeMap<NaiveDate, Vec<TimeInterval>>,
}

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from per-day availability, merging entries that share
    /// a date.
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = DayAvailability>,
    {
        let mut map = Self::new();
        for day in days {
            map.insert_day(day);
        }
        map
    }

    /// Merge one day's free windows into the map, keeping the day's list
    /// sorted by start time.
    pub fn insert_day(&mut self, day: DayAvailability) {
        let windows = self.days.entry(day.date).or_default();
        windows.extend(day.free);
        windows.sort_by_key(|iv| iv.start);
    }

    /// The free windows remaining on `date`, ascending by start.
    pub fn free_for(&self, date: NaiveDate) -> Option<&[TimeInterval]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    pub(crate) fn free_for_mut(&mut self, date: NaiveDate) -> Option<&mut Vec<TimeInterval>> {
        self.days.get_mut(&date)
    }

    /// Iterate days in ascending calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[TimeInterval])> {
        self.days
            .iter()
            .map(|(date, windows)| (*date, windows.as_slice()))
    }

    /// Flatten back to per-day availability, dates ascending.
    pub fn to_days(&self) -> Vec<DayAvailability> {
        self.days
            .iter()
            .map(|(date, free)| DayAvailability {
                date: *date,
                free: free.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
