//! Group placed events by calendar date for presentation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::allocator::PlacedEvent;

/// Group placed events by the UTC date of their start, each group sorted
/// ascending by start time.
///
/// The `BTreeMap` iterates its keys in ascending calendar order, which is
/// the display order. Read-only: events are cloned, the input is never
/// touched.
pub fn group_by_day(events: &[PlacedEvent]) -> BTreeMap<NaiveDate, Vec<PlacedEvent>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<PlacedEvent>> = BTreeMap::new();

    for event in events {
        grouped
            .entry(event.start.date_naive())
            .or_default()
            .push(event.clone());
    }

    for day in grouped.values_mut() {
        day.sort_by_key(|event| event.start);
    }

    grouped
}
