//! Criterion benchmarks for availability aggregation and placement.

use std::hint::black_box;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{
    free_windows, place_events, regenerate, AvailabilityMap, DayAvailability, DesiredEvent,
    TimeInterval,
};

fn at(day: u32, minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, day, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// A dense day: 60 overlapping busy intervals inside an 08:00-18:00 window.
fn dense_busy(day: u32) -> Vec<TimeInterval> {
    (0..60)
        .map(|i| {
            let start = 6 * 60 + i * 12;
            TimeInterval::new(at(day, start), at(day, start + 25))
        })
        .collect()
}

/// Two weeks of availability with fragmented mornings and open afternoons.
fn two_week_map() -> AvailabilityMap {
    AvailabilityMap::from_days((1..=14).map(|day| DayAvailability {
        date: NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
        free: vec![
            TimeInterval::new(at(day, 8 * 60), at(day, 8 * 60 + 45)),
            TimeInterval::new(at(day, 10 * 60), at(day, 11 * 60)),
            TimeInterval::new(at(day, 13 * 60), at(day, 18 * 60)),
        ],
    }))
}

/// Fifty sessions spread across the two weeks, several per day.
fn desired_events() -> Vec<DesiredEvent> {
    (0..50)
        .map(|i| {
            let day = 1 + (i % 14) as u32;
            DesiredEvent {
                summary: format!("Session {}", i + 1),
                description: String::new(),
                preferred_start: at(day, 8 * 60 + (i as i64 / 14) * 30),
                duration_minutes: 30 + (i as u32 % 4) * 15,
            }
        })
        .collect()
}

fn bench_free_windows(c: &mut Criterion) {
    let busy = dense_busy(1);
    let window = TimeInterval::new(at(1, 8 * 60), at(1, 18 * 60));

    c.bench_function("free_windows/dense_day", |b| {
        b.iter(|| free_windows(black_box(&busy), black_box(window)))
    });
}

fn bench_place_events(c: &mut Criterion) {
    let map = two_week_map();
    let events = desired_events();

    c.bench_function("place_events/50_events_14_days", |b| {
        b.iter(|| place_events(black_box(&events), black_box(&map)))
    });
}

fn bench_regenerate(c: &mut Criterion) {
    let map = two_week_map();
    let placed = place_events(&desired_events(), &map);

    c.bench_function("regenerate/replay_placed", |b| {
        b.iter(|| regenerate(black_box(&placed), black_box(&map)))
    });
}

criterion_group!(benches, bench_free_windows, bench_place_events, bench_regenerate);
criterion_main!(benches);
