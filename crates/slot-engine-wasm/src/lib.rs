//! WASM bindings for slot-engine.
//!
//! Exposes availability aggregation, first-fit placement, schedule grouping,
//! regeneration, and plan expansion to JavaScript via `wasm-bindgen`. All
//! complex types are passed as JSON strings in the same camelCase shapes the
//! web client already exchanges with its calendar API.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/lib/slot-engine/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use slot_engine::{
    AvailabilityMap, BusyDay, DayAvailability, DesiredEvent, PlacedEvent, PlanRequest,
    WindowHours,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out, errors as JsValue strings
// ---------------------------------------------------------------------------

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_availability(json: &str) -> Result<AvailabilityMap, JsValue> {
    let days: Vec<DayAvailability> = parse_json(json, "availability")?;
    Ok(AvailabilityMap::from_days(days))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute per-day free windows from per-day busy intervals.
///
/// `days_json` must be a JSON array of `{date, busy: [{start, end}]}`
/// objects with RFC 3339 instants. Window hours default to 09:00-17:00 when
/// either bound is missing or the pair is invalid; they are resolved as
/// wall-clock hours in `timezone`. Returns a JSON array of
/// `{date, free: [{start, end}]}` objects.
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    days_json: &str,
    start_hour: Option<u32>,
    end_hour: Option<u32>,
    timezone: &str,
) -> Result<String, JsValue> {
    let days: Vec<BusyDay> = parse_json(days_json, "busy days")?;
    let hours = WindowHours::resolve(start_hour, end_hour);

    let availability = slot_engine::availability_for_days(&days, hours, timezone)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&availability)
}

/// Place desired events into free windows, first fit, in input order.
///
/// `events_json` is a JSON array of desired events (`{summary, description,
/// preferredStart, durationMinutes}`); `availability_json` is the output of
/// [`compute_availability`]. Returns the placed subset as a JSON array;
/// events that fit nowhere are omitted.
#[wasm_bindgen(js_name = "placeEvents")]
pub fn place_events(events_json: &str, availability_json: &str) -> Result<String, JsValue> {
    let events: Vec<DesiredEvent> = parse_json(events_json, "desired events")?;
    let map = parse_availability(availability_json)?;

    to_json(&slot_engine::place_events(&events, &map))
}

/// Replay a previous placement in reverse order against the original
/// availability, yielding one alternate arrangement.
#[wasm_bindgen(js_name = "regenerateSchedule")]
pub fn regenerate_schedule(placed_json: &str, availability_json: &str) -> Result<String, JsValue> {
    let placed: Vec<PlacedEvent> = parse_json(placed_json, "placed events")?;
    let map = parse_availability(availability_json)?;

    to_json(&slot_engine::regenerate(&placed, &map))
}

/// Group placed events by calendar date for display.
///
/// Returns a JSON object keyed by `YYYY-MM-DD` date strings in ascending
/// order, each value the day's events sorted by start time.
#[wasm_bindgen(js_name = "groupSchedule")]
pub fn group_schedule(placed_json: &str) -> Result<String, JsValue> {
    let placed: Vec<PlacedEvent> = parse_json(placed_json, "placed events")?;

    to_json(&slot_engine::group_by_day(&placed))
}

/// Expand a study-plan request into desired events.
///
/// `request_json` is `{topic, subtopics, lessonDurationMinutes,
/// timePreference}`; `plan_date` is a `YYYY-MM-DD` string and sessions start
/// the day after it, at the preference's target hour in `timezone`.
#[wasm_bindgen(js_name = "buildPlanEvents")]
pub fn build_plan_events(
    request_json: &str,
    plan_date: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    let request: PlanRequest = parse_json(request_json, "plan request")?;
    let date = parse_date(plan_date)?;

    let events = slot_engine::build_plan_events(&request, date, timezone)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&events)
}
