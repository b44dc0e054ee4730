//! Expand a study-plan request into desired events, one session per subtopic.
//!
//! The conversational layer collects a topic, an ordered list of
//! subtopics, a session length, and a time-of-day preference. This module
//! turns that into the desired-event list the allocator consumes: session
//! N is anchored N days after the plan date at the preference's target
//! hour, resolved in the user's timezone. The plan date is an explicit
//! input -- the engine never reads a clock.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::allocator::DesiredEvent;
use crate::availability::{local_hour, parse_timezone, WindowHours};
use crate::error::Result;

/// Preferred time of day for study sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl TimePreference {
    /// The wall-clock hour sessions aim to start at.
    pub fn target_hour(self) -> u32 {
        match self {
            TimePreference::Morning => 8,
            TimePreference::Afternoon => 12,
            TimePreference::Evening => 17,
        }
    }

    /// The four-hour window queried for availability around the target hour.
    pub fn window_hours(self) -> WindowHours {
        WindowHours {
            start_hour: self.target_hour(),
            end_hour: self.target_hour() + 4,
        }
    }
}

/// A study-plan request as collected by the conversational layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub topic: String,
    /// Ordered subtopics, one per planned session day.
    pub subtopics: Vec<String>,
    /// Requested session length in minutes. Zero falls back to the
    /// allocator's default at placement time.
    #[serde(default)]
    pub lesson_duration_minutes: u32,
    #[serde(default)]
    pub time_preference: TimePreference,
}

/// Expand a plan into desired events.
///
/// Session `i` (0-based) is anchored `i + 1` days after `plan_date` at the
/// preference's target hour in `timezone`, so the plan always starts
/// tomorrow. The summary numbers the day within the plan; the description
/// carries the subtopic, or a positional placeholder when the subtopic
/// string is empty, so the plan keeps one session per requested day.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if `timezone` is not a valid IANA
/// identifier.
pub fn build_plan_events(
    request: &PlanRequest,
    plan_date: NaiveDate,
    timezone: &str,
) -> Result<Vec<DesiredEvent>> {
    let tz = parse_timezone(timezone)?;
    let hour = request.time_preference.target_hour();

    let events = request
        .subtopics
        .iter()
        .enumerate()
        .map(|(i, subtopic)| {
            let day = plan_date + Duration::days(i as i64 + 1);
            DesiredEvent {
                summary: format!("Day {} of {}", i + 1, request.topic),
                description: if subtopic.is_empty() {
                    format!("Subtopic #{}", i + 1)
                } else {
                    subtopic.clone()
                },
                preferred_start: local_hour(tz, day, hour),
                duration_minutes: request.lesson_duration_minutes,
            }
        })
        .collect();

    Ok(events)
}
