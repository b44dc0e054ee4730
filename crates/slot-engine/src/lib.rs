//! # slot-engine
//!
//! Deterministic availability aggregation and first-fit placement of study
//! sessions into real calendar free time.
//!
//! The engine answers the two questions a scheduling assistant cannot leave
//! to guesswork: which parts of a day are genuinely free once the
//! calendar's busy intervals are accounted for, and where an ordered list
//! of desired sessions lands inside that free time. Placement is
//! single-pass first fit: deterministic, order-dependent, and intentionally
//! not an optimal packer. Replaying a previous placement in reverse order
//! against the original availability gives the user one alternate
//! arrangement without any search.
//!
//! Everything here is a pure transformation over explicit inputs. The
//! engine never reads a clock, never talks to a calendar provider, and
//! never mutates a caller's availability snapshot.
//!
//! ## Modules
//!
//! - [`availability`] -- busy intervals → sorted free windows within a day window
//! - [`allocator`] -- first-fit placement of desired events into free windows
//! - [`grouping`] -- placed events grouped by calendar date for display
//! - [`regenerate`] -- alternate arrangement via reversed replay
//! - [`plan`] -- study-plan requests expanded into desired events
//! - [`interval`] -- the half-open UTC time range primitive
//! - [`error`] -- error types

pub mod allocator;
pub mod availability;
pub mod error;
pub mod grouping;
pub mod interval;
pub mod plan;
pub mod regenerate;

pub use allocator::{place_events, DesiredEvent, PlacedEvent, DEFAULT_SESSION_MINUTES};
pub use availability::{
    availability_for_days, day_availability, day_window, free_windows, AvailabilityMap, BusyDay,
    DayAvailability, WindowHours,
};
pub use error::{Result, SlotError};
pub use grouping::group_by_day;
pub use interval::TimeInterval;
pub use plan::{build_plan_events, PlanRequest, TimePreference};
pub use regenerate::regenerate;
