//! Alternate arrangement via reversed replay.

use crate::allocator::{place_events, DesiredEvent, PlacedEvent};
use crate::availability::AvailabilityMap;

/// Re-pack previously placed events in reverse order against a fresh copy
/// of the original availability.
///
/// This is a fixed heuristic, not a search: reversing the processing order
/// is the only lever, and each event replays anchored at the slot it last
/// occupied. Because the allocator clones the snapshot per run, repeated
/// regenerations are independent -- every call starts from the same
/// pristine availability, and `original` itself is never modified.
///
/// The input must be the original unmutated snapshot, never a prior run's
/// working copy; a consumed copy would have no room left for anything.
pub fn regenerate(previous: &[PlacedEvent], original: &AvailabilityMap) -> Vec<PlacedEvent> {
    let reversed: Vec<DesiredEvent> = previous.iter().rev().map(DesiredEvent::from).collect();
    place_events(&reversed, original)
}
