//! Fixed-cadence activity sampling for widget-style renderers.

use chrono::{DateTime, TimeDelta, Utc};

use nuclide_core::constants::{WIDGET_TIMELINE_ENTRIES, WIDGET_TIMELINE_STEP_SECS};
use nuclide_core::types::Reference;

use crate::resolver::current_activity;

/// One projected sample of a reference's activity.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    /// Instant the sample is valid for.
    pub at: DateTime<Utc>,
    /// Projected activity in the reference's unit.
    pub activity: f64,
}

/// Project `reference` at `entries` instants spaced `step_seconds` apart,
/// starting at `from` itself.
pub fn sample_activity(
    reference: &Reference,
    from: DateTime<Utc>,
    entries: usize,
    step_seconds: i64,
) -> Vec<TimelineEntry> {
    (0..entries)
        .map(|i| {
            let at = from + TimeDelta::seconds(step_seconds * i as i64);
            TimelineEntry {
                at,
                activity: current_activity(reference, at),
            }
        })
        .collect()
}

/// The timeline a home-screen widget renders: the first entry is the
/// refresh instant, then one sample per minute.
pub fn widget_timeline(reference: &Reference, from: DateTime<Utc>) -> Vec<TimelineEntry> {
    sample_activity(
        reference,
        from,
        WIDGET_TIMELINE_ENTRIES,
        WIDGET_TIMELINE_STEP_SECS,
    )
}
