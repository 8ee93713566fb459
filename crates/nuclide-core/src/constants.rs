//! Engine constants. All half-lives and elapsed times are in seconds.

/// Natural log of 2 as fixed in the decay formulas.
///
/// Kept as an explicit literal rather than `std::f64::consts::LN_2` so the
/// projection math produces identical bits on every platform the engine
/// runs on. Do not "fix" this to the std constant.
pub const LN2: f64 = 0.69314718056;

/// Megabecquerels per millicurie. 1 Ci = 3.7e10 Bq exactly, so the factor
/// is exact and conversion between the two units loses no precision.
pub const MBQ_PER_MCI: f64 = 37.0;

pub const SECS_PER_MINUTE: f64 = 60.0;
pub const SECS_PER_HOUR: f64 = 3600.0;
pub const SECS_PER_DAY: f64 = 86400.0;

/// Number of samples in a home-screen widget timeline.
///
/// # Examples
///
/// ```
/// use nuclide_core::constants::{WIDGET_TIMELINE_ENTRIES, WIDGET_TIMELINE_STEP_SECS};
/// // One entry per minute covering a quarter hour.
/// let span = (WIDGET_TIMELINE_ENTRIES as i64 - 1) * WIDGET_TIMELINE_STEP_SECS;
/// assert_eq!(span, 840);
/// ```
pub const WIDGET_TIMELINE_ENTRIES: usize = 15;
/// Spacing between widget timeline samples, in seconds.
pub const WIDGET_TIMELINE_STEP_SECS: i64 = 60;
