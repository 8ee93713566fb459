//! Closed-form first-order decay math.
//!
//! All four functions are pure mappings over `f64` seconds and activities.
//!
//! Rules:
//! 1. The decay constant is always `LN2 / half_life` with the fixed
//!    [`LN2`] literal; nothing in the workspace spells the exponent twice.
//! 2. Half-lives must be finite and strictly positive. Callers own that
//!    validation (the model constructors enforce it) and it is not
//!    repeated here.
//! 3. Negative elapsed times are legal everywhere and back-project.

use nuclide_core::constants::LN2;

pub use nuclide_core::units::convert;

/// Fraction of activity remaining after `elapsed_seconds`:
/// `exp(-LN2 / half_life * elapsed_seconds)`.
///
/// Exactly `1.0` at zero elapsed time, `0.5` after one half-life, above
/// `1.0` for negative elapsed times.
pub fn decay_factor(half_life: f64, elapsed_seconds: f64) -> f64 {
    (-(LN2 / half_life) * elapsed_seconds).exp()
}

/// Activity remaining after `elapsed_seconds` of decay from `a0`.
///
/// `a0 * decay_factor(half_life, elapsed_seconds)`. Zero stays zero for
/// every elapsed time.
pub fn activity_at(a0: f64, half_life: f64, elapsed_seconds: f64) -> f64 {
    a0 * decay_factor(half_life, elapsed_seconds)
}

/// Activity required at the start of an interval so that
/// `target_activity` remains after `duration_seconds`.
///
/// Inverse of [`activity_at`] solved for the starting activity:
/// `target_activity * exp(LN2 / half_life * duration_seconds)`. A
/// negative duration answers "what was it before the measurement" and
/// yields less than `target_activity`.
pub fn initial_activity_for(target_activity: f64, half_life: f64, duration_seconds: f64) -> f64 {
    target_activity * ((LN2 / half_life) * duration_seconds).exp()
}

/// Seconds until `current_activity` decays to `target_activity`.
///
/// `ln(current / target) * half_life / LN2`, with two defined edges:
/// - Either activity non-positive: `0.0`. The logarithm has no answer
///   there and callers treat "no wait" as the safe reading.
/// - Target above current: negative seconds, i.e. the level was passed
///   that long ago.
pub fn time_to_reach(current_activity: f64, target_activity: f64, half_life: f64) -> f64 {
    if current_activity <= 0.0 || target_activity <= 0.0 {
        return 0.0;
    }
    (current_activity / target_activity).ln() * half_life / LN2
}
