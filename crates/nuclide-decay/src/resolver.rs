//! Next-target resolution for live-tracked references.
//!
//! A pure query over a reference snapshot: project the activity to the
//! queried instant, then find the nearest target the source has not yet
//! decayed past. Hosts poll this on their display cadence; two calls with
//! the same snapshot and instant always agree.
//!
//! Rules:
//! 1. Thresholds are compared in the reference's unit, converting each
//!    target at the point of comparison.
//! 2. Targets at or above the current activity are skipped. Decay never
//!    rises, so they are already reached or were never ahead.
//! 3. Among the rest the earliest arrival instant wins; an exact tie
//!    keeps the target listed first.

use chrono::{DateTime, TimeDelta, Utc};

use nuclide_core::types::Reference;

use crate::math::{activity_at, convert, time_to_reach};

/// The resolved nearest-future target of a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct NextTarget {
    /// Label of the winning target.
    pub name: String,
    /// Its threshold, converted into the reference's unit.
    pub activity: f64,
    /// Wall-clock instant the threshold will be crossed.
    pub reached_at: DateTime<Utc>,
}

/// Activity of `reference` projected to `at`, in the reference's unit.
pub fn current_activity(reference: &Reference, at: DateTime<Utc>) -> f64 {
    activity_at(
        reference.calibration_activity,
        reference.isotope.half_life_seconds,
        reference.elapsed_seconds(at),
    )
}

/// Add fractional seconds to an instant at millisecond precision.
///
/// `None` for non-finite seconds and for arrivals outside the
/// representable date range.
pub(crate) fn instant_after(at: DateTime<Utc>, seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    // Saturating cast; absurd offsets fall out via checked_add_signed.
    let millis = (seconds * 1000.0).round() as i64;
    at.checked_add_signed(TimeDelta::milliseconds(millis))
}

/// Find the nearest target `reference` has not yet reached as of `at`.
///
/// Returns `None` when no target survives the skip rule, so callers
/// render either a complete answer or nothing.
pub fn next_target(reference: &Reference, at: DateTime<Utc>) -> Option<NextTarget> {
    let current = current_activity(reference, at);
    let half_life = reference.isotope.half_life_seconds;

    let mut best: Option<NextTarget> = None;
    for target in &reference.targets {
        let threshold = convert(target.target_activity, target.unit, reference.unit);
        if current <= threshold {
            continue;
        }
        let seconds = time_to_reach(current, threshold, half_life);
        let Some(reached_at) = instant_after(at, seconds) else {
            continue;
        };
        let closer = match &best {
            None => true,
            Some(b) => reached_at < b.reached_at,
        };
        if closer {
            best = Some(NextTarget {
                name: target.name.clone(),
                activity: threshold,
                reached_at,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nuclide_core::types::{Isotope, Target};
    use nuclide_core::units::ActivityUnit;
    use proptest::prelude::*;
    use uuid::Uuid;

    const HALF_LIFE: f64 = 21624.0;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 25, 12, 0, 0).unwrap()
    }

    fn reference_with_targets(activity: f64, unit: ActivityUnit, targets: &[(&str, f64, ActivityUnit)]) -> Reference {
        let isotope = Isotope::new("Technetium-99m", "Tc-99m", HALF_LIFE).unwrap();
        let mut reference = Reference::new("vial", isotope, activity, unit, noon()).unwrap();
        for (name, target_activity, target_unit) in targets {
            reference.add_target(Target::new(*name, *target_activity, *target_unit).unwrap());
        }
        reference
    }

    // --- current_activity ---

    #[test]
    fn current_activity_at_calibration_is_exact() {
        let r = reference_with_targets(100.0, ActivityUnit::MilliCurie, &[]);
        assert_eq!(current_activity(&r, noon()), 100.0);
    }

    #[test]
    fn current_activity_halves_per_half_life() {
        let r = reference_with_targets(100.0, ActivityUnit::MilliCurie, &[]);
        let later = noon() + TimeDelta::seconds(HALF_LIFE as i64);
        assert!((current_activity(&r, later) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn current_activity_before_calibration_back_projects() {
        let r = reference_with_targets(100.0, ActivityUnit::MilliCurie, &[]);
        let earlier = noon() - TimeDelta::seconds(3600);
        assert!(current_activity(&r, earlier) > 100.0);
    }

    // --- instant_after ---

    #[test]
    fn instant_after_rounds_to_milliseconds() {
        let at = noon();
        assert_eq!(
            instant_after(at, 1.2345),
            Some(at + TimeDelta::milliseconds(1235))
        );
        assert_eq!(instant_after(at, -2.0), Some(at - TimeDelta::seconds(2)));
        assert_eq!(instant_after(at, 0.0), Some(at));
    }

    #[test]
    fn instant_after_rejects_unrepresentable() {
        assert_eq!(instant_after(noon(), f64::NAN), None);
        assert_eq!(instant_after(noon(), f64::INFINITY), None);
        assert_eq!(instant_after(noon(), 1e30), None);
    }

    // --- next_target ---

    #[test]
    fn nearest_target_wins() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("thirty", 30.0, ActivityUnit::MilliCurie),
                ("ten", 10.0, ActivityUnit::MilliCurie),
            ],
        );
        let next = next_target(&r, noon()).unwrap();
        assert_eq!(next.name, "thirty");
        assert_eq!(next.activity, 30.0);
        // 100 -> 30 takes ln(10/3)/ln(2) ~ 1.737 half-lives.
        let expected_secs = time_to_reach(100.0, 30.0, HALF_LIFE);
        assert_eq!(next.reached_at, instant_after(noon(), expected_secs).unwrap());
    }

    #[test]
    fn list_order_does_not_matter_for_distinct_thresholds() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("ten", 10.0, ActivityUnit::MilliCurie),
                ("thirty", 30.0, ActivityUnit::MilliCurie),
            ],
        );
        assert_eq!(next_target(&r, noon()).unwrap().name, "thirty");
    }

    #[test]
    fn reached_targets_are_skipped() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("passed", 150.0, ActivityUnit::MilliCurie),
                ("ahead", 40.0, ActivityUnit::MilliCurie),
            ],
        );
        let next = next_target(&r, noon()).unwrap();
        assert_eq!(next.name, "ahead");
    }

    #[test]
    fn no_future_target_resolves_none() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[("passed", 150.0, ActivityUnit::MilliCurie)],
        );
        assert_eq!(next_target(&r, noon()), None);
    }

    #[test]
    fn no_targets_resolves_none() {
        let r = reference_with_targets(100.0, ActivityUnit::MilliCurie, &[]);
        assert_eq!(next_target(&r, noon()), None);
    }

    #[test]
    fn exactly_reached_target_is_skipped() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[("here", 100.0, ActivityUnit::MilliCurie)],
        );
        assert_eq!(next_target(&r, noon()), None);
    }

    #[test]
    fn dead_source_resolves_none() {
        let r = reference_with_targets(
            0.0,
            ActivityUnit::MilliCurie,
            &[("any", 10.0, ActivityUnit::MilliCurie)],
        );
        assert_eq!(next_target(&r, noon()), None);
    }

    #[test]
    fn thresholds_are_compared_in_reference_unit() {
        // Reference in MBq; target entered in mCi. 50 mCi = 1850 MBq.
        let r = reference_with_targets(
            3700.0,
            ActivityUnit::MegaBecquerel,
            &[("half", 50.0, ActivityUnit::MilliCurie)],
        );
        let next = next_target(&r, noon()).unwrap();
        assert_eq!(next.activity, 1850.0);
        let expected_secs = time_to_reach(3700.0, 1850.0, HALF_LIFE);
        assert_eq!(next.reached_at, instant_after(noon(), expected_secs).unwrap());
    }

    #[test]
    fn exact_tie_keeps_first_listed() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("first", 30.0, ActivityUnit::MilliCurie),
                ("second", 30.0, ActivityUnit::MilliCurie),
            ],
        );
        assert_eq!(next_target(&r, noon()).unwrap().name, "first");
    }

    #[test]
    fn cross_unit_tie_keeps_first_listed() {
        // 37 MBq and 1 mCi are the same physical threshold.
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("alpha", 37.0, ActivityUnit::MegaBecquerel),
                ("beta", 1.0, ActivityUnit::MilliCurie),
            ],
        );
        let next = next_target(&r, noon()).unwrap();
        assert_eq!(next.name, "alpha");
        assert_eq!(next.activity, 1.0);
    }

    #[test]
    fn degenerate_threshold_resolves_to_now() {
        // A hand-built target below zero cannot be waited for; the engine
        // answers "now" instead of erroring.
        let mut r = reference_with_targets(100.0, ActivityUnit::MilliCurie, &[]);
        r.targets.push(Target {
            id: Uuid::new_v4(),
            name: "broken".into(),
            target_activity: -5.0,
            unit: ActivityUnit::MilliCurie,
        });
        let next = next_target(&r, noon()).unwrap();
        assert_eq!(next.name, "broken");
        assert_eq!(next.reached_at, noon());
    }

    #[test]
    fn resolution_is_deterministic() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("a", 60.0, ActivityUnit::MilliCurie),
                ("b", 2.0, ActivityUnit::MegaBecquerel),
            ],
        );
        assert_eq!(next_target(&r, noon()), next_target(&r, noon()));
    }

    // --- property tests ---

    proptest! {
        #[test]
        fn prop_resolves_iff_any_target_below_current(
            activity in 1.0f64..1e6,
            fractions in prop::collection::vec(0.01f64..2.0, 1..6),
        ) {
            let targets: Vec<(String, f64)> = fractions
                .iter()
                .enumerate()
                .map(|(i, f)| (format!("t{i}"), activity * f))
                .collect();
            let named: Vec<(&str, f64, ActivityUnit)> = targets
                .iter()
                .map(|(n, a)| (n.as_str(), *a, ActivityUnit::MilliCurie))
                .collect();
            let r = reference_with_targets(activity, ActivityUnit::MilliCurie, &named);

            let any_below = fractions.iter().any(|f| activity * f < activity);
            let resolved = next_target(&r, noon());
            prop_assert_eq!(resolved.is_some(), any_below);
            if let Some(next) = resolved {
                prop_assert!(next.activity < activity);
                prop_assert!(next.reached_at >= noon());
            }
        }

        #[test]
        fn prop_resolution_matches_brute_force_minimum(
            percents in prop::collection::vec(5u32..95, 1..6),
        ) {
            let activity = 500.0;
            let targets: Vec<(String, f64)> = percents
                .iter()
                .enumerate()
                .map(|(i, p)| (format!("t{i}"), activity * f64::from(*p) / 100.0))
                .collect();
            let named: Vec<(&str, f64, ActivityUnit)> = targets
                .iter()
                .map(|(n, a)| (n.as_str(), *a, ActivityUnit::MilliCurie))
                .collect();
            let r = reference_with_targets(activity, ActivityUnit::MilliCurie, &named);

            let next = next_target(&r, noon()).unwrap();
            // The nearest threshold below the current activity is the
            // largest one, decay being monotonic.
            let best = targets
                .iter()
                .map(|(_, a)| *a)
                .fold(f64::MIN, f64::max);
            prop_assert_eq!(next.activity, best);
        }
    }
}
