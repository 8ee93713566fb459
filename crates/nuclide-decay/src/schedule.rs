//! Per-target alert scheduling.
//!
//! Where the resolver answers "what happens next", the schedule answers
//! "when does each target land". Hosts hand the whole set to their
//! notification system, replacing whatever was pending for the reference;
//! ids are stable per reference/target pair so replacement is idempotent.

use chrono::{DateTime, Utc};
use tracing::debug;

use nuclide_core::types::Reference;
use nuclide_core::units::ActivityUnit;

use crate::math::{convert, time_to_reach};
use crate::resolver::{current_activity, instant_after};

/// A scheduled alert for one target of one reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAlert {
    /// Stable identifier, `"{reference_id}-{target_id}"`.
    pub id: String,
    /// Label of the target.
    pub target_name: String,
    /// Threshold in the unit it was entered in. Alert text quotes the
    /// value the user typed, not a converted one.
    pub target_activity: f64,
    /// Unit the threshold was entered in.
    pub unit: ActivityUnit,
    /// Symbol of the reference's isotope.
    pub isotope_symbol: String,
    /// Instant the alert should fire.
    pub fire_at: DateTime<Utc>,
}

impl TargetAlert {
    /// Alert headline.
    pub fn title(&self) -> String {
        format!("Target Reached: {}", self.target_name)
    }

    /// Alert body.
    pub fn body(&self) -> String {
        format!(
            "{} has decayed to {:.2} {}.",
            self.isotope_symbol, self.target_activity, self.unit
        )
    }
}

/// Build the full alert set for `reference` as of `at`, in target list
/// order.
///
/// Targets already at or past their threshold get no alert, and neither
/// does anything whose fire instant is not strictly after `at`; firing
/// "now" for a level that was crossed at the query instant reads as
/// noise, not news.
pub fn alert_schedule(reference: &Reference, at: DateTime<Utc>) -> Vec<TargetAlert> {
    let current = current_activity(reference, at);
    let half_life = reference.isotope.half_life_seconds;

    let mut alerts = Vec::new();
    for target in &reference.targets {
        let threshold = convert(target.target_activity, target.unit, reference.unit);
        if current <= threshold {
            continue;
        }
        let seconds = time_to_reach(current, threshold, half_life);
        let Some(fire_at) = instant_after(at, seconds) else {
            continue;
        };
        if fire_at <= at {
            continue;
        }
        alerts.push(TargetAlert {
            id: format!("{}-{}", reference.id, target.id),
            target_name: target.name.clone(),
            target_activity: target.target_activity,
            unit: target.unit,
            isotope_symbol: reference.isotope.symbol.clone(),
            fire_at,
        });
    }
    debug!(reference = %reference.id, alerts = alerts.len(), "schedule: built alert set");
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::next_target;
    use chrono::{TimeZone, TimeDelta};
    use nuclide_core::types::{Isotope, Target};
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

    // --- alert_schedule ---

    #[test]
    fn one_alert_per_unreached_target() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("passed", 150.0, ActivityUnit::MilliCurie),
                ("soon", 50.0, ActivityUnit::MilliCurie),
                ("later", 10.0, ActivityUnit::MilliCurie),
            ],
        );
        let alerts = alert_schedule(&r, noon());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].target_name, "soon");
        assert_eq!(alerts[1].target_name, "later");
        assert!(alerts[0].fire_at < alerts[1].fire_at);
    }

    #[test]
    fn alerts_keep_list_order_not_fire_order() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("later", 10.0, ActivityUnit::MilliCurie),
                ("soon", 50.0, ActivityUnit::MilliCurie),
            ],
        );
        let alerts = alert_schedule(&r, noon());
        assert_eq!(alerts[0].target_name, "later");
        assert_eq!(alerts[1].target_name, "soon");
        assert!(alerts[0].fire_at > alerts[1].fire_at);
    }

    #[test]
    fn alert_ids_concatenate_reference_and_target() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[("soon", 50.0, ActivityUnit::MilliCurie)],
        );
        let alerts = alert_schedule(&r, noon());
        assert_eq!(alerts[0].id, format!("{}-{}", r.id, r.targets[0].id));
    }

    #[test]
    fn alert_text() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[("Release limit", 50.0, ActivityUnit::MilliCurie)],
        );
        let alert = &alert_schedule(&r, noon())[0];
        assert_eq!(alert.title(), "Target Reached: Release limit");
        assert_eq!(alert.body(), "Tc-99m has decayed to 50.00 mCi.");
    }

    #[test]
    fn alert_body_quotes_entry_unit() {
        // Reference tracked in MBq, threshold entered in mCi. The alert
        // quotes the entered value.
        let r = reference_with_targets(
            3700.0,
            ActivityUnit::MegaBecquerel,
            &[("half", 50.0, ActivityUnit::MilliCurie)],
        );
        let alert = &alert_schedule(&r, noon())[0];
        assert_eq!(alert.body(), "Tc-99m has decayed to 50.00 mCi.");
        assert_eq!(alert.target_activity, 50.0);
        assert_eq!(alert.unit, ActivityUnit::MilliCurie);
    }

    #[test]
    fn immediate_fire_instants_are_dropped() {
        // A degenerate threshold maps to "now", which is never scheduled.
        let mut r = reference_with_targets(100.0, ActivityUnit::MilliCurie, &[]);
        r.targets.push(Target {
            id: Uuid::new_v4(),
            name: "broken".into(),
            target_activity: -5.0,
            unit: ActivityUnit::MilliCurie,
        });
        assert!(alert_schedule(&r, noon()).is_empty());
    }

    #[test]
    fn no_targets_no_alerts() {
        let r = reference_with_targets(100.0, ActivityUnit::MilliCurie, &[]);
        assert!(alert_schedule(&r, noon()).is_empty());
    }

    #[test]
    fn dead_source_schedules_nothing() {
        let r = reference_with_targets(
            0.0,
            ActivityUnit::MilliCurie,
            &[("any", 10.0, ActivityUnit::MilliCurie)],
        );
        assert!(alert_schedule(&r, noon()).is_empty());
    }

    #[test]
    fn earliest_alert_agrees_with_resolver() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[
                ("later", 10.0, ActivityUnit::MilliCurie),
                ("soon", 50.0, ActivityUnit::MilliCurie),
                ("passed", 300.0, ActivityUnit::MilliCurie),
            ],
        );
        let alerts = alert_schedule(&r, noon());
        let earliest = alerts.iter().min_by_key(|a| a.fire_at).unwrap();
        let next = next_target(&r, noon()).unwrap();
        assert_eq!(earliest.fire_at, next.reached_at);
        assert_eq!(earliest.target_name, next.name);
    }

    #[test]
    fn rescheduling_is_idempotent() {
        let r = reference_with_targets(
            100.0,
            ActivityUnit::MilliCurie,
            &[("soon", 50.0, ActivityUnit::MilliCurie)],
        );
        let at = noon() + TimeDelta::minutes(5);
        assert_eq!(alert_schedule(&r, at), alert_schedule(&r, at));
    }

    // --- property tests ---

    proptest! {
        #[test]
        fn prop_alerts_fire_strictly_in_the_future(
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

            let alerts = alert_schedule(&r, noon());
            prop_assert_eq!(alerts.len(), percents.len());
            for alert in &alerts {
                prop_assert!(alert.fire_at > noon());
            }
            let mut ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), alerts.len());
        }
    }
}
