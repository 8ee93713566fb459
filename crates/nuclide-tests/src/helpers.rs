//! Shared test helpers for the integration suite.

use chrono::{DateTime, TimeZone, Utc};

use nuclide_core::types::{Isotope, Reference, Target};
use nuclide_core::units::ActivityUnit;

/// Tc-99m half-life in seconds, fixed to match the seeded library.
pub const TC99M_HALF_LIFE: f64 = 6.0067 * 3600.0;

/// A fixed calibration instant so projections are reproducible.
pub fn calibration_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 25, 12, 0, 0).unwrap()
}

/// A Tc-99m isotope record.
pub fn tc99m() -> Isotope {
    Isotope::new("Technetium-99m", "Tc-99m", TC99M_HALF_LIFE).unwrap()
}

/// A reference calibrated to 100 mCi of Tc-99m at the fixed instant.
pub fn calibrated_vial(name: &str) -> Reference {
    Reference::new(
        name,
        tc99m(),
        100.0,
        ActivityUnit::MilliCurie,
        calibration_instant(),
    )
    .unwrap()
}

/// A millicurie target.
pub fn mci_target(name: &str, activity: f64) -> Target {
    Target::new(name, activity, ActivityUnit::MilliCurie).unwrap()
}
