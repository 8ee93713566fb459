//! Model types: isotopes, targets, and tracked references.
//!
//! Activities are `f64` values in the unit stored next to them; half-lives
//! and elapsed times are `f64` seconds. Every record carries an opaque
//! [`Uuid`] so edits and renames never change identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::constants::{SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE};
use crate::error::ModelError;
use crate::units::{self, convert, ActivityUnit};

/// An isotope with a known physical half-life.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Isotope {
    /// Opaque record identity.
    pub id: Uuid,
    /// Full name, e.g. "Technetium-99m".
    pub name: String,
    /// Short symbol, e.g. "Tc-99m".
    pub symbol: String,
    /// Half-life in seconds. Strictly positive.
    pub half_life_seconds: f64,
}

impl Isotope {
    /// Create a validated isotope with a fresh id.
    ///
    /// The half-life must be finite and strictly positive; the decay
    /// engine divides by it without re-checking.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        half_life_seconds: f64,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        let symbol = symbol.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if symbol.trim().is_empty() {
            return Err(ModelError::EmptySymbol);
        }
        if !half_life_seconds.is_finite() || half_life_seconds <= 0.0 {
            return Err(ModelError::InvalidHalfLife(half_life_seconds));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            symbol,
            half_life_seconds,
        })
    }

    /// Half-life formatted in the most readable unit: minutes under an
    /// hour, hours under a day, days otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use nuclide_core::types::Isotope;
    /// let tc99m = Isotope::new("Technetium-99m", "Tc-99m", 6.0067 * 3600.0).unwrap();
    /// assert_eq!(tc99m.half_life_display(), "6.01 hours");
    /// ```
    pub fn half_life_display(&self) -> String {
        units::format_duration(self.half_life_seconds)
    }

    /// The built-in medical isotope library a fresh install is seeded with.
    ///
    /// Each call mints fresh ids; two seeded installs do not share record
    /// identity.
    pub fn defaults() -> Vec<Isotope> {
        let entry = |name: &str, symbol: &str, half_life_seconds: f64| Isotope {
            id: Uuid::new_v4(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            half_life_seconds,
        };
        vec![
            entry("Technetium-99m", "Tc-99m", 6.0067 * SECS_PER_HOUR),
            entry("Fluorine-18", "F-18", 109.77 * SECS_PER_MINUTE),
            entry("Iodine-131", "I-131", 8.02 * SECS_PER_DAY),
            entry("Gallium-68", "Ga-68", 67.71 * SECS_PER_MINUTE),
            entry("Lutetium-177", "Lu-177", 6.647 * SECS_PER_DAY),
            entry("Iodine-123", "I-123", 13.22 * SECS_PER_HOUR),
            entry("Thallium-201", "Tl-201", 72.91 * SECS_PER_HOUR),
        ]
    }
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// A named activity threshold owned by a [`Reference`].
///
/// The threshold keeps the unit it was entered in; consumers convert at
/// the point of comparison.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Target {
    /// Opaque record identity.
    pub id: Uuid,
    /// User label, e.g. "Release limit".
    pub name: String,
    /// Threshold activity, expressed in `unit`. Strictly positive.
    pub target_activity: f64,
    /// Unit the threshold was entered in.
    pub unit: ActivityUnit,
}

impl Target {
    /// Create a validated target with a fresh id.
    pub fn new(
        name: impl Into<String>,
        target_activity: f64,
        unit: ActivityUnit,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if !target_activity.is_finite() || target_activity <= 0.0 {
            return Err(ModelError::InvalidActivity(target_activity));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            target_activity,
            unit,
        })
    }
}

/// A live-tracked source: one calibration measurement plus the targets
/// watched against it.
///
/// The isotope is snapshotted by value at creation. Later edits to the
/// isotope library never retroactively change an existing reference.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Reference {
    /// Opaque record identity.
    pub id: Uuid,
    /// Display name. May be empty.
    pub name: String,
    /// Isotope snapshot taken when the reference was created.
    pub isotope: Isotope,
    /// Activity measured at `calibration_date`, expressed in `unit`.
    pub calibration_activity: f64,
    /// Unit the calibration and all derived values are expressed in.
    pub unit: ActivityUnit,
    /// Instant the calibration activity was measured.
    pub calibration_date: DateTime<Utc>,
    /// Watched thresholds, in entry order.
    pub targets: Vec<Target>,
    /// Selected as the widget data source.
    pub pinned: bool,
    /// Live tracking enabled.
    pub live: bool,
}

impl Reference {
    /// Create a validated reference with no targets and both flags off.
    ///
    /// The name may be empty. The calibration activity must be finite and
    /// non-negative; zero is a legal calibration (the source projects to
    /// zero forever). The isotope half-life is validated again here since
    /// a snapshot can be built by hand.
    pub fn new(
        name: impl Into<String>,
        isotope: Isotope,
        calibration_activity: f64,
        unit: ActivityUnit,
        calibration_date: DateTime<Utc>,
    ) -> Result<Self, ModelError> {
        if !calibration_activity.is_finite() || calibration_activity < 0.0 {
            return Err(ModelError::InvalidCalibration(calibration_activity));
        }
        if !isotope.half_life_seconds.is_finite() || isotope.half_life_seconds <= 0.0 {
            return Err(ModelError::InvalidHalfLife(isotope.half_life_seconds));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            isotope,
            calibration_activity,
            unit,
            calibration_date,
            targets: Vec::new(),
            pinned: false,
            live: false,
        })
    }

    /// Seconds from the calibration instant to `at`, fractional and
    /// negative when `at` precedes the calibration.
    pub fn elapsed_seconds(&self, at: DateTime<Utc>) -> f64 {
        let delta = at - self.calibration_date;
        delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
    }

    /// Append a target, preserving entry order.
    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Remove a target by id. Returns whether it was present.
    pub fn remove_target(&mut self, id: Uuid) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.id != id);
        self.targets.len() != before
    }

    /// Switch the display unit, re-expressing the calibration activity in
    /// the new unit. The physical quantity is unchanged and nothing is
    /// re-measured, so every projection derived from this reference stays
    /// physically identical.
    pub fn set_unit(&mut self, unit: ActivityUnit) {
        self.calibration_activity = convert(self.calibration_activity, self.unit, unit);
        self.unit = unit;
    }
}
