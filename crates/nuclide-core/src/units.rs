//! Activity and time units.
//!
//! Activity conversion goes through a canonical megabecquerel-equivalent
//! value. Every unit carries a fixed positive factor to that canonical
//! form, so conversion is always `value * factor(from) / factor(to)` and
//! there is exactly one place in the workspace that spells the formula.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MBQ_PER_MCI, SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE};
use crate::error::ModelError;

/// Unit of radioactivity.
///
/// Serialized as the display label, which is also the on-disk
/// representation used by the stores.
///
/// # Examples
///
/// ```
/// use nuclide_core::units::ActivityUnit;
/// assert_eq!(ActivityUnit::default(), ActivityUnit::MilliCurie);
/// assert_eq!(ActivityUnit::MegaBecquerel.label(), "MBq");
/// assert_eq!("mci".parse::<ActivityUnit>().unwrap(), ActivityUnit::MilliCurie);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivityUnit {
    /// Millicurie.
    #[default]
    #[serde(rename = "mCi")]
    MilliCurie,
    /// Megabecquerel.
    #[serde(rename = "MBq")]
    MegaBecquerel,
}

impl ActivityUnit {
    /// Every supported unit, in display order.
    pub const ALL: [ActivityUnit; 2] = [ActivityUnit::MilliCurie, ActivityUnit::MegaBecquerel];

    /// Conversion factor from this unit to the canonical MBq equivalent.
    pub fn factor_to_mbq(&self) -> f64 {
        match self {
            Self::MilliCurie => MBQ_PER_MCI,
            Self::MegaBecquerel => 1.0,
        }
    }

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MilliCurie => "mCi",
            Self::MegaBecquerel => "MBq",
        }
    }
}

impl fmt::Display for ActivityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mci" => Ok(Self::MilliCurie),
            "mbq" => Ok(Self::MegaBecquerel),
            _ => Err(ModelError::UnknownActivityUnit(s.to_string())),
        }
    }
}

/// Convert an activity between units.
///
/// Same-unit conversion returns the input bit-for-bit; the factors are
/// never applied in that case.
///
/// # Examples
///
/// ```
/// use nuclide_core::units::{convert, ActivityUnit};
/// let mbq = convert(100.0, ActivityUnit::MilliCurie, ActivityUnit::MegaBecquerel);
/// assert_eq!(mbq, 3700.0);
/// ```
pub fn convert(value: f64, from: ActivityUnit, to: ActivityUnit) -> f64 {
    if from == to {
        return value;
    }
    value * from.factor_to_mbq() / to.factor_to_mbq()
}

/// Unit a duration is entered or displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeUnit {
    Minutes,
    #[default]
    Hours,
    Days,
}

impl TimeUnit {
    /// Every supported unit, smallest first.
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Minutes, TimeUnit::Hours, TimeUnit::Days];

    /// Seconds in one of this unit.
    pub fn seconds(&self) -> f64 {
        match self {
            Self::Minutes => SECS_PER_MINUTE,
            Self::Hours => SECS_PER_HOUR,
            Self::Days => SECS_PER_DAY,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }

    /// The largest unit that divides `seconds` evenly, with the duration
    /// re-expressed in it. Falls back to minutes so the value round-trips
    /// through an edit field without drift.
    ///
    /// # Examples
    ///
    /// ```
    /// use nuclide_core::units::TimeUnit;
    /// assert_eq!(TimeUnit::best_fit(172_800.0), (TimeUnit::Days, 2.0));
    /// assert_eq!(TimeUnit::best_fit(7200.0), (TimeUnit::Hours, 2.0));
    /// ```
    pub fn best_fit(seconds: f64) -> (TimeUnit, f64) {
        if seconds % SECS_PER_DAY == 0.0 {
            (Self::Days, seconds / SECS_PER_DAY)
        } else if seconds % SECS_PER_HOUR == 0.0 {
            (Self::Hours, seconds / SECS_PER_HOUR)
        } else {
            (Self::Minutes, seconds / SECS_PER_MINUTE)
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "minute" | "minutes" => Ok(Self::Minutes),
            "h" | "hour" | "hours" => Ok(Self::Hours),
            "d" | "day" | "days" => Ok(Self::Days),
            _ => Err(ModelError::UnknownTimeUnit(s.to_string())),
        }
    }
}

/// A duration in seconds formatted in the most readable unit: minutes
/// under an hour, hours under a day, days otherwise.
///
/// # Examples
///
/// ```
/// use nuclide_core::units::format_duration;
/// assert_eq!(format_duration(2700.0), "45.0 min");
/// assert_eq!(format_duration(7200.0), "2.00 hours");
/// assert_eq!(format_duration(693_000.0), "8.02 days");
/// ```
pub fn format_duration(seconds: f64) -> String {
    if seconds < SECS_PER_HOUR {
        format!("{:.1} min", seconds / SECS_PER_MINUTE)
    } else if seconds < SECS_PER_DAY {
        format!("{:.2} hours", seconds / SECS_PER_HOUR)
    } else {
        format!("{:.2} days", seconds / SECS_PER_DAY)
    }
}
