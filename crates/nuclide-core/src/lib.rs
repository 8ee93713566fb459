//! # nuclide-core
//! Foundation types and units for the Nuclide decay tracker.

pub mod constants;
pub mod error;
pub mod types;
pub mod units;
