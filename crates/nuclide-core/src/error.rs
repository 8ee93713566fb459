//! Error types for the Nuclide model layer.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("name must not be empty")] EmptyName,
    #[error("symbol must not be empty")] EmptySymbol,
    #[error("half-life must be finite and positive, got {0}")] InvalidHalfLife(f64),
    #[error("target activity must be finite and positive, got {0}")] InvalidActivity(f64),
    #[error("calibration activity must be finite and non-negative, got {0}")] InvalidCalibration(f64),
    #[error("unknown activity unit: {0}")] UnknownActivityUnit(String),
    #[error("unknown time unit: {0}")] UnknownTimeUnit(String),
}
