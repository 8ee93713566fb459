//! Filesystem layout for persisted stores.

use std::path::PathBuf;

/// Where the store files live.
///
/// Both stores sit side by side in one data directory so a backup of
/// that directory captures the whole installation.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for all persisted data.
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nuclide");
        Self { data_dir }
    }
}

impl StoreConfig {
    /// Config rooted at an explicit directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the isotope library file.
    pub fn isotopes_path(&self) -> PathBuf {
        self.data_dir.join("isotopes.json")
    }

    /// Path of the tracked references file.
    pub fn references_path(&self) -> PathBuf {
        self.data_dir.join("references.json")
    }
}
