//! The isotope library: an ordered collection seeded with the built-in
//! isotopes on first run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nuclide_core::types::Isotope;

use crate::error::StoreError;

/// Magic string identifying an isotope library file.
pub const ISOTOPE_MAGIC: &str = "NUIS";
/// Current isotope library file format version.
pub const ISOTOPE_VERSION: u32 = 1;

/// On-disk document: magic and version wrap the records.
#[derive(Serialize, Deserialize)]
struct IsotopeFile {
    magic: String,
    version: u32,
    isotopes: Vec<Isotope>,
}

/// Ordered isotope library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsotopeStore {
    isotopes: Vec<Isotope>,
}

impl IsotopeStore {
    /// Empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Library pre-filled with the built-in isotopes.
    pub fn with_defaults() -> Self {
        Self {
            isotopes: Isotope::defaults(),
        }
    }

    /// All isotopes, in insertion order.
    pub fn isotopes(&self) -> &[Isotope] {
        &self.isotopes
    }

    pub fn len(&self) -> usize {
        self.isotopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.isotopes.is_empty()
    }

    /// Append an isotope.
    pub fn add(&mut self, isotope: Isotope) {
        self.isotopes.push(isotope);
    }

    /// Replace the record carrying the same id. Returns whether a record
    /// was found; an unknown id leaves the library untouched.
    pub fn update(&mut self, isotope: Isotope) -> bool {
        match self.isotopes.iter_mut().find(|i| i.id == isotope.id) {
            Some(slot) => {
                *slot = isotope;
                true
            }
            None => false,
        }
    }

    /// Remove by id. Returns whether the record was present.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.isotopes.len();
        self.isotopes.retain(|i| i.id != id);
        self.isotopes.len() != before
    }

    /// Find by symbol, case-insensitively.
    pub fn find_symbol(&self, symbol: &str) -> Option<&Isotope> {
        self.isotopes
            .iter()
            .find(|i| i.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Write the library to `path` as a versioned JSON document.
    pub fn save_to_file(&self, path: &Path) -> Result<(), StoreError> {
        let doc = IsotopeFile {
            magic: ISOTOPE_MAGIC.to_string(),
            version: ISOTOPE_VERSION,
            isotopes: self.isotopes.clone(),
        };
        let json = serde_json::to_vec_pretty(&doc)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(path, &json).map_err(|e| StoreError::IoError(e.to_string()))?;
        tracing::debug!("saved {} isotope(s) to {}", self.isotopes.len(), path.display());
        Ok(())
    }

    /// Load a library from `path`, rejecting foreign and future files.
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let data = std::fs::read(path).map_err(|e| StoreError::IoError(e.to_string()))?;
        let doc: IsotopeFile = serde_json::from_slice(&data)
            .map_err(|e| StoreError::CorruptedFile(format!("invalid document: {e}")))?;

        if doc.magic != ISOTOPE_MAGIC {
            return Err(StoreError::CorruptedFile("invalid magic".into()));
        }
        if doc.version != ISOTOPE_VERSION {
            return Err(StoreError::CorruptedFile(format!(
                "unsupported version: {}",
                doc.version
            )));
        }

        tracing::debug!("loaded {} isotope(s) from {}", doc.isotopes.len(), path.display());
        Ok(Self {
            isotopes: doc.isotopes,
        })
    }

    /// Load from `path`, falling back to the built-in defaults when the
    /// file does not exist yet. A present-but-unreadable file is still an
    /// error; only a missing file means "first run".
    pub fn load_or_default(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::with_defaults())
        }
    }
}
