//! The tracked references: every source being live-tracked, with its
//! calibration snapshot and target list.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nuclide_core::types::Reference;

use crate::error::StoreError;

/// Magic string identifying a reference store file.
pub const REFERENCE_MAGIC: &str = "NURF";
/// Current reference store file format version.
pub const REFERENCE_VERSION: u32 = 1;

/// On-disk document: magic and version wrap the records.
#[derive(Serialize, Deserialize)]
struct ReferenceFile {
    magic: String,
    version: u32,
    references: Vec<Reference>,
}

/// Ordered collection of tracked references.
///
/// A fresh install starts empty; unlike the isotope library there is
/// nothing sensible to seed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceStore {
    references: Vec<Reference>,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All references, in insertion order.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// The first pinned reference. This is the record widget-style
    /// consumers render; pinning more than one is legal and the earliest
    /// in the list wins.
    pub fn pinned(&self) -> Option<&Reference> {
        self.references.iter().find(|r| r.pinned)
    }

    /// The first reference flagged for live tracking, same earliest-wins
    /// rule as [`pinned`](Self::pinned).
    pub fn live(&self) -> Option<&Reference> {
        self.references.iter().find(|r| r.live)
    }

    /// Append a reference.
    pub fn add(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// Replace the record carrying the same id. Returns whether a record
    /// was found; an unknown id leaves the store untouched.
    pub fn update(&mut self, reference: Reference) -> bool {
        match self.references.iter_mut().find(|r| r.id == reference.id) {
            Some(slot) => {
                *slot = reference;
                true
            }
            None => false,
        }
    }

    /// Remove by id. Returns whether the record was present.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.references.len();
        self.references.retain(|r| r.id != id);
        self.references.len() != before
    }

    /// Write the store to `path` as a versioned JSON document.
    pub fn save_to_file(&self, path: &Path) -> Result<(), StoreError> {
        let doc = ReferenceFile {
            magic: REFERENCE_MAGIC.to_string(),
            version: REFERENCE_VERSION,
            references: self.references.clone(),
        };
        let json = serde_json::to_vec_pretty(&doc)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(path, &json).map_err(|e| StoreError::IoError(e.to_string()))?;
        tracing::debug!(
            "saved {} reference(s) to {}",
            self.references.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a store from `path`, rejecting foreign and future files.
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let data = std::fs::read(path).map_err(|e| StoreError::IoError(e.to_string()))?;
        let doc: ReferenceFile = serde_json::from_slice(&data)
            .map_err(|e| StoreError::CorruptedFile(format!("invalid document: {e}")))?;

        if doc.magic != REFERENCE_MAGIC {
            return Err(StoreError::CorruptedFile("invalid magic".into()));
        }
        if doc.version != REFERENCE_VERSION {
            return Err(StoreError::CorruptedFile(format!(
                "unsupported version: {}",
                doc.version
            )));
        }

        tracing::debug!(
            "loaded {} reference(s) from {}",
            doc.references.len(),
            path.display()
        );
        Ok(Self {
            references: doc.references,
        })
    }

    /// Load from `path`, starting empty when the file does not exist yet.
    pub fn load_or_empty(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use nuclide_core::types::{Isotope, Target};
    use nuclide_core::units::ActivityUnit;

    fn vial(name: &str) -> Reference {
        let isotope = Isotope::new("Technetium-99m", "Tc-99m", 6.0067 * 3600.0).unwrap();
        let calibrated = Utc.with_ymd_and_hms(2025, 11, 25, 12, 0, 0).unwrap();
        Reference::new(name, isotope, 100.0, ActivityUnit::MilliCurie, calibrated).unwrap()
    }

    // --- collection operations ---

    #[test]
    fn starts_empty() {
        assert!(ReferenceStore::new().is_empty());
    }

    #[test]
    fn add_update_remove() {
        let mut store = ReferenceStore::new();
        let reference = vial("morning");
        let id = reference.id;
        store.add(reference);
        store.add(vial("evening"));
        assert_eq!(store.len(), 2);

        let mut edited = store.references()[0].clone();
        edited.name = "morning dose".into();
        edited.live = true;
        assert!(store.update(edited));
        assert_eq!(store.references()[0].name, "morning dose");
        assert!(store.references()[0].live);

        assert!(!store.update(vial("stranger")));

        assert!(store.remove(id));
        assert_eq!(store.len(), 1);
        assert!(!store.remove(id));
    }

    #[test]
    fn first_pinned_wins() {
        let mut store = ReferenceStore::new();
        store.add(vial("a"));
        store.add(vial("b"));
        store.add(vial("c"));
        assert!(store.pinned().is_none());

        let mut b = store.references()[1].clone();
        b.pinned = true;
        store.update(b);
        let mut c = store.references()[2].clone();
        c.pinned = true;
        store.update(c);

        assert_eq!(store.pinned().unwrap().name, "b");
    }

    #[test]
    fn first_live_wins() {
        let mut store = ReferenceStore::new();
        store.add(vial("a"));
        store.add(vial("b"));
        assert!(store.live().is_none());

        let mut b = store.references()[1].clone();
        b.live = true;
        store.update(b);

        assert_eq!(store.live().unwrap().name, "b");
    }

    // --- persistence ---

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("references.json");

        let mut store = ReferenceStore::new();
        let mut reference = vial("morning");
        reference.add_target(Target::new("half", 50.0, ActivityUnit::MilliCurie).unwrap());
        reference.pinned = true;
        store.add(reference);
        store.save_to_file(&path).unwrap();

        let loaded = ReferenceStore::load_from_file(&path).unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.pinned().unwrap().targets.len(), 1);
    }

    #[test]
    fn load_or_empty_starts_empty_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReferenceStore::load_or_empty(&dir.path().join("references.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn calibration_instant_survives_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("references.json");

        let mut store = ReferenceStore::new();
        store.add(vial("morning"));
        store.save_to_file(&path).unwrap();

        let loaded = ReferenceStore::load_from_file(&path).unwrap();
        assert_eq!(
            loaded.references()[0].calibration_date,
            store.references()[0].calibration_date
        );
    }

    #[test]
    fn load_wrong_magic_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("references.json");
        std::fs::write(
            &path,
            br#"{"magic": "NUIS", "version": 1, "references": []}"#,
        )
        .unwrap();

        let err = ReferenceStore::load_from_file(&path).unwrap_err();
        assert_eq!(err, StoreError::CorruptedFile("invalid magic".into()));
    }

    #[test]
    fn load_truncated_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("references.json");
        std::fs::write(&path, br#"{"magic": "NURF", "ver"#).unwrap();

        let err = ReferenceStore::load_from_file(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptedFile(_)));
    }
}
