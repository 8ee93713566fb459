//! # nuclide-store — JSON persistence for the isotope library and the
//! tracked references.
//!
//! Stores are ordered in-memory collections with explicit file
//! persistence. Mutation never touches the disk on its own; callers
//! decide when a changed store is worth a save. Files carry a magic
//! string and format version so a foreign or future file fails loudly
//! instead of loading as garbage.

pub mod config;
pub mod error;
pub mod isotope_store;
pub mod reference_store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use isotope_store::IsotopeStore;
pub use reference_store::ReferenceStore;
