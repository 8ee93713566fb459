//! Integration test suite for the Nuclide workspace.
//!
//! This crate exercises the full flow a host application drives: seeding
//! the isotope library, calibrating references, resolving targets,
//! building alert schedules and widget timelines, and persisting it all
//! across restarts.

pub mod helpers;
