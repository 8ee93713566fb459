//! # nuclide-decay — First-order decay engine and target resolution.
//!
//! Everything in this crate is a pure function of its arguments; there is
//! no shared state, no caching, and no I/O. Hosts re-invoke on their own
//! cadence (a one-second display tick, a widget refresh, a store mutation)
//! and always get an answer consistent with the closed-form decay law:
//! - **Decay math**: activity projection, required-initial solving, and
//!   time-to-threshold solving, all driven by one fixed `ln 2` constant.
//! - **Target resolution**: the nearest unreached target of a reference,
//!   with a stable first-listed tie-break.
//! - **Alert scheduling**: one fire instant per unreached target, ready to
//!   hand to a notification host wholesale.
//! - **Timeline sampling**: fixed-cadence activity projections for
//!   widget-style renderers.

pub mod math;
pub mod resolver;
pub mod schedule;
pub mod timeline;

pub use resolver::{current_activity, next_target, NextTarget};
pub use schedule::{alert_schedule, TargetAlert};
pub use timeline::{sample_activity, widget_timeline, TimelineEntry};
