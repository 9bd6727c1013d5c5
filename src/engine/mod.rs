//! Declarative reconciliation engine
//!
//! `differ` computes what would change; `executor` makes it so. Both run
//! against the [`crate::defaults::PrefBackend`] trait and never touch the
//! registry's presentation grouping.

pub mod differ;
pub mod executor;

pub use differ::{ConfigDiff, compute_diff, read_current_state};
pub use executor::{ApplyFailure, ApplyReport, apply_config};
