//! Apply pipeline - write differing values and restart affected apps once each

use std::collections::BTreeSet;

use anyhow::Result;

use crate::config::FlatConfig;
use crate::defaults::PrefBackend;
use crate::registry::Registry;

use super::differ::{ConfigDiff, compute_diff};

/// One failed backend write during an apply batch.
#[derive(Debug, Clone)]
pub struct ApplyFailure {
    pub key: String,
    pub error: String,
}

/// Result of an apply run. Identical in shape for dry-run and real apply so
/// callers can share rendering logic.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub diffs: Vec<ConfigDiff>,
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply a flat config to the system.
///
/// In dry-run mode the diffs come back unexecuted - zero writes, zero
/// restarts. Otherwise writes run in config order; a failed write is
/// recorded per key and the batch continues, with no rollback of earlier
/// writes. Each distinct restart target among the successfully written
/// settings is restarted exactly once, after all writes complete.
pub fn apply_config(
    registry: &Registry,
    backend: &dyn PrefBackend,
    config: &FlatConfig,
    dry_run: bool,
) -> Result<ApplyReport> {
    let diffs = compute_diff(registry, backend, config)?;

    if dry_run {
        return Ok(ApplyReport {
            diffs,
            failures: Vec::new(),
        });
    }

    let mut failures = Vec::new();
    let mut restart_targets: BTreeSet<&str> = BTreeSet::new();

    for diff in &diffs {
        let setting = &diff.setting;
        match backend.write(
            setting.domain,
            setting.backend_key,
            &diff.desired,
            setting.value_type,
        ) {
            Ok(()) => {
                if let Some(app) = setting.restart_app {
                    restart_targets.insert(app);
                }
            }
            Err(e) => {
                log::warn!("write failed for {}: {e}", diff.key);
                failures.push(ApplyFailure {
                    key: diff.key.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    for app in restart_targets {
        backend.restart(app);
    }

    Ok(ApplyReport { diffs, failures })
}
