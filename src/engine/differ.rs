//! Diff computation between desired config state and live system state

use anyhow::Result;

use crate::config::FlatConfig;
use crate::defaults::{PrefBackend, PrefValue};
use crate::registry::{Registry, Setting};

/// A single mismatch between live backend state and the desired config.
///
/// Invariant: `current != desired`, where `None` means the key is unset and
/// compares unequal to any present value.
#[derive(Debug, Clone)]
pub struct ConfigDiff {
    pub key: String,
    pub current: Option<PrefValue>,
    pub desired: PrefValue,
    pub setting: Setting,
}

/// Read every registered key from the backend, normalized to its registered
/// type. Unset keys are skipped.
pub fn read_current_state(registry: &Registry, backend: &dyn PrefBackend) -> Result<FlatConfig> {
    let mut state = Vec::new();

    for setting in registry.settings() {
        if let Some(value) = backend.read(setting.domain, setting.backend_key)? {
            state.push((setting.key.to_string(), value.normalize(setting.value_type)));
        }
    }

    Ok(state)
}

/// Compute the ordered list of settings whose live value differs from the
/// desired config. Read-only; safe to call repeatedly.
///
/// Both sides are normalized by the setting's value type before comparison,
/// so a backend `1` equals a desired `true` for a bool-typed setting. Keys
/// absent from the registry are skipped without a backend call.
pub fn compute_diff(
    registry: &Registry,
    backend: &dyn PrefBackend,
    config: &FlatConfig,
) -> Result<Vec<ConfigDiff>> {
    let mut diffs = Vec::new();

    for (key, desired) in config {
        let Some(setting) = registry.lookup(key) else {
            continue;
        };

        let current = backend
            .read(setting.domain, setting.backend_key)?
            .map(|value| value.normalize(setting.value_type));
        let desired = desired.clone().normalize(setting.value_type);

        if current.as_ref() != Some(&desired) {
            diffs.push(ConfigDiff {
                key: key.clone(),
                current,
                desired,
                setting: *setting,
            });
        }
    }

    Ok(diffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::mock::MemoryBackend;

    fn registry() -> Registry {
        Registry::builtin()
    }

    #[test]
    fn unset_key_produces_absent_diff() {
        // Scenario A: backend has no value, config desires 48
        let backend = MemoryBackend::new();
        let config = vec![("dock.size".to_string(), PrefValue::Int(48))];

        let diffs = compute_diff(&registry(), &backend, &config).unwrap();

        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].key, "dock.size");
        assert_eq!(diffs[0].current, None);
        assert_eq!(diffs[0].desired, PrefValue::Int(48));
    }

    #[test]
    fn int_encoded_bool_compares_equal() {
        // Scenario B: backend stores the bool as 1
        let backend = MemoryBackend::new();
        backend.seed("com.apple.dock", "autohide", PrefValue::Int(1));
        let config = vec![("dock.autohide".to_string(), PrefValue::Bool(true))];

        let diffs = compute_diff(&registry(), &backend, &config).unwrap();

        assert!(diffs.is_empty());
    }

    #[test]
    fn matching_state_yields_empty_diff() {
        let backend = MemoryBackend::new();
        backend.seed("com.apple.dock", "tilesize", PrefValue::Int(48));
        backend.seed("com.apple.screencapture", "type", PrefValue::String("png".into()));
        let config = vec![
            ("dock.size".to_string(), PrefValue::Int(48)),
            ("screenshot.format".to_string(), PrefValue::String("png".into())),
        ];

        let diffs = compute_diff(&registry(), &backend, &config).unwrap();

        assert!(diffs.is_empty());
    }

    #[test]
    fn diff_order_follows_config_order() {
        let backend = MemoryBackend::new();
        let config = vec![
            ("screenshot.format".to_string(), PrefValue::String("png".into())),
            ("dock.size".to_string(), PrefValue::Int(48)),
            ("dock.autohide".to_string(), PrefValue::Bool(true)),
        ];

        let diffs = compute_diff(&registry(), &backend, &config).unwrap();

        let keys: Vec<&str> = diffs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, ["screenshot.format", "dock.size", "dock.autohide"]);
    }

    #[test]
    fn unknown_keys_never_reach_the_backend() {
        let backend = MemoryBackend::new();
        let config = vec![("dock.flux_capacitor".to_string(), PrefValue::Bool(true))];

        let diffs = compute_diff(&registry(), &backend, &config).unwrap();

        assert!(diffs.is_empty());
        assert!(backend.reads.borrow().is_empty());
    }

    #[test]
    fn whole_float_read_as_int_compares_equal() {
        let backend = MemoryBackend::new();
        backend.seed(
            "NSGlobalDomain",
            "com.apple.trackpad.scaling",
            PrefValue::Int(2),
        );
        let config = vec![(
            "trackpad.tracking_speed".to_string(),
            PrefValue::Float(2.0),
        )];

        let diffs = compute_diff(&registry(), &backend, &config).unwrap();

        assert!(diffs.is_empty());
    }

    #[test]
    fn read_current_state_skips_unset_and_normalizes() {
        let backend = MemoryBackend::new();
        backend.seed("com.apple.dock", "autohide", PrefValue::Int(1));
        backend.seed("com.apple.dock", "tilesize", PrefValue::Int(64));

        let state = read_current_state(&registry(), &backend).unwrap();

        assert_eq!(state.len(), 2);
        // Declaration order: dock.size before dock.autohide
        assert_eq!(state[0], ("dock.size".to_string(), PrefValue::Int(64)));
        assert_eq!(
            state[1],
            ("dock.autohide".to_string(), PrefValue::Bool(true))
        );
    }
}
