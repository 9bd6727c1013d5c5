//! macOS defaults backend - read/write preference keys, restart apps
//!
//! The diff/apply engine only ever talks to the [`PrefBackend`] trait, so it
//! can be exercised against an in-memory store without touching the OS. The
//! real implementation shells out to `defaults(1)` and `killall(1)`.

use std::fmt;
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value types a setting can hold, mapped to `defaults write` type flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
}

impl ValueType {
    /// The `defaults write` type flag for this value type.
    pub fn flag(self) -> &'static str {
        match self {
            ValueType::Bool => "-bool",
            ValueType::Int => "-int",
            ValueType::Float => "-float",
            ValueType::String => "-string",
        }
    }
}

/// A preference value as read from or written to the backend.
///
/// Untagged so YAML scalars deserialize directly: `true` is a bool, `48` an
/// integer, `1.5` a float, anything else a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl PrefValue {
    /// Parse raw `defaults read` output. Tries int, then float, then the
    /// boolean words, and falls back to a string.
    pub fn parse(raw: &str) -> PrefValue {
        if let Ok(i) = raw.parse::<i64>() {
            return PrefValue::Int(i);
        }
        if let Ok(x) = raw.parse::<f64>() {
            return PrefValue::Float(x);
        }
        match raw {
            "true" | "yes" => PrefValue::Bool(true),
            "false" | "no" => PrefValue::Bool(false),
            _ => PrefValue::String(raw.to_string()),
        }
    }

    /// Normalize to a setting's registered type before comparison.
    ///
    /// The backend stores booleans as 0/1 integers, and whole floats read
    /// back as integers; both must compare equal to their typed form.
    pub fn normalize(self, ty: ValueType) -> PrefValue {
        match (ty, self) {
            (ValueType::Bool, PrefValue::Int(0)) => PrefValue::Bool(false),
            (ValueType::Bool, PrefValue::Int(1)) => PrefValue::Bool(true),
            (ValueType::Float, PrefValue::Int(i)) => PrefValue::Float(i as f64),
            (_, value) => value,
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(b) => write!(f, "{b}"),
            PrefValue::Int(i) => write!(f, "{i}"),
            PrefValue::Float(x) => write!(f, "{x}"),
            PrefValue::String(s) => write!(f, "{s}"),
        }
    }
}

/// Errors from the preference backend.
#[derive(Debug, Error)]
pub enum DefaultsError {
    /// The subprocess could not be spawned at all
    #[error("failed to execute {command}: {source}")]
    Spawn {
        command: &'static str,
        source: std::io::Error,
    },

    /// `defaults write` ran but reported failure
    #[error("defaults write {domain} {key} failed: {stderr}")]
    WriteFailed {
        domain: String,
        key: String,
        stderr: String,
    },
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, DefaultsError>;

/// The key-value contract the reconciliation engine runs against.
///
/// `read` returns `Ok(None)` for a missing key - absence is a designed
/// return, not an error. `delete` and `restart` are best-effort.
pub trait PrefBackend {
    /// Read a value, or `None` if the key is not set.
    fn read(&self, domain: &str, key: &str) -> Result<Option<PrefValue>>;

    /// Write a value using the encoding for `ty`.
    fn write(&self, domain: &str, key: &str, value: &PrefValue, ty: ValueType) -> Result<()>;

    /// Delete a key. Absence of the key is not an error.
    fn delete(&self, domain: &str, key: &str) -> Result<()>;

    /// Signal an app to restart so it picks up changed preferences.
    /// The app not running is not an error.
    fn restart(&self, app: &str);
}

/// Backend that shells out to `defaults(1)` and `killall(1)`.
pub struct SystemDefaults;

impl PrefBackend for SystemDefaults {
    fn read(&self, domain: &str, key: &str) -> Result<Option<PrefValue>> {
        let output = Command::new("defaults")
            .args(["read", domain, key])
            .output()
            .map_err(|source| DefaultsError::Spawn {
                command: "defaults read",
                source,
            })?;

        if !output.status.success() {
            // Key doesn't exist
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(PrefValue::parse(&stdout)))
    }

    fn write(&self, domain: &str, key: &str, value: &PrefValue, ty: ValueType) -> Result<()> {
        let rendered = value.to_string();
        let output = Command::new("defaults")
            .args(["write", domain, key, ty.flag(), &rendered])
            .output()
            .map_err(|source| DefaultsError::Spawn {
                command: "defaults write",
                source,
            })?;

        if !output.status.success() {
            return Err(DefaultsError::WriteFailed {
                domain: domain.to_string(),
                key: key.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    fn delete(&self, domain: &str, key: &str) -> Result<()> {
        let output = Command::new("defaults")
            .args(["delete", domain, key])
            .output()
            .map_err(|source| DefaultsError::Spawn {
                command: "defaults delete",
                source,
            })?;

        if !output.status.success() {
            // Key might not exist
            log::debug!("defaults delete {domain} {key}: key not present");
        }

        Ok(())
    }

    fn restart(&self, app: &str) {
        match Command::new("killall").arg(app).output() {
            Ok(output) if output.status.success() => log::debug!("restarted {app}"),
            Ok(_) => log::debug!("killall {app}: not running"),
            Err(e) => log::debug!("killall {app} failed: {e}"),
        }
    }
}

/// In-memory backend that records every call, for engine tests.
#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::{DefaultsError, PrefBackend, PrefValue, Result, ValueType};

    #[derive(Default)]
    pub struct MemoryBackend {
        store: RefCell<HashMap<(String, String), PrefValue>>,
        pub reads: RefCell<Vec<(String, String)>>,
        pub writes: RefCell<Vec<(String, String, PrefValue)>>,
        pub restarts: RefCell<Vec<String>>,
        /// Backend keys whose writes should fail
        pub fail_keys: RefCell<Vec<String>>,
    }

    impl MemoryBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed(&self, domain: &str, key: &str, value: PrefValue) {
            self.store
                .borrow_mut()
                .insert((domain.to_string(), key.to_string()), value);
        }

        pub fn fail_on(&self, key: &str) {
            self.fail_keys.borrow_mut().push(key.to_string());
        }

        pub fn get(&self, domain: &str, key: &str) -> Option<PrefValue> {
            self.store
                .borrow()
                .get(&(domain.to_string(), key.to_string()))
                .cloned()
        }
    }

    impl PrefBackend for MemoryBackend {
        fn read(&self, domain: &str, key: &str) -> Result<Option<PrefValue>> {
            self.reads
                .borrow_mut()
                .push((domain.to_string(), key.to_string()));
            Ok(self.get(domain, key))
        }

        fn write(
            &self,
            domain: &str,
            key: &str,
            value: &PrefValue,
            _ty: ValueType,
        ) -> Result<()> {
            if self.fail_keys.borrow().iter().any(|k| k == key) {
                return Err(DefaultsError::WriteFailed {
                    domain: domain.to_string(),
                    key: key.to_string(),
                    stderr: "simulated failure".to_string(),
                });
            }
            self.writes
                .borrow_mut()
                .push((domain.to_string(), key.to_string(), value.clone()));
            self.seed(domain, key, value.clone());
            Ok(())
        }

        fn delete(&self, domain: &str, key: &str) -> Result<()> {
            self.store
                .borrow_mut()
                .remove(&(domain.to_string(), key.to_string()));
            Ok(())
        }

        fn restart(&self, app: &str) {
            self.restarts.borrow_mut().push(app.to_string());
        }
    }
}
