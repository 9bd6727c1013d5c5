//! Command implementations
//!
//! `declarative` covers the config-driven flows (apply/diff/export); the rest
//! are direct get/set commands for individual preference areas.

pub mod declarative;
pub mod dock;
pub mod finder;
pub mod keyboard;
pub mod screenshot;
pub mod system;

use crate::defaults::{PrefValue, ValueType};

/// Parse an on/off argument. Accepts the usual boolean spellings.
pub fn parse_onoff(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Render a backend value as "on"/"off" for display. Unset reads as "off".
pub fn onoff(value: Option<PrefValue>) -> &'static str {
    match value.map(|v| v.normalize(ValueType::Bool)) {
        Some(PrefValue::Bool(true)) => "on",
        _ => "off",
    }
}
