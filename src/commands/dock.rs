//! Direct get/set commands for Dock preferences

use anyhow::{Result, bail};

use crate::cli::DockCommand;
use crate::defaults::{PrefBackend, PrefValue, ValueType};
use crate::ui;

use super::{onoff, parse_onoff};

const DOMAIN: &str = "com.apple.dock";
const POSITIONS: [&str; 3] = ["left", "bottom", "right"];

pub fn run(backend: &dyn PrefBackend, cmd: DockCommand) -> Result<()> {
    match cmd {
        DockCommand::Size { value } => size(backend, value),
        DockCommand::Autohide { value } => toggle(
            backend,
            "autohide",
            value.as_deref(),
            "Dock auto-hide enabled",
            "Dock auto-hide disabled",
        ),
        DockCommand::Locked { value } => toggle(
            backend,
            "size-immutable",
            value.as_deref(),
            "Dock size locked",
            "Dock size unlocked",
        ),
        DockCommand::Magnification { value } => toggle(
            backend,
            "magnification",
            value.as_deref(),
            "Dock magnification enabled",
            "Dock magnification disabled",
        ),
        DockCommand::Recents { value } => toggle(
            backend,
            "show-recents",
            value.as_deref(),
            "Recent apps shown",
            "Recent apps hidden",
        ),
        DockCommand::Position { value } => position(backend, value.as_deref()),
        DockCommand::Reset { setting } => reset(backend, setting.as_deref()),
    }
}

fn size(backend: &dyn PrefBackend, value: Option<i64>) -> Result<()> {
    let Some(value) = value else {
        match backend.read(DOMAIN, "tilesize")? {
            Some(current) => println!("{current}"),
            None => println!("64 (default)"),
        }
        return Ok(());
    };

    if !(32..=128).contains(&value) {
        bail!("Size must be between 32 and 128");
    }

    backend.write(DOMAIN, "tilesize", &PrefValue::Int(value), ValueType::Int)?;
    backend.restart("Dock");
    ui::success(&format!("Dock size set to {value}"));
    Ok(())
}

/// Get or set a boolean Dock key, restarting the Dock on change.
fn toggle(
    backend: &dyn PrefBackend,
    key: &str,
    value: Option<&str>,
    on_msg: &str,
    off_msg: &str,
) -> Result<()> {
    let Some(value) = value else {
        println!("{}", onoff(backend.read(DOMAIN, key)?));
        return Ok(());
    };

    let Some(parsed) = parse_onoff(value) else {
        bail!("Use 'on' or 'off', got '{value}'");
    };

    backend.write(DOMAIN, key, &PrefValue::Bool(parsed), ValueType::Bool)?;
    backend.restart("Dock");
    ui::success(if parsed { on_msg } else { off_msg });
    Ok(())
}

fn position(backend: &dyn PrefBackend, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        match backend.read(DOMAIN, "orientation")? {
            Some(current) => println!("{current}"),
            None => println!("bottom"),
        }
        return Ok(());
    };

    let value = value.to_lowercase();
    if !POSITIONS.contains(&value.as_str()) {
        bail!("Use one of: {}", POSITIONS.join(", "));
    }

    backend.write(
        DOMAIN,
        "orientation",
        &PrefValue::String(value.clone()),
        ValueType::String,
    )?;
    backend.restart("Dock");
    ui::success(&format!("Dock position set to {value}"));
    Ok(())
}

/// macOS default values, written back on reset.
fn reset_table() -> Vec<(&'static str, &'static str, ValueType, PrefValue)> {
    vec![
        ("size", "tilesize", ValueType::Int, PrefValue::Int(64)),
        ("autohide", "autohide", ValueType::Bool, PrefValue::Bool(false)),
        ("locked", "size-immutable", ValueType::Bool, PrefValue::Bool(false)),
        ("magnification", "magnification", ValueType::Bool, PrefValue::Bool(false)),
        ("recents", "show-recents", ValueType::Bool, PrefValue::Bool(true)),
        ("position", "orientation", ValueType::String, PrefValue::String("bottom".into())),
    ]
}

fn reset(backend: &dyn PrefBackend, setting: Option<&str>) -> Result<()> {
    let table = reset_table();

    let Some(setting) = setting else {
        for (name, key, ty, default) in &table {
            backend.write(DOMAIN, key, default, *ty)?;
            println!("  {name}: reset to {default}");
        }
        backend.restart("Dock");
        ui::success("All Dock settings reset");
        return Ok(());
    };

    let Some((name, key, ty, default)) = table.iter().find(|(name, ..)| *name == setting) else {
        let names: Vec<&str> = table.iter().map(|(name, ..)| *name).collect();
        bail!(
            "Unknown setting '{setting}'\n  Available: {}",
            names.join(", ")
        );
    };

    backend.write(DOMAIN, key, default, *ty)?;
    backend.restart("Dock");
    ui::success(&format!("Dock {name} reset to {default}"));
    Ok(())
}
