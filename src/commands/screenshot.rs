//! Direct get/set commands for screenshot preferences
//!
//! Shadow is stored inverted (`disable-shadow`), and the floating thumbnail
//! defaults to enabled when the key is unset.

use std::fs;

use anyhow::{Result, bail};

use crate::cli::ScreenshotCommand;
use crate::defaults::{PrefBackend, PrefValue, ValueType};
use crate::paths;
use crate::ui;

const DOMAIN: &str = "com.apple.screencapture";
const FORMATS: [&str; 5] = ["png", "jpg", "gif", "pdf", "tiff"];

pub fn run(backend: &dyn PrefBackend, cmd: ScreenshotCommand) -> Result<()> {
    match cmd {
        ScreenshotCommand::Location { path } => location(backend, path.as_deref()),
        ScreenshotCommand::Format { format } => set_format(backend, format.as_deref()),
        ScreenshotCommand::Shadow { enable, disable } => {
            shadow(backend, flag_pair(enable, disable))
        }
        ScreenshotCommand::Thumbnail { enable, disable } => {
            thumbnail(backend, flag_pair(enable, disable))
        }
        ScreenshotCommand::Reset {
            location,
            format,
            shadow,
            thumbnail,
            all,
        } => reset(backend, location, format, shadow, thumbnail, all),
    }
}

/// Collapse --enable/--disable into a tri-state. clap already rejects both.
fn flag_pair(enable: bool, disable: bool) -> Option<bool> {
    match (enable, disable) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn location(backend: &dyn PrefBackend, path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        match backend.read(DOMAIN, "location")? {
            Some(current) => println!("Screenshot location: {current}"),
            None => println!("Screenshot location: ~/Desktop (default)"),
        }
        return Ok(());
    };

    let expanded = paths::expand(path);
    if !expanded.exists() {
        bail!("Directory does not exist: {}", expanded.display());
    }
    if !expanded.is_dir() {
        bail!("Path is not a directory: {}", expanded.display());
    }
    let resolved = fs::canonicalize(&expanded).unwrap_or(expanded);

    backend.write(
        DOMAIN,
        "location",
        &PrefValue::String(resolved.display().to_string()),
        ValueType::String,
    )?;
    backend.restart("SystemUIServer");
    ui::success(&format!("Screenshot location set to {}", resolved.display()));
    Ok(())
}

fn set_format(backend: &dyn PrefBackend, format: Option<&str>) -> Result<()> {
    let Some(format) = format else {
        match backend.read(DOMAIN, "type")? {
            Some(current) => println!("Screenshot format: {current}"),
            None => println!("Screenshot format: png (default)"),
        }
        return Ok(());
    };

    let format = format.to_lowercase();
    if !FORMATS.contains(&format.as_str()) {
        bail!("Invalid format. Choose from: {}", FORMATS.join(", "));
    }

    backend.write(
        DOMAIN,
        "type",
        &PrefValue::String(format.clone()),
        ValueType::String,
    )?;
    backend.restart("SystemUIServer");
    ui::success(&format!("Screenshot format set to {format}"));
    Ok(())
}

fn shadow(backend: &dyn PrefBackend, enable: Option<bool>) -> Result<()> {
    let Some(enable) = enable else {
        let disabled = matches!(
            backend
                .read(DOMAIN, "disable-shadow")?
                .map(|v| v.normalize(ValueType::Bool)),
            Some(PrefValue::Bool(true))
        );
        println!(
            "Window shadow is currently {}",
            if disabled { "disabled" } else { "enabled" }
        );
        return Ok(());
    };

    // Inverted key
    backend.write(
        DOMAIN,
        "disable-shadow",
        &PrefValue::Bool(!enable),
        ValueType::Bool,
    )?;
    backend.restart("SystemUIServer");
    ui::success(&format!(
        "Window shadow is now {}",
        if enable { "enabled" } else { "disabled" }
    ));
    Ok(())
}

fn thumbnail(backend: &dyn PrefBackend, enable: Option<bool>) -> Result<()> {
    let Some(enable) = enable else {
        // Unset means enabled
        let enabled = !matches!(
            backend
                .read(DOMAIN, "show-thumbnail")?
                .map(|v| v.normalize(ValueType::Bool)),
            Some(PrefValue::Bool(false))
        );
        println!(
            "Floating thumbnail is currently {}",
            if enabled { "enabled" } else { "disabled" }
        );
        return Ok(());
    };

    backend.write(
        DOMAIN,
        "show-thumbnail",
        &PrefValue::Bool(enable),
        ValueType::Bool,
    )?;
    backend.restart("SystemUIServer");
    ui::success(&format!(
        "Floating thumbnail is now {}",
        if enable { "enabled" } else { "disabled" }
    ));
    Ok(())
}

fn reset(
    backend: &dyn PrefBackend,
    location: bool,
    format: bool,
    shadow: bool,
    thumbnail: bool,
    all: bool,
) -> Result<()> {
    if !(location || format || shadow || thumbnail || all) {
        bail!("Must specify at least one flag or -a for all");
    }

    if location || all {
        let desktop = dirs::home_dir()
            .map(|home| home.join("Desktop"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        backend.write(
            DOMAIN,
            "location",
            &PrefValue::String(desktop.display().to_string()),
            ValueType::String,
        )?;
        println!("Screenshot location: reset to ~/Desktop");
    }

    if format || all {
        backend.write(
            DOMAIN,
            "type",
            &PrefValue::String("png".into()),
            ValueType::String,
        )?;
        println!("Screenshot format: reset to png");
    }

    if shadow || all {
        backend.write(
            DOMAIN,
            "disable-shadow",
            &PrefValue::Bool(false),
            ValueType::Bool,
        )?;
        println!("Window shadow: reset to enabled");
    }

    if thumbnail || all {
        backend.write(
            DOMAIN,
            "show-thumbnail",
            &PrefValue::Bool(true),
            ValueType::Bool,
        )?;
        println!("Floating thumbnail: reset to enabled");
    }

    backend.restart("SystemUIServer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::mock::MemoryBackend;

    #[test]
    fn format_validates_and_lowercases() {
        let backend = MemoryBackend::new();
        set_format(&backend, Some("JPG")).unwrap();
        assert_eq!(
            backend.get(DOMAIN, "type"),
            Some(PrefValue::String("jpg".into()))
        );
        assert!(set_format(&backend, Some("bmp")).is_err());
    }

    #[test]
    fn location_rejects_missing_directories() {
        let backend = MemoryBackend::new();
        assert!(location(&backend, Some("/nonexistent/screenshots")).is_err());
        assert!(backend.writes.borrow().is_empty());
    }

    #[test]
    fn location_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();
        let backend = MemoryBackend::new();
        assert!(location(&backend, Some(file.to_str().unwrap())).is_err());
    }

    #[test]
    fn location_accepts_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let backend = MemoryBackend::new();
        location(&backend, Some(dir.path().to_str().unwrap())).unwrap();
        assert_eq!(backend.writes.borrow().len(), 1);
        assert_eq!(
            *backend.restarts.borrow(),
            vec!["SystemUIServer".to_string()]
        );
    }

    #[test]
    fn shadow_flag_is_stored_inverted() {
        let backend = MemoryBackend::new();
        shadow(&backend, Some(true)).unwrap();
        assert_eq!(
            backend.get(DOMAIN, "disable-shadow"),
            Some(PrefValue::Bool(false))
        );
        shadow(&backend, Some(false)).unwrap();
        assert_eq!(
            backend.get(DOMAIN, "disable-shadow"),
            Some(PrefValue::Bool(true))
        );
    }

    #[test]
    fn reset_requires_a_flag() {
        let backend = MemoryBackend::new();
        assert!(reset(&backend, false, false, false, false, false).is_err());
        assert!(backend.writes.borrow().is_empty());
    }

    #[test]
    fn reset_all_restarts_once() {
        let backend = MemoryBackend::new();
        reset(&backend, false, false, false, false, true).unwrap();
        assert_eq!(backend.writes.borrow().len(), 4);
        assert_eq!(
            *backend.restarts.borrow(),
            vec!["SystemUIServer".to_string()]
        );
        assert_eq!(
            backend.get(DOMAIN, "type"),
            Some(PrefValue::String("png".into()))
        );
    }
}
