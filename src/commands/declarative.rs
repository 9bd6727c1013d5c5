//! Config-driven commands: apply, diff, export, settings, init

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use dialoguer::Confirm;
use serde_yaml::{Mapping, Value};

use crate::Context;
use crate::config::{self, FlatConfig};
use crate::defaults::PrefBackend;
use crate::engine;
use crate::paths;
use crate::registry::Registry;
use crate::ui;

/// Shown when the current backend value is unset.
const NOT_SET: &str = "(not set)";

/// Resolve and load the config document.
///
/// An explicit `--config` path must exist. The default path missing gets a
/// pointer to `mct export` instead of a bare file error.
fn load_config(path_arg: Option<&str>, hint: &str) -> Result<(PathBuf, Mapping)> {
    let path = match path_arg {
        Some(p) => {
            let path = paths::expand(p);
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            path
        }
        None => {
            let path = paths::config_file()?;
            if !path.exists() {
                bail!("No config file found at {}\n  {hint}", path.display());
            }
            path
        }
    };

    let doc = config::load_document(&path)?;
    if doc.is_empty() {
        bail!("Config file is empty: {}", path.display());
    }
    Ok((path, doc))
}

/// Flatten the document and drop keys the registry does not know, warning
/// once about everything ignored.
fn known_settings(registry: &Registry, doc: &Mapping) -> Result<FlatConfig> {
    let (known, unknown) = config::filter_known(registry, config::flatten(doc))?;
    if !unknown.is_empty() {
        ui::warn(&format!(
            "Unknown settings will be ignored: {}",
            unknown.join(", ")
        ));
    }
    Ok(known)
}

fn render_current(current: Option<&crate::defaults::PrefValue>) -> String {
    current.map_or_else(|| NOT_SET.to_string(), ToString::to_string)
}

pub fn apply(
    ctx: &Context,
    registry: &Registry,
    backend: &dyn PrefBackend,
    config_path: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let (path, doc) = load_config(
        config_path,
        "Run 'mct export --save' to create one from current settings",
    )?;
    log::info!("Applying config from {}", path.display());

    let desired = known_settings(registry, &doc)?;
    let report = engine::apply_config(registry, backend, &desired, dry_run)?;

    if report.diffs.is_empty() {
        ui::success("System is already in sync with config");
        return Ok(());
    }

    if !ctx.quiet {
        if dry_run {
            ui::info("Changes that would be applied:");
        } else {
            ui::info("Applied changes:");
        }
        for diff in &report.diffs {
            println!(
                "  {}: {} -> {}",
                diff.key,
                render_current(diff.current.as_ref()),
                diff.desired
            );
        }
    }

    if dry_run {
        println!();
        ui::dim(&format!(
            "Run without --dry-run to apply {} change(s)",
            report.diffs.len()
        ));
        return Ok(());
    }

    if !report.is_success() {
        for failure in &report.failures {
            ui::error(&format!("Failed to apply {}: {}", failure.key, failure.error));
        }
        bail!(
            "{} of {} change(s) failed",
            report.failures.len(),
            report.diffs.len()
        );
    }

    ui::success(&format!("Applied {} change(s)", report.diffs.len()));
    Ok(())
}

pub fn diff(
    ctx: &Context,
    registry: &Registry,
    backend: &dyn PrefBackend,
    config_path: Option<&str>,
) -> Result<()> {
    let (path, doc) = load_config(config_path, "Run 'mct export --save' to create one")?;
    log::info!("Diffing against {}", path.display());

    let desired = known_settings(registry, &doc)?;
    let diffs = engine::compute_diff(registry, backend, &desired)?;

    if diffs.is_empty() {
        ui::success("System is already in sync with config");
        return Ok(());
    }

    ui::info(&format!("Found {} difference(s):", diffs.len()));
    for diff in &diffs {
        if ctx.quiet {
            println!("{}", diff.key);
            continue;
        }
        println!();
        println!("  {}", diff.key);
        if ctx.verbose > 0 {
            ui::dim(&format!(
                "{} {}",
                diff.setting.domain, diff.setting.backend_key
            ));
        }
        ui::kv("current", &render_current(diff.current.as_ref()));
        ui::kv("config", &diff.desired.to_string());
    }

    Ok(())
}

pub fn export(
    ctx: &Context,
    registry: &Registry,
    backend: &dyn PrefBackend,
    output: Option<&str>,
    save: bool,
) -> Result<()> {
    let state = engine::read_current_state(registry, backend)?;

    let mut flat: Vec<(String, Value)> = Vec::with_capacity(state.len());
    for (key, value) in state {
        let rendered =
            serde_yaml::to_value(&value).with_context(|| format!("Failed to render {key}"))?;
        flat.push((key, rendered));
    }
    let doc = config::unflatten(&flat);

    let target = if save {
        Some(paths::config_file()?)
    } else {
        output.map(paths::expand)
    };

    match target {
        Some(path) => {
            config::save_document(&path, &doc)?;
            ui::success(&format!("Saved current settings to {}", path.display()));
            if !ctx.quiet {
                ui::dim("Only settings currently present on the system are included");
            }
        }
        None => {
            let yaml = serde_yaml::to_string(&doc).context("Failed to serialize settings")?;
            print!("{yaml}");
        }
    }

    Ok(())
}

pub fn settings(registry: &Registry) -> Result<()> {
    let mut sections: BTreeMap<&str, Vec<&crate::registry::Setting>> = BTreeMap::new();
    for setting in registry.settings() {
        let section = setting.key.split('.').next().unwrap_or(setting.key);
        sections.entry(section).or_default().push(setting);
    }

    for (section, entries) in sections {
        ui::section(section);
        for setting in entries {
            ui::kv(setting.key, setting.description);
        }
    }

    Ok(())
}

const STARTER_CONFIG: &str = "\
# mct configuration
# Run 'mct settings' to list every available key,
# 'mct diff' to compare against the current system.
dock:
  size: 48
  autohide: false
  show_recents: false
finder:
  show_extensions: true
  show_hidden: false
  show_path_bar: true
screenshot:
  format: png
  disable_shadow: true
keyboard:
  press_and_hold: false
";

pub fn init(_ctx: &Context) -> Result<()> {
    let path = paths::config_file()?;

    if path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ui::info("Keeping existing config");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ui::success(&format!("Created starter config at {}", path.display()));
    ui::dim("Edit the file, then run 'mct apply' to apply settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::PrefValue;
    use crate::defaults::mock::MemoryBackend;

    fn ctx() -> Context {
        Context {
            verbose: 0,
            quiet: true,
        }
    }

    #[test]
    fn missing_explicit_config_touches_nothing() {
        // Scenario D: a bad --config path fails before any backend call
        let backend = MemoryBackend::new();
        let registry = Registry::builtin();

        let result = apply(
            &ctx(),
            &registry,
            &backend,
            Some("/nonexistent/mct-config.yaml"),
            false,
        );

        assert!(result.is_err());
        assert!(backend.reads.borrow().is_empty());
        assert!(backend.writes.borrow().is_empty());
    }

    #[test]
    fn apply_writes_values_from_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "dock:\n  size: 48\n  autohide: true\n").unwrap();
        let backend = MemoryBackend::new();
        let registry = Registry::builtin();

        apply(
            &ctx(),
            &registry,
            &backend,
            Some(path.to_str().unwrap()),
            false,
        )
        .unwrap();

        assert_eq!(
            backend.get("com.apple.dock", "tilesize"),
            Some(PrefValue::Int(48))
        );
        assert_eq!(
            backend.get("com.apple.dock", "autohide"),
            Some(PrefValue::Bool(true))
        );
        assert_eq!(*backend.restarts.borrow(), vec!["Dock".to_string()]);
    }

    #[test]
    fn dry_run_apply_leaves_the_backend_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "dock:\n  size: 48\n").unwrap();
        let backend = MemoryBackend::new();
        let registry = Registry::builtin();

        apply(
            &ctx(),
            &registry,
            &backend,
            Some(path.to_str().unwrap()),
            true,
        )
        .unwrap();

        assert!(backend.writes.borrow().is_empty());
        assert!(backend.restarts.borrow().is_empty());
    }

    #[test]
    fn failed_writes_surface_as_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "dock:\n  size: 48\n").unwrap();
        let backend = MemoryBackend::new();
        backend.fail_on("tilesize");
        let registry = Registry::builtin();

        let result = apply(
            &ctx(),
            &registry,
            &backend,
            Some(path.to_str().unwrap()),
            false,
        );

        assert!(result.is_err());
    }

    #[test]
    fn diff_tolerates_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "dock:\n  size: 48\n  flux_capacitor: true\n").unwrap();
        let backend = MemoryBackend::new();
        backend.seed("com.apple.dock", "tilesize", PrefValue::Int(48));
        let registry = Registry::builtin();

        diff(&ctx(), &registry, &backend, Some(path.to_str().unwrap())).unwrap();

        // Only the known key was consulted
        assert_eq!(backend.reads.borrow().len(), 1);
    }

    #[test]
    fn starter_config_parses_and_is_fully_known() {
        let doc = config::parse_document(STARTER_CONFIG).unwrap();
        let registry = Registry::builtin();
        let (known, unknown) = config::filter_known(&registry, config::flatten(&doc)).unwrap();
        assert!(unknown.is_empty());
        assert_eq!(known.len(), 9);
    }
}
