//! Direct get/set commands for keyboard preferences
//!
//! Key repeat is stored inverted: `ApplePressAndHoldEnabled = true` means the
//! accent popup wins and repeat is off.

use anyhow::{Result, bail};

use crate::cli::KeyboardCommand;
use crate::defaults::{PrefBackend, PrefValue, ValueType};
use crate::ui;

use super::{onoff, parse_onoff};

const DOMAIN: &str = "NSGlobalDomain";
const PRESS_AND_HOLD: &str = "ApplePressAndHoldEnabled";

pub fn run(backend: &dyn PrefBackend, cmd: KeyboardCommand) -> Result<()> {
    match cmd {
        KeyboardCommand::Repeat { value } => repeat(backend, value.as_deref()),
        KeyboardCommand::Reset { setting } => reset(backend, setting.as_deref()),
    }
}

fn repeat(backend: &dyn PrefBackend, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        let press_hold = onoff(backend.read(DOMAIN, PRESS_AND_HOLD)?);
        println!("{}", if press_hold == "on" { "off" } else { "on" });
        return Ok(());
    };

    let Some(parsed) = parse_onoff(value) else {
        bail!("Use 'on' or 'off', got '{value}'");
    };

    backend.write(
        DOMAIN,
        PRESS_AND_HOLD,
        &PrefValue::Bool(!parsed),
        ValueType::Bool,
    )?;
    if parsed {
        ui::success("Key repeat enabled (press-and-hold for accents disabled)");
    } else {
        ui::success("Key repeat disabled (press-and-hold for accents enabled)");
    }
    ui::dim("Note: restart apps to apply");
    Ok(())
}

fn reset(backend: &dyn PrefBackend, setting: Option<&str>) -> Result<()> {
    match setting {
        None | Some("repeat") => {
            // macOS default is press-and-hold on, repeat off
            backend.write(DOMAIN, PRESS_AND_HOLD, &PrefValue::Bool(true), ValueType::Bool)?;
            ui::success("Keyboard repeat reset to off (press-and-hold enabled)");
            ui::dim("Note: restart apps to apply");
            Ok(())
        }
        Some(other) => bail!("Unknown setting '{other}'\n  Available: repeat"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::mock::MemoryBackend;

    #[test]
    fn repeat_on_writes_press_and_hold_off() {
        let backend = MemoryBackend::new();
        repeat(&backend, Some("on")).unwrap();
        assert_eq!(
            backend.get(DOMAIN, PRESS_AND_HOLD),
            Some(PrefValue::Bool(false))
        );
        // No restart target; takes effect per app
        assert!(backend.restarts.borrow().is_empty());
    }

    #[test]
    fn repeat_off_writes_press_and_hold_on() {
        let backend = MemoryBackend::new();
        repeat(&backend, Some("off")).unwrap();
        assert_eq!(
            backend.get(DOMAIN, PRESS_AND_HOLD),
            Some(PrefValue::Bool(true))
        );
    }

    #[test]
    fn reset_restores_press_and_hold() {
        let backend = MemoryBackend::new();
        backend.seed(DOMAIN, PRESS_AND_HOLD, PrefValue::Bool(false));
        reset(&backend, None).unwrap();
        assert_eq!(
            backend.get(DOMAIN, PRESS_AND_HOLD),
            Some(PrefValue::Bool(true))
        );
        assert!(reset(&backend, Some("layout")).is_err());
    }
}
