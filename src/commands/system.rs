//! System-level commands that edit files outside the defaults database
//!
//! Touch ID for sudo works by prepending a PAM line to /etc/pam.d/sudo, with
//! a backup kept alongside. Everything here prompts before touching the file
//! and goes through `sudo`.

use std::path::Path;
use std::process::Command;

use anyhow::{Context as _, Result, bail};
use dialoguer::{Confirm, Select};

use crate::cli::SystemCommand;
use crate::ui;

const PAM_SUDO: &str = "/etc/pam.d/sudo";
const PAM_SUDO_BACKUP: &str = "/etc/pam.d/sudo.bak";
const PAM_TID_LINE: &str = "auth sufficient pam_tid.so";

pub fn run(cmd: SystemCommand) -> Result<()> {
    match cmd {
        SystemCommand::Touchid => touchid(),
        SystemCommand::Reset { touchid, all } => reset(touchid, all),
    }
}

/// Run a command under sudo, failing loudly on a non-zero exit.
fn run_sudo(args: &[&str]) -> Result<()> {
    let status = Command::new("sudo")
        .args(args)
        .status()
        .with_context(|| format!("Failed to run sudo {}", args.join(" ")))?;
    if !status.success() {
        bail!("sudo {} exited with {status}", args.join(" "));
    }
    Ok(())
}

/// Whether the Touch ID PAM line is present in /etc/pam.d/sudo.
fn touchid_enabled() -> Result<bool> {
    let output = Command::new("grep")
        .args([PAM_TID_LINE, PAM_SUDO])
        .output()
        .context("Failed to run grep")?;
    Ok(output.status.success())
}

fn show_backup() {
    let output = Command::new("sudo").args(["cat", PAM_SUDO_BACKUP]).output();
    match output {
        Ok(output) if output.status.success() => {
            println!();
            println!("File contents:");
            println!("{}", "=".repeat(50));
            print!("{}", String::from_utf8_lossy(&output.stdout));
            println!("{}", "=".repeat(50));
        }
        Ok(output) => ui::error(&format!(
            "Error reading backup: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )),
        Err(e) => ui::error(&format!("Error reading backup: {e}")),
    }
}

fn touchid() -> Result<()> {
    println!();
    ui::warn("This operation will:");
    println!("  1. Check if Touch ID is already enabled");
    println!("  2. Add a new authentication line to {PAM_SUDO} if needed");
    println!("  3. Create or update a backup of the original file");
    println!("  4. Require sudo privileges to make these changes");
    println!();

    if !Confirm::new()
        .with_prompt("Do you want to proceed?")
        .default(false)
        .interact()?
    {
        ui::info("Operation cancelled");
        return Ok(());
    }

    if touchid_enabled()? {
        ui::info("Touch ID for sudo is already enabled");
        return Ok(());
    }

    if Path::new(PAM_SUDO_BACKUP).exists() {
        loop {
            ui::warn(&format!("A backup file already exists at {PAM_SUDO_BACKUP}"));
            let choice = Select::new()
                .with_prompt("Please choose an option")
                .items(&[
                    "Do nothing and exit",
                    "View the backup file contents",
                    "Continue (will replace existing backup)",
                    "Restore backup and then enable Touch ID",
                ])
                .default(0)
                .interact()?;

            match choice {
                0 => {
                    ui::info("Operation cancelled");
                    return Ok(());
                }
                1 => show_backup(),
                2 => {
                    run_sudo(&["cp", PAM_SUDO, PAM_SUDO_BACKUP])?;
                    break;
                }
                _ => {
                    run_sudo(&["cp", PAM_SUDO_BACKUP, PAM_SUDO])?;
                    ui::success("Original sudo PAM file has been restored");
                    break;
                }
            }
        }
    } else {
        run_sudo(&["cp", PAM_SUDO, PAM_SUDO_BACKUP])?;
    }

    // Prepend the PAM line via a temp file; in-place edits of pam.d are risky
    run_sudo(&[
        "sh",
        "-c",
        &format!(
            "echo \"{PAM_TID_LINE}\" | cat - {PAM_SUDO} > /tmp/sudo.pam && sudo mv /tmp/sudo.pam {PAM_SUDO}"
        ),
    ])?;

    ui::success("Touch ID for sudo has been enabled");
    ui::success(&format!("Original file backed up as {PAM_SUDO_BACKUP}"));
    Ok(())
}

fn reset(touchid: bool, all: bool) -> Result<()> {
    if !(touchid || all) {
        bail!("Must specify either -t (touchid) or -a (all)");
    }

    println!();
    ui::warn("This operation will:");
    println!("  1. Remove Touch ID authentication from sudo");
    println!("  2. Require sudo privileges to make these changes");
    println!();

    if !Confirm::new()
        .with_prompt("Do you want to proceed?")
        .default(false)
        .interact()?
    {
        ui::info("Operation cancelled");
        return Ok(());
    }

    if !touchid_enabled()? {
        ui::info("Touch ID is not enabled in sudo configuration");
        return Ok(());
    }

    loop {
        let choice = Select::new()
            .with_prompt("Please choose an option")
            .items(&[
                "Do nothing and exit",
                "View the backup file contents",
                "Restore from stored backup",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                ui::info("Operation cancelled");
                return Ok(());
            }
            1 => {
                if !Path::new(PAM_SUDO_BACKUP).exists() {
                    ui::error(&format!("No backup file found at {PAM_SUDO_BACKUP}"));
                    return Ok(());
                }
                show_backup();
            }
            _ => {
                if !Path::new(PAM_SUDO_BACKUP).exists() {
                    ui::error(&format!("No backup file found at {PAM_SUDO_BACKUP}"));
                    return Ok(());
                }
                run_sudo(&["cp", PAM_SUDO_BACKUP, PAM_SUDO])?;
                ui::success("Touch ID sudo configuration has been reset from backup");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_requires_a_flag() {
        assert!(reset(false, false).is_err());
    }
}
