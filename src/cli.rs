use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "mct")]
#[command(version)]
#[command(about = "Declarative macOS preferences from a YAML config", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply config file settings to the system
    Apply(ApplyArgs),

    /// Show differences between config and current system state
    Diff(DiffArgs),

    /// Export current system settings as YAML
    Export(ExportArgs),

    /// List all available settings
    Settings,

    /// Create a starter config file
    Init,

    /// Manage Dock settings
    #[command(subcommand)]
    Dock(DockCommand),

    /// Manage Finder settings
    #[command(subcommand)]
    Finder(FinderCommand),

    /// Manage keyboard settings
    #[command(subcommand)]
    Keyboard(KeyboardCommand),

    /// Manage screenshot settings
    #[command(subcommand)]
    Screenshot(ScreenshotCommand),

    /// Manage system-level settings
    #[command(subcommand)]
    System(SystemCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Declarative Commands
// ============================================================================

#[derive(Parser)]
pub struct ApplyArgs {
    /// Show what would change without applying
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Path to config file (default: ~/.config/mct/config.yaml)
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Path to config file (default: ~/.config/mct/config.yaml)
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save to the default config path
    #[arg(short, long)]
    pub save: bool,
}

// ============================================================================
// Dock Commands
// ============================================================================

#[derive(Subcommand)]
pub enum DockCommand {
    /// Get or set Dock icon size (32-128)
    Size {
        /// New size in pixels
        value: Option<i64>,
    },

    /// Get or set Dock auto-hide (on/off)
    Autohide {
        /// on or off
        value: Option<String>,
    },

    /// Get or set Dock size lock (on/off)
    Locked {
        /// on or off
        value: Option<String>,
    },

    /// Get or set Dock magnification (on/off)
    Magnification {
        /// on or off
        value: Option<String>,
    },

    /// Get or set recent apps in Dock (on/off)
    Recents {
        /// on or off
        value: Option<String>,
    },

    /// Get or set Dock position (left/bottom/right)
    Position {
        /// left, bottom, or right
        value: Option<String>,
    },

    /// Reset Dock settings to macOS defaults
    Reset {
        /// Specific setting to reset (default: all)
        setting: Option<String>,
    },
}

// ============================================================================
// Finder Commands
// ============================================================================

#[derive(Subcommand)]
pub enum FinderCommand {
    /// Get or set showing all file extensions (on/off)
    Extensions {
        /// on or off
        value: Option<String>,
    },

    /// Get or set showing hidden files (on/off)
    Hidden {
        /// on or off
        value: Option<String>,
    },

    /// Get or set the path bar (on/off)
    Pathbar {
        /// on or off
        value: Option<String>,
    },

    /// Get or set the status bar (on/off)
    Statusbar {
        /// on or off
        value: Option<String>,
    },

    /// Get or set the default view style (icon/list/column/gallery)
    View {
        /// icon, list, column, or gallery
        style: Option<String>,
    },

    /// Reset Finder settings to macOS defaults
    Reset {
        /// Specific setting to reset (default: all)
        setting: Option<String>,
    },
}

// ============================================================================
// Keyboard Commands
// ============================================================================

#[derive(Subcommand)]
pub enum KeyboardCommand {
    /// Get or set key repeat (on = repeat keys, off = accent popup)
    Repeat {
        /// on or off
        value: Option<String>,
    },

    /// Reset keyboard settings to macOS defaults
    Reset {
        /// Specific setting to reset (default: all)
        setting: Option<String>,
    },
}

// ============================================================================
// Screenshot Commands
// ============================================================================

#[derive(Subcommand)]
pub enum ScreenshotCommand {
    /// Get or set the screenshot save location
    Location {
        /// Directory to save screenshots to
        path: Option<String>,
    },

    /// Get or set the screenshot file format
    Format {
        /// png, jpg, gif, pdf, or tiff
        format: Option<String>,
    },

    /// Get or set window shadows in screenshots
    Shadow {
        /// Enable window shadows
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Disable window shadows
        #[arg(long)]
        disable: bool,
    },

    /// Get or set the floating thumbnail after capture
    Thumbnail {
        /// Enable the floating thumbnail
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Disable the floating thumbnail
        #[arg(long)]
        disable: bool,
    },

    /// Reset screenshot settings to macOS defaults
    Reset {
        /// Reset save location
        #[arg(short, long)]
        location: bool,

        /// Reset file format
        #[arg(short, long)]
        format: bool,

        /// Reset window shadow
        #[arg(short, long)]
        shadow: bool,

        /// Reset floating thumbnail
        #[arg(short, long)]
        thumbnail: bool,

        /// Reset everything
        #[arg(short, long)]
        all: bool,
    },
}

// ============================================================================
// System Commands
// ============================================================================

#[derive(Subcommand)]
pub enum SystemCommand {
    /// Enable Touch ID for sudo
    Touchid,

    /// Reset system-level settings
    Reset {
        /// Reset Touch ID for sudo
        #[arg(short, long)]
        touchid: bool,

        /// Reset everything
        #[arg(short, long)]
        all: bool,
    },
}
