//! Settings registry - the single source of truth for every supported setting
//!
//! Maps a dotted config key (e.g. `dock.size`) to its backend (domain, key)
//! pair, value type, and the app to restart after a change. Built once at
//! startup and passed by reference into every component; no other module may
//! touch the backend for a key this table does not know.

use crate::defaults::ValueType;

/// One registry entry. All fields are static - the table is process-wide
/// immutable data.
#[derive(Debug, Clone, Copy)]
pub struct Setting {
    /// Dotted config key, globally unique
    pub key: &'static str,
    /// Backend domain, e.g. `com.apple.dock`
    pub domain: &'static str,
    /// Key within the backend domain
    pub backend_key: &'static str,
    pub value_type: ValueType,
    /// App to restart after changing this setting
    pub restart_app: Option<&'static str>,
    pub description: &'static str,
}

const fn setting(
    key: &'static str,
    domain: &'static str,
    backend_key: &'static str,
    value_type: ValueType,
    restart_app: Option<&'static str>,
    description: &'static str,
) -> Setting {
    Setting {
        key,
        domain,
        backend_key,
        value_type,
        restart_app,
        description,
    }
}

/// The immutable settings table, iterated in declaration order.
pub struct Registry {
    settings: &'static [Setting],
}

impl Registry {
    /// The built-in registry of all supported settings.
    pub fn builtin() -> Self {
        Self { settings: BUILTIN }
    }

    /// Look up a setting by its dotted key.
    pub fn lookup(&self, key: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.key == key)
    }

    /// All settings, in declaration order.
    pub fn settings(&self) -> &[Setting] {
        self.settings
    }
}

use ValueType::{Bool, Float, Int, String as Str};

static BUILTIN: &[Setting] = &[
    // Dock
    setting("dock.size", "com.apple.dock", "tilesize", Int, Some("Dock"), "Dock icon size (32-128)"),
    setting("dock.autohide", "com.apple.dock", "autohide", Bool, Some("Dock"), "Auto-hide the Dock"),
    setting("dock.size_immutable", "com.apple.dock", "size-immutable", Bool, Some("Dock"), "Lock Dock size"),
    setting("dock.magnification", "com.apple.dock", "magnification", Bool, Some("Dock"), "Enable Dock magnification"),
    setting("dock.largesize", "com.apple.dock", "largesize", Int, Some("Dock"), "Magnified icon size (16-128)"),
    setting("dock.orientation", "com.apple.dock", "orientation", Str, Some("Dock"), "Dock position: left, bottom, right"),
    setting("dock.mineffect", "com.apple.dock", "mineffect", Str, Some("Dock"), "Minimize effect: genie, scale, suck"),
    setting("dock.minimize_to_application", "com.apple.dock", "minimize-to-application", Bool, Some("Dock"), "Minimize windows into application icon"),
    setting("dock.show_recents", "com.apple.dock", "show-recents", Bool, Some("Dock"), "Show recent applications in Dock"),
    setting("dock.static_only", "com.apple.dock", "static-only", Bool, Some("Dock"), "Show only open applications"),
    // Finder
    setting("finder.show_extensions", "NSGlobalDomain", "AppleShowAllExtensions", Bool, Some("Finder"), "Show all file extensions"),
    setting("finder.show_hidden", "com.apple.finder", "AppleShowAllFiles", Bool, Some("Finder"), "Show hidden files"),
    setting("finder.show_path_bar", "com.apple.finder", "ShowPathbar", Bool, Some("Finder"), "Show path bar at bottom"),
    setting("finder.show_status_bar", "com.apple.finder", "ShowStatusBar", Bool, Some("Finder"), "Show status bar at bottom"),
    setting("finder.default_view", "com.apple.finder", "FXPreferredViewStyle", Str, Some("Finder"), "Default view: icnv, Nlsv, clmv, glyv"),
    setting("finder.search_scope", "com.apple.finder", "FXDefaultSearchScope", Str, Some("Finder"), "Search scope: SCcf (current folder), SCsp (previous scope), SCev (entire Mac)"),
    setting("finder.empty_trash_warning", "com.apple.finder", "WarnOnEmptyTrash", Bool, Some("Finder"), "Warn before emptying trash"),
    setting("finder.new_window_target", "com.apple.finder", "NewWindowTarget", Str, Some("Finder"), "New window target: PfHm (Home), PfDe (Desktop), PfDo (Documents), PfLo (other)"),
    // Screenshots
    setting("screenshot.location", "com.apple.screencapture", "location", Str, Some("SystemUIServer"), "Screenshot save location"),
    setting("screenshot.format", "com.apple.screencapture", "type", Str, Some("SystemUIServer"), "Screenshot format: png, jpg, gif, pdf, tiff"),
    setting("screenshot.disable_shadow", "com.apple.screencapture", "disable-shadow", Bool, Some("SystemUIServer"), "Disable window shadow in screenshots"),
    setting("screenshot.include_date", "com.apple.screencapture", "include-date", Bool, Some("SystemUIServer"), "Include date in screenshot filename"),
    setting("screenshot.show_thumbnail", "com.apple.screencapture", "show-thumbnail", Bool, Some("SystemUIServer"), "Show floating thumbnail after capture"),
    // Keyboard
    setting("keyboard.press_and_hold", "NSGlobalDomain", "ApplePressAndHoldEnabled", Bool, None, "Enable press-and-hold for accents (false = key repeat)"),
    setting("keyboard.key_repeat_rate", "NSGlobalDomain", "KeyRepeat", Int, None, "Key repeat rate (lower = faster, 1-15)"),
    setting("keyboard.initial_key_repeat", "NSGlobalDomain", "InitialKeyRepeat", Int, None, "Delay before key repeat starts (lower = faster, 10-120)"),
    // Trackpad
    setting("trackpad.tap_to_click", "com.apple.AppleMultitouchTrackpad", "Clicking", Bool, None, "Enable tap to click"),
    setting("trackpad.natural_scrolling", "NSGlobalDomain", "com.apple.swipescrolldirection", Bool, None, "Natural scrolling direction"),
    setting("trackpad.tracking_speed", "NSGlobalDomain", "com.apple.trackpad.scaling", Float, None, "Tracking speed (0.0-3.0)"),
    // Menu bar
    setting("menubar.autohide", "NSGlobalDomain", "_HIHideMenuBar", Bool, Some("SystemUIServer"), "Auto-hide menu bar"),
    setting("menubar.show_background", "NSGlobalDomain", "NSStatusBarShowsMenuBarBackground", Bool, Some("SystemUIServer"), "Show menu bar background (Tahoe)"),
    // Mission Control
    setting("mission_control.auto_rearrange", "com.apple.dock", "mru-spaces", Bool, Some("Dock"), "Automatically rearrange Spaces based on recent use"),
    setting("mission_control.group_by_app", "com.apple.dock", "expose-group-apps", Bool, Some("Dock"), "Group windows by application"),
    // Accessibility
    setting("accessibility.reduce_transparency", "com.apple.universalaccess", "reduceTransparency", Bool, None, "Reduce transparency (helps with Liquid Glass)"),
    setting("accessibility.reduce_motion", "com.apple.universalaccess", "reduceMotion", Bool, None, "Reduce motion effects"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_are_unique() {
        let registry = Registry::builtin();
        let mut seen = HashSet::new();
        for setting in registry.settings() {
            assert!(seen.insert(setting.key), "duplicate key: {}", setting.key);
        }
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let registry = Registry::builtin();
        assert_eq!(registry.settings()[0].key, "dock.size");
        let last = registry.settings().last().unwrap();
        assert_eq!(last.key, "accessibility.reduce_motion");
    }

    #[test]
    fn lookup_finds_registered_keys() {
        let registry = Registry::builtin();
        let setting = registry.lookup("dock.autohide").unwrap();
        assert_eq!(setting.domain, "com.apple.dock");
        assert_eq!(setting.backend_key, "autohide");
        assert_eq!(setting.value_type, ValueType::Bool);
        assert_eq!(setting.restart_app, Some("Dock"));
    }

    #[test]
    fn lookup_misses_unknown_keys() {
        let registry = Registry::builtin();
        assert!(registry.lookup("dock.flux_capacitor").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn every_key_is_dotted() {
        let registry = Registry::builtin();
        for setting in registry.settings() {
            let (section, rest) = setting.key.split_once('.').unwrap();
            assert!(!section.is_empty() && !rest.is_empty(), "{}", setting.key);
        }
    }

    #[test]
    fn keyboard_settings_need_no_restart() {
        let registry = Registry::builtin();
        assert_eq!(
            registry.lookup("keyboard.key_repeat_rate").unwrap().restart_app,
            None
        );
    }
}
