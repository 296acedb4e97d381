//! Theme handling and the chip color palette.
//!
//! The palette constants mirror the utility classes the stylesheets define
//! for agent type and scale chips. Theme resolution is tri-state: an explicit
//! stored preference wins, else the system preference, else light.

use crate::storage::{PreferenceStore, THEME_KEY};

/// Color classes for agent type chips.
pub mod agent_type {
    pub const ASSISTANT: &str = "text-blue-600 dark:text-blue-400";
    pub const AUTONOMOUS: &str = "text-purple-600 dark:text-purple-400";
    pub const HYBRID: &str = "text-indigo-600 dark:text-indigo-400";
    pub const REGULAR: &str = "text-teal-600 dark:text-teal-400";
    pub const DEFAULT: &str = "text-gray-600 dark:text-gray-400";
}

/// Color classes for agent scale chips.
pub mod agent_scale {
    pub const SIMPLE: &str = "text-green-600 dark:text-green-400";
    pub const INTERMEDIATE: &str = "text-yellow-600 dark:text-yellow-400";
    pub const ADVANCED: &str = "text-orange-600 dark:text-orange-400";
    pub const COMPLEX: &str = "text-red-600 dark:text-red-400";
    pub const DEFAULT: &str = "text-gray-600 dark:text-gray-400";
}

/// Color class for an agent type chip, case-insensitive.
pub fn type_color(agent_type: Option<&str>) -> &'static str {
    match agent_type.map(|t| t.to_lowercase()).as_deref() {
        Some("assistant") => agent_type::ASSISTANT,
        Some("autonomous") => agent_type::AUTONOMOUS,
        Some("hybrid") => agent_type::HYBRID,
        Some("regular") => agent_type::REGULAR,
        _ => agent_type::DEFAULT,
    }
}

/// Color class for an agent scale chip, case-insensitive. Matching is on the
/// leading word, so "Single-Agent" and "Multi-Agent" resolve by their prefix;
/// "single" shares the simple color.
pub fn scale_color(scale: Option<&str>) -> &'static str {
    let lowered = scale.map(|s| s.to_lowercase());
    let head = lowered
        .as_deref()
        .and_then(|s| s.split(['-', ' ']).next());
    match head {
        Some("simple") | Some("single") => agent_scale::SIMPLE,
        Some("intermediate") => agent_scale::INTERMEDIATE,
        Some("advanced") => agent_scale::ADVANCED,
        Some("complex") => agent_scale::COMPLEX,
        _ => agent_scale::DEFAULT,
    }
}

/// Light/dark theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tri-state resolution: stored preference > system preference > light.
pub fn resolve(stored: Option<Theme>, system: Option<Theme>) -> Theme {
    stored.or(system).unwrap_or_default()
}

/// Which theme toggle icon is visible. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconVisibility {
    pub light_icon: bool,
    pub dark_icon: bool,
}

/// Theme state for a page: current value plus the store it persists to.
///
/// Every toggle writes the preference back; storage failures warn and the
/// in-memory theme still flips, so the page never gets stuck.
pub struct ThemeController<S: PreferenceStore> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Initialize from the stored preference, falling back to the system
    /// preference and then light.
    pub fn init(store: S, system: Option<Theme>) -> Self {
        let stored = store.get(THEME_KEY).and_then(|s| Theme::parse(&s));
        let current = resolve(stored, system);
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme, persist it, and return the new value.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.flipped());
        self.current
    }

    /// Set an explicit theme and persist it.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            eprintln!("Warning: could not persist theme preference: {e}");
        }
    }

    /// React to a system preference change: only followed while the user has
    /// no explicit stored preference.
    pub fn on_system_change(&mut self, system: Theme) {
        if self.store.get(THEME_KEY).is_none() {
            self.current = system;
        }
    }

    /// Class mirrored onto `<html>`.
    pub fn html_class(&self) -> &'static str {
        self.current.as_str()
    }

    /// Icon visibility for the toggle button: dark mode shows the light-mode
    /// icon and vice versa.
    pub fn icons(&self) -> IconVisibility {
        match self.current {
            Theme::Dark => IconVisibility {
                light_icon: true,
                dark_icon: false,
            },
            Theme::Light => IconVisibility {
                light_icon: false,
                dark_icon: true,
            },
        }
    }

    /// The stored preference, if any.
    pub fn stored(&self) -> Option<Theme> {
        self.store.get(THEME_KEY).and_then(|s| Theme::parse(&s))
    }
}
