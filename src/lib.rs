//! zmeals: a Zellij plugin for browsing recipes from TheMealDB.
//!
//! zmeals shows a grid of recipe cards inside a Zellij pane and provides:
//! - Name search and region (cuisine) filtering against the public API
//! - Chunked reveal of long result lists ("load more")
//! - A scrollable detail view with ingredients, instructions and links
//! - A dark mode toggle persisted by a background worker

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web requests, timers
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← reducer + actions
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ API Layer     │   │ UI Layer      │   │ Worker Layer  │
//! │ (api/)        │   │ (ui/)         │   │ (worker/)     │
//! │ - URLs, tags  │   │ - View models │   │ - Preferences │
//! │ - Decoding    │   │ - Components  │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                  │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage & Infrastructure                   │
//! │  - Recipe models, errors (domain/)                  │
//! │  - JSON preference file (storage/)                  │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zmeals.wasm" {
//!         initial_letter "b"
//!         dark_theme "catppuccin-mocha"
//!         theme_file_light "~/.config/zmeals/light.toml"
//!         open_command "xdg-open"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zmeals::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), zmeals::ZmealsError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Direction, Event, InputMode, ViewMode};
pub use domain::{Result, ZmealsError};
pub use ui::Theme;

use api::DEFAULT_API_BASE_URL;
use app::state::DEFAULT_INITIAL_LETTER;
use std::collections::BTreeMap;
use ui::theme::{DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME};

/// Command used to open recipe video links when none is configured.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the recipe API, without a trailing slash.
    pub api_base_url: String,

    /// First letter used for the startup list (`search.php?f=`).
    pub initial_letter: char,

    /// Built-in theme names for light and dark mode.
    pub light_theme: Option<String>,
    pub dark_theme: Option<String>,

    /// TOML theme files; take precedence over the names.
    pub theme_file_light: Option<String>,
    pub theme_file_dark: Option<String>,

    /// Program that receives a video URL as its only argument.
    pub open_command: String,

    /// `EnvFilter` directive for spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            initial_letter: DEFAULT_INITIAL_LETTER,
            light_theme: None,
            dark_theme: None,
            theme_file_light: None,
            theme_file_dark: None,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored and invalid values fall back to defaults:
    /// `initial_letter` must start with an ASCII letter (it is lowercased),
    /// and blank strings count as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zmeals::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("initial_letter".to_string(), "C".to_string());
    /// map.insert("open_command".to_string(), "open".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.initial_letter, 'c');
    /// assert_eq!(config.open_command, "open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let initial_letter = value("initial_letter")
            .and_then(|s| s.chars().next())
            .filter(char::is_ascii_alphabetic)
            .map_or(DEFAULT_INITIAL_LETTER, |c| c.to_ascii_lowercase());

        let api_base_url = value("api_base_url").map_or_else(
            || DEFAULT_API_BASE_URL.to_string(),
            |url| url.trim_end_matches('/').to_string(),
        );

        Self {
            api_base_url,
            initial_letter,
            light_theme: value("light_theme"),
            dark_theme: value("dark_theme"),
            theme_file_light: value("theme_file_light"),
            theme_file_dark: value("theme_file_dark"),
            open_command: value("open_command").unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string()),
            trace_level: value("trace_level"),
        }
    }
}

/// Builds the initial `AppState` for a configuration.
///
/// Resolves both themes (file, then name, then built-in) and applies the API
/// base URL and startup letter. No request is issued until
/// [`Event::Start`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zmeals plugin");

    let light = Theme::resolve(
        config.theme_file_light.as_deref(),
        config.light_theme.as_deref(),
        DEFAULT_LIGHT_THEME,
    );
    let dark = Theme::resolve(
        config.theme_file_dark.as_deref(),
        config.dark_theme.as_deref(),
        DEFAULT_DARK_THEME,
    );

    let mut state = AppState::new(light, dark);
    state.api_base_url.clone_from(&config.api_base_url);
    state.initial_letter = config.initial_letter;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_letter_falls_back() {
        assert_eq!(Config::from_zellij(&map(&[("initial_letter", "7")])).initial_letter, 'a');
        assert_eq!(Config::from_zellij(&map(&[("initial_letter", "  ")])).initial_letter, 'a');
        assert_eq!(Config::from_zellij(&map(&[("initial_letter", "Beef")])).initial_letter, 'b');
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = Config::from_zellij(&map(&[("api_base_url", "http://localhost:8080/api/")]));
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
    }

    #[test]
    fn initialize_applies_themes_and_request_settings() {
        let config = Config {
            light_theme: Some(DEFAULT_DARK_THEME.to_string()),
            initial_letter: 'k',
            api_base_url: "http://localhost".to_string(),
            ..Config::default()
        };

        let state = initialize(&config);
        assert_eq!(state.light_theme.name, DEFAULT_DARK_THEME);
        assert_eq!(state.dark_theme.name, DEFAULT_DARK_THEME);
        assert_eq!(state.initial_letter, 'k');
        assert_eq!(state.api_base_url, "http://localhost");
    }
}
