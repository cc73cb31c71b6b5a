//! Theme management and ANSI escape sequence generation.
//!
//! Two themes are active at any time: a light one and a dark one. The dark
//! mode toggle switches between them. Both can be built-ins (embedded TOML)
//! or user TOML files.
//!
//! # Built-in Themes
//!
//! - `catppuccin-latte`: light (default light theme)
//! - `catppuccin-mocha`: dark (default dark theme)
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! header_bg = "#181825"      # optional
//! selection_fg = "#1e1e2e"
//! selection_bg = "#fab387"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#fab387"
//! card_border = "#585b70"
//! badge_fg = "#1e1e2e"
//! badge_bg = "#a6e3a1"
//! empty_state_fg = "#89b4fa"
//! notice_fg = "#f38ba8"
//! accent = "#f9e2af"
//! ```
//!
//! # Example
//!
//! ```rust
//! use zmeals::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").expect("built-in");
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! print!("{}", Theme::fg(&theme.colors.header_fg));
//! ```

use crate::domain::error::{Result, ZmealsError};
use crate::infrastructure::read_user_file;
use serde::{Deserialize, Serialize};

/// Built-in light theme name.
pub const DEFAULT_LIGHT_THEME: &str = "catppuccin-latte";

/// Built-in dark theme name.
pub const DEFAULT_DARK_THEME: &str = "catppuccin-mocha";

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions, as hex strings (`"#rrggbb"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card or option.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, placeholders, secondary card lines.
    pub text_dim: String,

    /// Section separators.
    pub border: String,

    pub search_bar_border: String,
    pub card_border: String,

    /// Category badge on cards and in the detail view.
    pub badge_fg: String,
    pub badge_bg: String,

    pub empty_state_fg: String,

    /// Error and status notices.
    pub notice_fg: String,

    /// Section titles in the detail view and the load-more button.
    pub accent: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zmeals::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").expect("built-in");
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file. A leading `~` maps to `/host`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid theme.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = read_user_file(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a theme from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ZmealsError::Theme`] on syntax errors or missing colors.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ZmealsError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Resolves a theme from an optional file, then an optional name, then a
    /// built-in fallback. Failures are logged and fall through.
    #[must_use]
    pub fn resolve(file: Option<&str>, name: Option<&str>, fallback: &str) -> Self {
        if let Some(path) = file {
            match Self::from_file(path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file"),
            }
        }

        if let Some(name) = name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(theme_name = %name, "unknown theme name");
        }

        Self::from_name(fallback).unwrap_or_default()
    }

    /// The built-in dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the test suite rules out.
    #[must_use]
    pub fn dark() -> Self {
        Self::from_name(DEFAULT_DARK_THEME).expect("built-in dark theme should always parse")
    }

    /// Returns `(255, 255, 255)` on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The built-in light theme (Catppuccin Latte).
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the test suite rules out.
    fn default() -> Self {
        Self::from_name(DEFAULT_LIGHT_THEME).expect("built-in light theme should always parse")
    }
}
