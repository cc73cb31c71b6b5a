//! Input and view mode state types for the application.
//!
//! These enums decide how key presses are interpreted and which page region
//! is visible.
//!
//! Input modes:
//! - **Normal**: navigate cards, trigger actions
//! - **Search**: keys edit the search field until Enter or Esc
//! - **`RegionPicker`**: the region dropdown is open
//!
//! View modes form the two-state page machine: `List` → `Detail` after a
//! successful detail fetch, `Detail` → `List` on back. No other transitions.
//!
//! # Example
//!
//! ```rust
//! use zmeals::app::modes::{InputMode, ViewMode};
//!
//! let input_mode = InputMode::RegionPicker { highlighted: 0 };
//! let view_mode = ViewMode::List;
//! assert_ne!(input_mode, InputMode::Normal);
//! assert_eq!(view_mode, ViewMode::default());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Card navigation and single-key commands.
    #[default]
    Normal,

    /// Typing into the search field. Enter submits, Esc cancels.
    Search,

    /// Region dropdown open.
    ///
    /// `highlighted` indexes the picker options, where 0 is "All Regions" and
    /// `n` is the `n - 1`th region matching the picker filter.
    RegionPicker {
        /// Highlighted option index.
        highlighted: usize,
    },
}

/// Which page region is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Card grid with search field, region dropdown and "load more".
    #[default]
    List,

    /// Expanded view of one recipe.
    Detail,
}
