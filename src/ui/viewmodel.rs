//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: truncated names, selection
//! flags, wrapped detail lines and the scroll window already applied.
//!
//! # Example
//!
//! ```rust
//! use zmeals::ui::viewmodel::{Body, EmptyState};
//!
//! let body = Body::Empty(EmptyState {
//!     message: "No recipes found".to_string(),
//!     subtitle: "Try another search or region".to_string(),
//! });
//! assert!(matches!(body, Body::Empty(_)));
//! ```

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Search field and region dropdown. Hidden in the detail view.
    pub toolbar: Option<ToolbarInfo>,

    /// One-line notice under the toolbar (fetch failures, missing recipe).
    pub notice: Option<String>,

    pub body: Body,

    /// Open region dropdown, drawn over the body.
    pub region_picker: Option<RegionPickerView>,

    pub footer: FooterInfo,
}

/// Title bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Dark-mode toggle icon: `☾` while light, `☀` while dark.
    pub mode_icon: &'static str,

    /// Transient status such as "Loading…".
    pub status: Option<String>,
}

/// Search field and region dropdown state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarInfo {
    pub query: String,

    /// The search field has input focus.
    pub search_active: bool,

    /// Selected region, or "All Regions".
    pub region_label: String,

    /// The region dropdown is open.
    pub region_active: bool,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Grid(GridView),
    Empty(EmptyState),
    Detail(DetailView),
}

/// Visible part of the card grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    /// Visible cards, row-major.
    pub cards: Vec<CardView>,

    pub columns: usize,

    /// Width of one card including its border.
    pub card_width: usize,

    /// Number of cards revealed so far (all chunks up to the cursor).
    pub rendered_count: usize,

    /// Total recipes in the list.
    pub total_count: usize,

    /// Present iff more cards remain to be revealed.
    pub load_more: Option<LoadMoreInfo>,
}

/// One recipe card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub category: String,
    pub is_selected: bool,
}

/// The "load more" affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreInfo {
    /// Cards not revealed yet.
    pub remaining: usize,

    /// `false` during the cooldown after the previous activation.
    pub ready: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Scrolled window over the detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub lines: Vec<DetailLine>,

    /// Whether lines exist above / below the window.
    pub more_above: bool,
    pub more_below: bool,
}

/// A single pre-wrapped line of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub text: String,
    pub style: LineStyle,
}

impl DetailLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    #[must_use]
    pub fn blank() -> Self {
        Self::new(String::new(), LineStyle::Body)
    }
}

/// How a detail line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Meta,
    Section,
    Body,
    Link,
}

/// Open region dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPickerView {
    /// Text typed to narrow the options.
    pub filter: String,

    /// Visible options with their highlight flag.
    pub options: Vec<(String, bool)>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
