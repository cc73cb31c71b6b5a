//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: top-level rendering coordinator
//! - [`components`]: per-region renderers (header, toolbar, grid, detail, …)
//! - [`layout`]: screen geometry shared by state and components
//! - [`helpers`]: cursor positioning, truncation, word wrap
//! - [`theme`]: light/dark color schemes and ANSI escapes
//!
//! # Example
//!
//! ```rust,no_run
//! use zmeals::app::AppState;
//! use zmeals::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::default(), Theme::dark());
//! render(&state, 24, 80);
//! ```

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, EmptyState, FooterInfo, GridView, HeaderInfo, UIViewModel};
