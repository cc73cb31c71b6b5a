//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the api/storage/worker layers.
//!
//! ```text
//! Key / WebRequestResult / Timer → Event → handle_event → AppState → Actions
//!                                              ↑                        ↓
//!                                              └──── responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the handler
//! - [`handler`]: the event reducer
//! - [`modes`]: input and view mode types
//! - [`pagination`]: chunked reveal of the recipe list
//! - [`search`]: search term sanitization
//! - [`state`]: state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod pagination;
pub mod search;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event, ScrollStep, LOAD_MORE_COOLDOWN_SECS};
pub use modes::{InputMode, ViewMode};
pub use pagination::{RecipeList, CHUNK_SIZE};
pub use state::{AppState, Direction};
