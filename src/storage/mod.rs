//! Storage layer for persisted preferences.
//!
//! The plugin persists exactly one thing: the dark-mode flag. It lives in a
//! small JSON file owned by the worker thread.
//!
//! # Modules
//!
//! - `backend`: key-value storage trait
//! - `json`: JSON file implementation with atomic writes
//! - `preferences`: typed dark-mode accessors

pub mod backend;
pub mod json;
pub mod preferences;

pub use backend::Storage;
pub use json::JsonStorage;
pub use preferences::{load_dark_mode, save_dark_mode, DARK_MODE_KEY};
