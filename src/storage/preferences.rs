//! Typed access to the persisted dark-mode preference.
//!
//! The flag is stored as the string `"true"` or `"false"` under
//! [`DARK_MODE_KEY`]. Only the exact string `"true"` enables dark mode; any
//! other stored value reads as `false`.

use super::backend::Storage;
use crate::domain::error::Result;

/// Storage key for the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Reads the stored dark-mode flag.
///
/// Returns `Ok(None)` when no value was ever saved.
///
/// # Errors
///
/// Propagates backend read failures.
pub fn load_dark_mode(storage: &dyn Storage) -> Result<Option<bool>> {
    let value = storage.get_preference(DARK_MODE_KEY)?;
    Ok(value.map(|v| v == "true"))
}

/// Persists the dark-mode flag.
///
/// # Errors
///
/// Propagates backend write failures.
pub fn save_dark_mode(storage: &mut dyn Storage, enabled: bool) -> Result<()> {
    storage.set_preference(DARK_MODE_KEY, if enabled { "true" } else { "false" })
}
