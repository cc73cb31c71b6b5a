//! Storage backend abstraction.
//!
//! The only persisted state is a handful of string preferences keyed by name,
//! so the trait is a minimal key-value interface rather than a generic store.

use crate::domain::error::Result;

/// Abstraction over persistent preference backends.
///
/// Values survive plugin restarts until overwritten. Implementations are
/// used from the single worker thread only.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use zmeals::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/zmeals/preferences.json"))?;
/// storage.set_preference("darkMode", "true")?;
/// assert_eq!(storage.get_preference("darkMode")?.as_deref(), Some("true"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Reads a preference value.
    ///
    /// Returns `Ok(None)` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_preference(&self, key: &str) -> Result<Option<String>>;

    /// Writes a preference value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set_preference(&mut self, key: &str, value: &str) -> Result<()>;
}
