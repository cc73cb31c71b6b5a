//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox `/host` maps to the directory Zellij was started from,
//! usually the user's home. Preferences, traces and user theme files are all
//! resolved relative to it.

use crate::domain::error::{Result, ZmealsError};
use std::path::{Path, PathBuf};

/// Returns the data directory for preferences and trace output.
///
/// Resolves to `/host/.local/share/zellij/zmeals`, which is
/// `~/.local/share/zellij/zmeals` on the host when Zellij starts from home.
///
/// # Examples
///
/// ```
/// use zmeals::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("zellij/zmeals"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zmeals")
}

/// Expands a leading `~` to the sandbox `/host` mount.
///
/// # Examples
///
/// ```
/// use zmeals::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Reads a user-supplied text file after tilde expansion.
///
/// # Errors
///
/// Returns [`ZmealsError::Config`] naming the path if the file cannot be read.
pub fn read_user_file(path: &str) -> Result<String> {
    let expanded = expand_tilde(path);
    std::fs::read_to_string(Path::new(&expanded))
        .map_err(|e| ZmealsError::Config(format!("cannot read {expanded}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
        assert_eq!(expand_tilde("~user"), "~user");
    }

    #[test]
    fn reads_existing_file() {
        let file = NamedTempFile::new().expect("tempfile");
        std::fs::write(file.path(), "name = \"x\"").expect("fixture");
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(read_user_file(&path).expect("readable"), "name = \"x\"");
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = read_user_file("/definitely/not/here.toml").expect_err("missing");
        assert!(matches!(err, ZmealsError::Config(msg) if msg.contains("/definitely/not/here.toml")));
    }
}
