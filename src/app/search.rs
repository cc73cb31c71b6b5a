//! Search input sanitization.

/// Trims surrounding whitespace and strips `<` and `>`.
///
/// A minimal guard against markup in the term sent to the API, not general
/// escaping. An empty result means "reset to the unfiltered list".
///
/// # Examples
///
/// ```
/// use zmeals::app::search::sanitize;
///
/// assert_eq!(sanitize("  <b>chicken</b>  "), "bchicken/b");
/// assert_eq!(sanitize("  <>  "), "");
/// ```
#[must_use]
pub fn sanitize(raw: &str) -> String {
    raw.trim().replace(['<', '>'], "")
}
