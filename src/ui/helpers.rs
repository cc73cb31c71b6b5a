//! Shared rendering utilities.
//!
//! Widths are counted in `char`s, which matches the terminal for the Latin
//! text TheMealDB serves.

/// Moves the cursor to a 1-indexed `row`/`col` (`\u{1b}[{row};{col}H`).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` cells, ending in `…` when cut.
///
/// # Examples
///
/// ```
/// use zmeals::ui::helpers::truncate;
///
/// assert_eq!(truncate("Beef Wellington", 8), "Beef We…");
/// assert_eq!(truncate("Pie", 8), "Pie");
/// assert_eq!(truncate("Pie", 0), "");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Pads `text` with spaces to exactly `width` cells, truncating first.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let fill = width.saturating_sub(display_width(&text));
    format!("{text}{}", " ".repeat(fill))
}

/// Greedy word wrap. Paragraphs are separated by newlines; `\r` is dropped
/// and runs of blank lines collapse to one. Words longer than `width` are
/// split.
///
/// # Examples
///
/// ```
/// use zmeals::ui::helpers::wrap_text;
///
/// let lines = wrap_text("Heat the oven.\r\n\r\n\r\nMix well", 10);
/// assert_eq!(lines, vec!["Heat the", "oven.", "", "Mix well"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r').trim();
        if paragraph.is_empty() {
            if lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..width).collect());
            }
            if word.is_empty() {
                continue;
            }

            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                display_width(&word)
            } else {
                display_width(&current) + 1 + display_width(&word)
            };

            if needed > width {
                lines.push(std::mem::replace(&mut current, word));
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_fills_and_truncates() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abc…");
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn leading_blank_lines_are_dropped() {
        assert_eq!(wrap_text("\n\nstep one", 20), vec!["step one"]);
        assert!(wrap_text("  \r\n ", 20).is_empty());
    }
}
