//! Header component renderer.
//!
//! Title centered, loading status on the left, dark-mode icon on the right.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header bar at `row` and returns the next row.
///
/// ```text
/// [ Loading…]      Recipe Browser      [☾ ]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols.saturating_sub(8));
    let title_len = display_width(&title);
    let title_start = cols.saturating_sub(title_len) / 2;

    let status = header
        .status
        .as_deref()
        .map(|s| truncate(&format!(" {s}"), title_start.saturating_sub(1)))
        .unwrap_or_default();
    let icon = format!("{} ", header.mode_icon);
    let icon_len = display_width(&icon);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{status}");
    print!("{}", " ".repeat(title_start.saturating_sub(display_width(&status))));
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(title_start + title_len + icon_len)));
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("{icon}");

    print!("{}", Theme::reset());
    row + 1
}
