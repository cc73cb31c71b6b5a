//! Notice line renderer.

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::layout::MARGIN;
use crate::ui::theme::Theme;

/// Renders the notice at `row`, or clears the line when there is none.
pub fn render_notice(row: usize, notice: Option<&str>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match notice {
        Some(message) => {
            print!("{}", " ".repeat(MARGIN));
            print!("{}", Theme::fg(&theme.colors.notice_fg));
            print!("{}", pad(&format!("! {message}"), cols.saturating_sub(MARGIN)));
            print!("{}", Theme::reset());
        }
        None => print!("{}", " ".repeat(cols)),
    }
    row + 1
}
