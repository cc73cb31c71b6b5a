//! Detail view renderer.

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::layout::MARGIN;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailLine, DetailView, LineStyle};

/// Renders the visible detail lines from `row`, with `↑`/`↓` markers in the
/// right margin when more content exists above or below.
pub fn render_detail(row: usize, detail: &DetailView, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(MARGIN * 2);

    for (offset, line) in detail.lines.iter().enumerate() {
        position_cursor(row + offset, MARGIN + 1);
        print!("{}", line_style(line, theme));
        print!("{}", pad(&line.text, width));
        print!("{}", Theme::reset());
    }

    let marker_col = cols.saturating_sub(MARGIN - 1).max(1);
    if detail.more_above {
        position_cursor(row, marker_col);
        print!("{}↑{}", Theme::fg(&theme.colors.accent), Theme::reset());
    }
    if detail.more_below && !detail.lines.is_empty() {
        position_cursor(row + detail.lines.len() - 1, marker_col);
        print!("{}↓{}", Theme::fg(&theme.colors.accent), Theme::reset());
    }
}

fn line_style(line: &DetailLine, theme: &Theme) -> String {
    match line.style {
        LineStyle::Title => format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
        LineStyle::Meta => Theme::fg(&theme.colors.text_dim),
        LineStyle::Section => format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent)),
        LineStyle::Body => Theme::fg(&theme.colors.text_normal),
        LineStyle::Link => format!("{}{}", Theme::underline(), Theme::fg(&theme.colors.empty_state_fg)),
    }
}
