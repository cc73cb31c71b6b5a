//! Toolbar component renderer: search field and region dropdown in one box.

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::layout::{MARGIN, TOOLBAR_HEIGHT};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToolbarInfo;

/// Width reserved for the region segment, its separator included.
const REGION_SEGMENT_WIDTH: usize = 28;

/// Renders the toolbar box at `row` and returns the row after it.
///
/// ```text
/// ┌──────────────────────────────────────┬───────────────────────────┐
/// │ Search: chicken▏                     │ Region: Canadian        ▾ │
/// └──────────────────────────────────────┴───────────────────────────┘
/// ```
///
/// The border takes the highlight color while either segment has focus; the
/// focused segment is drawn in selection colors.
pub fn render_toolbar(row: usize, toolbar: &ToolbarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(MARGIN * 2);
    let inner_width = box_width.saturating_sub(3);
    let region_width = REGION_SEGMENT_WIDTH.min(inner_width / 2);
    let search_width = inner_width.saturating_sub(region_width);

    let border = if toolbar.search_active || toolbar.region_active {
        Theme::fg(&theme.colors.search_bar_border)
    } else {
        Theme::fg(&theme.colors.border)
    };
    let margin = " ".repeat(MARGIN);

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┬{}┐{}", "─".repeat(search_width), "─".repeat(region_width), Theme::reset());

    let cursor = if toolbar.search_active { "▏" } else { "" };
    let search_text = if toolbar.query.is_empty() && !toolbar.search_active {
        " Search recipes… (/)".to_string()
    } else {
        format!(" Search: {}{cursor}", toolbar.query)
    };
    let search_style = segment_style(toolbar.search_active, toolbar.query.is_empty(), theme);

    let region_text = format!(" Region: {}", toolbar.region_label);
    let region_text = format!("{}▾ ", pad(&region_text, region_width.saturating_sub(2)));
    let region_style = segment_style(toolbar.region_active, false, theme);

    position_cursor(row + 1, 1);
    print!("{margin}{border}│{}", Theme::reset());
    print!("{search_style}{}{}", pad(&search_text, search_width), Theme::reset());
    print!("{border}│{}", Theme::reset());
    print!("{region_style}{}{}", pad(&region_text, region_width), Theme::reset());
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┴{}┘{}", "─".repeat(search_width), "─".repeat(region_width), Theme::reset());

    row + TOOLBAR_HEIGHT
}

fn segment_style(active: bool, placeholder: bool, theme: &Theme) -> String {
    if active {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else if placeholder {
        Theme::fg(&theme.colors.text_dim)
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}
