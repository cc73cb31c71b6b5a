//! Region dropdown overlay.

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::layout::MARGIN;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::RegionPickerView;

const PICKER_WIDTH: usize = 28;

/// Draws the dropdown at `row`, right-aligned under the region segment.
///
/// ```text
/// ┌ Region ──────────────────┐
/// │ > can                    │
/// │ All Regions              │
/// │ Canadian                 │
/// └──────────────────────────┘
/// ```
pub fn render_region_picker(row: usize, picker: &RegionPickerView, theme: &Theme, cols: usize) {
    let width = PICKER_WIDTH.min(cols.saturating_sub(MARGIN * 2)).max(6);
    let inner = width - 2;
    let col = cols.saturating_sub(width + MARGIN) + 1;
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(row, col);
    print!("{border}┌{}┐{}", pad("─ Region ", inner).replace(' ', "─"), Theme::reset());

    position_cursor(row + 1, col);
    print!("{border}│{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", pad(&format!(" > {}", picker.filter), inner));
    print!("{}{border}│{}", Theme::reset(), Theme::reset());

    let mut current_row = row + 2;
    for (label, highlighted) in &picker.options {
        position_cursor(current_row, col);
        print!("{border}│{}", Theme::reset());
        if *highlighted {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", pad(&format!(" {label}"), inner));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, col);
    print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());
}
