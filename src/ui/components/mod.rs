//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: title, loading status, dark-mode icon
//! - [`toolbar`]: search field and region dropdown
//! - [`notice`]: one-line error/status notice
//! - [`grid`]: recipe cards and the load-more button
//! - [`empty`]: placeholder when the list is empty
//! - [`detail`]: scrolled recipe details
//! - [`region_picker`]: region dropdown overlay
//! - [`footer`]: keybinding hints
//!
//! # Layout Modes
//!
//! - [`render_list_mode`]: Header + Toolbar + Notice + Grid/Empty + Footer
//! - [`render_detail_mode`]: Header + Notice + Detail + Footer

mod detail;
mod empty;
mod footer;
mod grid;
mod header;
mod notice;
mod region_picker;
mod toolbar;

use crate::ui::helpers::position_cursor;
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use notice::render_notice;
use region_picker::render_region_picker;
use toolbar::render_toolbar;

/// Horizontal separator line; returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_chrome_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.max(layout::FOOTER_ROWS);
    render_border(footer_row - 1, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

/// Renders the list view layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Toolbar - 3 lines]
/// [Notice]
/// [Grid or empty state]
/// [Border]
/// [Footer]
/// ```
///
/// The region dropdown, when open, is drawn last over the notice and grid.
pub fn render_list_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_header(layout::HEADER_ROW, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(toolbar) = &vm.toolbar {
        render_toolbar(current_row, toolbar, theme, cols);
    }
    render_notice(layout::LIST_NOTICE_ROW, vm.notice.as_deref(), theme, cols);

    let height = layout::list_body_height(rows);
    match &vm.body {
        Body::Grid(grid) => render_grid(layout::LIST_BODY_ROW, height, grid, theme, cols),
        Body::Empty(empty) => render_empty_state(layout::LIST_BODY_ROW + 1, empty, theme, cols),
        Body::Detail(detail) => render_detail(layout::LIST_BODY_ROW, detail, theme, cols),
    }

    if let Some(picker) = &vm.region_picker {
        render_region_picker(layout::LIST_NOTICE_ROW, picker, theme, cols);
    }

    render_chrome_bottom(vm, theme, cols, rows);
}

/// Renders the detail view layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Notice]
/// [Detail lines]
/// [Border]
/// [Footer]
/// ```
pub fn render_detail_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_header(layout::HEADER_ROW, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_notice(current_row, vm.notice.as_deref(), theme, cols);

    if let Body::Detail(detail) = &vm.body {
        render_detail(current_row, detail, theme, cols);
    }

    render_chrome_bottom(vm, theme, cols, rows);
}
