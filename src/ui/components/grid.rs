//! Recipe card grid renderer.
//!
//! Cards are laid out row-major, `columns` per row, each `CARD_HEIGHT` lines
//! tall:
//!
//! ```text
//! ┌────────────────────────────┐  ┌────────────────────────────┐
//! │ Beef Wellington            │  │ Breakfast Potatoes         │
//! │  Beef                      │  │  N/A                       │
//! └────────────────────────────┘  └────────────────────────────┘
//!
//! Showing 6 of 13                     [ m  Load more · 7 left ]
//! ```

use crate::ui::helpers::{display_width, pad, position_cursor};
use crate::ui::layout::{CARD_GAP, CARD_HEIGHT, MARGIN};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardView, GridView, LoadMoreInfo};

/// Renders the grid from `row` within a body of `height` lines.
pub fn render_grid(row: usize, height: usize, grid: &GridView, theme: &Theme, cols: usize) {
    let mut current_row = row;
    for card_row in grid.cards.chunks(grid.columns.max(1)) {
        render_card_row(current_row, card_row, grid.card_width, theme);
        current_row += CARD_HEIGHT;
    }

    let status_row = row + height.saturating_sub(1);
    if status_row >= current_row {
        render_status_line(status_row, grid, theme, cols);
    }
}

fn render_card_row(row: usize, cards: &[CardView], width: usize, theme: &Theme) {
    let inner = width.saturating_sub(2);

    for (index, card) in cards.iter().enumerate() {
        let col = MARGIN + 1 + index * (width + CARD_GAP);
        let border = if card.is_selected {
            Theme::fg(&theme.colors.selection_bg)
        } else {
            Theme::fg(&theme.colors.card_border)
        };

        position_cursor(row, col);
        print!("{border}┌{}┐{}", "─".repeat(inner), Theme::reset());

        position_cursor(row + 1, col);
        print!("{border}│{}", Theme::reset());
        if card.is_selected {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", pad(&format!(" {}", card.name), inner));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());

        let badge = format!(" {} ", card.category);
        position_cursor(row + 2, col);
        print!("{border}│{} ", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.badge_fg));
        print!("{}", Theme::bg(&theme.colors.badge_bg));
        print!("{badge}");
        print!("{}", Theme::reset());
        print!("{}", " ".repeat(inner.saturating_sub(display_width(&badge) + 1)));
        print!("{border}│{}", Theme::reset());

        position_cursor(row + 3, col);
        print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());
    }
}

/// Card count on the left, load-more button on the right.
fn render_status_line(row: usize, grid: &GridView, theme: &Theme, cols: usize) {
    let count = format!("Showing {} of {}", grid.rendered_count, grid.total_count);

    position_cursor(row, MARGIN + 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{count}");
    print!("{}", Theme::reset());

    if let Some(load_more) = &grid.load_more {
        let button = load_more_label(load_more);
        let width = display_width(&button);
        let col = cols.saturating_sub(width + MARGIN) + 1;
        if col > MARGIN + display_width(&count) + 1 {
            position_cursor(row, col);
            if load_more.ready {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.accent));
            } else {
                print!("{}", Theme::dim());
                print!("{}", Theme::fg(&theme.colors.text_dim));
            }
            print!("{button}");
            print!("{}", Theme::reset());
        }
    }
}

fn load_more_label(load_more: &LoadMoreInfo) -> String {
    format!("[ m  Load more · {} left ]", load_more.remaining)
}
