//! Screen geometry shared by view model computation and the components.
//!
//! ```text
//! row 1      blank
//! row 2      header
//! row 3      border
//! rows 4-6   toolbar (list view only)
//! row 7      notice
//! row 8..    body
//! rows-1     border
//! rows       footer
//! ```
//!
//! The detail view has no toolbar: its notice sits on row 4 and the body
//! starts on row 5.

pub const HEADER_ROW: usize = 2;
pub const TOOLBAR_ROW: usize = 4;
pub const TOOLBAR_HEIGHT: usize = 3;
pub const LIST_NOTICE_ROW: usize = TOOLBAR_ROW + TOOLBAR_HEIGHT;
pub const LIST_BODY_ROW: usize = LIST_NOTICE_ROW + 1;
pub const DETAIL_NOTICE_ROW: usize = 4;
pub const DETAIL_BODY_ROW: usize = DETAIL_NOTICE_ROW + 1;

/// Border plus footer.
pub const FOOTER_ROWS: usize = 2;

/// Card size including its border.
pub const CARD_WIDTH: usize = 30;
pub const CARD_HEIGHT: usize = 4;
pub const CARD_GAP: usize = 2;

/// Lines taken by the load-more button (blank + button).
pub const LOAD_MORE_HEIGHT: usize = 2;

/// Horizontal margin around the body content.
pub const MARGIN: usize = 2;

/// Maximum width of wrapped detail text.
pub const DETAIL_TEXT_WIDTH: usize = 96;

#[must_use]
pub const fn list_body_height(rows: usize) -> usize {
    rows.saturating_sub(LIST_BODY_ROW - 1 + FOOTER_ROWS)
}

#[must_use]
pub const fn detail_body_height(rows: usize) -> usize {
    rows.saturating_sub(DETAIL_BODY_ROW - 1 + FOOTER_ROWS)
}

/// Number of card columns that fit in `cols`. Always at least one.
///
/// ```
/// use zmeals::ui::layout::grid_columns;
///
/// assert_eq!(grid_columns(20), 1);
/// assert_eq!(grid_columns(80), 2);
/// assert_eq!(grid_columns(100), 3);
/// ```
#[must_use]
pub fn grid_columns(cols: usize) -> usize {
    let usable = cols.saturating_sub(MARGIN * 2) + CARD_GAP;
    (usable / (CARD_WIDTH + CARD_GAP)).max(1)
}

/// Card width, shrunk when even one full card does not fit.
#[must_use]
pub fn card_width(cols: usize) -> usize {
    CARD_WIDTH.min(cols.saturating_sub(MARGIN * 2)).max(4)
}

/// Number of card rows that fit in the list body. Always at least one.
#[must_use]
pub fn visible_card_rows(rows: usize, reserve_load_more: bool) -> usize {
    let reserved = if reserve_load_more { LOAD_MORE_HEIGHT } else { 0 };
    (list_body_height(rows).saturating_sub(reserved) / CARD_HEIGHT).max(1)
}

/// Width available to wrapped detail text.
#[must_use]
pub fn detail_text_width(cols: usize) -> usize {
    cols.saturating_sub(MARGIN * 2).clamp(10, DETAIL_TEXT_WIDTH)
}
