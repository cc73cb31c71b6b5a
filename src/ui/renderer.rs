//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI output
//! ```

use crate::app::modes::ViewMode;
use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` × `cols`.
///
/// Uses the theme selected by the dark-mode flag.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let theme = state.theme();

    match state.view_mode {
        ViewMode::List => components::render_list_mode(&viewmodel, theme, cols, rows),
        ViewMode::Detail => components::render_detail_mode(&viewmodel, theme, cols, rows),
    }
}
