//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the fetched
//! recipe list and its pagination cursor, the card selection, input and view
//! modes, the open recipe, the active theme and the generation counters that
//! decide whether an arriving response is still wanted.
//!
//! # State Components
//!
//! - **Recipes**: current list plus chunk cursor ([`RecipeList`])
//! - **Selection**: index into the rendered cards
//! - **Search / Region**: search field text, region options, chosen region
//! - **Detail**: the open recipe and its scroll offset
//! - **Appearance**: light/dark themes and the dark-mode flag
//! - **Requests**: list/detail generations and loading flags
//!
//! # Example
//!
//! ```rust
//! use zmeals::app::AppState;
//! use zmeals::ui::Theme;
//!
//! let state = AppState::new(Theme::default(), Theme::dark());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.mode_icon, "☾");
//! ```

use super::modes::{InputMode, ViewMode};
use super::pagination::RecipeList;
use crate::api::{RequestPurpose, RequestTag, DEFAULT_API_BASE_URL};
use crate::domain::{RecipeDetail, RecipeSummary};
use crate::ui::helpers::{truncate, wrap_text};
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, CardView, DetailLine, DetailView, EmptyState, FooterInfo, GridView, HeaderInfo,
    LineStyle, LoadMoreInfo, RegionPickerView, ToolbarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Label of the region option that removes the region filter.
pub const ALL_REGIONS: &str = "All Regions";

/// Letter whose recipes make up the unfiltered list.
pub const DEFAULT_INITIAL_LETTER: char = 'a';

/// Header icon while the light theme is active (offers "go dark").
pub const LIGHT_MODE_ICON: &str = "☾";

/// Header icon while the dark theme is active (offers "go light").
pub const DARK_MODE_ICON: &str = "☀";

/// Grid navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Last known pane size, updated on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// Central application state container.
///
/// Mutated only by the event handler; rendered through
/// [`compute_viewmodel`](Self::compute_viewmodel).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current recipe list and pagination cursor.
    pub recipes: RecipeList,

    /// Index of the selected card within the rendered cards.
    pub selected_index: usize,

    pub input_mode: InputMode,
    pub view_mode: ViewMode,

    /// Search field contents.
    pub search_query: String,

    /// Region names for the dropdown, in API order.
    pub regions: Vec<String>,

    /// Chosen region; `None` means "All Regions".
    pub selected_region: Option<String>,

    /// Text typed while the region dropdown is open.
    pub region_filter: String,

    /// Recipe shown in the detail view.
    pub detail: Option<RecipeDetail>,

    /// First visible detail line.
    pub detail_scroll: usize,

    pub dark_mode: bool,

    /// Set once the user toggles dark mode; a preference loaded afterwards is ignored.
    pub preference_touched: bool,

    pub light_theme: Theme,
    pub dark_theme: Theme,

    /// User-visible notice (fetch failures, missing recipe, missing video).
    pub notice: Option<String>,

    /// A list-replacing request is in flight.
    pub list_loading: bool,

    /// A detail request is in flight.
    pub detail_loading: bool,

    /// `false` during the cooldown after "load more".
    pub load_more_ready: bool,

    /// Cooldown timers armed but not yet fired. Zellij timers carry no
    /// identity, so "load more" re-enables only once all of them have fired.
    pub pending_cooldowns: usize,

    /// Generation of the latest list-replacing request.
    pub list_generation: u64,

    /// Generation of the latest detail request; bumped again on "back".
    pub detail_generation: u64,

    /// Whether the startup requests were issued.
    pub started: bool,

    pub api_base_url: String,
    pub initial_letter: char,

    pub viewport: Viewport,
}

impl AppState {
    /// Creates an empty state with the given light and dark themes.
    ///
    /// Starts in light mode, list view, normal input mode.
    #[must_use]
    pub fn new(light_theme: Theme, dark_theme: Theme) -> Self {
        Self {
            recipes: RecipeList::default(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::List,
            search_query: String::new(),
            regions: Vec::new(),
            selected_region: None,
            region_filter: String::new(),
            detail: None,
            detail_scroll: 0,
            dark_mode: false,
            preference_touched: false,
            light_theme,
            dark_theme,
            notice: None,
            list_loading: false,
            detail_loading: false,
            load_more_ready: true,
            pending_cooldowns: 0,
            list_generation: 0,
            detail_generation: 0,
            started: false,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            initial_letter: DEFAULT_INITIAL_LETTER,
            viewport: Viewport::default(),
        }
    }

    /// The theme matching the dark-mode flag.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        if self.dark_mode {
            &self.dark_theme
        } else {
            &self.light_theme
        }
    }

    /// Records the pane size and re-clamps the detail scroll offset.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = Viewport { rows, cols };
        self.detail_scroll = self.detail_scroll.min(self.max_detail_scroll());
    }

    /// Replaces the recipe list, rewinding pagination and selection.
    pub fn replace_recipes(&mut self, items: Vec<RecipeSummary>) {
        self.recipes.replace(items);
        self.selected_index = 0;
        self.load_more_ready = true;
    }

    /// Reveals the next chunk. Returns `false` when nothing was left.
    pub fn advance_page(&mut self) -> bool {
        let appended = self.recipes.advance().map_or(0, <[RecipeSummary]>::len);
        appended > 0
    }

    #[must_use]
    pub fn selected_recipe(&self) -> Option<&RecipeSummary> {
        self.recipes.rendered().get(self.selected_index)
    }

    /// Moves the card selection within the grid.
    ///
    /// Left/right step by one card. Up/down step by one row; moving down from
    /// a row above a partial last row lands on the last card.
    pub fn move_selection(&mut self, direction: Direction) {
        let count = self.recipes.rendered_count();
        if count == 0 {
            return;
        }
        let columns = layout::grid_columns(self.viewport.cols);
        let last = count - 1;
        let current = self.selected_index.min(last);

        self.selected_index = match direction {
            Direction::Left => current.saturating_sub(1),
            Direction::Right => (current + 1).min(last),
            Direction::Up => current.checked_sub(columns).unwrap_or(current),
            Direction::Down => {
                if current + columns <= last {
                    current + columns
                } else if current / columns < last / columns {
                    last
                } else {
                    current
                }
            }
        };
    }

    /// Starts a new list-replacing request, superseding any earlier one.
    pub fn begin_list_request(&mut self, purpose: RequestPurpose) -> RequestTag {
        self.list_generation += 1;
        self.list_loading = true;
        tracing::debug!(generation = self.list_generation, purpose = ?purpose, "list request issued");
        RequestTag::new(purpose, self.list_generation)
    }

    /// Starts a detail request, superseding any earlier one.
    pub fn begin_detail_request(&mut self, id: String) -> RequestTag {
        self.detail_generation += 1;
        self.detail_loading = true;
        RequestTag::new(RequestPurpose::Detail { id }, self.detail_generation)
    }

    /// Makes any in-flight detail response stale.
    pub fn cancel_detail_request(&mut self) {
        self.detail_generation += 1;
        self.detail_loading = false;
    }

    /// The unfiltered initial list request purpose.
    #[must_use]
    pub const fn initial_list_purpose(&self) -> RequestPurpose {
        RequestPurpose::InitialList {
            letter: self.initial_letter,
        }
    }

    /// Regions matching the dropdown filter, in API order.
    ///
    /// Matching is fuzzy and case-insensitive; an empty filter keeps every region.
    #[must_use]
    pub fn filtered_regions(&self) -> Vec<&str> {
        use fuzzy_matcher::FuzzyMatcher;

        let filter = self.region_filter.trim().to_lowercase();
        if filter.is_empty() {
            return self.regions.iter().map(String::as_str).collect();
        }

        let matcher = SkimMatcherV2::default();
        self.regions
            .iter()
            .filter(|region| matcher.fuzzy_match(&region.to_lowercase(), &filter).is_some())
            .map(String::as_str)
            .collect()
    }

    /// Number of dropdown options, "All Regions" included.
    #[must_use]
    pub fn region_option_count(&self) -> usize {
        self.filtered_regions().len() + 1
    }

    /// Resolves a dropdown index.
    ///
    /// `Some(None)` is "All Regions", `Some(Some(region))` a region, `None` an
    /// index past the end.
    #[must_use]
    pub fn region_choice(&self, highlighted: usize) -> Option<Option<String>> {
        if highlighted == 0 {
            return Some(None);
        }
        self.filtered_regions()
            .get(highlighted - 1)
            .map(|region| Some((*region).to_string()))
    }

    /// Dropdown index of the chosen region, for opening the picker on it.
    #[must_use]
    pub fn selected_region_option(&self) -> usize {
        self.selected_region
            .as_deref()
            .and_then(|chosen| self.filtered_regions().iter().position(|r| *r == chosen))
            .map_or(0, |pos| pos + 1)
    }

    /// Largest useful detail scroll offset for the current viewport.
    #[must_use]
    pub fn max_detail_scroll(&self) -> usize {
        let total = self.detail_lines(self.viewport.cols).len();
        total.saturating_sub(layout::detail_body_height(self.viewport.rows))
    }

    /// Scrolls the detail view by `delta` lines, clamped to the content.
    pub fn scroll_detail(&mut self, delta: isize) {
        let max = self.max_detail_scroll();
        self.detail_scroll = self.detail_scroll.saturating_add_signed(delta).min(max);
    }

    /// Builds the wrapped detail lines for a pane `cols` wide.
    #[must_use]
    pub fn detail_lines(&self, cols: usize) -> Vec<DetailLine> {
        let Some(detail) = &self.detail else {
            return Vec::new();
        };
        let width = layout::detail_text_width(cols);
        let mut lines = Vec::new();

        for line in wrap_text(&detail.name, width) {
            lines.push(DetailLine::new(line, LineStyle::Title));
        }

        let mut meta = vec![
            format!("Category: {}", detail.category),
            format!("Area: {}", detail.area),
        ];
        if !detail.tags.is_empty() {
            meta.push(format!("Tags: {}", detail.tags.join(", ")));
        }
        for line in wrap_text(&meta.join("  ·  "), width) {
            lines.push(DetailLine::new(line, LineStyle::Meta));
        }

        lines.push(DetailLine::blank());
        lines.push(DetailLine::new("Ingredients", LineStyle::Section));
        if detail.ingredients.is_empty() {
            lines.push(DetailLine::new("  (none listed)", LineStyle::Meta));
        }
        for ingredient in &detail.ingredients {
            for (i, line) in wrap_text(ingredient, width.saturating_sub(4)).into_iter().enumerate() {
                let bullet = if i == 0 { "  • " } else { "    " };
                lines.push(DetailLine::new(format!("{bullet}{line}"), LineStyle::Body));
            }
        }

        lines.push(DetailLine::blank());
        lines.push(DetailLine::new("Instructions", LineStyle::Section));
        for line in wrap_text(&detail.instructions, width) {
            lines.push(DetailLine::new(line, LineStyle::Body));
        }

        let links: Vec<(&str, &String)> = [("Video", &detail.video_url), ("Source", &detail.source_url)]
            .into_iter()
            .filter_map(|(label, url)| url.as_ref().map(|u| (label, u)))
            .collect();
        if !links.is_empty() {
            lines.push(DetailLine::blank());
            for (label, url) in links {
                lines.push(DetailLine::new(format!("{label}: {url}"), LineStyle::Link));
            }
        }

        lines
    }

    /// Computes the renderable view model for a pane of `rows` × `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.view_mode {
            ViewMode::List => self.compute_list_body(rows, cols),
            ViewMode::Detail => Body::Detail(self.compute_detail_view(rows, cols)),
        };

        UIViewModel {
            header: self.compute_header(),
            toolbar: self.compute_toolbar(),
            notice: self.notice.clone(),
            body,
            region_picker: self.compute_region_picker(rows),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = if self.list_loading || self.detail_loading {
            Some("Loading…".to_string())
        } else {
            None
        };

        HeaderInfo {
            title: "Recipe Browser".to_string(),
            mode_icon: if self.dark_mode { DARK_MODE_ICON } else { LIGHT_MODE_ICON },
            status,
        }
    }

    fn compute_toolbar(&self) -> Option<ToolbarInfo> {
        if self.view_mode == ViewMode::Detail {
            return None;
        }

        Some(ToolbarInfo {
            query: self.search_query.clone(),
            search_active: self.input_mode == InputMode::Search,
            region_label: self
                .selected_region
                .clone()
                .unwrap_or_else(|| ALL_REGIONS.to_string()),
            region_active: matches!(self.input_mode, InputMode::RegionPicker { .. }),
        })
    }

    /// Grid windowing: scroll by whole card rows so the selected card's row
    /// stays visible.
    fn compute_list_body(&self, rows: usize, cols: usize) -> Body {
        if self.recipes.is_empty() {
            let (message, subtitle) = if self.list_loading {
                ("Loading recipes…", "Fetching from TheMealDB")
            } else {
                ("No recipes found", "Try another search or region, or press R to reload")
            };
            return Body::Empty(EmptyState {
                message: message.to_string(),
                subtitle: subtitle.to_string(),
            });
        }

        let rendered = self.recipes.rendered();
        let columns = layout::grid_columns(cols);
        let card_width = layout::card_width(cols);
        let has_more = self.recipes.has_more();
        let visible_rows = layout::visible_card_rows(rows, has_more);

        let selected = self.selected_index.min(rendered.len().saturating_sub(1));
        let selected_row = selected / columns;
        let first_row = selected_row.saturating_sub(visible_rows - 1);
        let start = first_row * columns;
        let end = (start + visible_rows * columns).min(rendered.len());

        let cards = rendered[start..end]
            .iter()
            .enumerate()
            .map(|(offset, recipe)| CardView {
                name: truncate(&recipe.name, card_width.saturating_sub(4)),
                category: truncate(recipe.category_label(), card_width.saturating_sub(6)),
                is_selected: start + offset == selected,
            })
            .collect();

        let load_more = has_more.then(|| LoadMoreInfo {
            remaining: self.recipes.len() - self.recipes.rendered_count(),
            ready: self.load_more_ready,
        });

        Body::Grid(GridView {
            cards,
            columns,
            card_width,
            rendered_count: rendered.len(),
            total_count: self.recipes.len(),
            load_more,
        })
    }

    fn compute_detail_view(&self, rows: usize, cols: usize) -> DetailView {
        let lines = self.detail_lines(cols);
        let height = layout::detail_body_height(rows);
        let max_scroll = lines.len().saturating_sub(height);
        let scroll = self.detail_scroll.min(max_scroll);

        DetailView {
            more_above: scroll > 0,
            more_below: scroll < max_scroll,
            lines: lines.into_iter().skip(scroll).take(height).collect(),
        }
    }

    /// Options windowed around the highlighted one.
    fn compute_region_picker(&self, rows: usize) -> Option<RegionPickerView> {
        let InputMode::RegionPicker { highlighted } = self.input_mode else {
            return None;
        };

        let mut options: Vec<String> = vec![ALL_REGIONS.to_string()];
        options.extend(self.filtered_regions().into_iter().map(String::from));

        // Two lines for the border, one for the filter line.
        let capacity = layout::list_body_height(rows).saturating_sub(3).max(1);
        let start = highlighted.saturating_sub(capacity - 1);

        let options = options
            .into_iter()
            .enumerate()
            .skip(start)
            .take(capacity)
            .map(|(index, label)| (label, index == highlighted))
            .collect();

        Some(RegionPickerView {
            filter: self.region_filter.clone(),
            options,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.view_mode, self.input_mode) {
            (_, InputMode::Search) => "type to search · Enter: submit · Esc: cancel",
            (_, InputMode::RegionPicker { .. }) => {
                "type to filter · ↑/↓: move · Enter: choose · Esc: cancel"
            }
            (ViewMode::Detail, InputMode::Normal) => {
                "j/k: scroll · PgUp/PgDn: page · o: video · d: dark · Esc/b: back · q: close"
            }
            (ViewMode::List, InputMode::Normal) => {
                "hjkl: move · Enter: details · /: search · r: region · m: more · d: dark · R: reload · q: close"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipes(count: usize) -> Vec<RecipeSummary> {
        (0..count)
            .map(|i| RecipeSummary {
                id: format!("{}", 52_000 + i),
                name: format!("Recipe {i}"),
                thumbnail_url: String::new(),
                category: if i % 2 == 0 { Some("Beef".to_string()) } else { None },
            })
            .collect()
    }

    fn state_with(count: usize) -> AppState {
        let mut state = AppState::new(Theme::default(), Theme::dark());
        state.replace_recipes(recipes(count));
        state
    }

    fn grid(state: &AppState, rows: usize, cols: usize) -> GridView {
        match state.compute_viewmodel(rows, cols).body {
            Body::Grid(grid) => grid,
            other => panic!("expected grid, got {other:?}"),
        }
    }

    fn sample_detail() -> RecipeDetail {
        RecipeDetail {
            id: "52772".to_string(),
            name: "Teriyaki Chicken Casserole".to_string(),
            thumbnail_url: String::new(),
            area: "Japanese".to_string(),
            category: "Chicken".to_string(),
            instructions: "Preheat oven to 350.\r\nCombine soy sauce and water.".to_string(),
            ingredients: vec!["soy sauce (3/4 cup)".to_string(), "water".to_string()],
            video_url: Some("https://www.youtube.com/watch?v=4aZr5hZXP_s".to_string()),
            tags: vec!["Meat".to_string(), "Casserole".to_string()],
            source_url: None,
        }
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let state = state_with(0);
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.body, Body::Empty(ref e) if e.message == "No recipes found"));
    }

    #[test]
    fn grid_shows_first_chunk_with_load_more() {
        let state = state_with(14);
        let grid = grid(&state, 40, 100);
        assert_eq!(grid.rendered_count, 6);
        assert_eq!(grid.cards.len(), 6);
        assert_eq!(
            grid.load_more,
            Some(LoadMoreInfo {
                remaining: 8,
                ready: true
            })
        );
        assert_eq!(grid.cards[1].category, "N/A");
        assert!(grid.cards[0].is_selected);
    }

    #[test]
    fn exactly_one_chunk_has_no_load_more() {
        let state = state_with(6);
        assert!(grid(&state, 40, 100).load_more.is_none());
    }

    #[test]
    fn grid_window_follows_selection() {
        let mut state = state_with(12);
        state.advance_page();
        state.set_viewport(13, 80);
        // 2 columns, one visible card row.
        state.selected_index = 9;
        let grid = grid(&state, 13, 80);
        assert_eq!(grid.columns, 2);
        assert_eq!(grid.cards.len(), 2);
        assert_eq!(grid.cards[0].name, "Recipe 8");
        assert!(grid.cards[1].is_selected);
    }

    #[test]
    fn selection_moves_through_grid() {
        let mut state = state_with(5);
        state.set_viewport(24, 100);

        state.move_selection(Direction::Down);
        assert_eq!(state.selected_index, 3);
        state.move_selection(Direction::Down);
        assert_eq!(state.selected_index, 3);
        state.move_selection(Direction::Right);
        assert_eq!(state.selected_index, 4);
        state.move_selection(Direction::Right);
        assert_eq!(state.selected_index, 4);
        state.move_selection(Direction::Up);
        assert_eq!(state.selected_index, 1);
        state.move_selection(Direction::Left);
        state.move_selection(Direction::Left);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn moving_down_lands_on_partial_last_row() {
        let mut state = state_with(5);
        state.set_viewport(24, 100);
        state.selected_index = 2;
        state.move_selection(Direction::Down);
        assert_eq!(state.selected_index, 4);
    }

    #[test]
    fn dark_mode_switches_theme_and_icon() {
        let mut state = state_with(1);
        assert_eq!(state.theme().name, "catppuccin-latte");
        state.dark_mode = true;
        assert_eq!(state.theme().name, "catppuccin-mocha");
        assert_eq!(state.compute_viewmodel(24, 80).header.mode_icon, DARK_MODE_ICON);
    }

    #[test]
    fn region_filter_is_fuzzy_and_keeps_order() {
        let mut state = state_with(0);
        state.regions = ["American", "British", "Canadian", "Jamaican"]
            .into_iter()
            .map(String::from)
            .collect();
        state.region_filter = "can".to_string();
        assert_eq!(state.filtered_regions(), vec!["American", "Canadian", "Jamaican"]);

        state.region_filter = "cnd".to_string();
        assert_eq!(state.filtered_regions(), vec!["Canadian"]);
        assert_eq!(state.region_choice(0), Some(None));
        assert_eq!(state.region_choice(1), Some(Some("Canadian".to_string())));
        assert_eq!(state.region_choice(2), None);
    }

    #[test]
    fn picker_opens_on_current_region() {
        let mut state = state_with(0);
        state.regions = vec!["British".to_string(), "Canadian".to_string()];
        state.selected_region = Some("Canadian".to_string());
        assert_eq!(state.selected_region_option(), 2);
        state.selected_region = None;
        assert_eq!(state.selected_region_option(), 0);
    }

    #[test]
    fn detail_lines_include_sections_and_links() {
        let mut state = state_with(0);
        state.detail = Some(sample_detail());
        let lines = state.detail_lines(80);

        assert_eq!(lines[0], DetailLine::new("Teriyaki Chicken Casserole", LineStyle::Title));
        assert!(lines[1].text.contains("Area: Japanese"));
        assert!(lines[1].text.contains("Tags: Meat, Casserole"));
        assert!(lines.contains(&DetailLine::new("  • soy sauce (3/4 cup)", LineStyle::Body)));
        assert!(lines.contains(&DetailLine::new("Preheat oven to 350.", LineStyle::Body)));
        assert_eq!(
            lines.last().map(|l| l.style),
            Some(LineStyle::Link)
        );
    }

    #[test]
    fn detail_scroll_is_clamped() {
        let mut state = state_with(0);
        state.detail = Some(sample_detail());
        state.view_mode = ViewMode::Detail;
        state.set_viewport(10, 80);

        state.scroll_detail(100);
        let max = state.max_detail_scroll();
        assert_eq!(state.detail_scroll, max);
        assert!(max > 0);

        state.scroll_detail(-1000);
        assert_eq!(state.detail_scroll, 0);

        let vm = state.compute_viewmodel(10, 80);
        assert!(matches!(vm.body, Body::Detail(ref d) if !d.more_above && d.more_below));
        assert!(vm.toolbar.is_none());
    }
}
