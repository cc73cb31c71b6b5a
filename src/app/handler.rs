//! Event handling and state transition logic.
//!
//! [`handle_event`] is the reducer of the plugin: it takes one [`Event`],
//! mutates [`AppState`] and returns whether to re-render plus the side effects
//! to run. It never calls Zellij itself, so every transition is testable.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Start` (permissions granted)
//! - **List**: `Move`, `ViewDetails`, `LoadMore`, `Reload`
//! - **Search**: `EnterSearch`, `Char`, `Backspace`, `Submit`, `Cancel`
//! - **Region**: `OpenRegionPicker`, `PickerUp`, `PickerDown`, `Submit`
//! - **Detail**: `Scroll`, `OpenVideo`, `Back`
//! - **Appearance**: `ToggleDarkMode`
//! - **Async**: `ApiResponse`, `CooldownElapsed`, `WorkerResponse`
//!
//! # Request Supersession
//!
//! Each list-replacing request carries the list generation it was issued
//! under, each detail request the detail generation. A response whose
//! generation is no longer current is dropped without touching state.
//!
//! # Example
//!
//! ```rust
//! use zmeals::app::{handle_event, Action, AppState, Event};
//! use zmeals::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Theme::dark());
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//! assert_eq!(actions.len(), 3);
//! # Ok::<(), zmeals::ZmealsError>(())
//! ```

use super::modes::{InputMode, ViewMode};
use super::search::sanitize;
use super::state::Direction;
use crate::api::{
    check_status, decode_detail, decode_regions, decode_summaries, RequestPurpose, RequestTag,
};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::ui::layout;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Seconds "load more" stays disabled after an activation.
pub const LOAD_MORE_COOLDOWN_SECS: f64 = 0.3;

/// Detail view scroll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollStep {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
}

/// Events triggered by user input, timers, HTTP responses or the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions were granted: load the preference, the initial list and
    /// the region options.
    Start,

    /// Hides the plugin pane.
    CloseFocus,

    /// Moves the card selection.
    Move(Direction),

    /// Fetches and opens the selected recipe.
    ViewDetails,

    /// Reveals the next chunk of cards.
    LoadMore,

    /// The load-more cooldown timer fired.
    CooldownElapsed,

    /// Re-fetches the unfiltered list, clearing search and region.
    Reload,

    /// Focuses the search field.
    EnterSearch,

    /// Types into the focused input (search field or region filter).
    Char(char),

    /// Deletes the last character of the focused input.
    Backspace,

    /// Enter: submits the search, or chooses the highlighted region.
    Submit,

    /// Esc in an input mode: leaves it without side effects.
    Cancel,

    /// Opens the region dropdown.
    OpenRegionPicker,
    PickerUp,
    PickerDown,

    /// Scrolls the detail view.
    Scroll(ScrollStep),

    /// Opens the current recipe's video with the configured opener.
    OpenVideo,

    /// Detail view back to the list view, without re-fetching.
    Back,

    ToggleDarkMode,

    /// A `web_request` completed.
    ApiResponse {
        tag: RequestTag,
        status: u16,
        body: Vec<u8>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`: whether the UI changed, and the side effects
/// for the plugin shim to run in order.
///
/// # Errors
///
/// Currently infallible; the `Result` lets transitions propagate failures
/// without changing the shim.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::Start => Ok(handle_start(state)),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Move(direction) => {
            if state.view_mode != ViewMode::List {
                return Ok((false, vec![]));
            }
            let before = state.selected_index;
            state.move_selection(*direction);
            Ok((state.selected_index != before, vec![]))
        }
        Event::ViewDetails => Ok(handle_view_details(state)),
        Event::LoadMore => Ok(handle_load_more(state)),
        Event::CooldownElapsed => {
            state.pending_cooldowns = state.pending_cooldowns.saturating_sub(1);
            if state.load_more_ready || state.pending_cooldowns > 0 {
                return Ok((false, vec![]));
            }
            state.load_more_ready = true;
            Ok((true, vec![]))
        }
        Event::Reload => {
            if state.view_mode != ViewMode::List {
                return Ok((false, vec![]));
            }
            tracing::debug!("reloading unfiltered list");
            state.search_query.clear();
            state.selected_region = None;
            let purpose = state.initial_list_purpose();
            let mut actions = vec![fetch_list(state, purpose)];
            if state.regions.is_empty() {
                tracing::debug!("region options missing, requesting them again");
                actions.push(fetch(state, RequestTag::new(RequestPurpose::Regions, 0)));
            }
            Ok((true, actions))
        }
        Event::EnterSearch => {
            if state.view_mode != ViewMode::List {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok(handle_char(state, *c)),
        Event::Backspace => Ok(handle_backspace(state)),
        Event::Submit => Ok(match state.input_mode {
            InputMode::Search => submit_search(state),
            InputMode::RegionPicker { highlighted } => choose_region(state, highlighted),
            InputMode::Normal => handle_view_details(state),
        }),
        Event::Cancel => {
            if state.input_mode == InputMode::Normal {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            state.region_filter.clear();
            Ok((true, vec![]))
        }
        Event::OpenRegionPicker => {
            if state.view_mode != ViewMode::List {
                return Ok((false, vec![]));
            }
            state.region_filter.clear();
            state.input_mode = InputMode::RegionPicker {
                highlighted: state.selected_region_option(),
            };
            Ok((true, vec![]))
        }
        Event::PickerUp | Event::PickerDown => {
            let InputMode::RegionPicker { highlighted } = state.input_mode else {
                return Ok((false, vec![]));
            };
            let last = state.region_option_count() - 1;
            let next = if *event == Event::PickerUp {
                highlighted.saturating_sub(1)
            } else {
                (highlighted + 1).min(last)
            };
            state.input_mode = InputMode::RegionPicker { highlighted: next };
            Ok((next != highlighted, vec![]))
        }
        Event::Scroll(step) => {
            if state.view_mode != ViewMode::Detail {
                return Ok((false, vec![]));
            }
            let page = layout::detail_body_height(state.viewport.rows).max(1);
            let page = isize::try_from(page).unwrap_or(isize::MAX);
            let delta = match step {
                ScrollStep::LineUp => -1,
                ScrollStep::LineDown => 1,
                ScrollStep::PageUp => -page,
                ScrollStep::PageDown => page,
            };
            let before = state.detail_scroll;
            state.scroll_detail(delta);
            Ok((state.detail_scroll != before, vec![]))
        }
        Event::OpenVideo => Ok(handle_open_video(state)),
        Event::Back => Ok(handle_back(state)),
        Event::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            state.preference_touched = true;
            tracing::debug!(dark_mode = state.dark_mode, "dark mode toggled");
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::save_dark_mode(state.dark_mode))],
            ))
        }
        Event::ApiResponse { tag, status, body } => {
            Ok(handle_api_response(state, tag, *status, body.clone()))
        }
        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

/// Short event label for spans; avoids logging whole response bodies.
fn event_name(event: &Event) -> String {
    match event {
        Event::ApiResponse { tag, status, body } => format!(
            "ApiResponse({:?}, gen {}, status {status}, {} bytes)",
            tag.purpose,
            tag.generation,
            body.len()
        ),
        other => format!("{other:?}"),
    }
}

fn fetch(state: &AppState, tag: RequestTag) -> Action {
    Action::Fetch {
        url: tag.purpose.url(&state.api_base_url),
        tag,
    }
}

fn fetch_list(state: &mut AppState, purpose: RequestPurpose) -> Action {
    let tag = state.begin_list_request(purpose);
    fetch(state, tag)
}

fn handle_start(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.started {
        tracing::debug!("start requested twice, ignoring");
        return (false, vec![]);
    }
    state.started = true;

    let purpose = state.initial_list_purpose();
    let initial = fetch_list(state, purpose);
    let regions = fetch(state, RequestTag::new(RequestPurpose::Regions, 0));
    (
        true,
        vec![
            Action::PostToWorker(WorkerMessage::load_preferences()),
            initial,
            regions,
        ],
    )
}

fn handle_view_details(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.view_mode != ViewMode::List {
        return (false, vec![]);
    }
    let Some(recipe) = state.selected_recipe() else {
        tracing::debug!("no recipe selected");
        return (false, vec![]);
    };
    let id = recipe.id.clone();
    tracing::debug!(recipe_id = %id, recipe_name = %recipe.name, "loading recipe details");

    let tag = state.begin_detail_request(id);
    (true, vec![fetch(state, tag)])
}

fn handle_load_more(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.view_mode != ViewMode::List {
        return (false, vec![]);
    }
    if !state.load_more_ready {
        tracing::debug!("load more ignored during cooldown");
        return (false, vec![]);
    }
    if !state.advance_page() {
        return (false, vec![]);
    }

    state.load_more_ready = false;
    state.pending_cooldowns += 1;
    (
        true,
        vec![Action::StartTimer {
            seconds: LOAD_MORE_COOLDOWN_SECS,
        }],
    )
}

fn handle_char(state: &mut AppState, c: char) -> (bool, Vec<Action>) {
    match state.input_mode {
        InputMode::Search => {
            state.search_query.push(c);
            (true, vec![])
        }
        InputMode::RegionPicker { .. } => {
            state.region_filter.push(c);
            state.input_mode = InputMode::RegionPicker { highlighted: 0 };
            (true, vec![])
        }
        InputMode::Normal => (false, vec![]),
    }
}

fn handle_backspace(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.input_mode {
        InputMode::Search => (state.search_query.pop().is_some(), vec![]),
        InputMode::RegionPicker { .. } => {
            let changed = state.region_filter.pop().is_some();
            if changed {
                state.input_mode = InputMode::RegionPicker { highlighted: 0 };
            }
            (changed, vec![])
        }
        InputMode::Normal => (false, vec![]),
    }
}

/// An empty term resets to the unfiltered list.
fn submit_search(state: &mut AppState) -> (bool, Vec<Action>) {
    let term = sanitize(&state.search_query);
    state.search_query.clone_from(&term);
    state.input_mode = InputMode::Normal;
    state.selected_region = None;

    let purpose = if term.is_empty() {
        tracing::debug!("empty search, reloading unfiltered list");
        state.initial_list_purpose()
    } else {
        tracing::debug!(term = %term, "searching by name");
        RequestPurpose::Search { term }
    };
    (true, vec![fetch_list(state, purpose)])
}

fn choose_region(state: &mut AppState, highlighted: usize) -> (bool, Vec<Action>) {
    let Some(choice) = state.region_choice(highlighted) else {
        return (false, vec![]);
    };
    state.input_mode = InputMode::Normal;
    state.region_filter.clear();
    state.search_query.clear();
    state.selected_region.clone_from(&choice);

    let purpose = match choice {
        Some(region) => {
            tracing::debug!(region = %region, "filtering by region");
            RequestPurpose::Region { region }
        }
        None => state.initial_list_purpose(),
    };
    (true, vec![fetch_list(state, purpose)])
}

fn handle_open_video(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.view_mode != ViewMode::Detail {
        return (false, vec![]);
    }
    let url = state
        .detail
        .as_ref()
        .and_then(|d| d.video_url.clone())
        .filter(|u| !u.trim().is_empty());

    match url {
        Some(url) => (false, vec![Action::OpenUrl { url }]),
        None => {
            state.notice = Some("This recipe has no video".to_string());
            (true, vec![])
        }
    }
}

/// Leaves the detail view, or cancels a pending detail load in the list view.
fn handle_back(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.view_mode {
        ViewMode::Detail => {
            state.view_mode = ViewMode::List;
            state.detail = None;
            state.detail_scroll = 0;
            state.notice = None;
            state.cancel_detail_request();
            (true, vec![])
        }
        ViewMode::List if state.detail_loading => {
            state.cancel_detail_request();
            (true, vec![])
        }
        ViewMode::List => (false, vec![]),
    }
}

fn handle_api_response(
    state: &mut AppState,
    tag: &RequestTag,
    status: u16,
    body: Vec<u8>,
) -> (bool, Vec<Action>) {
    let payload = check_status(status, body);

    match &tag.purpose {
        purpose if purpose.replaces_list() => {
            if tag.generation != state.list_generation {
                tracing::debug!(
                    generation = tag.generation,
                    current = state.list_generation,
                    "discarding superseded list response"
                );
                return (false, vec![]);
            }
            state.list_loading = false;

            match payload.and_then(|b| decode_summaries(&b)) {
                Ok(items) => {
                    tracing::debug!(count = items.len(), "recipe list received");
                    state.replace_recipes(items);
                    state.notice = None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, purpose = ?purpose, "list request failed");
                    state.notice = Some(format!("Could not {}: {e}", purpose.describe()));
                }
            }
            (true, vec![])
        }
        RequestPurpose::Regions => {
            match payload.and_then(|b| decode_regions(&b)) {
                Ok(regions) => {
                    tracing::debug!(count = regions.len(), "regions received");
                    state.regions = regions;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "region request failed");
                    state.notice = Some(format!("Could not {}: {e}", tag.purpose.describe()));
                }
            }
            (true, vec![])
        }
        RequestPurpose::Detail { id } => {
            if tag.generation != state.detail_generation {
                tracing::debug!(recipe_id = %id, "discarding superseded detail response");
                return (false, vec![]);
            }
            state.detail_loading = false;

            match payload.and_then(|b| decode_detail(&b)) {
                Ok(Some(detail)) => {
                    tracing::debug!(recipe_id = %id, "recipe details received");
                    state.detail = Some(detail);
                    state.detail_scroll = 0;
                    state.view_mode = ViewMode::Detail;
                    state.input_mode = InputMode::Normal;
                    state.notice = None;
                }
                Ok(None) => {
                    tracing::warn!(recipe_id = %id, "recipe not found");
                    state.notice = Some("Recipe not found".to_string());
                }
                Err(e) => {
                    tracing::warn!(error = %e, recipe_id = %id, "detail request failed");
                    state.notice = Some(format!("Could not {}: {e}", tag.purpose.describe()));
                }
            }
            (true, vec![])
        }
        // Covered by `replaces_list` above.
        RequestPurpose::InitialList { .. } | RequestPurpose::Search { .. } | RequestPurpose::Region { .. } => {
            (false, vec![])
        }
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::PreferencesLoaded { dark_mode } => {
            if state.preference_touched {
                tracing::debug!("ignoring stored preference, user already toggled");
                return (false, vec![]);
            }
            let Some(dark_mode) = dark_mode else {
                return (false, vec![]);
            };
            let changed = state.dark_mode != *dark_mode;
            state.dark_mode = *dark_mode;
            tracing::debug!(dark_mode = *dark_mode, "stored preference applied");
            (changed, vec![])
        }
        WorkerResponse::DarkModeSaved { enabled } => {
            tracing::debug!(enabled = *enabled, "dark mode preference saved");
            (false, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::warn!(error = %message, "worker reported an error");
            (false, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipeSummary;
    use crate::ui::Theme;

    const CANADIAN: &str = r#"{"meals":[
        {"strMeal":"BeaverTails","strMealThumb":"https://www.themealdb.com/images/media/meals/ryppsv1511815505.jpg","idMeal":"52928"},
        {"strMeal":"Breakfast Potatoes","strMealThumb":"https://www.themealdb.com/images/media/meals/1550441882.jpg","idMeal":"52965"},
        {"strMeal":"Canadian Butter Tarts","strMealThumb":"https://www.themealdb.com/images/media/meals/wpputp1511812960.jpg","idMeal":"52923"},
        {"strMeal":"Montreal Smoked Meat","strMealThumb":"https://www.themealdb.com/images/media/meals/uttupv1511815050.jpg","idMeal":"52927"},
        {"strMeal":"Nanaimo Bars","strMealThumb":"https://www.themealdb.com/images/media/meals/vwuprt1511813703.jpg","idMeal":"52924"},
        {"strMeal":"Pate Chinois","strMealThumb":"https://www.themealdb.com/images/media/meals/yyrrxr1511816289.jpg","idMeal":"52930"},
        {"strMeal":"Pouding chomeur","strMealThumb":"https://www.themealdb.com/images/media/meals/yqqqwu1511816912.jpg","idMeal":"52932"},
        {"strMeal":"Poutine","strMealThumb":"https://www.themealdb.com/images/media/meals/uuyrrx1487327597.jpg","idMeal":"52804"},
        {"strMeal":"Rappie Pie","strMealThumb":"https://www.themealdb.com/images/media/meals/ruwpww1511817242.jpg","idMeal":"52933"},
        {"strMeal":"Split Pea Soup","strMealThumb":"https://www.themealdb.com/images/media/meals/xxtsvx1511814083.jpg","idMeal":"52925"},
        {"strMeal":"Sugar Pie","strMealThumb":"https://www.themealdb.com/images/media/meals/yrstur1511816601.jpg","idMeal":"52931"},
        {"strMeal":"Timbits","strMealThumb":"https://www.themealdb.com/images/media/meals/txsupu1511815755.jpg","idMeal":"52929"},
        {"strMeal":"Tourtiere","strMealThumb":"https://www.themealdb.com/images/media/meals/ytpstt1511814614.jpg","idMeal":"52926"}
    ]}"#;

    fn state() -> AppState {
        AppState::new(Theme::default(), Theme::dark())
    }

    fn summaries(count: usize) -> Vec<RecipeSummary> {
        (0..count)
            .map(|i| RecipeSummary {
                id: format!("{}", 53_000 + i),
                name: format!("Meal {i}"),
                thumbnail_url: String::new(),
                category: None,
            })
            .collect()
    }

    fn run(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).expect("handler is infallible")
    }

    /// Extracts the single fetch tag from `actions`.
    fn fetched(actions: &[Action]) -> (String, RequestTag) {
        match actions {
            [Action::Fetch { url, tag }] => (url.clone(), tag.clone()),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, tag: RequestTag, status: u16, body: &str) -> bool {
        run(
            state,
            Event::ApiResponse {
                tag,
                status,
                body: body.as_bytes().to_vec(),
            },
        )
        .0
    }

    fn search(state: &mut AppState, text: &str) -> (String, RequestTag) {
        state.search_query.clear();
        run(state, Event::EnterSearch);
        for c in text.chars() {
            run(state, Event::Char(c));
        }
        fetched(&run(state, Event::Submit).1)
    }

    #[test]
    fn start_loads_preference_list_and_regions_once() {
        let mut state = state();
        let (render, actions) = run(&mut state, Event::Start);
        assert!(render);
        assert_eq!(actions.len(), 3);
        assert!(matches!(actions[0], Action::PostToWorker(WorkerMessage::LoadPreferences { .. })));
        assert!(matches!(&actions[1], Action::Fetch { url, .. } if url.ends_with("/search.php?f=a")));
        assert!(matches!(&actions[2], Action::Fetch { url, .. } if url.ends_with("/list.php?a=list")));

        assert_eq!(run(&mut state, Event::Start), (false, vec![]));
    }

    #[test]
    fn search_sanitizes_and_encodes_term() {
        let mut state = state();
        let (url, tag) = search(&mut state, "  <b>chicken</b>  ");
        assert!(url.ends_with("/search.php?s=bchicken%2Fb"));
        assert_eq!(tag.purpose, RequestPurpose::Search { term: "bchicken/b".to_string() });
        assert_eq!(state.search_query, "bchicken/b");
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.list_loading);
    }

    #[test]
    fn empty_search_reloads_initial_list_and_clears_region() {
        let mut state = state();
        state.selected_region = Some("Canadian".to_string());
        let (url, tag) = search(&mut state, "   ");
        assert!(url.ends_with("/search.php?f=a"));
        assert_eq!(tag.purpose, RequestPurpose::InitialList { letter: 'a' });
        assert_eq!(state.selected_region, None);
    }

    #[test]
    fn canadian_region_shows_six_then_more() {
        let mut state = state();
        state.regions = vec!["British".to_string(), "Canadian".to_string()];
        state.search_query = "pie".to_string();

        run(&mut state, Event::OpenRegionPicker);
        run(&mut state, Event::PickerDown);
        run(&mut state, Event::PickerDown);
        let (url, tag) = fetched(&run(&mut state, Event::Submit).1);

        assert!(url.ends_with("/filter.php?a=Canadian"));
        assert_eq!(state.search_query, "");
        assert_eq!(state.selected_region.as_deref(), Some("Canadian"));

        assert!(respond(&mut state, tag, 200, CANADIAN));
        assert_eq!(state.recipes.len(), 13);
        assert_eq!(state.recipes.rendered_count(), 6);
        assert!(state.recipes.has_more());
        assert_eq!(state.recipes.rendered()[0].name, "BeaverTails");
    }

    #[test]
    fn typing_in_picker_narrows_options() {
        let mut state = state();
        state.regions = vec!["British".to_string(), "Canadian".to_string(), "Jamaican".to_string()];
        run(&mut state, Event::OpenRegionPicker);
        run(&mut state, Event::Char('j'));
        run(&mut state, Event::PickerDown);
        run(&mut state, Event::PickerDown);
        assert_eq!(state.input_mode, InputMode::RegionPicker { highlighted: 1 });

        let (url, _) = fetched(&run(&mut state, Event::Submit).1);
        assert!(url.ends_with("/filter.php?a=Jamaican"));
        assert!(state.region_filter.is_empty());
    }

    #[test]
    fn all_regions_reloads_initial_list() {
        let mut state = state();
        state.regions = vec!["Canadian".to_string()];
        state.selected_region = Some("Canadian".to_string());
        run(&mut state, Event::OpenRegionPicker);
        assert_eq!(state.input_mode, InputMode::RegionPicker { highlighted: 1 });
        run(&mut state, Event::PickerUp);
        let (_, tag) = fetched(&run(&mut state, Event::Submit).1);
        assert_eq!(tag.purpose, RequestPurpose::InitialList { letter: 'a' });
        assert_eq!(state.selected_region, None);
    }

    #[test]
    fn stale_list_response_is_discarded() {
        let mut state = state();
        let (_, first) = search(&mut state, "beef");
        let (_, second) = search(&mut state, "chicken");

        assert!(!respond(&mut state, first, 200, CANADIAN));
        assert!(state.recipes.is_empty());
        assert!(state.list_loading);

        assert!(respond(&mut state, second, 200, r#"{"meals":null}"#));
        assert!(state.recipes.is_empty());
        assert!(!state.list_loading);
    }

    #[test]
    fn failed_fetch_keeps_list_and_sets_notice() {
        let mut state = state();
        state.replace_recipes(summaries(8));
        let (_, tag) = search(&mut state, "soup");

        assert!(respond(&mut state, tag, 500, "oops"));
        assert_eq!(state.recipes.len(), 8);
        assert!(state.notice.as_deref().is_some_and(|n| n.contains("search for \"soup\"")));

        let (_, tag) = search(&mut state, "soup");
        assert!(respond(&mut state, tag, 200, "<html>"));
        assert_eq!(state.recipes.len(), 8);

        let (_, tag) = search(&mut state, "soup");
        respond(&mut state, tag, 200, r#"{"meals":[]}"#);
        assert!(state.notice.is_none());
    }

    #[test]
    fn load_more_has_cooldown() {
        let mut state = state();
        state.replace_recipes(summaries(20));

        let (render, actions) = run(&mut state, Event::LoadMore);
        assert!(render);
        assert_eq!(actions, vec![Action::StartTimer { seconds: LOAD_MORE_COOLDOWN_SECS }]);
        assert_eq!(state.recipes.rendered_count(), 12);

        assert_eq!(run(&mut state, Event::LoadMore), (false, vec![]));
        assert_eq!(state.recipes.rendered_count(), 12);

        assert!(run(&mut state, Event::CooldownElapsed).0);
        run(&mut state, Event::LoadMore);
        run(&mut state, Event::CooldownElapsed);
        run(&mut state, Event::LoadMore);
        assert_eq!(state.recipes.rendered_count(), 20);
        assert!(!state.recipes.has_more());

        run(&mut state, Event::CooldownElapsed);
        assert_eq!(run(&mut state, Event::LoadMore), (false, vec![]));
    }

    #[test]
    fn detail_then_back_preserves_list() {
        let mut state = state();
        state.replace_recipes(summaries(14));
        run(&mut state, Event::LoadMore);
        run(&mut state, Event::Move(Direction::Right));

        let (url, tag) = fetched(&run(&mut state, Event::ViewDetails).1);
        assert!(url.ends_with("/lookup.php?i=53001"));

        let body = r#"{"meals":[{"idMeal":"53001","strMeal":"Meal 1","strCategory":"Side",
            "strArea":"British","strInstructions":"Boil.","strMealThumb":"",
            "strIngredient1":"Potatoes","strMeasure1":"2 lbs","strYoutube":""}]}"#;
        assert!(respond(&mut state, tag, 200, body));
        assert_eq!(state.view_mode, ViewMode::Detail);
        let detail = state.detail.as_ref().expect("detail loaded");
        assert_eq!(detail.ingredients, vec!["Potatoes (2 lbs)".to_string()]);

        let (render, actions) = run(&mut state, Event::Back);
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.view_mode, ViewMode::List);
        assert!(state.detail.is_none());
        assert_eq!(state.recipes.rendered_count(), 12);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn missing_recipe_stays_in_list() {
        let mut state = state();
        state.replace_recipes(summaries(1));
        let (_, tag) = fetched(&run(&mut state, Event::ViewDetails).1);
        assert!(respond(&mut state, tag, 200, r#"{"meals":null}"#));
        assert_eq!(state.view_mode, ViewMode::List);
        assert_eq!(state.notice.as_deref(), Some("Recipe not found"));
    }

    #[test]
    fn back_during_detail_load_discards_response() {
        let mut state = state();
        state.replace_recipes(summaries(1));
        let (_, tag) = fetched(&run(&mut state, Event::ViewDetails).1);
        assert!(run(&mut state, Event::Back).0);

        let body = r#"{"meals":[{"idMeal":"53000","strMeal":"Meal 0"}]}"#;
        assert!(!respond(&mut state, tag, 200, body));
        assert_eq!(state.view_mode, ViewMode::List);
    }

    #[test]
    fn toggle_twice_restores_and_persists_each_time() {
        let mut state = state();
        let (_, first) = run(&mut state, Event::ToggleDarkMode);
        assert!(state.dark_mode);
        assert_eq!(state.theme().name, "catppuccin-mocha");
        let (_, second) = run(&mut state, Event::ToggleDarkMode);
        assert!(!state.dark_mode);

        let saved: Vec<bool> = first
            .iter()
            .chain(second.iter())
            .filter_map(|a| match a {
                Action::PostToWorker(WorkerMessage::SaveDarkMode { enabled, .. }) => Some(*enabled),
                _ => None,
            })
            .collect();
        assert_eq!(saved, vec![true, false]);
    }

    #[test]
    fn stored_preference_applies_until_user_toggles() {
        let mut state = state();
        let loaded = Event::WorkerResponse(WorkerResponse::PreferencesLoaded { dark_mode: Some(true) });
        assert!(run(&mut state, loaded.clone()).0);
        assert!(state.dark_mode);

        let mut state = self::state();
        run(&mut state, Event::ToggleDarkMode);
        run(&mut state, Event::ToggleDarkMode);
        assert!(!run(&mut state, loaded).0);
        assert!(!state.dark_mode);

        let mut state = self::state();
        let absent = Event::WorkerResponse(WorkerResponse::PreferencesLoaded { dark_mode: None });
        assert!(!run(&mut state, absent).0);
        assert!(!state.dark_mode);
    }

    #[test]
    fn open_video_requires_url() {
        let mut state = state();
        state.replace_recipes(summaries(1));
        let (_, tag) = fetched(&run(&mut state, Event::ViewDetails).1);
        let body = r#"{"meals":[{"idMeal":"53000","strMeal":"Meal 0",
            "strYoutube":"https://www.youtube.com/watch?v=abc"}]}"#;
        respond(&mut state, tag, 200, body);

        assert_eq!(
            run(&mut state, Event::OpenVideo).1,
            vec![Action::OpenUrl { url: "https://www.youtube.com/watch?v=abc".to_string() }]
        );

        if let Some(detail) = state.detail.as_mut() {
            detail.video_url = None;
        }
        assert!(run(&mut state, Event::OpenVideo).1.is_empty());
        assert_eq!(state.notice.as_deref(), Some("This recipe has no video"));
    }

    #[test]
    fn cancel_leaves_input_modes_without_fetching() {
        let mut state = state();
        run(&mut state, Event::EnterSearch);
        run(&mut state, Event::Char('x'));
        assert_eq!(run(&mut state, Event::Cancel), (true, vec![]));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.search_query, "x");

        run(&mut state, Event::OpenRegionPicker);
        assert_eq!(run(&mut state, Event::Cancel), (true, vec![]));
        assert_eq!(run(&mut state, Event::Cancel), (false, vec![]));
    }

    #[test]
    fn reload_clears_filters() {
        let mut state = state();
        state.search_query = "pie".to_string();
        state.selected_region = Some("British".to_string());
        state.regions = vec!["British".to_string()];
        let (_, tag) = fetched(&run(&mut state, Event::Reload).1);
        assert_eq!(tag.purpose, RequestPurpose::InitialList { letter: 'a' });
        assert!(state.search_query.is_empty());
        assert!(state.selected_region.is_none());
    }

    #[test]
    fn reload_retries_failed_region_options() {
        let mut state = state();
        let (_, actions) = run(&mut state, Event::Start);
        let Action::Fetch { tag: regions_tag, .. } = actions[2].clone() else {
            panic!("expected region fetch, got {:?}", actions[2]);
        };
        assert!(respond(&mut state, regions_tag, 500, "unavailable"));
        assert!(state.regions.is_empty());

        let (_, actions) = run(&mut state, Event::Reload);
        let urls: Vec<&str> = actions
            .iter()
            .filter_map(|a| match a {
                Action::Fetch { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(urls.len(), 2);
        assert!(urls[0].ends_with("/search.php?f=a"));
        assert!(urls[1].ends_with("/list.php?a=list"));

        let Action::Fetch { tag, .. } = actions[1].clone() else {
            panic!("expected region fetch");
        };
        respond(&mut state, tag, 200, r#"{"meals":[{"strArea":"Canadian"},{"strArea":"Jamaican"}]}"#);
        assert_eq!(state.regions, vec!["Canadian", "Jamaican"]);
        assert_eq!(run(&mut state, Event::Reload).1.len(), 1);
    }

    #[test]
    fn leftover_cooldown_timer_does_not_cut_a_newer_cooldown_short() {
        let mut state = state();
        state.replace_recipes(summaries(30));
        run(&mut state, Event::LoadMore);

        state.replace_recipes(summaries(30));
        let (render, actions) = run(&mut state, Event::LoadMore);
        assert!(render);
        assert_eq!(actions, vec![Action::StartTimer { seconds: LOAD_MORE_COOLDOWN_SECS }]);
        assert_eq!(state.pending_cooldowns, 2);

        assert_eq!(run(&mut state, Event::CooldownElapsed), (false, vec![]));
        assert_eq!(run(&mut state, Event::LoadMore), (false, vec![]));
        assert_eq!(state.recipes.rendered_count(), 12);

        assert!(run(&mut state, Event::CooldownElapsed).0);
        assert!(run(&mut state, Event::LoadMore).0);
        assert_eq!(state.recipes.rendered_count(), 18);
    }
}
