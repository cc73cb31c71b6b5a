//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zmeals library and Zellij: translates
//! Zellij events into library [`Event`]s and library [`Action`]s into Zellij
//! API calls (`web_request`, `set_timeout`, `run_command`, worker messages).
//!
//! ```text
//! ┌──────────────────────────┐      web_request       ┌───────────────┐
//! │   State (plugin thread)  │ ─────────────────────→ │  TheMealDB    │
//! │                          │ ←── WebRequestResult ─ │               │
//! │          │ IPC           │                        └───────────────┘
//! │          ▼               │
//! │  ┌────────────────────┐  │
//! │  │   ZmealsWorker     │  │  ← preferences.json
//! │  └────────────────────┘  │
//! └──────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! List view:
//! - `h`/`j`/`k`/`l`, arrows, `Ctrl+n`/`Ctrl+p`: move selection
//! - `Enter`: view details
//! - `/`: search, `r`: region dropdown
//! - `m`: load more, `R`: reload
//! - `d`: toggle dark mode, `q`: close
//!
//! Search field: type, `Backspace`, `Enter` to search, `Esc` to leave.
//!
//! Region dropdown: `Up`/`Down` (or `Ctrl+p`/`Ctrl+n`), type to narrow,
//! `Enter` to choose, `Esc` to close.
//!
//! Detail view:
//! - `j`/`k`, arrows: scroll, `PageUp`/`PageDown` (or `Space`): page
//! - `o`: open video, `Esc`/`b`: back
//! - `d`: toggle dark mode, `q`: close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use zmeals::api::RequestTag;
use zmeals::app::ScrollStep;
use zmeals::worker::{WorkerMessage, WorkerResponse, ZmealsWorker};
use zmeals::{handle_event, Action, Config, Direction, Event, InputMode, ViewMode};

register_plugin!(State);
register_worker!(ZmealsWorker, zmeals_worker, ZMEALS_WORKER);

/// Plugin state wrapper.
struct State {
    app: zmeals::AppState,

    /// Worker namespace for IPC messaging.
    worker_name: String,

    /// Program receiving video URLs.
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: zmeals::initialize(&config),
            worker_name: "zmeals".to_string(),
            open_command: config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing, requests permissions and
    /// subscribes to events. Nothing is fetched until permissions are granted.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: recipe API requests
    /// - `RunCommands`: opening video links
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zmeals::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = zmeals::initialize(&config);
        self.open_command.clone_from(&config.open_command);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the Zellij event, runs the reducer and executes the
    /// resulting actions. Returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::CooldownElapsed,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - starting");
                    Event::Start
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - recipes cannot be fetched");
                    return false;
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        zmeals::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps a key to an event according to the current view and input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);

        if self.app.view_mode == ViewMode::Detail {
            return Self::map_detail_key(key.bare_key, ctrl);
        }

        match self.app.input_mode {
            InputMode::Search => Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Cancel,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::RegionPicker { .. } => Some(match key.bare_key {
                BareKey::Up => Event::PickerUp,
                BareKey::Down => Event::PickerDown,
                BareKey::Char('p') if ctrl => Event::PickerUp,
                BareKey::Char('n') if ctrl => Event::PickerDown,
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Cancel,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Normal => Self::map_list_key(key.bare_key, ctrl),
        }
    }

    fn map_list_key(bare_key: BareKey, ctrl: bool) -> Option<Event> {
        Some(match bare_key {
            BareKey::Char('n') if ctrl => Event::Move(Direction::Down),
            BareKey::Char('p') if ctrl => Event::Move(Direction::Up),
            _ if ctrl => return None,
            BareKey::Left | BareKey::Char('h') => Event::Move(Direction::Left),
            BareKey::Right | BareKey::Char('l') => Event::Move(Direction::Right),
            BareKey::Up | BareKey::Char('k') => Event::Move(Direction::Up),
            BareKey::Down | BareKey::Char('j') => Event::Move(Direction::Down),
            BareKey::Enter => Event::Submit,
            BareKey::Char('/') => Event::EnterSearch,
            BareKey::Char('r') => Event::OpenRegionPicker,
            BareKey::Char('m') => Event::LoadMore,
            BareKey::Char('R') => Event::Reload,
            BareKey::Char('d') => Event::ToggleDarkMode,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc | BareKey::Char('b') => Event::Back,
            _ => return None,
        })
    }

    fn map_detail_key(bare_key: BareKey, ctrl: bool) -> Option<Event> {
        if ctrl {
            return None;
        }
        Some(match bare_key {
            BareKey::Up | BareKey::Char('k') => Event::Scroll(ScrollStep::LineUp),
            BareKey::Down | BareKey::Char('j') => Event::Scroll(ScrollStep::LineDown),
            BareKey::PageUp => Event::Scroll(ScrollStep::PageUp),
            BareKey::PageDown | BareKey::Char(' ') => Event::Scroll(ScrollStep::PageDown),
            BareKey::Char('o') => Event::OpenVideo,
            BareKey::Esc | BareKey::Char('b') | BareKey::Backspace => Event::Back,
            BareKey::Char('d') => Event::ToggleDarkMode,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Responses without our request tag belong to someone else and are ignored.
    fn map_web_request_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        match RequestTag::from_context(context) {
            Ok(tag) => {
                tracing::debug!(status, body_len = body.len(), purpose = %tag.purpose.describe(), "web request result");
                Some(Event::ApiResponse { tag, status, body })
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring web request result without request tag");
                None
            }
        }
    }

    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes the message as JSON and posts it to the worker. Failures
    /// are logged, not propagated.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch { ref url, ref tag } => match tag.to_context() {
                Ok(context) => {
                    tracing::debug!(url = %url, generation = tag.generation, "issuing web request");
                    web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
                }
                Err(e) => tracing::warn!(error = %e, "failed to encode request tag"),
            },
            Action::PostToWorker(ref message) => {
                self.post_worker_message(message);
            }
            Action::StartTimer { seconds } => {
                set_timeout(*seconds);
            }
            Action::OpenUrl { ref url } => {
                tracing::debug!(command = %self.open_command, url = %url, "opening url");
                run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
            }
        }
    }
}
