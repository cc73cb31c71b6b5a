//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never touches Zellij directly. It mutates [`AppState`]
//! and returns a `Vec<Action>` which the plugin shim executes in order: web
//! requests, timers, worker messages and commands.
//!
//! [`AppState`]: crate::app::AppState
//!
//! # Example
//!
//! ```rust
//! use zmeals::app::Action;
//! use zmeals::api::{RequestPurpose, RequestTag};
//! use zmeals::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_preferences()),
//!     Action::Fetch {
//!         url: RequestPurpose::Regions.url("https://www.themealdb.com/api/json/v1/1"),
//!         tag: RequestTag::new(RequestPurpose::Regions, 0),
//!     },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::RequestTag;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET.
    ///
    /// The tag is sent as request context and returned with the response.
    Fetch {
        url: String,
        tag: RequestTag,
    },

    /// Posts a message to the background worker thread (preference storage).
    PostToWorker(WorkerMessage),

    /// Schedules a timer event after the given number of seconds.
    ///
    /// Used to re-enable "load more" after its cooldown.
    StartTimer {
        /// Delay in seconds.
        seconds: f64,
    },

    /// Opens a URL with the configured opener command.
    OpenUrl {
        /// URL to open (recipe video or source page).
        url: String,
    },
}
