//! Worker thread implementation for preference storage.
//!
//! File I/O runs on a Zellij worker thread so the render loop never blocks on
//! disk. Requests arrive as JSON payloads, responses go back to the plugin
//! under the same message name.

use crate::domain::error::{Result, ZmealsError};
use crate::infrastructure::paths;
use crate::storage::backend::Storage;
use crate::storage::{load_dark_mode, save_dark_mode, JsonStorage};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// File name of the preference store inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Worker thread state.
///
/// The storage backend is opened lazily on the first message.
#[derive(Serialize, Deserialize, Default)]
pub struct ZmealsWorker {
    #[serde(skip)]
    storage: Option<Box<dyn Storage>>,
}

impl ZmealsWorker {
    /// Creates a worker backed by the JSON preference file in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// storage file exists but cannot be read.
    pub fn new() -> Result<Self> {
        let path = paths::get_data_dir().join(PREFERENCES_FILE);
        let storage: Box<dyn Storage> = Box::new(JsonStorage::new(path)?);
        Ok(Self::with_storage(storage))
    }

    /// Creates a worker over an explicit storage backend.
    #[must_use]
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    fn get_storage(&mut self) -> Result<&mut Box<dyn Storage>> {
        self.storage
            .as_mut()
            .ok_or_else(|| ZmealsError::Worker("Storage not initialized".to_string()))
    }

    /// Maps a storage result to a response, logging either outcome.
    fn handle_storage_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_preferences(&mut self) -> WorkerResponse {
        Self::handle_storage_result(
            "load preferences",
            self.get_storage().and_then(|storage| load_dark_mode(storage.as_ref())),
            |dark_mode| {
                tracing::debug!(dark_mode = ?dark_mode, "preferences loaded");
                WorkerResponse::PreferencesLoaded { dark_mode }
            },
        )
    }

    fn handle_save_dark_mode(&mut self, enabled: bool) -> WorkerResponse {
        Self::handle_storage_result(
            "save dark mode",
            self.get_storage()
                .and_then(|storage| save_dark_mode(storage.as_mut(), enabled)),
            |()| WorkerResponse::DarkModeSaved { enabled },
        )
    }

    /// Re-attaches the sender's trace context so worker spans share its trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one request and returns the response to send back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadPreferences { .. } => self.handle_load_preferences(),
            WorkerMessage::SaveDarkMode { enabled, .. } => self.handle_save_dark_mode(enabled),
        }
    }
}

fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

fn reply(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
    }
}

impl ZellijWorker<'_> for ZmealsWorker {
    /// Handles a message from the plugin thread.
    ///
    /// 1. Initializes tracing once per worker lifetime
    /// 2. Opens storage if needed
    /// 3. Decodes the `WorkerMessage` payload
    /// 4. Replies with the serialized `WorkerResponse`
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        if self.storage.is_none() {
            match Self::new() {
                Ok(worker) => self.storage = worker.storage,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to initialize storage");
                    reply(
                        message,
                        &WorkerResponse::Error {
                            message: format!("Failed to initialize storage: {e}"),
                        },
                    );
                    return;
                }
            }
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);
        reply(message, &response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn worker_in(dir: &TempDir) -> ZmealsWorker {
        let storage = JsonStorage::new(dir.path().join(PREFERENCES_FILE)).expect("opens");
        ZmealsWorker::with_storage(Box::new(storage))
    }

    #[test]
    fn fresh_store_has_no_preference() {
        let dir = TempDir::new().expect("tempdir");
        let mut worker = worker_in(&dir);
        assert_eq!(
            worker.handle_message(WorkerMessage::load_preferences()),
            WorkerResponse::PreferencesLoaded { dark_mode: None }
        );
    }

    #[test]
    fn saved_flag_is_loaded_back() {
        let dir = TempDir::new().expect("tempdir");
        let mut worker = worker_in(&dir);

        assert_eq!(
            worker.handle_message(WorkerMessage::save_dark_mode(true)),
            WorkerResponse::DarkModeSaved { enabled: true }
        );
        drop(worker);

        let mut worker = worker_in(&dir);
        assert_eq!(
            worker.handle_message(WorkerMessage::load_preferences()),
            WorkerResponse::PreferencesLoaded {
                dark_mode: Some(true)
            }
        );
    }

    #[test]
    fn corrupt_preference_file_is_replaced_on_save() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join(PREFERENCES_FILE), "darkMode=true").expect("fixture");

        let mut worker = worker_in(&dir);
        assert_eq!(
            worker.handle_message(WorkerMessage::load_preferences()),
            WorkerResponse::PreferencesLoaded { dark_mode: None }
        );
        assert_eq!(
            worker.handle_message(WorkerMessage::save_dark_mode(true)),
            WorkerResponse::DarkModeSaved { enabled: true }
        );
        drop(worker);

        let mut worker = worker_in(&dir);
        assert_eq!(
            worker.handle_message(WorkerMessage::load_preferences()),
            WorkerResponse::PreferencesLoaded {
                dark_mode: Some(true)
            }
        );
    }

    #[test]
    fn missing_storage_reports_error() {
        let mut worker = ZmealsWorker::default();
        let response = worker.handle_message(WorkerMessage::load_preferences());
        assert!(matches!(response, WorkerResponse::Error { message } if message.contains("not initialized")));
    }
}
