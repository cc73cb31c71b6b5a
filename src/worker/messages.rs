//! Worker thread message types for cross-thread communication.
//!
//! Requests flow from the plugin to the worker that owns preference storage;
//! responses flow back. Each request carries the sender's trace context so
//! worker spans join the plugin's trace.

use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active (for example
    /// when tracing was never initialized).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_preferences(LoadPreferences {}),
    save_dark_mode(SaveDarkMode { enabled: bool }),
}

/// Messages sent from the plugin to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the persisted preferences.
    LoadPreferences {
        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist the dark-mode flag.
    SaveDarkMode {
        /// New value of the flag.
        enabled: bool,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    pub(crate) fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadPreferences { trace_context } | Self::SaveDarkMode { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker thread back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Preferences were read.
    PreferencesLoaded {
        /// Stored dark-mode flag; `None` when never saved.
        dark_mode: Option<bool>,
    },

    /// The dark-mode flag was written.
    DarkModeSaved {
        /// Value that was written.
        enabled: bool,
    },

    /// A storage operation failed.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_serialize_without_trace_context() {
        let message = WorkerMessage::SaveDarkMode {
            enabled: true,
            trace_context: None,
        };
        let json = serde_json::to_string(&message).expect("serializable");
        assert_eq!(json, r#"{"SaveDarkMode":{"enabled":true}}"#);

        let parsed: WorkerMessage = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(parsed, message);
    }

    #[test]
    fn builders_without_active_span_carry_no_context() {
        let message = WorkerMessage::load_preferences();
        assert!(message.trace_context().is_none());
    }
}
