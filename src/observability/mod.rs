//! Span export for the plugin and its worker.
//!
//! `tracing` spans are bridged into OpenTelemetry and written as OTLP JSON
//! lines to a size-rotated file in the plugin data directory:
//!
//! ```text
//! tracing → tracing-opentelemetry → OtlpFileExporter → zmeals-otlp.json
//! ```
//!
//! The filter comes from the `trace_level` option (an `EnvFilter` directive,
//! default `"info"`). Both the plugin and the worker call [`init_tracing`];
//! worker spans are parented to plugin spans through the trace context carried
//! in worker messages.
//!
//! ```rust
//! use zmeals::observability::init_tracing;
//! use zmeals::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "zmeals";
