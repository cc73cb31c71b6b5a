//! Tracer provider backed by a file exporter.

use super::file_writer::RotatingFileWriter;
use super::span_formatter::OtlpJsonFormatter;
use super::SERVICE_NAME;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one OTLP JSON line.
///
/// Export is synchronous: the plugin runs in a single-threaded WASM host, so
/// the simple (non-batching) span processor drives it directly.
#[derive(Debug)]
struct OtlpFileExporter {
    writer: RotatingFileWriter,
    formatter: OtlpJsonFormatter,
    is_shutdown: bool,
}

impl OtlpFileExporter {
    const fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: RotatingFileWriter::new(path),
            formatter: OtlpJsonFormatter::new(resource, SERVICE_NAME),
            is_shutdown: false,
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown {
            return Err(TraceError::from("exporter is shut down"));
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    /// The resource is fixed at construction.
    fn set_resource(&mut self, _resource: &Resource) {}
}

/// Builds a provider exporting to `path` with the given resource.
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter::new(path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::KeyValue;
    use tempfile::TempDir;

    #[test]
    fn shut_down_exporter_rejects_batches() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("trace.json");
        let mut exporter = OtlpFileExporter::new(path.clone(), Resource::new(vec![KeyValue::new("service.name", "zmeals")]));

        assert!(exporter.write_batch(&[]).is_ok());
        assert_eq!(std::fs::read_to_string(&path).expect("written").lines().count(), 1);

        exporter.shutdown();
        assert!(exporter.write_batch(&[]).is_err());
    }
}
