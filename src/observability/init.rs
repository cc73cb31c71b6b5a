//! Subscriber setup.

use super::{tracer, SERVICE_NAME};
use crate::infrastructure::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "zmeals-otlp.json";

const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber exporting spans to
/// `{data_dir}/zmeals-otlp.json`.
///
/// Does nothing if the data directory cannot be created. Only the first call
/// per thread group takes effect; later calls are ignored.
pub fn init_tracing(config: &Config) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(trace_filter(config))
        .with(otel_layer)
        .try_init();
}

/// Builds the filter from `trace_level`, falling back to `info` when the
/// directive does not parse.
fn trace_filter(config: &Config) -> EnvFilter {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn filter_for(level: Option<&str>) -> Option<LevelFilter> {
        let config = Config {
            trace_level: level.map(String::from),
            ..Config::default()
        };
        trace_filter(&config).max_level_hint()
    }

    #[test]
    fn filter_defaults_to_info() {
        assert_eq!(filter_for(None), Some(LevelFilter::INFO));
    }

    #[test]
    fn configured_directive_is_used() {
        assert_eq!(filter_for(Some("zmeals=debug")), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unparsable_directive_falls_back() {
        assert_eq!(filter_for(Some("zmeals=loud")), Some(LevelFilter::INFO));
    }
}
