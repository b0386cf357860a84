//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `service.name` and instrumentation scope of every exported span.
pub const SERVICE_NAME: &str = "glyphdeck";

/// File name of the live trace file inside the data directory.
pub const TRACE_FILE: &str = "glyphdeck-otlp.json";

/// Installs the global subscriber.
///
/// Spans go to `~/.local/share/zellij/glyphdeck/glyphdeck-otlp.json` on the
/// host. If the directory cannot be created tracing stays disabled. Calling
/// this more than once is harmless; only the first subscriber is kept.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("glyphdeck: tracing disabled, cannot create {}: {e}", data_dir.display());
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|e| {
        eprintln!("glyphdeck: invalid trace_level {:?} ({e}), using info", config.trace_level);
        EnvFilter::new("info")
    });

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
