//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies that are chatty at `info` and below.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "sqlx", "reqwest", "tonic", "opentelemetry"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = env_filter(&config.logging.log_level);
    let export = tracer_provider.map(|provider| {
        provider.tracer(config.observability.otel_service_name.clone())
    });

    match config.logging.log_format {
        LogFormat::Compact => install(
            filter,
            export,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_line_number(true),
        ),
        LogFormat::Json => install(
            filter,
            export,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_target(true),
        ),
    }
}

/// `RUST_LOG` wins when set; otherwise the configured level applies to
/// everything except [`QUIET_TARGETS`].
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)))
}

fn default_directives(log_level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(log_level.to_string(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

fn install<L>(
    filter: EnvFilter,
    export: Option<SdkTracer>,
    fmt_layer: L,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .with(export.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer)))
        .try_init()?;

    Ok(())
}
