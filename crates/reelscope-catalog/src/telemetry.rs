//! Tracing initialisation.

use anyhow::Result;
#[cfg(feature = "otel")]
use anyhow::Context;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global tracing subscriber.
///
/// Output goes through the `fmt` layer filtered by `RUST_LOG` (default
/// `info`). With the `otel` feature, spans are also exported over OTLP/HTTP
/// when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
#[cfg(not(feature = "otel"))]
pub fn init_tracing() -> Result<()> {
    fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Installs the global tracing subscriber.
///
/// Output goes through the `fmt` layer filtered by `RUST_LOG` (default
/// `info`). With the `otel` feature, spans are also exported over OTLP/HTTP
/// when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
#[cfg(feature = "otel")]
pub fn init_tracing() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .and_then(|_| {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .build()
                .ok()?;

            let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                .with_simple_exporter(exporter)
                .build();

            let tracer = opentelemetry::trace::TracerProvider::tracer(
                &tracer_provider,
                env!("CARGO_PKG_NAME"),
            );
            opentelemetry::global::set_tracer_provider(tracer_provider);

            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .context("failed to install tracing subscriber")
}
