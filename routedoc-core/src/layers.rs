use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Initialise the global `tracing` subscriber with a standard `fmt` layer.
///
/// Respects the `RUST_LOG` environment variable. Falls back to
/// `info,tower_http=debug` when `RUST_LOG` is not set.
///
/// Call this once, at the very start of `main`, before any tracing macro.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();
}

/// Returns a `TraceLayer` configured for HTTP request/response tracing.
///
/// Request and response events are emitted at `DEBUG` under the `tower_http`
/// target, which the fallback filter of [`init_tracing`] enables; `5xx`
/// responses are classified as failures. Pass it to
/// [`ApiRouter::layer`](crate::ApiRouter::layer) after registering the routes
/// it should cover, including a documentation plugin's endpoints.
pub fn default_trace() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}
