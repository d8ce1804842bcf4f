//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request tracing for the whole application, pages and API alike.
///
/// Each request gets an `INFO` span with method, URI and HTTP version; the response
/// is logged with its status and latency in milliseconds:
///
/// ```text
/// INFO request{method=POST uri=/newsletter version=HTTP/1.1}: finished processing request latency=48 ms status=303
/// ```
///
/// 5xx responses are classified as failures and logged at `ERROR` by `tower-http`.
/// Query strings are part of the URI; no route takes secrets in the query.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
