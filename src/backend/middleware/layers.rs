/**
 * HTTP Layers
 *
 * Tower layers applied to every route:
 *
 * - CORS: form-builder pages are served from other origins and call the
 *   API directly from the browser, so any origin, method and header is
 *   accepted.
 * - Tracing: one span per request, with status and latency logged on
 *   response through `tracing`.
 */

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// CORS layer accepting any origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Request tracing layer
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}
