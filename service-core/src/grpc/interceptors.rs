//! gRPC interceptors for cross-cutting concerns.

use tonic::{Request, Status};

/// gRPC metadata key for request ID.
pub const REQUEST_ID_KEY: &str = "x-request-id";

/// Interceptor that records the caller-supplied request ID, when present, on
/// the current span.
#[allow(clippy::result_large_err)]
pub fn request_id_interceptor(request: Request<()>) -> Result<Request<()>, Status> {
    if let Some(request_id) = request.metadata().get(REQUEST_ID_KEY) {
        if let Ok(request_id_str) = request_id.to_str() {
            tracing::Span::current().record("request_id", request_id_str);
        }
    }
    Ok(request)
}

/// Interceptor that counts every inbound RPC for the Prometheus surface.
#[allow(clippy::result_large_err)]
pub fn metrics_interceptor(request: Request<()>) -> Result<Request<()>, Status> {
    metrics::counter!("grpc_requests_total").increment(1);
    Ok(request)
}

/// Inject a request ID into outgoing gRPC request metadata.
pub fn inject_request_id<T>(request: &mut Request<T>, request_id: &str) {
    if let Ok(value) = request_id.parse() {
        request.metadata_mut().insert(REQUEST_ID_KEY, value);
    }
}

/// Extract the request ID from incoming gRPC request metadata.
pub fn extract_request_id<T>(request: &Request<T>) -> Option<String> {
    request
        .metadata()
        .get(REQUEST_ID_KEY)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
