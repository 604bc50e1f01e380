use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header::CONTENT_LENGTH, Request},
    middleware::Next,
    response::Response,
    Error as AxumError,
};
use std::time::Instant;

use super::request_id::RequestId;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 2048;

struct RequestSummary {
    method: String,
    uri: String,
    request_id: Option<String>,
}

/// Logs every 4xx/5xx response with a preview of its body.
///
/// The body is buffered so the same payload is still forwarded to the caller.
/// Runs inside the request-id layer so the id can be attached to the event.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let summary = RequestSummary {
        method: req.method().to_string(),
        uri: req.uri().path().to_string(),
        request_id: req.extensions().get::<RequestId>().map(|id| id.0.clone()),
    };
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let latency_ms = start.elapsed().as_millis() as u64;
    let (mut parts, body) = response.into_parts();
    match buffer_body(body).await {
        Ok((bytes, preview)) => {
            log_error_event(status.as_u16(), &summary, latency_ms, &preview, None);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            parts.headers.remove(CONTENT_LENGTH);
            log_error_event(status.as_u16(), &summary, latency_ms, "", Some(err));
            Response::from_parts(parts, Body::empty())
        }
    }
}

async fn buffer_body(body: Body) -> Result<(Bytes, String), AxumError> {
    let bytes = to_bytes(body, MAX_BUFFERED_BODY_BYTES).await?;
    Ok((bytes.clone(), preview(&bytes)))
}

fn preview(bytes: &Bytes) -> String {
    if bytes.len() > MAX_LOGGED_BODY_BYTES {
        format!(
            "{}... (truncated, {} bytes total)",
            String::from_utf8_lossy(&bytes[..MAX_LOGGED_BODY_BYTES]),
            bytes.len()
        )
    } else {
        String::from_utf8_lossy(bytes).to_string()
    }
}

fn log_error_event(
    status: u16,
    summary: &RequestSummary,
    latency_ms: u64,
    body_preview: &str,
    body_error: Option<AxumError>,
) {
    let RequestSummary {
        method,
        uri,
        request_id,
    } = summary;
    let request_id = request_id.as_deref().unwrap_or("-");

    match (status >= 500, body_error) {
        (true, Some(err)) => tracing::error!(
            status, %method, %uri, request_id, latency_ms, error = ?err,
            "Failed to read error response body"
        ),
        (false, Some(err)) => tracing::warn!(
            status, %method, %uri, request_id, latency_ms, error = ?err,
            "Failed to read error response body"
        ),
        (true, None) => tracing::error!(
            status, %method, %uri, request_id, latency_ms, body = body_preview,
            "Request completed with error status"
        ),
        (false, None) => tracing::warn!(
            status, %method, %uri, request_id, latency_ms, body = body_preview,
            "Request completed with error status"
        ),
    }
}
