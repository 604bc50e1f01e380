use axum::body::Body;
use axum::response::{IntoResponse, Response};
use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor, GovernorError,
    GovernorLayer,
};

use crate::config::Config;
use crate::error::AppError;

/// Per-IP limiter for the public write routes and the admin login.
///
/// The window is replenished one request at a time: a full burst of
/// `rate_limit_ip_max_requests` recovers over `rate_limit_ip_window_seconds`.
pub fn create_ip_rate_limiter(
    config: &Config,
) -> anyhow::Result<GovernorLayer<PeerIpKeyExtractor, StateInformationMiddleware, Body>> {
    let burst_size = config.rate_limit_ip_max_requests.max(1);
    let window = Duration::from_secs(config.rate_limit_ip_window_seconds.max(1));
    let period = (window / burst_size).max(Duration::from_millis(1));
    let governor_conf = GovernorConfigBuilder::default()
        .period(period)
        .burst_size(burst_size)
        .key_extractor(PeerIpKeyExtractor)
        .use_headers()
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)).error_handler(rate_limited))
}

/// Limiter rejections use the regular API error body.
fn rate_limited(error: GovernorError) -> Response {
    let (error, headers) = match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_time, "Rate limit exceeded");
            (
                AppError::TooManyRequests {
                    retry_after: wait_time,
                },
                headers,
            )
        }
        GovernorError::UnableToExtractKey => (
            AppError::InternalServerError(anyhow::anyhow!(
                "rate limiter could not read the client address"
            )),
            None,
        ),
        GovernorError::Other { code, msg, headers } => (
            AppError::InternalServerError(anyhow::anyhow!(
                "rate limiter failed with {}: {}",
                code,
                msg.unwrap_or_default()
            )),
            headers,
        ),
    };

    let mut response = error.into_response();
    if let Some(headers) = headers {
        response.headers_mut().extend(headers);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

    #[test]
    fn zero_limits_are_clamped() {
        let mut config = crate::test_support::test_config();
        config.rate_limit_ip_max_requests = 0;
        config.rate_limit_ip_window_seconds = 0;
        assert!(create_ip_rate_limiter(&config).is_ok());
    }

    #[test]
    fn rejection_keeps_limiter_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-after", HeaderValue::from_static("30"));
        let response = rate_limited(GovernorError::TooManyRequests {
            wait_time: 30,
            headers: Some(headers),
        });
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "30");
        assert_eq!(response.headers()["x-ratelimit-after"], "30");
    }

    #[test]
    fn missing_peer_address_is_a_server_error() {
        let response = rate_limited(GovernorError::UnableToExtractKey);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
