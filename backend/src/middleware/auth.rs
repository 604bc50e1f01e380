use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError,
    state::AppState,
    utils::jwt::{verify_access_token, Claims, ADMIN_ROLE},
};

/// Requires a valid, unrevoked admin token. The verified [`Claims`] are
/// placed in the request extensions for handlers.
pub async fn auth_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Missing admin token".into()))?;

    let claims = authenticate(token, &state)?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn authenticate(token: &str, state: &AppState) -> Result<Claims, AppError> {
    let claims = verify_access_token(token, &state.config.jwt_secret).map_err(|err| {
        tracing::debug!(error = %err, "Rejected admin token");
        AppError::Unauthorized("Invalid or expired admin session".into())
    })?;

    if claims.role != ADMIN_ROLE || claims.sub != state.config.admin_username {
        return Err(AppError::Unauthorized("Invalid or expired admin session".into()));
    }
    if state.revoked_tokens.is_revoked(&claims.jti) {
        return Err(AppError::Unauthorized("Admin session has ended".into()));
    }

    Ok(claims)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    let token = rest.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bearer_token_accepts_any_scheme_case() {
        assert_eq!(parse_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer_token("BEARER   abc "), Some("abc"));
    }

    #[test]
    fn parse_bearer_token_rejects_other_schemes() {
        assert_eq!(parse_bearer_token("Basic abc"), None);
        assert_eq!(parse_bearer_token("Bearer"), None);
        assert_eq!(parse_bearer_token("Bearer  "), None);
    }
}
