//! Authentication middleware
//!
//! Verifies `Authorization: Bearer <token>`, loads the principal the token
//! names and inserts [`CurrentPrincipal`] into the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

use crate::auth::{Claims, CurrentPrincipal, JwtError, JwtService, PrincipalKind};
use crate::core::ServerState;
use crate::db::repository::{customer, restaurant};
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

/// Require a valid token whose principal still exists
///
/// | Situation | Result |
/// |-----------|--------|
/// | no Authorization header | 401 NotAuthenticated |
/// | not a Bearer header, bad signature, garbage | 401 TokenInvalid |
/// | past expiry | 401 TokenExpired |
/// | principal deleted | 401 PrincipalNotFound |
///
/// `OPTIONS` requests pass through for CORS preflight.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = authorization_header(&req);
    let uri = req.uri().to_string();
    let Some(header) = auth_header else {
        security_log!("WARN", "auth_missing", uri = uri);
        return Err(AppError::not_authenticated());
    };

    let principal = authenticate(&state, &header, &uri).await?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Attach a principal when a token is sent, continue anonymously otherwise
///
/// A token that is present but invalid is still rejected.
pub async fn optional_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let uri = req.uri().to_string();
    if let Some(header) = authorization_header(&req) {
        let principal = authenticate(&state, &header, &uri).await?;
        req.extensions_mut().insert(principal);
    }
    Ok(next.run(req).await)
}

fn authorization_header(req: &Request) -> Option<String> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

async fn authenticate(
    state: &ServerState,
    header: &str,
    uri: &str,
) -> Result<CurrentPrincipal, AppError> {
    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = match state.get_jwt_service().validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!("WARN", "auth_failed", error = e.to_string(), uri = uri);
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    load_principal(&state.db.pool, &claims).await
}

/// Resolve token claims against the principal tables
pub async fn load_principal(
    pool: &SqlitePool,
    claims: &Claims,
) -> Result<CurrentPrincipal, AppError> {
    let id = claims
        .principal_id()
        .map_err(|_| AppError::invalid_token("Malformed token subject"))?;

    let username = match claims.kind {
        PrincipalKind::Restaurant => restaurant::find_by_id(pool, id).await?.map(|r| r.username),
        PrincipalKind::Customer => customer::find_by_id(pool, id).await?.map(|c| c.username),
    };

    let Some(username) = username else {
        security_log!(
            "WARN",
            "principal_missing",
            principal_id = id,
            kind = claims.kind.as_str()
        );
        return Err(AppError::new(ErrorCode::PrincipalNotFound));
    };

    Ok(CurrentPrincipal {
        id,
        kind: claims.kind,
        username,
    })
}
