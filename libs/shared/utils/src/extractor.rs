use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use shared_database::{AppState, StoreClient, StoreError};
use shared_models::auth::{AuthUser, RoleLookup, TokenVerification};
use shared_models::error::AppError;

use crate::jwt::verify_token;

/// Credential-verification middleware. A missing or unreadable header is
/// unauthenticated (401); a present token failing signature or expiry is
/// forbidden (403). On success the identity is attached to the request
/// extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthenticated("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthenticated("Invalid authorization header format".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Unauthenticated(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_value[7..];

    match verify_token(token, &state.config.access_token_secret) {
        TokenVerification::Valid(claims) => {
            request.extensions_mut().insert(AuthUser {
                email: claims.email,
            });
            Ok(next.run(request).await)
        }
        TokenVerification::Expired => Err(AppError::Forbidden("Token expired".to_string())),
        TokenVerification::Malformed => Err(AppError::Forbidden("Invalid token".to_string())),
    }
}

#[derive(Debug, Deserialize)]
struct RoleRecord {
    role: Option<String>,
}

/// Resolve an identity to its stored role. An absent user and a user without
/// the admin role are distinct outcomes; the admin gate denies both.
pub async fn lookup_role(store: &StoreClient, email: &str) -> Result<RoleLookup, StoreError> {
    let record: Option<RoleRecord> = store.find_one("users", &[("email", email)]).await?;

    Ok(match record {
        None => RoleLookup::NotFound,
        Some(r) if r.role.as_deref() == Some("admin") => RoleLookup::Admin,
        Some(_) => RoleLookup::NotAdmin,
    })
}

/// Role-gating middleware. Must be layered after `auth_middleware`; it never
/// runs against an unverified credential.
pub async fn admin_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthenticated("Missing authenticated identity".to_string()))?;

    let role = lookup_role(&state.store, &user.email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    match role {
        RoleLookup::Admin => Ok(next.run(request).await),
        RoleLookup::NotAdmin => Err(AppError::Forbidden("Admin role required".to_string())),
        RoleLookup::NotFound => Err(AppError::Forbidden("Admin role required".to_string())),
    }
}
