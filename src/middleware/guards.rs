//! Route guards for id-bearing user routes
//!
//! Path ids are strict digit sequences; anything else behaves as an
//! unmatched route. The ownership and existence guards run per route,
//! after authentication.

use axum::{
    body::Body,
    extract::{FromRequestParts, Path, RawPathParams, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    state::AppState,
};

/// Parse a path segment as a pure digit sequence id
pub fn parse_id(raw: &str) -> AppResult<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    raw.parse::<i64>()
        .map_err(|_| AppError::NotFound("User not found".to_string()))
}

/// The `{id}` path parameter, digit-gated
#[derive(Debug, Clone, Copy)]
pub struct TargetUserId(pub i64);

impl<S> FromRequestParts<S> for TargetUserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("User not found".to_string()))?;

        let raw = params
            .iter()
            .find(|(name, _)| *name == "id")
            .map(|(_, value)| value)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(TargetUserId(parse_id(raw)?))
    }
}

/// Both id segments of a two-id route, digit-gated, in path order
#[derive(Debug, Clone, Copy)]
pub struct PathIdPair(pub i64, pub i64);

impl<S> FromRequestParts<S> for PathIdPair
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("User not found".to_string()))?;

        Ok(PathIdPair(parse_id(&first)?, parse_id(&second)?))
    }
}

/// Reject callers acting on an account that is not their own.
///
/// Admins bypass the ownership check.
pub async fn require_account_owner(
    user: AuthenticatedUser,
    TargetUserId(target_id): TargetUserId,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if user.id != target_id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot manage another user's account".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Reject requests whose `{id}` does not resolve to a stored user
pub async fn ensure_user_exists(
    State(state): State<AppState>,
    TargetUserId(target_id): TargetUserId,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !state.users().exists(target_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(next.run(request).await)
}
