//! Rate limiting middleware

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use redis::aio::ConnectionManager;
use tracing::warn;

use crate::{
    constants::rate_limits,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    state::AppState,
};

/// Fixed-window request counter.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record a hit against `key`; true while within `limit` hits per
    /// `window_secs` window
    async fn hit(&self, key: &str, limit: i64, window_secs: i64) -> AppResult<bool>;
}

/// Redis-backed fixed-window limiter
#[derive(Clone)]
pub struct RedisRateLimiter {
    redis: ConnectionManager,
}

impl RedisRateLimiter {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn hit(&self, key: &str, limit: i64, window_secs: i64) -> AppResult<bool> {
        let mut redis = self.redis.clone();

        let (count,): (i64,) = window_pipeline(key, window_secs)
            .query_async(&mut redis)
            .await?;

        Ok(count <= limit)
    }
}

/// Counter bump and window TTL as a single MULTI/EXEC unit.
///
/// `EXPIRE ... NX` arms the TTL on whichever hit finds the key without
/// one, not just the first, so a counter cannot be left behind with no
/// expiry. Requires Redis 7.
fn window_pipeline(key: &str, window_secs: i64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .incr(key, 1)
        .cmd("EXPIRE")
        .arg(key)
        .arg(window_secs)
        .arg("NX")
        .ignore();
    pipe
}

/// Rate limit middleware, keyed by caller and operation class
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (operation, limit, window) = classify(request.uri().path());
    let key = format!("rate_limit:{}:{}", user.id, operation);

    match state.limiter().hit(&key, limit, window).await {
        Ok(true) => Ok(next.run(request).await),
        Ok(false) => Err(AppError::TooManyRequests),
        Err(e) => {
            // Limiter outage must not take the API down with it
            warn!(error = %e, key = %key, "Rate limiter unavailable, allowing request");
            Ok(next.run(request).await)
        }
    }
}

/// Operation class for a path, with its budget
fn classify(path: &str) -> (&'static str, i64, i64) {
    if path.ends_with("/update/password") {
        (
            "password",
            rate_limits::PASSWORD_MAX_REQUESTS,
            rate_limits::PASSWORD_WINDOW_SECS,
        )
    } else if path.ends_with("/update/username") {
        (
            "username",
            rate_limits::USERNAME_MAX_REQUESTS,
            rate_limits::USERNAME_WINDOW_SECS,
        )
    } else if path.ends_with("/update/avatar") {
        (
            "avatar",
            rate_limits::AVATAR_MAX_REQUESTS,
            rate_limits::AVATAR_WINDOW_SECS,
        )
    } else if path.ends_with("/update") {
        (
            "profile",
            rate_limits::PROFILE_MAX_REQUESTS,
            rate_limits::PROFILE_WINDOW_SECS,
        )
    } else {
        (
            "general",
            rate_limits::GENERAL_MAX_REQUESTS,
            rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}
