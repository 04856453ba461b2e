//! HTTP middleware

pub mod auth;
pub mod guards;
pub mod logging;
pub mod rate_limit;

pub use auth::{auth_middleware, AuthenticatedUser};
pub use guards::{ensure_user_exists, require_account_owner, PathIdPair, TargetUserId};
pub use logging::logging_middleware;
pub use rate_limit::{rate_limit_middleware, RateLimiter, RedisRateLimiter};
