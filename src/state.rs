//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    middleware::rate_limit::RateLimiter,
    services::{FollowService, UserService},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// User account service
    pub users: UserService,

    /// Follow graph service
    pub follows: FollowService,

    /// Request rate limiter
    pub limiter: Arc<dyn RateLimiter>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        users: UserService,
        follows: FollowService,
        limiter: Arc<dyn RateLimiter>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users,
                follows,
                limiter,
                config,
            }),
        }
    }

    /// Get a reference to the user service
    pub fn users(&self) -> &UserService {
        &self.inner.users
    }

    /// Get a reference to the follow service
    pub fn follows(&self) -> &FollowService {
        &self.inner.follows
    }

    /// Get a reference to the rate limiter
    pub fn limiter(&self) -> &dyn RateLimiter {
        self.inner.limiter.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
