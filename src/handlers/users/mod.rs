//! User account and follow graph handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::{
    constants::MAX_AVATAR_BYTES,
    middleware::{
        auth::auth_middleware,
        guards::{ensure_user_exists, require_account_owner},
        rate_limit::rate_limit_middleware,
    },
    state::AppState,
};

/// User routes.
///
/// Layers on a route run outermost-first, so each chain below is listed
/// innermost-last: existence closest to the handler, then ownership,
/// then the rate limiter, with authentication wrapped around the whole
/// router.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/search", get(handler::search_user))
        .route(
            "/{id}",
            get(handler::get_user)
                .route_layer(from_fn_with_state(state.clone(), ensure_user_exists)),
        )
        .route(
            "/{id}/update",
            patch(handler::update_profile)
                .route_layer(from_fn_with_state(state.clone(), ensure_user_exists))
                .route_layer(from_fn(require_account_owner))
                .route_layer(from_fn_with_state(state.clone(), rate_limit_middleware)),
        )
        .route(
            "/{id}/update/password",
            patch(handler::update_password)
                .route_layer(from_fn_with_state(state.clone(), ensure_user_exists))
                .route_layer(from_fn(require_account_owner))
                .route_layer(from_fn_with_state(state.clone(), rate_limit_middleware)),
        )
        .route(
            "/{id}/update/username",
            patch(handler::update_username)
                .route_layer(from_fn_with_state(state.clone(), ensure_user_exists))
                .route_layer(from_fn(require_account_owner))
                .route_layer(from_fn_with_state(state.clone(), rate_limit_middleware)),
        )
        .route(
            "/{id}/update/avatar",
            put(handler::update_avatar)
                .route_layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES))
                .route_layer(from_fn_with_state(state.clone(), ensure_user_exists))
                .route_layer(from_fn(require_account_owner))
                .route_layer(from_fn_with_state(state.clone(), rate_limit_middleware)),
        )
        .route(
            "/{id}/delete",
            delete(handler::delete_account)
                .route_layer(from_fn_with_state(state.clone(), ensure_user_exists))
                .route_layer(from_fn(require_account_owner)),
        )
        .route(
            "/{id}/follow/{to_follow_id}",
            post(handler::follow_user)
                .route_layer(from_fn_with_state(state.clone(), ensure_user_exists))
                .route_layer(from_fn(require_account_owner)),
        )
        .route(
            "/{id}/unfollow/{to_unfollow_id}",
            delete(handler::unfollow_user)
                .route_layer(from_fn_with_state(state.clone(), ensure_user_exists))
                .route_layer(from_fn(require_account_owner)),
        )
        .route_layer(from_fn_with_state(state, auth_middleware))
}
