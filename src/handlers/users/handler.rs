//! User handler implementations

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::guards::{PathIdPair, TargetUserId},
    state::AppState,
};

use super::{
    request::{
        DeleteAccountRequest, SearchQuery, UpdatePasswordRequest, UpdateProfileRequest,
        UpdateUsernameRequest,
    },
    response::{AvatarResponse, MessageResponse, UserResponse},
};

/// Get a user's profile
pub async fn get_user(
    State(state): State<AppState>,
    TargetUserId(id): TargetUserId,
) -> AppResult<Json<UserResponse>> {
    let user = state.users().get_user(id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Find a user by exact username
pub async fn search_user(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<UserResponse>> {
    let name = query
        .name
        .ok_or_else(|| AppError::Validation("Query parameter 'name' is required".to_string()))?;

    let user = state.users().find_by_name(&name).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Update profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    TargetUserId(id): TargetUserId,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let user = state
        .users()
        .update_profile(id, payload.into_changes())
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Change the account password
pub async fn update_password(
    State(state): State<AppState>,
    TargetUserId(id): TargetUserId,
    Json(payload): Json<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let old_password = payload
        .old_password
        .ok_or_else(|| AppError::Validation("Current password required".to_string()))?;
    let new_password = payload
        .new_password
        .ok_or_else(|| AppError::Validation("New password required".to_string()))?;

    state
        .users()
        .update_password(id, &old_password, &new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}

/// Change the account username
pub async fn update_username(
    State(state): State<AppState>,
    TargetUserId(id): TargetUserId,
    Json(payload): Json<UpdateUsernameRequest>,
) -> AppResult<Json<MessageResponse>> {
    let password = payload
        .password
        .ok_or_else(|| AppError::Validation("Password required".to_string()))?;
    let username = payload
        .username
        .ok_or_else(|| AppError::Validation("Username required".to_string()))?;

    state
        .users()
        .update_username(id, &password, &username)
        .await?;

    Ok(Json(MessageResponse {
        message: "Username updated".to_string(),
    }))
}

/// Store a new avatar image from a multipart upload
pub async fn update_avatar(
    State(state): State<AppState>,
    TargetUserId(id): TargetUserId,
    mut multipart: Multipart,
) -> AppResult<Json<AvatarResponse>> {
    let mut stored_url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("Malformed multipart body".to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::Validation("Missing avatar content type".to_string()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::Validation("Unreadable avatar upload".to_string()))?;

        stored_url = Some(state.users().update_avatar(id, &content_type, &data).await?);
        break;
    }

    let avatar_url = stored_url
        .ok_or_else(|| AppError::Validation("Multipart field 'file' is required".to_string()))?;

    Ok(Json(AvatarResponse {
        message: "Avatar updated".to_string(),
        avatar_url,
    }))
}

/// Delete the account
pub async fn delete_account(
    State(state): State<AppState>,
    TargetUserId(id): TargetUserId,
    Json(payload): Json<DeleteAccountRequest>,
) -> AppResult<Json<MessageResponse>> {
    let password = payload
        .password
        .ok_or_else(|| AppError::Validation("Password required".to_string()))?;

    state.users().delete_account(id, &password).await?;

    Ok(Json(MessageResponse {
        message: "Account deleted".to_string(),
    }))
}

/// Follow another user
pub async fn follow_user(
    State(state): State<AppState>,
    PathIdPair(id, to_follow_id): PathIdPair,
) -> AppResult<Json<MessageResponse>> {
    state.follows().follow(id, to_follow_id).await?;

    Ok(Json(MessageResponse {
        message: "User followed".to_string(),
    }))
}

/// Unfollow a user
pub async fn unfollow_user(
    State(state): State<AppState>,
    PathIdPair(id, to_unfollow_id): PathIdPair,
) -> AppResult<Json<MessageResponse>> {
    state.follows().unfollow(id, to_unfollow_id).await?;

    Ok(Json(MessageResponse {
        message: "User unfollowed".to_string(),
    }))
}
