//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub tiktok: Option<String>,
    pub astrobin: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update applied with COALESCE semantics: unset fields
/// keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub tiktok: Option<String>,
    pub astrobin: Option<String>,
}

impl ProfileChanges {
    /// True when no field is set; the update is then a no-op
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.email.is_none()
            && self.avatar_url.is_none()
            && self.bio.is_none()
            && self.city.is_none()
            && self.zipcode.is_none()
            && self.twitter.is_none()
            && self.instagram.is_none()
            && self.facebook.is_none()
            && self.tiktok.is_none()
            && self.astrobin.is_none()
    }
}
