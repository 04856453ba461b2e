//! User request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::models::ProfileChanges;

/// Partial profile update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub firstname: Option<String>,

    #[validate(length(max = 100))]
    pub lastname: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 512))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 512))]
    pub bio: Option<String>,

    #[validate(length(max = 128))]
    pub city: Option<String>,

    #[validate(length(max = 16))]
    pub zipcode: Option<String>,

    #[validate(length(max = 64))]
    pub twitter: Option<String>,

    #[validate(length(max = 64))]
    pub instagram: Option<String>,

    #[validate(length(max = 64))]
    pub facebook: Option<String>,

    #[validate(length(max = 64))]
    pub tiktok: Option<String>,

    #[validate(length(max = 64))]
    pub astrobin: Option<String>,
}

impl UpdateProfileRequest {
    /// Convert into the storage-layer change set
    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            avatar_url: self.avatar_url,
            bio: self.bio,
            city: self.city,
            zipcode: self.zipcode,
            twitter: self.twitter,
            instagram: self.instagram,
            facebook: self.facebook,
            tiktok: self.tiktok,
            astrobin: self.astrobin,
        }
    }
}

/// Password change request; both fields must be present
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

/// Username change request; both fields must be present
#[derive(Debug, Deserialize)]
pub struct UpdateUsernameRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Account deletion request; the password confirms intent
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: Option<String>,
}

/// User lookup query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}
