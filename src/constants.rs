//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const MEMBER: &str = "member";
}

// =============================================================================
// AVATAR UPLOADS
// =============================================================================

/// Maximum avatar payload size in bytes (5 MB)
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Accepted avatar content types mapped to the file extension they store as
pub mod avatar_types {
    pub const JPEG: (&str, &str) = ("image/jpeg", "jpg");
    pub const PNG: (&str, &str) = ("image/png", "png");
    pub const GIF: (&str, &str) = ("image/gif", "gif");
    pub const WEBP: (&str, &str) = ("image/webp", "webp");

    /// All accepted (content type, extension) pairs
    pub const ALL: &[(&str, &str)] = &[JPEG, PNG, GIF, WEBP];

    /// Look up the storage extension for an accepted content type
    pub fn extension_for(content_type: &str) -> Option<&'static str> {
        ALL.iter()
            .find(|(mime, _)| *mime == content_type)
            .map(|(_, ext)| *ext)
    }
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Per-caller budgets for the sensitive update operations
pub mod rate_limits {
    /// Profile update - max requests
    pub const PROFILE_MAX_REQUESTS: i64 = 10;
    /// Profile update - window in seconds
    pub const PROFILE_WINDOW_SECS: i64 = 60;

    /// Password update - max requests
    pub const PASSWORD_MAX_REQUESTS: i64 = 3;
    /// Password update - window in seconds
    pub const PASSWORD_WINDOW_SECS: i64 = 300;

    /// Username update - max requests
    pub const USERNAME_MAX_REQUESTS: i64 = 3;
    /// Username update - window in seconds
    pub const USERNAME_WINDOW_SECS: i64 = 300;

    /// Avatar upload - max requests
    pub const AVATAR_MAX_REQUESTS: i64 = 5;
    /// Avatar upload - window in seconds
    pub const AVATAR_WINDOW_SECS: i64 = 60;

    /// Fallback budget for anything else routed through the limiter
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// Fallback window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}
