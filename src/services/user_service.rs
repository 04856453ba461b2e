//! User service

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    config::StorageConfig,
    constants::{avatar_types, MAX_AVATAR_BYTES},
    db::repositories::UserStore,
    error::{AppError, AppResult},
    models::{ProfileChanges, User},
    utils::validation,
};

/// User account business logic, storage-agnostic.
pub struct UserService {
    store: Arc<dyn UserStore>,
    storage: StorageConfig,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, storage: StorageConfig) -> Self {
        Self { store, storage }
    }

    /// Get user by ID
    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Check whether a user exists
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        self.store.exists(id).await
    }

    /// Look up a user by exact username
    pub async fn find_by_name(&self, name: &str) -> AppResult<User> {
        self.store
            .find_by_username(name)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Apply a partial profile update
    pub async fn update_profile(&self, id: i64, changes: ProfileChanges) -> AppResult<User> {
        if changes.is_empty() {
            // Nothing to write; hand back the current row
            return self.get_user(id).await;
        }

        self.store.update_profile(id, &changes).await
    }

    /// Change the password after verifying the current one
    pub async fn update_password(
        &self,
        id: i64,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.get_user(id).await?;

        if !Self::verify_password(old_password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        validation::validate_password(new_password)
            .map_err(|msg| AppError::Validation(msg.to_string()))?;

        let password_hash = Self::hash_password(new_password)?;
        self.store.update_password_hash(id, &password_hash).await
    }

    /// Change the username after verifying the password
    pub async fn update_username(&self, id: i64, password: &str, username: &str) -> AppResult<()> {
        let user = self.get_user(id).await?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        validation::validate_username(username)
            .map_err(|msg| AppError::Validation(msg.to_string()))?;

        self.store.update_username(id, username).await
    }

    /// Store an uploaded avatar image and record its public URL.
    ///
    /// The file lands under the configured avatars directory as
    /// `{id}-{uuid}.{ext}`; the returned URL joins the public base with
    /// that file name. The previously stored file, if any, is removed
    /// once the new URL is committed.
    pub async fn update_avatar(
        &self,
        id: i64,
        content_type: &str,
        data: &[u8],
    ) -> AppResult<String> {
        let extension = avatar_types::extension_for(content_type)
            .ok_or_else(|| AppError::Validation("Unsupported image type".to_string()))?;

        if data.is_empty() {
            return Err(AppError::Validation("Empty avatar upload".to_string()));
        }
        if data.len() > MAX_AVATAR_BYTES {
            return Err(AppError::Validation("Avatar exceeds maximum size".to_string()));
        }

        let previous_url = self.get_user(id).await?.avatar_url;

        let file_name = format!("{}-{}.{}", id, Uuid::new_v4(), extension);
        let file_path = self.storage.avatars_path.join(&file_name);

        tokio::fs::create_dir_all(&self.storage.avatars_path)
            .await
            .map_err(|e| AppError::Storage(format!("Creating avatar directory: {}", e)))?;
        tokio::fs::write(&file_path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Writing avatar file: {}", e)))?;

        let avatar_url = format!(
            "{}/{}",
            self.storage.avatar_base_url.trim_end_matches('/'),
            file_name
        );
        if let Err(e) = self.store.update_avatar_url(id, &avatar_url).await {
            // The write never became visible; don't leave the file behind
            if let Err(fs_err) = tokio::fs::remove_file(&file_path).await {
                warn!(
                    error = %fs_err,
                    path = %file_path.display(),
                    "Removing uncommitted avatar file failed"
                );
            }
            return Err(e);
        }

        // The old file is unreferenced once the new URL is committed
        if let Some(old_url) = previous_url {
            self.remove_stored_avatar(id, &old_url).await;
        }

        Ok(avatar_url)
    }

    /// Best-effort removal of a previously stored avatar file.
    ///
    /// Only URLs under the configured public base map back to a local
    /// file, and stored uploads are always named `{id}-{uuid}.{ext}`,
    /// so removal is confined to files bearing the acting user's own
    /// prefix. A stored URL pointing at anyone else's file (the field
    /// is caller-writable through profile updates) is left alone.
    /// Failures are logged, never surfaced.
    async fn remove_stored_avatar(&self, id: i64, avatar_url: &str) {
        let base = self.storage.avatar_base_url.trim_end_matches('/');
        let file_name = match avatar_url.strip_prefix(base) {
            Some(rest) => rest.trim_start_matches('/'),
            None => return,
        };
        if file_name.is_empty() || file_name.contains('/') {
            return;
        }
        if !file_name.starts_with(&format!("{}-", id)) {
            return;
        }

        let path = self.storage.avatars_path.join(file_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(error = %e, path = %path.display(), "Removing replaced avatar file failed");
        }
    }

    /// Delete the account after verifying the password
    pub async fn delete_account(&self, id: i64, password: &str) -> AppResult<()> {
        let user = self.get_user(id).await?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        self.store.delete(id).await
    }

    /// Hash a password using Argon2
    pub(crate) fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify a password against a stored hash
    pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::db::repositories::user_repo::MockUserStore;

    fn test_user(id: i64, password: &str) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            password_hash: UserService::hash_password(password).unwrap(),
            firstname: None,
            lastname: None,
            avatar_url: None,
            bio: None,
            city: None,
            zipcode: None,
            twitter: None,
            instagram: None,
            facebook: None,
            tiktok: None,
            astrobin: None,
            role: "member".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service_with(store: MockUserStore) -> UserService {
        UserService::new(
            Arc::new(store),
            StorageConfig {
                avatars_path: PathBuf::from("/tmp/avatars-test-unused"),
                avatar_base_url: "/media/avatars".to_string(),
            },
        )
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = UserService::hash_password("orion-belt").unwrap();
        assert!(UserService::verify_password("orion-belt", &hash).unwrap());
        assert!(!UserService::verify_password("wrong", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut store = MockUserStore::new();
        store.expect_find_by_id().with(eq(42)).returning(|_| Ok(None));

        let err = service_with(store).get_user(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_profile_update_skips_write() {
        let user = test_user(7, "supernova88");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .with(eq(7))
            .returning(move |_| Ok(Some(user.clone())));
        store.expect_update_profile().never();

        let updated = service_with(store)
            .update_profile(7, ProfileChanges::default())
            .await
            .unwrap();
        assert_eq!(updated.id, 7);
    }

    #[tokio::test]
    async fn test_update_password_rejects_wrong_current() {
        let user = test_user(3, "correct-horse");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        store.expect_update_password_hash().never();

        let err = service_with(store)
            .update_password(3, "wrong-horse", "new-password-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_update_password_rejects_short_replacement() {
        let user = test_user(3, "correct-horse");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        store.expect_update_password_hash().never();

        let err = service_with(store)
            .update_password(3, "correct-horse", "tiny")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_password_stores_new_hash() {
        let user = test_user(3, "correct-horse");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        store
            .expect_update_password_hash()
            .withf(|id, hash| {
                *id == 3 && UserService::verify_password("brand-new-pass", hash).unwrap()
            })
            .returning(|_, _| Ok(()));

        service_with(store)
            .update_password(3, "correct-horse", "brand-new-pass")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_username_rejects_invalid_name() {
        let user = test_user(5, "galaxy-far");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        store.expect_update_username().never();

        let err = service_with(store)
            .update_username(5, "galaxy-far", "no spaces here")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_account_requires_password() {
        let user = test_user(9, "red-giant");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        store.expect_delete().never();

        let err = service_with(store)
            .delete_account(9, "white-dwarf")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_update_avatar_writes_file_and_records_url() {
        let dir = tempfile::tempdir().unwrap();
        let user = test_user(11, "milky-way");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .with(eq(11))
            .returning(move |_| Ok(Some(user.clone())));
        store
            .expect_update_avatar_url()
            .withf(|id, url| *id == 11 && url.starts_with("/media/avatars/11-") && url.ends_with(".png"))
            .returning(|_, _| Ok(()));

        let service = UserService::new(
            Arc::new(store),
            StorageConfig {
                avatars_path: dir.path().to_path_buf(),
                avatar_base_url: "/media/avatars/".to_string(),
            },
        );

        let url = service
            .update_avatar(11, "image/png", b"png-bytes")
            .await
            .unwrap();

        let file_name = url.rsplit('/').next().unwrap();
        let stored = std::fs::read(dir.path().join(file_name)).unwrap();
        assert_eq!(stored, b"png-bytes");
    }

    #[tokio::test]
    async fn test_update_avatar_removes_replaced_file() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("11-old.png");
        std::fs::write(&old_path, b"old-bytes").unwrap();

        let mut user = test_user(11, "milky-way");
        user.avatar_url = Some("/media/avatars/11-old.png".to_string());
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .with(eq(11))
            .returning(move |_| Ok(Some(user.clone())));
        store.expect_update_avatar_url().returning(|_, _| Ok(()));

        let service = UserService::new(
            Arc::new(store),
            StorageConfig {
                avatars_path: dir.path().to_path_buf(),
                avatar_base_url: "/media/avatars".to_string(),
            },
        );

        let url = service
            .update_avatar(11, "image/jpeg", b"jpeg-bytes")
            .await
            .unwrap();

        assert!(!old_path.exists(), "replaced file should be gone");
        let file_name = url.rsplit('/').next().unwrap();
        assert!(dir.path().join(file_name).exists());
    }

    #[tokio::test]
    async fn test_update_avatar_tolerates_missing_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut user = test_user(12, "andromeda");
        user.avatar_url = Some("/media/avatars/12-gone.png".to_string());
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        store.expect_update_avatar_url().returning(|_, _| Ok(()));

        let service = UserService::new(
            Arc::new(store),
            StorageConfig {
                avatars_path: dir.path().to_path_buf(),
                avatar_base_url: "/media/avatars".to_string(),
            },
        );

        // Removal of an already-gone file only warns
        service
            .update_avatar(12, "image/png", b"new-bytes")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_avatar_leaves_other_users_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let other_path = dir.path().join("99-victim.png");
        std::fs::write(&other_path, b"victim-bytes").unwrap();

        // Stored URL points at another user's file; profile updates
        // let a caller write any URL into their own avatar_url field
        let mut user = test_user(11, "milky-way");
        user.avatar_url = Some("/media/avatars/99-victim.png".to_string());
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        store.expect_update_avatar_url().returning(|_, _| Ok(()));

        let service = UserService::new(
            Arc::new(store),
            StorageConfig {
                avatars_path: dir.path().to_path_buf(),
                avatar_base_url: "/media/avatars".to_string(),
            },
        );

        service
            .update_avatar(11, "image/png", b"new-bytes")
            .await
            .unwrap();

        assert!(
            other_path.exists(),
            "a file outside the caller's own prefix must never be removed"
        );
    }

    #[tokio::test]
    async fn test_update_avatar_cleans_up_file_when_commit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let user = test_user(13, "pulsar");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        store
            .expect_update_avatar_url()
            .returning(|_, _| Err(AppError::Database("connection lost".to_string())));

        let service = UserService::new(
            Arc::new(store),
            StorageConfig {
                avatars_path: dir.path().to_path_buf(),
                avatar_base_url: "/media/avatars".to_string(),
            },
        );

        let err = service
            .update_avatar(13, "image/png", b"png-bytes")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(leftovers.is_empty(), "uncommitted upload must not stay on disk");
    }

    #[tokio::test]
    async fn test_update_avatar_rejects_unknown_type() {
        let store = MockUserStore::new();
        let err = service_with(store)
            .update_avatar(11, "application/pdf", b"%PDF")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
