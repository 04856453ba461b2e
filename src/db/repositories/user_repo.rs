//! User repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{ProfileChanges, User},
};

/// Storage operations on user records.
///
/// Production uses [`PgUserStore`]; tests substitute doubles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Check whether a user row exists
    async fn exists(&self, id: i64) -> AppResult<bool>;

    /// Apply a partial profile update, returning the updated row
    async fn update_profile(&self, id: i64, changes: &ProfileChanges) -> AppResult<User>;

    /// Replace the stored password hash
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> AppResult<()>;

    /// Replace the username
    async fn update_username(&self, id: i64, username: &str) -> AppResult<()>;

    /// Replace the avatar URL
    async fn update_avatar_url(&self, id: i64, avatar_url: &str) -> AppResult<()>;

    /// Delete the user row
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Postgres-backed [`UserStore`]
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE username = $1"#)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)"#)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_profile(&self, id: i64, changes: &ProfileChanges) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                firstname = COALESCE($2, firstname),
                lastname = COALESCE($3, lastname),
                email = COALESCE($4, email),
                avatar_url = COALESCE($5, avatar_url),
                bio = COALESCE($6, bio),
                city = COALESCE($7, city),
                zipcode = COALESCE($8, zipcode),
                twitter = COALESCE($9, twitter),
                instagram = COALESCE($10, instagram),
                facebook = COALESCE($11, facebook),
                tiktok = COALESCE($12, tiktok),
                astrobin = COALESCE($13, astrobin),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.firstname.as_deref())
        .bind(changes.lastname.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.avatar_url.as_deref())
        .bind(changes.bio.as_deref())
        .bind(changes.city.as_deref())
        .bind(changes.zipcode.as_deref())
        .bind(changes.twitter.as_deref())
        .bind(changes.instagram.as_deref())
        .bind(changes.facebook.as_deref())
        .bind(changes.tiktok.as_deref())
        .bind(changes.astrobin.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1"#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_username(&self, id: i64, username: &str) -> AppResult<()> {
        sqlx::query(r#"UPDATE users SET username = $2, updated_at = NOW() WHERE id = $1"#)
            .bind(id)
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_avatar_url(&self, id: i64, avatar_url: &str) -> AppResult<()> {
        sqlx::query(r#"UPDATE users SET avatar_url = $2, updated_at = NOW() WHERE id = $1"#)
            .bind(id)
            .bind(avatar_url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
