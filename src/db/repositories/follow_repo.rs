//! Follow graph repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppResult;

/// Storage operations on the directed follow graph.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Record a follow edge; inserting an existing edge is a no-op
    async fn create(&self, follower_id: i64, followee_id: i64) -> AppResult<()>;

    /// Remove a follow edge; removing a missing edge is a no-op
    async fn delete(&self, follower_id: i64, followee_id: i64) -> AppResult<()>;
}

/// Postgres-backed [`FollowStore`]
#[derive(Clone)]
pub struct PgFollowStore {
    pool: PgPool,
}

impl PgFollowStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowStore for PgFollowStore {
    async fn create(&self, follower_id: i64, followee_id: i64) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followee_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followee_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, follower_id: i64, followee_id: i64) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2"#)
            .bind(follower_id)
            .bind(followee_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
