//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod follow_repo;
pub mod user_repo;

pub use follow_repo::{FollowStore, PgFollowStore};
pub use user_repo::{PgUserStore, UserStore};
