//! Business logic services

pub mod follow_service;
pub mod user_service;

pub use follow_service::FollowService;
pub use user_service::UserService;
