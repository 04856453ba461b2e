//! Stargaze - User Service for Amateur Astronomers
//!
//! This library provides the account backend for the Stargaze network,
//! a social platform where amateur astronomers share observations.
//!
//! # Features
//!
//! - Profile retrieval and partial profile updates
//! - Credential-gated password, username, and account deletion flows
//! - Avatar uploads with on-disk storage
//! - Follow/unfollow relationships between members
//! - Exact-username search
//! - Per-caller rate limiting on sensitive operations
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
