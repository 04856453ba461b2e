//! Utility functions

pub mod time;
pub mod validation;

pub use time::{format_epoch_millis, format_iso, format_timestamp, now_epoch_millis, parse_datetime};
pub use validation::{validate_password, validate_username};
