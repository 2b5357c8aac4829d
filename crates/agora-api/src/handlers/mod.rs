//! HTTP handlers organized by domain

pub mod auth;
pub mod comments;
pub mod groups;
pub mod health;
pub mod joins;
pub mod members;
pub mod messages;
pub mod posts;
pub mod reactions;
pub mod shares;
pub mod users;

use agora_core::Snowflake;

use crate::response::ApiError;

/// Parse a Snowflake path segment
pub(crate) fn parse_path_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}
