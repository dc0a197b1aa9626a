pub mod auth_service;
pub mod favorites_service;
pub mod lists_service;
pub mod recipe_service;
pub mod session_service;

pub use session_service::{SessionManager, SESSION_COOKIE};

use crate::utils::AppError;
use mongodb::bson::oid::ObjectId;

/// Parses a path id. A malformed id cannot name an existing document, so it
/// is reported as not found with the caller's message.
pub fn parse_id(raw: &str, not_found: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::NotFound(not_found.to_string()))
}
