use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::RecipeRef;

/// Document in the "users" collection
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    /// Most recently favorited first
    #[serde(default)]
    pub favorites: Vec<RecipeRef>,
    #[serde(default)]
    pub lists: Vec<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<BsonDateTime>,
}

impl User {
    pub fn new(email: &str, password_hash: &str) -> Self {
        Self {
            id: ObjectId::new(),
            email: email.to_string(),
            password: password_hash.to_string(),
            favorites: Vec::new(),
            lists: Vec::new(),
            created_at: Some(BsonDateTime::now()),
        }
    }
}

/// Signup / login payload. Fields are optional so missing ones surface as
/// a 400 from the service instead of a JSON parse error.
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
