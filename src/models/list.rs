use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::{RecipeRef, RecipeView};

/// Document in the "lists" collection
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipeList {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub owner_id: ObjectId,
    #[serde(default)]
    pub recipes: Vec<RecipeRef>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<BsonDateTime>,
}

impl RecipeList {
    pub fn new(owner_id: ObjectId, name: &str) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.to_string(),
            owner_id,
            recipes: Vec::new(),
            created_at: Some(BsonDateTime::now()),
        }
    }
}

/// A list with its recipes resolved to full documents
#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct ListView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub recipes: Vec<RecipeView>,
}

/// Body for creating or renaming a list
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct ListNameRequest {
    #[serde(default)]
    pub name: Option<String>,
}
