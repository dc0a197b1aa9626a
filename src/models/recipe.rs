use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the "recipes" collection. Shared by reference, never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "apiId")]
    pub api_id: String,
    pub name: String,
}

/// Entry of a favorites or list collection.
///
/// The `api_id` is copied next to the reference so duplicate checks can be
/// expressed as a single conditional array update.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeRef {
    pub recipe_id: ObjectId,
    pub api_id: String,
}

impl From<&Recipe> for RecipeRef {
    fn from(recipe: &Recipe) -> Self {
        Self {
            recipe_id: recipe.id,
            api_id: recipe.api_id.clone(),
        }
    }
}

/// Raw recipe attributes sent by the client
#[derive(Debug, Deserialize, Clone, Default, utoipa::ToSchema)]
pub struct RecipeAttrs {
    #[serde(rename = "apiId", default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
impl RecipeAttrs {
    pub fn new(api_id: &str, name: &str) -> Self {
        Self {
            api_id: Some(api_id.to_string()),
            name: Some(name.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct RecipeView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "apiId")]
    pub api_id: String,
    pub name: String,
}

impl From<Recipe> for RecipeView {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.to_hex(),
            api_id: recipe.api_id,
            name: recipe.name,
        }
    }
}
