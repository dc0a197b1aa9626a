// Recipe normalization and reference resolution

use crate::{
    database::Store,
    models::{Recipe, RecipeAttrs, RecipeRef, RecipeView},
    utils::AppError,
};
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;

/// Validated recipe attributes
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub api_id: String,
    pub name: String,
}

/// Both `apiId` and `name` must be present and non-empty
pub fn validate(attrs: &RecipeAttrs, message: &str) -> Result<NewRecipe, AppError> {
    let api_id = attrs.api_id.as_deref().filter(|s| !s.is_empty());
    let name = attrs.name.as_deref().filter(|s| !s.is_empty());

    match (api_id, name) {
        (Some(api_id), Some(name)) => Ok(NewRecipe {
            api_id: api_id.to_string(),
            name: name.to_string(),
        }),
        _ => Err(AppError::BadRequest(message.to_string())),
    }
}

/// Finds or creates the canonical Recipe for `recipe.api_id`
pub async fn normalize(store: &dyn Store, recipe: &NewRecipe) -> Result<Recipe, AppError> {
    store
        .find_or_create_recipe(&recipe.api_id, &recipe.name)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to create recipe {}: {}", recipe.api_id, e);
            AppError::InternalError("Failed to create new recipe".to_string())
        })
}

/// Resolves references to full recipes, keeping reference order.
/// References to recipes that no longer exist are dropped.
pub async fn resolve(store: &dyn Store, refs: &[RecipeRef]) -> Result<Vec<RecipeView>, AppError> {
    let ids: Vec<ObjectId> = refs.iter().map(|r| r.recipe_id).collect();
    let found = store.find_recipes(&ids).await?;
    Ok(order_by_refs(refs, &found))
}

/// Orders `recipes` after `refs`
pub fn order_by_refs(refs: &[RecipeRef], recipes: &[Recipe]) -> Vec<RecipeView> {
    let by_id: HashMap<ObjectId, &Recipe> = recipes.iter().map(|r| (r.id, r)).collect();

    refs.iter()
        .filter_map(|r| by_id.get(&r.recipe_id))
        .map(|recipe| RecipeView::from((*recipe).clone()))
        .collect()
}
