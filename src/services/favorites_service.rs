// ==================== FAVORITES ====================
// Toggle membership of a recipe in a user's favorites

use crate::{
    database::Store,
    models::{RecipeAttrs, RecipeRef, RecipeView},
    services::{parse_id, recipe_service},
    utils::AppError,
};

const USER_NOT_FOUND: &str = "The user with the user id provided could not be found";
const MISSING_RECIPE: &str = "Please provide recipe data to toggle";

/// GET favorites, resolved, most recently favorited first
pub async fn get_all(store: &dyn Store, user_id: &str) -> Result<Vec<RecipeView>, AppError> {
    let user_oid = parse_id(user_id, USER_NOT_FOUND)?;
    let user = store
        .find_user(&user_oid)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    recipe_service::resolve(store, &user.favorites).await
}

/// Removes the favorite with the same apiId if present, otherwise prepends it
pub async fn toggle_recipe(
    store: &dyn Store,
    user_id: &str,
    attrs: &RecipeAttrs,
) -> Result<Vec<RecipeView>, AppError> {
    // Removal only needs the apiId; adding also needs a name
    let api_id = attrs
        .api_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_RECIPE.to_string()))?;
    let user_oid = parse_id(user_id, USER_NOT_FOUND)?;

    let pulled = store.pull_favorite(&user_oid, api_id).await?;
    if !pulled.matched {
        return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
    }

    if pulled.modified {
        log::info!("💔 Removed {} from favorites of {}", api_id, user_id);
    } else {
        let recipe = recipe_service::validate(attrs, MISSING_RECIPE)?;
        let stored = recipe_service::normalize(store, &recipe).await?;
        let pushed = store
            .push_favorite_front(&user_oid, &RecipeRef::from(&stored))
            .await?;

        if pushed.modified {
            log::info!("❤️  Added {} to favorites of {}", recipe.api_id, user_id);
        } else {
            // A concurrent request favorited it (or removed the user) in between
            log::debug!("Favorite {} for {} already present", recipe.api_id, user_id);
        }
    }

    get_all(store, user_id).await
}
