use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::api::users::UserPath;
use crate::models::{RecipeAttrs, RecipeView};
use crate::services::favorites_service;
use crate::state::AppState;
use crate::utils::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ToggleRequest {
    pub recipe: RecipeAttrs,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FavoritesResponse {
    pub favorites: Vec<RecipeView>,
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/favorites",
    tag = "Favorites",
    params(UserPath),
    responses(
        (status = 200, description = "Favorites, most recent first", body = FavoritesResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_all(
    state: web::Data<AppState>,
    path: web::Path<UserPath>,
) -> Result<HttpResponse, AppError> {
    log::info!("⭐ GET /users/{}/favorites", path.user_id);

    let favorites = favorites_service::get_all(state.store(), &path.user_id).await?;
    Ok(HttpResponse::Ok().json(FavoritesResponse { favorites }))
}

#[utoipa::path(
    post,
    path = "/users/{user_id}/favorites",
    tag = "Favorites",
    params(UserPath),
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "Updated favorites", body = FavoritesResponse),
        (status = 400, description = "Missing recipe data"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Recipe could not be created")
    )
)]
pub async fn toggle_recipe(
    state: web::Data<AppState>,
    path: web::Path<UserPath>,
    request: web::Json<ToggleRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "⭐ POST /users/{}/favorites - apiId: {}",
        path.user_id,
        request.recipe.api_id.as_deref().unwrap_or("N/A")
    );

    let favorites =
        favorites_service::toggle_recipe(state.store(), &path.user_id, &request.recipe).await?;
    Ok(HttpResponse::Ok().json(FavoritesResponse { favorites }))
}
