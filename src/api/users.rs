use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::models::{ListView, RecipeView};
use crate::services::{favorites_service, lists_service};
use crate::state::AppState;
use crate::utils::AppError;

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Path)]
pub struct UserPath {
    pub user_id: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserDataResponse {
    pub favorites: Vec<RecipeView>,
    pub lists: Vec<ListView>,
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(UserPath),
    responses(
        (status = 200, description = "Favorites and lists, resolved", body = UserDataResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<UserPath>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /users/{}", path.user_id);

    let favorites = favorites_service::get_all(state.store(), &path.user_id).await?;
    let lists = lists_service::get_all(state.store(), &path.user_id).await?;

    Ok(HttpResponse::Ok().json(UserDataResponse { favorites, lists }))
}
