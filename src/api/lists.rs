use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::api::users::UserPath;
use crate::models::{ListNameRequest, ListView, RecipeAttrs};
use crate::services::lists_service;
use crate::state::AppState;
use crate::utils::AppError;

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ListPath {
    pub list_id: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Path)]
pub struct UserListPath {
    pub user_id: String,
    pub list_id: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ListRecipePath {
    pub list_id: String,
    /// External apiId of the recipe
    pub recipe_id: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddRecipeRequest {
    pub recipe: RecipeAttrs,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ListResponse {
    pub list: ListView,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ListsResponse {
    pub lists: Vec<ListView>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListResponse {
    pub list_id: String,
    pub lists: Vec<ListView>,
}

/// The body is optional, but a non-empty one must be valid JSON
fn name_request(body: &web::Bytes) -> Result<ListNameRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ListNameRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Json deserialize error: {}", e)))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/lists",
    tag = "Lists",
    params(UserPath),
    responses(
        (status = 200, description = "User's lists with recipes", body = ListsResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_all(
    state: web::Data<AppState>,
    path: web::Path<UserPath>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users/{}/lists", path.user_id);

    let lists = lists_service::get_all(state.store(), &path.user_id).await?;
    Ok(HttpResponse::Ok().json(ListsResponse { lists }))
}

#[utoipa::path(
    post,
    path = "/users/{user_id}/lists",
    tag = "Lists",
    params(UserPath),
    request_body = ListNameRequest,
    responses(
        (status = 200, description = "List created", body = CreateListResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<UserPath>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users/{}/lists", path.user_id);

    let request = name_request(&body)?;
    let created =
        lists_service::create(state.store(), &path.user_id, request.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(CreateListResponse {
        list_id: created.list_id,
        lists: created.lists,
    }))
}

#[utoipa::path(
    get,
    path = "/lists/{list_id}",
    tag = "Lists",
    params(ListPath),
    responses(
        (status = 200, description = "The list with recipes", body = ListResponse),
        (status = 404, description = "List not found")
    )
)]
pub async fn get_one(
    state: web::Data<AppState>,
    path: web::Path<ListPath>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET list {}", path.list_id);

    let list = lists_service::get_one(state.store(), &path.list_id).await?;
    Ok(HttpResponse::Ok().json(ListResponse { list }))
}

#[utoipa::path(
    put,
    path = "/lists/{list_id}",
    tag = "Lists",
    params(ListPath),
    request_body = ListNameRequest,
    responses(
        (status = 200, description = "Renamed list", body = ListResponse),
        (status = 404, description = "List not found")
    )
)]
pub async fn update_name(
    state: web::Data<AppState>,
    path: web::Path<ListPath>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    log::info!("✏️  PUT list {}", path.list_id);

    let request = name_request(&body)?;
    let list =
        lists_service::update_name(state.store(), &path.list_id, request.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(ListResponse { list }))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}/lists/{list_id}",
    tag = "Lists",
    params(UserListPath),
    responses(
        (status = 200, description = "User's remaining lists", body = ListsResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Nothing was deleted")
    )
)]
pub async fn delete_one(
    state: web::Data<AppState>,
    path: web::Path<UserListPath>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /users/{}/lists/{}", path.user_id, path.list_id);

    let lists = lists_service::delete_one(state.store(), &path.user_id, &path.list_id).await?;
    Ok(HttpResponse::Ok().json(ListsResponse { lists }))
}

#[utoipa::path(
    delete,
    path = "/lists/{list_id}",
    tag = "Lists",
    params(ListPath),
    responses(
        (status = 200, description = "Owner's remaining lists", body = ListsResponse),
        (status = 404, description = "List not found")
    )
)]
pub async fn delete_owned(
    state: web::Data<AppState>,
    path: web::Path<ListPath>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /lists/{}", path.list_id);

    let lists = lists_service::delete_owned(state.store(), &path.list_id).await?;
    Ok(HttpResponse::Ok().json(ListsResponse { lists }))
}

#[utoipa::path(
    post,
    path = "/lists/{list_id}/recipes",
    tag = "Lists",
    params(ListPath),
    request_body = AddRecipeRequest,
    responses(
        (status = 200, description = "Updated list", body = ListResponse),
        (status = 400, description = "Missing recipe data or recipe already in list"),
        (status = 404, description = "List not found")
    )
)]
pub async fn add_recipe(
    state: web::Data<AppState>,
    path: web::Path<ListPath>,
    request: web::Json<AddRecipeRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "➕ POST list {} recipes - apiId: {}",
        path.list_id,
        request.recipe.api_id.as_deref().unwrap_or("N/A")
    );

    let list = lists_service::add_recipe(state.store(), &path.list_id, &request.recipe).await?;
    Ok(HttpResponse::Ok().json(ListResponse { list }))
}

#[utoipa::path(
    delete,
    path = "/lists/{list_id}/recipes/{recipe_id}",
    tag = "Lists",
    params(ListRecipePath),
    responses(
        (status = 200, description = "Updated list", body = ListResponse),
        (status = 404, description = "List not found")
    )
)]
pub async fn delete_recipe(
    state: web::Data<AppState>,
    path: web::Path<ListRecipePath>,
) -> Result<HttpResponse, AppError> {
    log::info!("➖ DELETE list {} recipe {}", path.list_id, path.recipe_id);

    let list =
        lists_service::delete_recipe(state.store(), &path.list_id, &path.recipe_id).await?;
    Ok(HttpResponse::Ok().json(ListResponse { list }))
}
