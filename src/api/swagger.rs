use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Service API",
        version = "1.0.0",
        description = "Favorites and recipe lists for authenticated users.\n\n**Authentication:** signup and login set an HTTP-only session cookie, checked by `GET /sessions`."
    ),
    paths(
        // Auth
        crate::api::auth::validate_session,
        crate::api::auth::sign_up,
        crate::api::auth::log_in,
        crate::api::auth::log_out,

        // Health
        crate::api::health::health_check,

        // Users & favorites
        crate::api::users::get_user,
        crate::api::favorites::get_all,
        crate::api::favorites::toggle_recipe,

        // Lists
        crate::api::lists::get_all,
        crate::api::lists::create,
        crate::api::lists::get_one,
        crate::api::lists::update_name,
        crate::api::lists::delete_one,
        crate::api::lists::delete_owned,
        crate::api::lists::add_recipe,
        crate::api::lists::delete_recipe,
    ),
    components(
        schemas(
            crate::models::Credentials,
            crate::models::RecipeAttrs,
            crate::models::RecipeView,
            crate::models::ListView,
            crate::models::ListNameRequest,
            crate::api::auth::SessionResponse,
            crate::api::health::HealthResponse,
            crate::api::users::UserDataResponse,
            crate::api::favorites::ToggleRequest,
            crate::api::favorites::FavoritesResponse,
            crate::api::lists::AddRecipeRequest,
            crate::api::lists::ListResponse,
            crate::api::lists::ListsResponse,
            crate::api::lists::CreateListResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Signup, login, logout and session checks."),
        (name = "Health", description = "Service and document store health."),
        (name = "Users", description = "A user's favorites and lists in one call."),
        (name = "Favorites", description = "Toggle recipes in and out of a user's favorites."),
        (name = "Lists", description = "Create, rename and delete lists, and manage their recipes."),
    )
)]
pub struct ApiDoc;
