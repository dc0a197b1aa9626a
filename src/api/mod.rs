pub mod auth;
pub mod favorites;
pub mod health;
pub mod lists;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::middleware::SessionGuard;
use crate::utils::AppError;

/// Malformed JSON bodies are client errors in the common error shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Session & auth
        .service(
            web::resource("/sessions")
                .wrap(SessionGuard)
                .route(web::get().to(auth::validate_session)),
        )
        .route("/signup", web::post().to(auth::sign_up))
        .route("/login", web::post().to(auth::log_in))
        .route("/logout", web::post().to(auth::log_out))
        // User-scoped favorites and lists
        .service(
            web::scope("/users/{user_id}")
                .route("", web::get().to(users::get_user))
                .route("/favorites", web::get().to(favorites::get_all))
                .route("/favorites", web::post().to(favorites::toggle_recipe))
                .route("/lists", web::get().to(lists::get_all))
                .route("/lists", web::post().to(lists::create))
                .route("/lists/{list_id}", web::get().to(lists::get_one))
                .route("/lists/{list_id}", web::put().to(lists::update_name))
                .route("/lists/{list_id}", web::delete().to(lists::delete_one))
                .route("/lists/{list_id}/recipes", web::post().to(lists::add_recipe))
                .route(
                    "/lists/{list_id}/recipes/{recipe_id}",
                    web::delete().to(lists::delete_recipe),
                ),
        )
        // List-scoped routes
        .service(
            web::scope("/lists/{list_id}")
                .route("", web::get().to(lists::get_one))
                .route("", web::put().to(lists::update_name))
                .route("", web::delete().to(lists::delete_owned))
                .route("/recipes", web::post().to(lists::add_recipe))
                .route("/recipes/{recipe_id}", web::delete().to(lists::delete_recipe)),
        );
}
