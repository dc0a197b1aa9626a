use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::models::{Credentials, SessionUser};
use crate::services::{auth_service, SESSION_COOKIE};
use crate::state::AppState;
use crate::utils::AppError;

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/sessions",
    tag = "Auth",
    responses(
        (status = 200, description = "Session is valid", body = SessionResponse),
        (status = 401, description = "No live session")
    )
)]
pub async fn validate_session(user: web::ReqData<SessionUser>) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        user_id: Some(user.user_id.to_hex()),
    })
}

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "User created and logged in", body = SessionResponse),
        (status = 400, description = "Missing email or password"),
        (status = 404, description = "User already exists")
    )
)]
pub async fn sign_up(
    state: web::Data<AppState>,
    request: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /signup - email: {}", request.email.as_deref().unwrap_or("N/A"));

    let user_id = auth_service::sign_up(state.store(), &request).await?;
    let token = state.sessions.start(user_id).await?;

    Ok(HttpResponse::Ok()
        .cookie(state.sessions.cookie(token))
        .json(SessionResponse {
            user_id: Some(user_id.to_hex()),
        }))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn log_in(
    state: web::Data<AppState>,
    request: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /login - email: {}", request.email.as_deref().unwrap_or("N/A"));

    let user_id = auth_service::log_in(state.store(), &request).await?;
    let token = state.sessions.start(user_id).await?;

    log::info!("✅ Login successful: {}", user_id);
    Ok(HttpResponse::Ok()
        .cookie(state.sessions.cookie(token))
        .json(SessionResponse {
            user_id: Some(user_id.to_hex()),
        }))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session ended")
    )
)]
pub async fn log_out(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    log::info!("👋 POST /logout");

    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.sessions.end(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(state.sessions.removal_cookie())
        .json(serde_json::json!({
            "userId": null,
            "message": "OK"
        })))
}
