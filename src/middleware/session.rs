use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::models::SessionUser;
use crate::services::SESSION_COOKIE;
use crate::state::AppState;
use crate::utils::AppError;

/// Rejects requests without a live session and exposes the session's user
/// to handlers as `web::ReqData<SessionUser>`.
pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::InternalError("Application state missing".to_string()))?;

            let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
            let session = match token {
                Some(token) => state.sessions.resolve(&token).await?,
                None => None,
            };

            match session.and_then(|s| s.user_id) {
                Some(user_id) => {
                    req.extensions_mut().insert(SessionUser { user_id });
                    service.call(req).await
                }
                None => {
                    log::warn!("🔒 Unauthenticated request to {}", req.path());
                    Err(AppError::Unauthorized(
                        "Not authorized to access this route".to_string(),
                    )
                    .into())
                }
            }
        })
    }
}
