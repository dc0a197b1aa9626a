use crate::{
    database::SessionStore,
    models::Session,
    utils::AppError,
};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "recipe.sid";

/// Signed cookie payload; the session itself lives in the store
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sid: String,
    iat: usize,
    exp: usize,
}

/// Creates, resolves and destroys server-side sessions
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    secret: String,
    ttl: Duration,
    secure_cookie: bool,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, secret: &str, ttl_hours: i64, secure_cookie: bool) -> Self {
        Self {
            store,
            secret: secret.to_string(),
            ttl: Duration::hours(ttl_hours),
            secure_cookie,
        }
    }

    fn sign(&self, session: &Session) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sid: session.id.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| AppError::InternalError(format!("Failed to sign session: {}", e)))
    }

    /// Session id carried by a token, if the signature and expiry check out
    fn session_id(&self, token: &str) -> Option<String> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims.sid)
        .map_err(|e| log::debug!("Rejected session token: {}", e))
        .ok()
    }

    /// Starts a session for `user_id` and returns the cookie token
    pub async fn start(&self, user_id: ObjectId) -> Result<String, AppError> {
        let expires_at = Utc::now() + self.ttl;
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: Some(user_id),
            expires_at: BsonDateTime::from_millis(expires_at.timestamp_millis()),
        };

        self.store.save_session(&session).await?;
        self.sign(&session)
    }

    /// Live session behind `token`, if any
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>, AppError> {
        let Some(sid) = self.session_id(token) else {
            return Ok(None);
        };

        match self.store.load_session(&sid).await? {
            Some(session) if session.is_expired() => {
                self.store.destroy_session(&sid).await?;
                Ok(None)
            }
            session => Ok(session),
        }
    }

    pub async fn end(&self, token: &str) -> Result<(), AppError> {
        if let Some(sid) = self.session_id(token) {
            self.store.destroy_session(&sid).await?;
        }
        Ok(())
    }

    pub fn cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .max_age(CookieDuration::seconds(self.ttl.num_seconds()))
            .finish();
        self.apply_site_policy(&mut cookie);
        cookie
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .finish();
        cookie.make_removal();
        self.apply_site_policy(&mut cookie);
        cookie
    }

    // Cross-site frontends need SameSite=None, which browsers only accept with Secure
    fn apply_site_policy(&self, cookie: &mut Cookie<'static>) {
        if self.secure_cookie {
            cookie.set_same_site(SameSite::None);
            cookie.set_secure(true);
        } else {
            cookie.set_same_site(SameSite::Strict);
        }
    }
}
