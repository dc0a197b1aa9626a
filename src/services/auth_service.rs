use crate::{
    database::Store,
    models::{Credentials, User},
    utils::AppError,
};
use bcrypt::{hash, verify};
use mongodb::bson::oid::ObjectId;

/// bcrypt work factor for stored passwords
pub const PASSWORD_COST: u32 = 12;

const MISSING_CREDENTIALS: &str = "Please provide a username and password to log in.";
const INVALID_CREDENTIALS: &str = "Incorrect email or password.";

fn required(credentials: &Credentials) -> Result<(String, String), AppError> {
    let email = credentials.email.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let password = credentials.password.as_deref().filter(|s| !s.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => Ok((email.to_string(), password.to_string())),
        _ => Err(AppError::BadRequest(MISSING_CREDENTIALS.to_string())),
    }
}

async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, PASSWORD_COST))
        .await
        .map_err(|e| AppError::InternalError(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

async fn verify_password(password: String, stored: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(password, &stored))
        .await
        .map_err(|e| AppError::InternalError(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {}", e)))
}

// User registration
pub async fn sign_up(store: &dyn Store, credentials: &Credentials) -> Result<ObjectId, AppError> {
    let (email, password) = required(credentials)?;
    let already_exists =
        || AppError::NotFound("This user already exists in the system.".to_string());

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(already_exists());
    }

    let user = User::new(&email, &hash_password(password).await?);

    // The unique email index settles concurrent signups
    if !store.insert_user(&user).await? {
        return Err(already_exists());
    }

    log::info!("✅ User registered successfully: {}", email);
    Ok(user.id)
}

// User login
pub async fn log_in(store: &dyn Store, credentials: &Credentials) -> Result<ObjectId, AppError> {
    let (email, password) = required(credentials)?;

    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::BadRequest(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(password, user.password.clone()).await? {
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
    }

    Ok(user.id)
}
