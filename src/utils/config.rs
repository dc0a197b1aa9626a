use std::env;

const DEFAULT_SESSION_SECRET: &str = "dev-session-secret-change-me";

/// Runtime configuration, read from the environment after `.env` is loaded
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongo_url: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub cors_origin: String,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_secret = lookup("SESSION_SECRET").unwrap_or_else(|| {
            log::warn!("⚠️  SESSION_SECRET not set, using development default");
            DEFAULT_SESSION_SECRET.to_string()
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3001),
            mongo_url: lookup("MONGO_URL")
                .unwrap_or_else(|| "mongodb://localhost/recipe-app".to_string()),
            session_secret,
            session_ttl_hours: parse_or(&lookup, "SESSION_TTL_HOURS", 12),
            cors_origin: lookup("CORS_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", false),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("⚠️  Invalid {} value '{}', using default: {}", key, raw, default);
            default
        }),
        None => default,
    }
}
