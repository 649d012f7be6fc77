use std::env;

use anyhow::{Context, bail};

/// How bearer tokens issued at sign-in are shaped and verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    /// The token is the user's numeric id, unsigned. Anyone who knows an id can act as that user.
    UserId,
    /// HS256 JWT with the user id in `sub`.
    Jwt,
}

impl TokenMode {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user-id" | "user_id" | "legacy" => Ok(Self::UserId),
            "jwt" => Ok(Self::Jwt),
            other => bail!("unknown AUTH_TOKEN_MODE {other:?}, expected user-id or jwt"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub token_mode: TokenMode,
    pub jwt_secret: Option<String>,
    pub expose_reset_token: bool,
    pub seed_default_admin: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://rice_trade.db?mode=rwc".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let token_mode = match env::var("AUTH_TOKEN_MODE") {
            Ok(raw) => TokenMode::parse(&raw)?,
            Err(_) => TokenMode::UserId,
        };
        let jwt_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        if token_mode == TokenMode::Jwt && jwt_secret.is_none() {
            bail!("JWT_SECRET must be set when AUTH_TOKEN_MODE=jwt");
        }
        let expose_reset_token = flag("EXPOSE_RESET_TOKEN", true)?;
        let seed_default_admin = flag("SEED_DEFAULT_ADMIN", true)?;

        Ok(Self {
            database_url,
            host,
            port,
            token_mode,
            jwt_secret,
            expose_reset_token,
            seed_default_admin,
        })
    }

    /// Configuration used by tests: in-memory SQLite and legacy user-id tokens.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            token_mode: TokenMode::UserId,
            jwt_secret: None,
            expose_reset_token: true,
            seed_default_admin: false,
        }
    }
}

fn flag(name: &str, default: bool) -> anyhow::Result<bool> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(anyhow::anyhow!("invalid boolean {raw:?}")).with_context(|| format!("reading {name}")),
        },
        Err(_) => Ok(default),
    }
}
