use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use sea_orm::EntityTrait;

use crate::{
    config::{AppConfig, TokenMode},
    dto::auth::Claims,
    entity::Users,
    error::AppError,
    state::AppState,
};

/// The caller, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
}

fn unauthenticated() -> AppError {
    AppError::Unauthorized("User not authenticated".into())
}

/// Maps a bearer token to a user id according to the configured [`TokenMode`].
///
/// In `UserId` mode the token is the decimal id itself and carries no proof of identity.
pub fn decode_token(config: &AppConfig, token: &str) -> Result<i32, AppError> {
    let subject = match config.token_mode {
        TokenMode::UserId => token.to_string(),
        TokenMode::Jwt => {
            let secret = config
                .jwt_secret
                .as_deref()
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;
            decode::<Claims>(
                token,
                &DecodingKey::from_secret(secret.as_bytes()),
                &Validation::default(),
            )
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?
            .claims
            .sub
        }
    };

    subject.trim().parse::<i32>().map_err(|_| unauthenticated())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(unauthenticated)?;

        let auth_str = auth_header.to_str().map_err(|_| unauthenticated())?;
        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(unauthenticated)?;

        let user_id = decode_token(&state.config, token)?;

        // Unknown ids are rejected here rather than surfacing later as foreign-key failures.
        if Users::find_by_id(user_id).one(&state.orm).await?.is_none() {
            return Err(unauthenticated());
        }

        Ok(AuthUser { user_id })
    }
}
