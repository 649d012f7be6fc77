use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use crate::{
    clock::eat_now,
    config::{AppConfig, TokenMode},
    db::OrmConn,
    domain::validate_password,
    dto::auth::{
        Claims, ForgotPasswordRequest, ForgotPasswordResponse, ResetPasswordRequest,
        SigninRequest, SigninResponse, SignupRequest,
    },
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::{User, UserSummary},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// How long a password reset token stays valid.
pub fn reset_token_ttl() -> Duration {
    Duration::hours(1)
}

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@jb-rice-pro.com";
const DEFAULT_ADMIN_PHONE: &str = "123456789";
const DEFAULT_ADMIN_PASSWORD: &str = "Admin123!";

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<ApiResponse<User>> {
    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_string();
    let phone = payload.phone.trim().to_string();
    let SignupRequest {
        password,
        confirm_password,
        ..
    } = payload;

    if [&username, &email, &phone, &password, &confirm_password]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(AppError::BadRequest("All fields are required".into()));
    }
    if password != confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".into()));
    }
    validate_password(&password)?;

    let taken = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .count(&state.orm)
        .await?;
    if taken > 0 {
        return Err(AppError::Conflict("Username already exists".into()));
    }
    let taken = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .count(&state.orm)
        .await?;
    if taken > 0 {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let user = UserActive {
        id: NotSet,
        username: Set(username),
        email: Set(email),
        phone: Set(phone),
        password_hash: Set(hash_password(&password)?),
        reset_token: Set(None),
        reset_token_expiry: Set(None),
        created_at: Set(eat_now()),
    }
    .insert(&state.orm)
    .await
    .map_err(uniqueness_conflict)?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok(ApiResponse::success(
        "User registered successfully",
        user_from_entity(user),
        Some(Meta::empty()),
    ))
}

pub async fn signin(
    state: &AppState,
    payload: SigninRequest,
) -> AppResult<ApiResponse<SigninResponse>> {
    let login = payload.username_or_email.trim();
    if login.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username/email and password are required".into(),
        ));
    }

    let user = Users::find()
        .filter(
            Condition::any()
                .add(UserCol::Username.eq(login))
                .add(UserCol::Email.eq(login)),
        )
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) if verify_password(&payload.password, &u.password_hash) => u,
        _ => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    let token = issue_token(&state.config, user.id)?;

    tracing::info!(user_id = user.id, "user signed in");

    Ok(ApiResponse::success(
        "Login successful",
        SigninResponse {
            user: UserSummary {
                id: user.id,
                username: user.username,
                email: user.email,
            },
            token,
        },
        Some(Meta::empty()),
    ))
}

pub async fn forgot_password(
    state: &AppState,
    payload: ForgotPasswordRequest,
) -> AppResult<ApiResponse<ForgotPasswordResponse>> {
    let email = payload.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".into()));
    }

    let user = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Email"))?;

    let token = generate_reset_token();
    let expires_at = eat_now() + reset_token_ttl();

    let user_id = user.id;
    let mut active: UserActive = user.into();
    active.reset_token = Set(Some(token.clone()));
    active.reset_token_expiry = Set(Some(expires_at));
    active.update(&state.orm).await?;

    // Mail delivery is not wired up; the token goes back to the caller when allowed.
    tracing::info!(user_id, expires_at = %expires_at, "password reset issued");

    Ok(ApiResponse::success(
        "Password reset link sent to your email",
        ForgotPasswordResponse {
            reset_token: state.config.expose_reset_token.then_some(token),
            expires_at,
        },
        Some(Meta::empty()),
    ))
}

pub async fn reset_password(
    state: &AppState,
    payload: ResetPasswordRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let token = payload.token.trim();
    if token.is_empty() || payload.new_password.is_empty() || payload.confirm_password.is_empty() {
        return Err(AppError::BadRequest("All fields are required".into()));
    }
    if payload.new_password != payload.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".into()));
    }
    validate_password(&payload.new_password)?;

    let user = Users::find()
        .filter(UserCol::ResetToken.eq(token))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid reset token".into()))?;

    match user.reset_token_expiry {
        Some(expiry) if expiry >= eat_now() => {}
        _ => return Err(AppError::BadRequest("Reset token has expired".into())),
    }

    let user_id = user.id;
    let mut active: UserActive = user.into();
    active.password_hash = Set(hash_password(&payload.new_password)?);
    active.reset_token = Set(None);
    active.reset_token_expiry = Set(None);
    active.update(&state.orm).await?;

    tracing::info!(user_id, "password reset applied");

    Ok(ApiResponse::success(
        "Password reset successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Creates the bootstrap admin account when the users table is empty.
/// Returns the new user's id, or `None` when users already exist.
pub async fn ensure_default_admin(orm: &OrmConn) -> AppResult<Option<i32>> {
    if Users::find().count(orm).await? > 0 {
        return Ok(None);
    }

    let admin = UserActive {
        id: NotSet,
        username: Set(DEFAULT_ADMIN_USERNAME.into()),
        email: Set(DEFAULT_ADMIN_EMAIL.into()),
        phone: Set(DEFAULT_ADMIN_PHONE.into()),
        password_hash: Set(hash_password(DEFAULT_ADMIN_PASSWORD)?),
        reset_token: Set(None),
        reset_token_expiry: Set(None),
        created_at: Set(eat_now()),
    }
    .insert(orm)
    .await?;

    tracing::info!(user_id = admin.id, "default admin user created");
    Ok(Some(admin.id))
}

pub fn issue_token(config: &AppConfig, user_id: i32) -> AppResult<String> {
    match config.token_mode {
        TokenMode::UserId => Ok(user_id.to_string()),
        TokenMode::Jwt => {
            let secret = config
                .jwt_secret
                .as_deref()
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

            let expiration = Utc::now()
                .checked_add_signed(Duration::hours(24))
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

            let claims = Claims {
                sub: user_id.to_string(),
                exp: expiration.timestamp() as usize,
            };

            encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(secret.as_bytes()),
            )
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
        }
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// 64 hex characters from two random v4 UUIDs; safe to embed in URLs.
fn generate_reset_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn uniqueness_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Username or email already exists".into())
        }
        _ => AppError::OrmError(err),
    }
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        phone: model.phone,
        created_at: model.created_at,
    }
}
