mod common;

use chrono::Duration;
use rice_trade_api::{
    clock::eat_now,
    dto::auth::{ForgotPasswordRequest, ResetPasswordRequest, SigninRequest, SignupRequest},
    entity::{Users, users},
    error::AppError,
    services::auth_service,
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use common::{PASSWORD, signup, test_state};

fn signup_request(username: &str, email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        username: username.into(),
        email: email.into(),
        phone: "+254700000000".into(),
        password: password.into(),
        confirm_password: password.into(),
    }
}

async fn signin(state: &AppState, login: &str, password: &str) -> Result<String, AppError> {
    let resp = auth_service::signin(
        state,
        SigninRequest {
            username_or_email: login.into(),
            password: password.into(),
        },
    )
    .await?;
    Ok(resp.data.expect("signin data").token)
}

async fn request_reset(state: &AppState, email: &str) -> anyhow::Result<String> {
    let resp = auth_service::forgot_password(
        state,
        ForgotPasswordRequest {
            email: email.into(),
        },
    )
    .await?;
    Ok(resp
        .data
        .and_then(|d| d.reset_token)
        .expect("token is exposed in tests"))
}

fn reset(token: &str, password: &str) -> ResetPasswordRequest {
    ResetPasswordRequest {
        token: token.into(),
        new_password: password.into(),
        confirm_password: password.into(),
    }
}

#[tokio::test]
async fn signup_enforces_password_rules_and_uniqueness() -> anyhow::Result<()> {
    let state = test_state().await?;

    let err = auth_service::signup(&state, signup_request("mary", "mary@example.com", "abc123"))
        .await
        .expect_err("no special character");
    assert_eq!(
        err.to_string(),
        "Password must contain at least one special character"
    );

    let err = auth_service::signup(&state, signup_request("mary", "mary@example.com", "a1!"))
        .await
        .expect_err("too short");
    assert!(err.to_string().contains("at least 6 characters"));

    let mut mismatched = signup_request("mary", "mary@example.com", PASSWORD);
    mismatched.confirm_password = "Other0rd!".into();
    let err = auth_service::signup(&state, mismatched)
        .await
        .expect_err("confirmation differs");
    assert_eq!(err.to_string(), "Passwords do not match");

    let err = auth_service::signup(&state, signup_request("", "mary@example.com", PASSWORD))
        .await
        .expect_err("missing username");
    assert_eq!(err.to_string(), "All fields are required");

    let created = auth_service::signup(&state, signup_request("mary", "mary@example.com", PASSWORD))
        .await?
        .data
        .expect("user");
    assert_eq!(created.username, "mary");

    let err = auth_service::signup(&state, signup_request("mary", "other@example.com", PASSWORD))
        .await
        .expect_err("duplicate username");
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.to_string(), "Username already exists");

    let err = auth_service::signup(&state, signup_request("maria", "mary@example.com", PASSWORD))
        .await
        .expect_err("duplicate email");
    assert_eq!(err.to_string(), "Email already exists");

    Ok(())
}

#[tokio::test]
async fn signin_accepts_username_or_email() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = signup(&state, "peter").await?;

    let token = signin(&state, "peter", PASSWORD).await?;
    assert_eq!(token, user.user_id.to_string());
    signin(&state, "peter@example.com", PASSWORD).await?;

    let err = signin(&state, "peter", "Wrong0rd!")
        .await
        .expect_err("wrong password");
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.to_string(), "Invalid credentials");

    let err = signin(&state, "nobody", PASSWORD)
        .await
        .expect_err("unknown user");
    assert_eq!(err.to_string(), "Invalid credentials");

    Ok(())
}

#[tokio::test]
async fn password_reset_round_trip() -> anyhow::Result<()> {
    let state = test_state().await?;
    signup(&state, "grace").await?;

    let err = request_reset(&state, "missing@example.com")
        .await
        .expect_err("unknown email")
        .downcast::<AppError>()?;
    assert!(matches!(err, AppError::NotFound(_)));

    let token = request_reset(&state, "grace@example.com").await?;
    assert_eq!(token.len(), 64);

    let err = auth_service::reset_password(&state, reset("not-a-token", "N3w!pass"))
        .await
        .expect_err("unknown token");
    assert_eq!(err.to_string(), "Invalid reset token");

    auth_service::reset_password(&state, reset(&token, "N3w!pass")).await?;
    signin(&state, "grace", "N3w!pass").await?;
    assert!(signin(&state, "grace", PASSWORD).await.is_err());

    // Tokens are single use.
    let err = auth_service::reset_password(&state, reset(&token, "An0ther!"))
        .await
        .expect_err("token already consumed");
    assert_eq!(err.to_string(), "Invalid reset token");

    Ok(())
}

#[tokio::test]
async fn expired_reset_token_is_rejected() -> anyhow::Result<()> {
    let state = test_state().await?;
    signup(&state, "ivy").await?;
    let token = request_reset(&state, "ivy@example.com").await?;

    let user = Users::find()
        .filter(users::Column::Email.eq("ivy@example.com"))
        .one(&state.orm)
        .await?
        .expect("user row");
    let mut active: users::ActiveModel = user.into();
    active.reset_token_expiry = Set(Some(eat_now() - Duration::minutes(1)));
    active.update(&state.orm).await?;

    let err = auth_service::reset_password(&state, reset(&token, "N3w!pass"))
        .await
        .expect_err("expired");
    assert_eq!(err.to_string(), "Reset token has expired");

    // The old password still works.
    signin(&state, "ivy", PASSWORD).await?;

    Ok(())
}

#[tokio::test]
async fn default_admin_is_created_once() -> anyhow::Result<()> {
    let state = test_state().await?;

    let id = auth_service::ensure_default_admin(&state.orm).await?;
    assert!(id.is_some());
    assert_eq!(auth_service::ensure_default_admin(&state.orm).await?, None);

    signin(&state, "admin", "Admin123!").await?;
    signin(&state, "admin@jb-rice-pro.com", "Admin123!").await?;

    Ok(())
}
