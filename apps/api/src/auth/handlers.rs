//! Axum route handlers for the auth screen.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::auth::screen::{AuthOutcome, AuthScreen, Credentials};
use crate::auth::session::CurrentUser;
use crate::errors::AppError;
use crate::models::user::{AuthUser, Session};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub redirect: &'static str,
    pub session: Session,
}

/// POST /api/v1/auth/signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SignUpResponse>, AppError> {
    let notice = AuthScreen::new(state.identity.clone())
        .sign_up(&credentials)
        .await;
    if notice.is_error() {
        return Err(AppError::Validation(notice.message));
    }
    Ok(Json(SignUpResponse {
        message: notice.message,
    }))
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SignInResponse>, AppError> {
    match AuthScreen::new(state.identity.clone())
        .sign_in(&credentials)
        .await
    {
        AuthOutcome::Redirect { location, session } => Ok(Json(SignInResponse {
            redirect: location,
            session,
        })),
        AuthOutcome::Stay(notice) => Err(AppError::AuthFailed(notice.message)),
    }
}

/// GET /api/v1/auth/user
pub async fn handle_current_user(current: CurrentUser) -> Json<AuthUser> {
    Json(current.user)
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    state.identity.sign_out(&current.access_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
