use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dashboard::screen::DashboardError;
use crate::supabase::ProviderError;

pub const AUTH_PATH: &str = "/auth";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// No usable session; the client should go back to the auth screen.
    #[error("Session required")]
    SessionRequired,

    #[error("Sign-in failed: {0}")]
    AuthFailed(String),

    #[error("Deletion must be confirmed")]
    ConfirmationRequired,

    /// The provider rejected the call. `message` is passed through verbatim.
    #[error("Provider error: {message}")]
    Provider { status: Option<u16>, message: String },
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Provider {
            status: e.status(),
            message: e.to_string(),
        }
    }
}

impl From<DashboardError> for AppError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::Form(form) => AppError::Validation(form.to_string()),
            DashboardError::Provider(provider) => provider.into(),
            DashboardError::NotFound(id) => {
                AppError::NotFound(format!("Application {id} not found"))
            }
            DashboardError::NoEditInProgress => {
                AppError::Validation("No application is being edited".to_string())
            }
        }
    }
}

/// Provider client errors keep their status; anything else is a bad gateway.
fn provider_status(status: Option<u16>) -> StatusCode {
    status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .filter(|s| s.is_client_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SessionRequired => {
                let body = Json(json!({
                    "error": {
                        "code": "SESSION_REQUIRED",
                        "message": "Authentication required"
                    },
                    "redirect": AUTH_PATH
                }));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }
            AppError::AuthFailed(msg) => (StatusCode::UNAUTHORIZED, "AUTH_FAILED", msg.clone()),
            AppError::ConfirmationRequired => (
                StatusCode::BAD_REQUEST,
                "CONFIRMATION_REQUIRED",
                "Deletion must be confirmed".to_string(),
            ),
            AppError::Provider { status, message } => {
                tracing::warn!("Provider error ({status:?}): {message}");
                (provider_status(*status), "PROVIDER_ERROR", message.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
