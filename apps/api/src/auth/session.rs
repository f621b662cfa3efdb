use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::AuthUser;
use crate::state::AppState;
use crate::supabase::ProviderError;

/// The signed-in caller behind a request.
///
/// Extracting it is the dashboard's session guard: a missing token, or one
/// the provider refuses (401/403), turns into `AppError::SessionRequired`,
/// which tells the client to go back to the auth screen. Any other provider
/// failure is reported as such and the client keeps its session.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub user: AuthUser,
    pub access_token: String,
}

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

/// Reads `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers).ok_or(AppError::SessionRequired)?;
        match state.identity.get_user(token).await {
            Ok(user) => Ok(CurrentUser {
                user,
                access_token: token.to_string(),
            }),
            Err(e @ ProviderError::Api { status: 401 | 403, .. }) => {
                warn!("Session rejected: {e}");
                Err(AppError::SessionRequired)
            }
            Err(e) => {
                warn!("Session check failed: {e}");
                Err(e.into())
            }
        }
    }
}
