use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::provider::IdentityProvider;
use crate::models::notice::Notice;
use crate::models::user::Session;

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const CONFIRM_EMAIL_NOTICE: &str = "Check your email for confirmation";

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    /// Both fields are required; nothing else is checked locally.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.email.trim().is_empty() {
            Some("Email")
        } else if self.password.is_empty() {
            Some("Password")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Leave the auth screen.
    Redirect {
        location: &'static str,
        session: Session,
    },
    /// Stay on the auth screen and show the notice.
    Stay(Notice),
}

/// Drives the sign-up / sign-in form against the identity provider.
///
/// Provider failures are shown to the user verbatim rather than dropped.
pub struct AuthScreen {
    provider: Arc<dyn IdentityProvider>,
}

impl AuthScreen {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Sign-up never leaves the auth screen; the account is usable only
    /// after the emailed confirmation link is followed.
    pub async fn sign_up(&self, credentials: &Credentials) -> Notice {
        if let Some(field) = credentials.missing_field() {
            return Notice::error(format!("{field} is required"));
        }
        match self.provider.sign_up(credentials).await {
            Ok(user) => {
                info!("Confirmation pending for user {}", user.id);
                Notice::info(CONFIRM_EMAIL_NOTICE)
            }
            Err(e) => {
                warn!("Sign-up failed for {}: {e}", credentials.email);
                Notice::error(e.to_string())
            }
        }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> AuthOutcome {
        if let Some(field) = credentials.missing_field() {
            return AuthOutcome::Stay(Notice::error(format!("{field} is required")));
        }
        match self.provider.sign_in(credentials).await {
            Ok(session) => AuthOutcome::Redirect {
                location: DASHBOARD_PATH,
                session,
            },
            Err(e) => {
                warn!("Sign-in failed for {}: {e}", credentials.email);
                AuthOutcome::Stay(Notice::error(e.to_string()))
            }
        }
    }
}
