use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::provider::IdentityProvider;
use crate::auth::screen::Credentials;
use crate::models::user::{AuthUser, Session};
use crate::supabase::{ProviderError, SupabaseClient};

/// GoTrue answers sign-up with a bare user when email confirmation is on,
/// and with a full session when the project auto-confirms.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser, ProviderError> {
        let request = self
            .request(Method::POST, self.auth_url("signup"), None)
            .json(credentials);
        let response: SignUpResponse = self.send(request).await?.json().await?;
        let user = match response {
            SignUpResponse::Session(session) => session.user,
            SignUpResponse::User(user) => user,
        };
        info!("Sign-up requested for user {}", user.id);
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ProviderError> {
        let request = self
            .request(Method::POST, self.auth_url("token"), None)
            .query(&[("grant_type", "password")])
            .json(credentials);
        let session: Session = self.send(request).await?.json().await?;
        info!("User {} signed in", session.user.id);
        Ok(session)
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, ProviderError> {
        let request = self.request(Method::GET, self.auth_url("user"), Some(access_token));
        let user: AuthUser = self.send(request).await?.json().await?;
        debug!("Resolved session for user {}", user.id);
        Ok(user)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let request = self.request(Method::POST, self.auth_url("logout"), Some(access_token));
        self.send(request).await?;
        Ok(())
    }
}
