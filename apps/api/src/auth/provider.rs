use async_trait::async_trait;

use crate::auth::screen::Credentials;
use crate::models::user::{AuthUser, Session};
use crate::supabase::ProviderError;

/// The identity provider seam.
///
/// Carried in `AppState` as `Arc<dyn IdentityProvider>`.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Requests account creation. The provider mails a confirmation link.
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser, ProviderError>;

    /// Exchanges credentials for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ProviderError>;

    /// Resolves the user behind an access token.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, ProviderError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;
}
