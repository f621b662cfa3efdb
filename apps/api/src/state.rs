use std::sync::Arc;

use crate::auth::provider::IdentityProvider;
use crate::dashboard::store::ApplicationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    /// The `job_applications` table. Same Supabase client as `identity` in production.
    pub store: Arc<dyn ApplicationStore>,
}
