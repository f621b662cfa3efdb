use async_trait::async_trait;

use crate::auth::session::CurrentUser;
use crate::models::application::{
    ApplicationFields, ApplicationStatus, JobApplication, NewApplication,
};
use crate::supabase::ProviderError;

/// The remote `job_applications` table.
///
/// Every call runs as `caller`, so the provider's row-level policies apply
/// on top of the owner filter in `list_for_owner`.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// All rows whose owner is `caller`, newest application date first.
    async fn list_for_owner(&self, caller: &CurrentUser)
        -> Result<Vec<JobApplication>, ProviderError>;

    async fn insert(
        &self,
        caller: &CurrentUser,
        application: &NewApplication,
    ) -> Result<JobApplication, ProviderError>;

    /// Replaces every editable column of row `id`.
    async fn update(
        &self,
        caller: &CurrentUser,
        id: i64,
        fields: &ApplicationFields,
    ) -> Result<(), ProviderError>;

    async fn update_status(
        &self,
        caller: &CurrentUser,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<(), ProviderError>;

    async fn delete(&self, caller: &CurrentUser, id: i64) -> Result<(), ProviderError>;
}
