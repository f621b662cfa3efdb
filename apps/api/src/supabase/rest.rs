use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::session::CurrentUser;
use crate::dashboard::store::ApplicationStore;
use crate::models::application::{
    ApplicationFields, ApplicationStatus, JobApplication, NewApplication,
};
use crate::supabase::{ProviderError, SupabaseClient};

pub const APPLICATIONS_TABLE: &str = "job_applications";

fn id_filter(id: i64) -> [(&'static str, String); 1] {
    [("id", format!("eq.{id}"))]
}

/// A row that no longer decodes (a status label edited outside the service,
/// say) is logged and left out rather than failing the whole list.
fn decode_row(value: serde_json::Value) -> Option<JobApplication> {
    let id = value.get("id").cloned();
    match serde_json::from_value(value) {
        Ok(row) => Some(row),
        Err(e) => {
            warn!("Skipping undecodable application row {:?}: {}", id, e);
            None
        }
    }
}

#[async_trait]
impl ApplicationStore for SupabaseClient {
    async fn list_for_owner(
        &self,
        caller: &CurrentUser,
    ) -> Result<Vec<JobApplication>, ProviderError> {
        let request = self
            .request(
                Method::GET,
                self.rest_url(APPLICATIONS_TABLE),
                Some(&caller.access_token),
            )
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", caller.user.id)),
                ("order", "application_date.desc".to_string()),
            ]);
        let rows: Vec<serde_json::Value> = self.send(request).await?.json().await?;
        Ok(rows.into_iter().filter_map(decode_row).collect())
    }

    async fn insert(
        &self,
        caller: &CurrentUser,
        application: &NewApplication,
    ) -> Result<JobApplication, ProviderError> {
        let request = self
            .request(
                Method::POST,
                self.rest_url(APPLICATIONS_TABLE),
                Some(&caller.access_token),
            )
            .header("Prefer", "return=representation")
            .json(application);
        let rows: Vec<JobApplication> = self.send(request).await?.json().await?;
        let row = rows.into_iter().next().ok_or(ProviderError::EmptyResponse)?;
        info!("Created application {} for user {}", row.id, caller.user.id);
        Ok(row)
    }

    async fn update(
        &self,
        caller: &CurrentUser,
        id: i64,
        fields: &ApplicationFields,
    ) -> Result<(), ProviderError> {
        let request = self
            .request(
                Method::PATCH,
                self.rest_url(APPLICATIONS_TABLE),
                Some(&caller.access_token),
            )
            .query(&id_filter(id))
            .header("Prefer", "return=minimal")
            .json(fields);
        self.send(request).await?;
        info!("Updated application {id}");
        Ok(())
    }

    async fn update_status(
        &self,
        caller: &CurrentUser,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<(), ProviderError> {
        let request = self
            .request(
                Method::PATCH,
                self.rest_url(APPLICATIONS_TABLE),
                Some(&caller.access_token),
            )
            .query(&id_filter(id))
            .header("Prefer", "return=minimal")
            .json(&json!({ "status": status }));
        self.send(request).await?;
        info!("Set application {id} status to {status}");
        Ok(())
    }

    async fn delete(&self, caller: &CurrentUser, id: i64) -> Result<(), ProviderError> {
        let request = self
            .request(
                Method::DELETE,
                self.rest_url(APPLICATIONS_TABLE),
                Some(&caller.access_token),
            )
            .query(&id_filter(id));
        self.send(request).await?;
        info!("Deleted application {id}");
        Ok(())
    }
}
