//! Dashboard screen state: the signed-in user's application list plus the
//! add form and edit modal that mutate it.
//!
//! Every mutating action issues exactly one remote call and, on success,
//! re-loads the whole list. Failures leave local form state untouched and
//! set an error notice carrying the provider's message.

#![allow(dead_code)]

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::session::CurrentUser;
use crate::dashboard::form::{ApplicationForm, FormError};
use crate::dashboard::store::ApplicationStore;
use crate::models::application::{ApplicationStatus, JobApplication, NewApplication};
use crate::models::notice::Notice;
use crate::supabase::ProviderError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Application {0} not found")]
    NotFound(i64),

    #[error("No application is being edited")]
    NoEditInProgress,
}

/// Answer to the "really delete?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// The open edit modal: which row, and the form pre-filled from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditModal {
    pub id: i64,
    pub form: ApplicationForm,
}

/// What the dashboard renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub loading: bool,
    pub applications: Vec<JobApplication>,
}

pub struct Dashboard {
    store: Arc<dyn ApplicationStore>,
    user: CurrentUser,
    applications: Vec<JobApplication>,
    loading: bool,
    form: ApplicationForm,
    edit: Option<EditModal>,
    notice: Option<Notice>,
}

impl Dashboard {
    /// A dashboard that has passed the session guard but not loaded yet.
    pub fn new(store: Arc<dyn ApplicationStore>, user: CurrentUser) -> Self {
        Self {
            store,
            user,
            applications: Vec::new(),
            loading: true,
            form: ApplicationForm::default(),
            edit: None,
            notice: None,
        }
    }

    /// Builds the dashboard and performs the initial load.
    pub async fn mount(store: Arc<dyn ApplicationStore>, user: CurrentUser) -> Self {
        let mut dashboard = Self::new(store, user);
        dashboard.load().await;
        dashboard
    }

    /// Replaces the list with the owner's rows. On failure the previous list
    /// stays and no notice is raised; loading is cleared either way.
    pub async fn load(&mut self) {
        match self.store.list_for_owner(&self.user).await {
            Ok(rows) => {
                debug!("Loaded {} applications for {}", rows.len(), self.user.id());
                self.applications = rows;
            }
            Err(e) => warn!("Failed to load applications for {}: {e}", self.user.id()),
        }
        self.loading = false;
    }

    pub fn applications(&self) -> &[JobApplication] {
        &self.applications
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> &ApplicationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ApplicationForm {
        &mut self.form
    }

    pub fn edit_modal(&self) -> Option<&EditModal> {
        self.edit.as_ref()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut ApplicationForm> {
        self.edit.as_mut().map(|modal| &mut modal.form)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            loading: self.loading,
            applications: self.applications.clone(),
        }
    }

    fn fail(&mut self, err: DashboardError) -> DashboardError {
        self.notice = Some(Notice::error(err.to_string()));
        err
    }

    /// Submits the add form. Clears it and reloads on success.
    pub async fn submit_new(&mut self) -> Result<JobApplication, DashboardError> {
        let fields = self.form.validate().map_err(|e| self.fail(e.into()))?;
        let payload = NewApplication {
            user_id: self.user.id(),
            fields,
        };
        let result = self.store.insert(&self.user, &payload).await;
        let created = result.map_err(|e| self.fail(e.into()))?;
        self.form.clear();
        self.load().await;
        Ok(created)
    }

    /// Status-only update from a free-text prompt. A blank answer does
    /// nothing and returns `Ok(false)`.
    pub async fn quick_update_status(
        &mut self,
        id: i64,
        input: &str,
    ) -> Result<bool, DashboardError> {
        if input.trim().is_empty() {
            return Ok(false);
        }
        let status: ApplicationStatus = input
            .parse()
            .map_err(|e| self.fail(FormError::from(e).into()))?;
        let result = self.store.update_status(&self.user, id, status).await;
        result.map_err(|e| self.fail(e.into()))?;
        self.load().await;
        Ok(true)
    }

    /// Opens the edit modal pre-filled from a row in the current list.
    pub fn open_edit(&mut self, id: i64) -> Result<&EditModal, DashboardError> {
        let application = self
            .applications
            .iter()
            .find(|a| a.id == id)
            .ok_or(DashboardError::NotFound(id))?;
        let modal = EditModal {
            id,
            form: ApplicationForm::from(&application.fields()),
        };
        Ok(&*self.edit.insert(modal))
    }

    /// Closes the modal without touching the store.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Replaces every editable field of the row being edited. The modal
    /// stays open if validation or the remote call fails.
    pub async fn save_edit(&mut self) -> Result<(), DashboardError> {
        let Some(modal) = self.edit.as_ref() else {
            return Err(self.fail(DashboardError::NoEditInProgress));
        };
        let id = modal.id;
        let fields = modal.form.validate().map_err(|e| self.fail(e.into()))?;
        let result = self.store.update(&self.user, id, &fields).await;
        result.map_err(|e| self.fail(e.into()))?;
        self.edit = None;
        self.load().await;
        Ok(())
    }

    /// Deletes a row once the user has confirmed. Returns whether a delete
    /// was issued.
    pub async fn delete(
        &mut self,
        id: i64,
        confirmation: Confirmation,
    ) -> Result<bool, DashboardError> {
        if confirmation == Confirmation::Declined {
            return Ok(false);
        }
        let result = self.store.delete(&self.user, id).await;
        result.map_err(|e| self.fail(e.into()))?;
        self.load().await;
        Ok(true)
    }
}
