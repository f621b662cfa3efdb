//! Axum route handlers for the dashboard.
//!
//! Each request passes the session guard (`CurrentUser`), mounts the
//! `Dashboard`, drives one action, and answers with the re-loaded list. A
//! reload that fails after a write leaves the mounted list in the answer.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::auth::session::CurrentUser;
use crate::dashboard::form::ApplicationForm;
use crate::dashboard::screen::{Confirmation, Dashboard, DashboardView, EditModal};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Json<DashboardView> {
    let dashboard = Dashboard::mount(state.store.clone(), current).await;
    Json(dashboard.view())
}

/// POST /api/v1/applications
pub async fn handle_create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(form): Json<ApplicationForm>,
) -> Result<Json<DashboardView>, AppError> {
    let mut dashboard = Dashboard::mount(state.store.clone(), current).await;
    *dashboard.form_mut() = form;
    dashboard.submit_new().await?;
    Ok(Json(dashboard.view()))
}

/// GET /api/v1/applications/:id/edit
pub async fn handle_open_edit(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<EditModal>, AppError> {
    let mut dashboard = Dashboard::mount(state.store.clone(), current).await;
    let modal = dashboard.open_edit(id)?.clone();
    Ok(Json(modal))
}

/// PUT /api/v1/applications/:id
pub async fn handle_save_edit(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(form): Json<ApplicationForm>,
) -> Result<Json<DashboardView>, AppError> {
    let mut dashboard = Dashboard::mount(state.store.clone(), current).await;
    dashboard.open_edit(id)?;
    if let Some(edit_form) = dashboard.edit_form_mut() {
        *edit_form = form;
    }
    dashboard.save_edit().await?;
    Ok(Json(dashboard.view()))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_quick_status(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<DashboardView>, AppError> {
    let mut dashboard = Dashboard::mount(state.store.clone(), current).await;
    dashboard.quick_update_status(id, &update.status).await?;
    Ok(Json(dashboard.view()))
}

/// DELETE /api/v1/applications/:id?confirm=true
pub async fn handle_delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DashboardView>, AppError> {
    let confirmation = Confirmation::from(params.confirm);
    if confirmation == Confirmation::Declined {
        return Err(AppError::ConfirmationRequired);
    }
    let mut dashboard = Dashboard::mount(state.store.clone(), current).await;
    dashboard.delete(id, confirmation).await?;
    Ok(Json(dashboard.view()))
}
