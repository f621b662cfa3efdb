pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::dashboard::handlers as dashboard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth screen
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/signin", post(auth::handle_sign_in))
        .route("/api/v1/auth/user", get(auth::handle_current_user))
        .route("/api/v1/auth/signout", post(auth::handle_sign_out))
        // Dashboard screen
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route("/api/v1/applications", post(dashboard::handle_create))
        .route(
            "/api/v1/applications/:id",
            put(dashboard::handle_save_edit).delete(dashboard::handle_delete),
        )
        .route(
            "/api/v1/applications/:id/edit",
            get(dashboard::handle_open_edit),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(dashboard::handle_quick_status),
        )
        .with_state(state)
}
