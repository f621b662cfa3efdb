//! Supabase client: the single point of entry for identity (GoTrue) and
//! table (PostgREST) calls.
//!
//! No other module talks to the provider over HTTP. Screens and handlers go
//! through the `IdentityProvider` and `ApplicationStore` traits, which this
//! client implements.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

pub mod auth;
pub mod rest;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status. `message` is the
    /// provider's own text and is shown to the user unchanged.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Provider returned no rows")]
    EmptyResponse,
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<serde_json::Value>,
}

/// Pulls the human-readable message out of a GoTrue or PostgREST error body.
/// Falls back to the raw body, then to the canonical status reason.
fn provider_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let from_error_field = parsed.error.and_then(|e| match e {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        });
        if let Some(message) = parsed
            .msg
            .or(parsed.message)
            .or(parsed.error_description)
            .or(from_error_field)
        {
            return message;
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: String, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Every request carries the project key; the bearer is the user's
    /// access token when one is given so row-level security applies.
    fn request(&self, method: Method, url: String, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ProviderError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = provider_message(status, &body);
        warn!("Supabase returned {}: {}", status, message);
        Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
