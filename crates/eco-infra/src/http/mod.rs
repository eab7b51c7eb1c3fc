//! HTTP gateways for the registration and sign-in endpoints.

mod auth;
mod registration;

pub use auth::HttpAuthGateway;
pub use registration::HttpRegistrationGateway;

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use eco_core::config::ApiConfig;
use eco_core::ports::GatewayError;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shared JSON client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(api: &ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(api.timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Posts `body` as JSON; any 2xx status is success.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), GatewayError> {
        let url = self.url(path);
        debug!(url = %url, "posting to signup api");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?
            .check_success()
            .await?;
        debug!(url = %url, status = response.status().as_u16(), "signup api accepted request");
        Ok(())
    }
}

fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pulls a human-readable reason out of an error body, if there is one.
fn rejection_message(text: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(text).ok()?;
    body.message
        .or(body.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[async_trait]
trait ResponseExt {
    async fn check_success(self) -> Result<Self, GatewayError>
    where
        Self: Sized;
}

#[async_trait]
impl ResponseExt for Response {
    async fn check_success(self) -> Result<Self, GatewayError> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        let text = self.text().await.unwrap_or_default();
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            message: rejection_message(&text),
        })
    }
}
