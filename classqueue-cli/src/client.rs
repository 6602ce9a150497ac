//! HTTP client for the classqueue API
//!
//! Thin typed wrapper over reqwest. Timestamps come back as RFC 3339
//! strings and are parsed into `DateTime<Utc>`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use classqueue_core::QueueConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// API Response Types (matching server)
// ============================================================================

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Page {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PageSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize, Debug)]
struct PageListResponse {
    pages: Vec<PageSummary>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Guest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub page_id: Option<Uuid>,
    pub entered_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateGuestRequest<'a> {
    name: &'a str,
    email: &'a str,
    page_name: &'a str,
}

/// Client-side failure talking to the API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Server answered with an error status
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },

    /// Request never completed or the body was unreadable
    #[error("failed to reach classqueue API: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Errors caused by the submitted data (4xx), as opposed to server trouble
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if status.is_client_error())
    }

    /// Message to show the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Http(e) => e.to_string(),
        }
    }
}

// ============================================================================
// Endpoint Resolution
// ============================================================================

/// Priority: flag/env > config.toml > default
pub fn resolve_endpoint(flag: Option<String>) -> Result<String> {
    let endpoint = match flag {
        Some(ep) => ep,
        None => QueueConfig::load()?.endpoint(),
    };

    Ok(endpoint.trim_end_matches('/').to_string())
}

// ============================================================================
// Client
// ============================================================================

pub struct ApiClient {
    http: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    pub async fn create_page(&self, name: &str) -> Result<Page, ClientError> {
        let response = self
            .http
            .post(self.url("/api/page"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;

        handle_response(response).await
    }

    pub async fn list_pages(&self) -> Result<Vec<PageSummary>, ClientError> {
        let response = self.http.get(self.url("/api/page")).send().await?;
        let list: PageListResponse = handle_response(response).await?;
        Ok(list.pages)
    }

    /// Entries of one page (arrival order), or all entries (newest first).
    pub async fn list_guests(&self, page: Option<&str>) -> Result<Vec<Guest>, ClientError> {
        let mut request = self.http.get(self.url("/api/guest"));
        if let Some(page) = page {
            request = request.query(&[("pageName", page)]);
        }

        handle_response(request.send().await?).await
    }

    pub async fn add_guest(&self, page: &str, name: &str, email: &str) -> Result<Guest, ClientError> {
        let response = self
            .http
            .post(self.url("/api/guest"))
            .json(&CreateGuestRequest {
                name,
                email,
                page_name: page,
            })
            .send()
            .await?;

        handle_response(response).await
    }

    pub async fn remove_guest(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url("/api/guest"))
            .query(&[("id", id.to_string())])
            .send()
            .await?;

        let _: serde_json::Value = handle_response(response).await?;
        Ok(())
    }
}

// ============================================================================
// HTTP Client Helpers
// ============================================================================

async fn handle_response<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = match serde_json::from_str::<ErrorResponse>(&error_text) {
        Ok(error_resp) => error_resp.error,
        Err(_) => error_text,
    };

    Err(ClientError::Api { status, message })
}
