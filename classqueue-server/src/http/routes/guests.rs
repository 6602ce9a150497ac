//! Queue entry (guest) endpoints
//!
//! Entries are scoped to a page by name. Page-scoped listings are in
//! arrival order; the unscoped listing shows the newest entries first.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use classqueue_core::{GuestContact, PageName, ValidationError};

use super::pages::resolve_page;
use crate::db::Entry;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidQuery};
use crate::http::server::AppState;

/// Create entry request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub page_name: Option<String>,
}

/// Listing query params
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListGuestsParams {
    pub page_name: Option<String>,
}

/// Deletion query params
#[derive(Deserialize, Default)]
pub struct DeleteGuestParams {
    pub id: Option<String>,
}

/// Entry response
#[derive(Serialize)]
pub struct GuestResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub page_id: Option<Uuid>,
    pub entered_at: String,
}

impl From<Entry> for GuestResponse {
    fn from(e: Entry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            page_id: e.page_id,
            entered_at: e.entered_at.to_rfc3339(),
        }
    }
}

/// Deletion confirmation
#[derive(Serialize)]
pub struct DeleteGuestResponse {
    pub success: bool,
    pub message: &'static str,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// GET /api/guest?pageName= - list entries, optionally for one page
async fn list_guests(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListGuestsParams>,
) -> Result<Json<Vec<GuestResponse>>, ApiError> {
    let entries = match non_empty(params.page_name) {
        Some(raw) => {
            let name = PageName::new(&raw)?;
            let page = resolve_page(state.store.as_ref(), &name).await?;
            state.store.list_entries_for_page(page.id).await?
        }
        None => state.store.list_entries().await?,
    };

    Ok(Json(entries.into_iter().map(GuestResponse::from).collect()))
}

/// POST /api/guest - join a page's queue
async fn create_guest(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateGuestRequest>,
) -> Result<(StatusCode, Json<GuestResponse>), ApiError> {
    let contact = GuestContact::new(req.name.as_deref(), req.email.as_deref())?;

    let page_id = match non_empty(req.page_name) {
        Some(raw) => {
            let name = PageName::new(&raw)?;
            Some(resolve_page(state.store.as_ref(), &name).await?.id)
        }
        None if state.require_page => {
            return Err(ValidationError::Missing {
                fields: &["page name"],
            }
            .into());
        }
        None => None,
    };

    let entry = state.store.insert_entry(Entry::new(contact, page_id)).await?;
    tracing::info!(entry_id = %entry.id, page_id = ?entry.page_id, "guest added");

    Ok((StatusCode::CREATED, Json(GuestResponse::from(entry))))
}

/// DELETE /api/guest?id= - remove an entry
///
/// Succeeds whether or not the entry still existed.
async fn delete_guest(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<DeleteGuestParams>,
) -> Result<Json<DeleteGuestResponse>, ApiError> {
    let raw = non_empty(params.id).ok_or(ValidationError::Missing {
        fields: &["guest id"],
    })?;
    let id = Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "guest id",
        reason: "invalid UUID format",
    })?;

    let removed = state.store.delete_entry(id).await?;
    tracing::info!(entry_id = %id, removed, "guest delete");

    Ok(Json(DeleteGuestResponse {
        success: true,
        message: "Guest removed from the queue.",
    }))
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed {
        method,
        allow: "GET, POST, DELETE",
    }
}

/// Guest routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/guest",
        get(list_guests)
            .post(create_guest)
            .delete(delete_guest)
            .fallback(method_not_allowed),
    )
}
