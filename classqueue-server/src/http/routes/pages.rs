//! Page (classroom) endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use classqueue_core::{PageName, ValidationError};

use crate::db::{Page, QueueStore};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;

/// Create page request
#[derive(Deserialize)]
pub struct CreatePageRequest {
    pub name: Option<String>,
}

/// Page response
#[derive(Serialize)]
pub struct PageResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: String,
}

impl From<Page> for PageResponse {
    fn from(p: Page) -> Self {
        Self {
            id: p.id,
            name: p.name,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Page entry in the listing
#[derive(Serialize)]
pub struct PageSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize)]
pub struct PageListResponse {
    pub pages: Vec<PageSummary>,
}

/// Resolve a page name to its record, 404 when absent.
pub(crate) async fn resolve_page(store: &dyn QueueStore, name: &PageName) -> Result<Page, ApiError> {
    tracing::debug!(page = name.as_str(), "resolving page");

    store
        .find_page_by_name(name.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "page",
            id: name.as_str().to_owned(),
        })
}

/// GET /api/page - list all pages
async fn list_pages(State(state): State<Arc<AppState>>) -> Result<Json<PageListResponse>, ApiError> {
    let pages = state.store.list_pages().await?;

    Ok(Json(PageListResponse {
        pages: pages
            .into_iter()
            .map(|p| PageSummary { id: p.id, name: p.name })
            .collect(),
    }))
}

/// POST /api/page - create a new page
async fn create_page(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreatePageRequest>,
) -> Result<(StatusCode, Json<PageResponse>), ApiError> {
    let raw = req
        .name
        .filter(|n| !n.is_empty())
        .ok_or(ValidationError::Missing {
            fields: &["page name"],
        })?;
    let name = PageName::new(&raw)?;

    let page = state.store.insert_page(Page::new(name)).await?;
    tracing::info!(page_id = %page.id, name = %page.name, "page created");

    Ok((StatusCode::CREATED, Json(PageResponse::from(page))))
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed {
        method,
        allow: "GET, POST",
    }
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/page",
        get(list_pages)
            .post(create_page)
            .fallback(method_not_allowed),
    )
}
