//! Waitlist CRUD handlers.
//!
//! Each handler is a stateless, one-shot operation against the repository
//! held in [`AppState`]; the only suspension point is the storage call.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use waitline_core::queue::{queue_stats, sort_by_check_in, QueueEntry};
use waitline_core::storage::RepositoryError;

use crate::{
    handlers::ApiError,
    models::{CreateEntry, DeleteResponse, ListQuery, ListResponse, UpdateEntry},
    state::AppState,
};

/// Default number of entries a list call returns when `limit` is omitted.
const DEFAULT_LIST_LIMIT: usize = 50;

/// Add a party to the waitlist (POST /queue).
pub async fn create_entry(
    State(state): State<AppState>,
    body: Result<Json<CreateEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<QueueEntry>), ApiError> {
    let Json(payload) = body
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))?;

    let entry = payload.into_entry(Utc::now(), &mut rand::rng())?;

    state.queue_repo.put_entry(&entry).await?;

    tracing::info!(
        entry_id = %entry.id,
        party_size = entry.party_size,
        estimated_wait = entry.estimated_wait_time,
        "Added party to waitlist"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// List waitlist entries (GET /queue).
///
/// Optional `status` filter uses the status index; without it the whole
/// table is scanned, bounded by `limit`. Either way the response is sorted
/// by check-in time ascending.
pub async fn list_entries(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(query) = query
        .map_err(|e| ApiError::bad_request(format!("Invalid query parameters: {e}")))?;

    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let mut items = match query.status {
        Some(status) => state.queue_repo.query_by_status(status, limit).await?,
        None => state.queue_repo.scan_entries(limit).await?,
    };

    sort_by_check_in(&mut items);
    let stats = queue_stats(&items);

    Ok(Json(ListResponse {
        count: items.len(),
        stats,
        items,
    }))
}

/// Update a waitlist entry (PUT /queue/{id}).
///
/// Applies only the allow-listed fields. The current entry is fetched first
/// so the status transition can be validated; an unknown id is a 404.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateEntry>, JsonRejection>,
) -> Result<Json<QueueEntry>, ApiError> {
    let Json(payload) = body
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))?;

    let current = state
        .queue_repo
        .get_entry(id)
        .await?
        .ok_or_else(|| ApiError::from(RepositoryError::NotFound { id: id.to_string() }))?;

    let changes = payload.into_changes(current.status, Utc::now())?;

    let updated = state.queue_repo.update_entry(id, &changes).await?;

    tracing::info!(entry_id = %id, status = %updated.status, "Updated waitlist entry");

    Ok(Json(updated))
}

/// Remove a waitlist entry (DELETE /queue/{id}).
///
/// Unconditional: deleting an id that never existed still reports success.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.queue_repo.delete_entry(id).await?;

    tracing::info!(entry_id = %id, "Removed waitlist entry");

    Ok(Json(DeleteResponse { success: true, id }))
}

/// Fallback for requests no route matched.
///
/// Bare OPTIONS requests (without preflight headers, so the CORS layer
/// passes them through) get a 200; everything else is a 404 echoing the
/// offending method and path.
pub async fn route_not_found(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    ApiError::not_found(format!("Route not found: {method} {}", uri.path())).into_response()
}
