//! Listing, lookup and status endpoints shared by every secondary collection.
//!
//! One generic router is mounted per document type; the repository is pulled
//! out of `AppState` through `FromRef`.

use axum::{
    extract::{FromRef, Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use domain::models::{StoredDocument, UpdateStatusRequest};
use persistence::repositories::{CollectionRepository, ListQuery};
use shared::pagination::Page;

use crate::app::AppState;
use crate::error::ApiError;

/// Query parameters for a collection listing.
#[derive(Debug, Deserialize, Validate)]
pub struct ListParams {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        ListQuery {
            limit: params.limit,
            cursor: params.cursor.filter(|c| !c.is_empty()),
        }
    }
}

/// Routes for the collection of `T`, to be nested under its path.
pub fn router<T>() -> Router<AppState>
where
    T: StoredDocument,
    CollectionRepository<T>: FromRef<AppState>,
{
    Router::new()
        .route("/", get(list::<T>))
        .route("/:id", get(get_one::<T>))
        .route("/:id/status", put(update_status::<T>))
}

/// GET /api/v1/<collection>?limit=&cursor=
async fn list<T: StoredDocument>(
    State(repo): State<CollectionRepository<T>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<T>>, ApiError> {
    params.validate()?;
    let page = repo.list(&params.into()).await?;
    Ok(Json(page))
}

/// GET /api/v1/<collection>/:id
async fn get_one<T: StoredDocument>(
    State(repo): State<CollectionRepository<T>>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    repo.get(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("{} '{}' not found", repo.collection(), id)))
}

/// PUT /api/v1/<collection>/:id/status
async fn update_status<T: StoredDocument>(
    State(repo): State<CollectionRepository<T>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest<T::Status>>,
) -> Result<Json<T>, ApiError> {
    let mut item = repo
        .get(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("{} '{}' not found", repo.collection(), id)))?;

    if !repo.update_status(&id, request.status).await {
        return Err(ApiError::ServiceUnavailable(format!(
            "Status of {} '{}' could not be updated",
            repo.collection(),
            id
        )));
    }

    item.set_status(request.status, Utc::now());
    Ok(Json(item))
}
