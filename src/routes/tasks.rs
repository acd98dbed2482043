//! Task routes: the paginated, filtered list endpoint.

use axum::{
    extract::{Query, State},
    http::Uri,
    Json,
};
use url::Url;

use crate::errors::AppError;
use crate::models::pagination::{PagedResponse, PageRequest, PaginationMeta};
use crate::models::task::Task;
use crate::services::task::{self as task_service, TaskFilters};
use crate::AppState;

/// GET /api/tasks — list tasks with search, filters, sorting, and pagination.
///
/// Pagination input is clamped, never rejected, so this endpoint only fails
/// on internal errors, which surface as a generic 500.
pub async fn list(
    State(state): State<AppState>,
    uri: Uri,
    Query(pagination): Query<PageRequest>,
    Query(filters): Query<TaskFilters>,
) -> Result<Json<PagedResponse<Task>>, AppError> {
    let (data, total) = task_service::list(&state.db, &filters, &pagination).await?;

    let request_url = absolute_request_url(&state.config.public_url, &uri)?;
    let meta = PaginationMeta::build(&request_url, total, pagination.page(), pagination.limit());

    Ok(Json(PagedResponse { meta, data }))
}

/// Rebase the request's path and query onto the configured public URL so
/// pagination links point at the externally visible address.
fn absolute_request_url(public_url: &str, uri: &Uri) -> Result<Url, AppError> {
    let base = Url::parse(public_url)
        .map_err(|e| AppError::Internal(format!("invalid PUBLIC_URL: {e}")))?;
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    base.join(path_and_query)
        .map_err(|e| AppError::Internal(format!("cannot build request URL: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_keeps_path_and_query() {
        let uri: Uri = "/api/tasks?q=demo&page=2".parse().unwrap();
        let url = absolute_request_url("http://api.example.com", &uri).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/api/tasks?q=demo&page=2");
    }

    #[test]
    fn request_url_rejects_bad_base() {
        let uri: Uri = "/api/tasks".parse().unwrap();
        assert!(absolute_request_url("not a url", &uri).is_err());
    }
}
