//! Task service: filtered, sorted, paginated list retrieval.

use serde::Deserialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::pagination::PageRequest;
use crate::models::task::Task;
use crate::services::filter::Filter;

/// Columns searched by the free-text `q` parameter.
const SEARCH_FIELDS: &[&str] = &["title", "description"];

/// Default ordering: newest first.
const DEFAULT_ORDER: &str = "created_at DESC";

/// Filters accepted by the task list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilters {
    /// Free-text search across title and description.
    pub q: Option<String>,
    pub status: Option<String>,
    pub sheet_id: Option<String>,
    /// Sort key, optionally `-` prefixed for descending (e.g. `-createdAt`).
    pub sort: Option<String>,
}

impl TaskFilters {
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .contains_any(SEARCH_FIELDS, self.q.as_deref())
            .equals("status", self.status.as_deref())
            .equals("sheet_id::text", self.sheet_id.as_deref())
    }
}

/// Map a client sort key onto an ORDER BY fragment. Only known columns are
/// accepted; anything else falls back to the default so client input never
/// reaches the SQL text.
fn order_clause(sort: Option<&str>) -> String {
    let raw = sort.unwrap_or("-createdAt").trim();
    let (key, descending) = match raw.strip_prefix('-') {
        Some(key) => (key, true),
        None => (raw, false),
    };
    let column = match key {
        "createdAt" => "created_at",
        "updatedAt" => "updated_at",
        "title" => "title",
        "status" => "status",
        _ => return DEFAULT_ORDER.to_string(),
    };
    format!("{column} {}", if descending { "DESC" } else { "ASC" })
}

/// List tasks matching `filters`, one page at a time.
///
/// The count and the page slice run concurrently against the same filter.
/// They are not wrapped in a transaction, so under concurrent writes `total`
/// can disagree with the observed page contents; callers tolerate that.
pub async fn list(
    pool: &PgPool,
    filters: &TaskFilters,
    pagination: &PageRequest,
) -> Result<(Vec<Task>, i64), AppError> {
    let filter = filters.to_filter();
    let (where_clause, binds) = filter.to_sql(1);
    let order = order_clause(filters.sort.as_deref());

    let count_sql = format!("SELECT COUNT(*) FROM tasks {where_clause}");
    let data_sql = format!(
        "SELECT id, sheet_id, title, description, status, created_at, updated_at \
         FROM tasks {where_clause} \
         ORDER BY {order}, id \
         LIMIT {} OFFSET {}",
        pagination.limit(),
        pagination.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut data_query = sqlx::query_as::<_, Task>(&data_sql);
    for value in &binds {
        count_query = count_query.bind(value);
        data_query = data_query.bind(value);
    }

    let (total, items) =
        tokio::try_join!(count_query.fetch_one(pool), data_query.fetch_all(pool))?;

    Ok((items, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_clause_defaults_to_newest_first() {
        assert_eq!(order_clause(None), "created_at DESC");
        assert_eq!(order_clause(Some("-createdAt")), "created_at DESC");
    }

    #[test]
    fn order_clause_maps_known_keys() {
        assert_eq!(order_clause(Some("title")), "title ASC");
        assert_eq!(order_clause(Some("-updatedAt")), "updated_at DESC");
        assert_eq!(order_clause(Some("status")), "status ASC");
    }

    #[test]
    fn order_clause_rejects_unknown_keys() {
        assert_eq!(order_clause(Some("created_at; DROP TABLE tasks")), "created_at DESC");
        assert_eq!(order_clause(Some("-evil")), "created_at DESC");
        assert_eq!(order_clause(Some("")), "created_at DESC");
    }

    #[test]
    fn filters_compose_search_and_exact_fields() {
        let filters = TaskFilters {
            q: Some(" deploy ".to_string()),
            status: Some("todo".to_string()),
            sheet_id: None,
            sort: None,
        };
        let (clause, binds) = filters.to_filter().to_sql(1);
        assert_eq!(
            clause,
            "WHERE (title ~* $1 OR description ~* $1) AND status = $2"
        );
        assert_eq!(binds, vec!["deploy".to_string(), "todo".to_string()]);
    }

    #[test]
    fn absent_filters_match_everything() {
        let filters = TaskFilters::default();
        assert!(filters.to_filter().is_empty());
    }
}
