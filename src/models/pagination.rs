//! Pagination primitives shared across all list endpoints.
//!
//! Raw `page`/`limit` values arrive as untrusted query-string text and are
//! clamped rather than rejected: every possible input maps to a valid
//! page request, so list endpoints never fail on pagination input.

use serde::{Deserialize, Serialize};
use url::Url;

/// Pagination query parameters, kept as raw strings so a malformed value
/// (`page=abc`) degrades to the default instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRequest {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageRequest {
    /// Maximum items per page.
    pub const MAX_LIMIT: i64 = 100;

    /// Default items per page.
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Upper bound on `page`, chosen so `offset()` cannot overflow `i64`.
    pub const MAX_PAGE: i64 = i64::MAX / Self::MAX_LIMIT;

    fn parse(raw: Option<&str>) -> Option<i64> {
        raw?.trim().parse().ok()
    }

    pub fn page(&self) -> i64 {
        Self::parse(self.page.as_deref())
            .unwrap_or(1)
            .clamp(1, Self::MAX_PAGE)
    }

    pub fn limit(&self) -> i64 {
        Self::parse(self.limit.as_deref())
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        // page is capped at MAX_PAGE, so this stays within i64.
        (self.page() - 1) * self.limit()
    }
}

/// Navigational links accompanying a paged result. `next`/`prev` are null
/// at the respective boundary.
#[derive(Debug, Clone, Serialize)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub self_: String,
    pub first: String,
    pub last: String,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Summary block returned alongside every page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub links: PageLinks,
}

impl PaginationMeta {
    /// Build metadata for the current request. Each link is the request URL
    /// with only the `page` parameter replaced; `q`, `status`, `sort` and any
    /// other parameters carry over unchanged.
    pub fn build(request_url: &Url, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = ((total + limit - 1) / limit).max(1);
        let link = |target: i64| with_page(request_url, target);
        Self {
            total,
            page,
            limit,
            total_pages,
            links: PageLinks {
                self_: link(page),
                first: link(1),
                last: link(total_pages),
                next: (page < total_pages).then(|| link(page + 1)),
                prev: (page > 1).then(|| link(page - 1)),
            },
        }
    }
}

/// Paged result envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub meta: PaginationMeta,
    pub data: Vec<T>,
}

fn with_page(url: &Url, page: i64) -> String {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut out = url.clone();
    out.set_query(None);
    {
        let mut pairs = out.query_pairs_mut();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("page", &page.to_string());
    }
    out.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_defaults() {
        let p = PageRequest::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn page_request_clamps_out_of_range() {
        let p = PageRequest {
            page: Some("0".to_string()),
            limit: Some("1000".to_string()),
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 100);
    }

    #[test]
    fn page_request_absorbs_garbage() {
        let p = PageRequest {
            page: Some("abc".to_string()),
            limit: Some("-3".to_string()),
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 1);

        let p = PageRequest {
            page: Some("-7".to_string()),
            limit: Some("zz".to_string()),
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn page_request_huge_page_does_not_overflow() {
        let p = PageRequest {
            page: Some(i64::MAX.to_string()),
            limit: Some("100".to_string()),
        };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.page(), PageRequest::MAX_PAGE);
        assert!(p.offset() >= 0);

        let p = PageRequest {
            page: Some(format!("{}0", i64::MAX)),
            limit: None,
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn page_request_is_idempotent() {
        let p = PageRequest {
            page: Some(" 3 ".to_string()),
            limit: Some("20".to_string()),
        };
        assert_eq!(p.page(), p.page());
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn meta_total_pages_rounds_up() {
        let url = Url::parse("http://localhost/api/tasks").unwrap();
        let meta = PaginationMeta::build(&url, 25, 1, 10);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::build(&url, 0, 1, 10);
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn meta_boundary_links() {
        let url = Url::parse("http://localhost/api/tasks?page=3").unwrap();
        let meta = PaginationMeta::build(&url, 25, 3, 10);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.links.next.is_none());
        assert_eq!(
            meta.links.prev.as_deref(),
            Some("http://localhost/api/tasks?page=2")
        );

        let meta = PaginationMeta::build(&url, 25, 1, 10);
        assert!(meta.links.prev.is_none());
        assert_eq!(
            meta.links.next.as_deref(),
            Some("http://localhost/api/tasks?page=2")
        );
    }

    #[test]
    fn meta_links_preserve_other_params() {
        let url = Url::parse("http://localhost/api/tasks?q=urgent&status=open&page=2").unwrap();
        let meta = PaginationMeta::build(&url, 50, 2, 10);
        for link in [
            &meta.links.self_,
            &meta.links.first,
            &meta.links.last,
            meta.links.next.as_ref().unwrap(),
            meta.links.prev.as_ref().unwrap(),
        ] {
            assert!(link.contains("q=urgent"), "missing q in {link}");
            assert!(link.contains("status=open"), "missing status in {link}");
        }
        assert!(meta.links.last.contains("page=5"));
    }

    #[test]
    fn meta_serializes_null_at_boundary() {
        let url = Url::parse("http://localhost/api/tasks").unwrap();
        let meta = PaginationMeta::build(&url, 5, 1, 10);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["totalPages"], 1);
        assert!(json["links"]["next"].is_null());
        assert!(json["links"]["prev"].is_null());
        assert!(json["links"]["self"].is_string());
    }
}
