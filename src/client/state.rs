//! URL-synced list state.
//!
//! The URL query string is the source of truth on first load; afterwards
//! state changes rewrite the managed parameters in place. Values equal to
//! their documented defaults are omitted from the URL so addresses stay
//! shareable and short.

use url::Url;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 4;
const MAX_PAGE_SIZE: u64 = 100;

/// Page position and filter for one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Exact-match filter (`type` parameter), e.g. a member kind.
    pub filter: Option<String>,
    pub page: u64,
    pub page_size: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Seed state from the URL, clamping the same way the server does but
    /// with the client's default page size.
    pub fn from_url(url: &Url) -> Self {
        let mut query = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "page" => {
                    query.page = value
                        .trim()
                        .parse()
                        .ok()
                        .filter(|p| *p >= 1)
                        .unwrap_or(DEFAULT_PAGE);
                }
                "limit" => {
                    query.page_size = value
                        .trim()
                        .parse::<u64>()
                        .map(|s| s.clamp(1, MAX_PAGE_SIZE))
                        .unwrap_or(DEFAULT_PAGE_SIZE);
                }
                "type" => {
                    if !value.is_empty() {
                        query.filter = Some(value.into_owned());
                    }
                }
                _ => {}
            }
        }
        query
    }

    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Changing the page size restarts from the first page.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.page = DEFAULT_PAGE;
    }

    /// Changing the filter restarts from the first page.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|f| !f.is_empty());
        self.page = DEFAULT_PAGE;
    }

    /// Rewrite the managed parameters in the URL, preserving everything
    /// else. Defaults are omitted entirely.
    pub fn sync_to_url(&self, url: &mut Url) {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !matches!(k.as_ref(), "page" | "limit" | "type"))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &kept {
                pairs.append_pair(k, v);
            }
            if let Some(filter) = &self.filter {
                pairs.append_pair("type", filter);
            }
            if self.page != DEFAULT_PAGE {
                pairs.append_pair("page", &self.page.to_string());
            }
            if self.page_size != DEFAULT_PAGE_SIZE {
                pairs.append_pair("limit", &self.page_size.to_string());
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
    }

    /// Stable cache key so fetches for different pages or filters never
    /// overwrite each other's slot.
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.filter.as_deref().unwrap_or("all"),
            self.page,
            self.page_size
        )
    }

    /// Explicit query pairs for a list request. Unlike the URL sync, the
    /// request always carries page and limit.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if let Some(filter) = &self.filter {
            query.push(("type".to_string(), filter.clone()));
        }
        query
    }
}
