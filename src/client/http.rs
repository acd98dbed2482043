//! Authenticated HTTP client for list endpoints.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::client::normalize::{self, NormalizedList};
use crate::client::state::ListQuery;

/// Credential capability injected into the client so nothing here reaches
/// into ambient storage for tokens.
pub trait TokenProvider: Send + Sync {
    /// Current bearer token, if any. Called per request so rotation is
    /// picked up without rebuilding the client.
    fn token(&self) -> Option<String>;
}

/// Fixed token (or none). Mainly for tests and one-off tools.
pub struct StaticTokenProvider(pub Option<String>);

impl TokenProvider for StaticTokenProvider {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),
}

/// Client for a taskboard-style API. No automatic retries: a failed request
/// is terminal for the current refresh cycle.
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(base: &str, tokens: Arc<dyn TokenProvider>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base: Url::parse(base)?,
            http,
            tokens,
        })
    }

    /// GET a JSON document. Non-2xx statuses surface as
    /// [`ClientError::Status`]; error bodies go no further than a truncated
    /// log line.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, ClientError> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut request = self.http.get(url.clone());
        if let Some(token) = self.tokens.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                url = %url,
                body = %truncate_body(&body),
                "list request failed"
            );
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Fetch one page of a list endpoint and normalize whatever shape comes
    /// back.
    pub async fn list(&self, path: &str, query: &ListQuery) -> Result<NormalizedList, ClientError> {
        let raw = self.get_json(path, &query.to_query()).await?;
        Ok(normalize::normalize(raw))
    }
}

const MAX_LOGGED_BODY: usize = 256;

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_LOGGED_BODY {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < MAX_LOGGED_BODY)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…", &body[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_provider_returns_its_token() {
        let provider = StaticTokenProvider(Some("abc123".to_string()));
        assert_eq!(provider.token().as_deref(), Some("abc123"));
        assert!(StaticTokenProvider(None).token().is_none());
    }

    #[test]
    fn client_rejects_invalid_base_url() {
        let tokens: Arc<dyn TokenProvider> = Arc::new(StaticTokenProvider(None));
        assert!(matches!(
            ApiClient::new("not a url", tokens),
            Err(ClientError::Url(_))
        ));
    }

    #[test]
    fn truncate_body_is_utf8_safe() {
        let short = "ok";
        assert_eq!(truncate_body(short), "ok");

        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with('…'));
        assert!(truncated.chars().count() < 300);
    }
}
