use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use sitesearch_logging::{search_debug, search_warn};
use url::Url;

use crate::{SearchError, SearchHit, SearchQuery};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Host the `/search` endpoint lives under.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, SearchError>;
}

/// Resolves `{base}/search`, keeping any path prefix of `base`.
pub fn endpoint_url(base_url: &str) -> Result<Url, SearchError> {
    let invalid = |message: String| SearchError::InvalidEndpoint {
        url: base_url.to_string(),
        message,
    };
    let mut base = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("url cannot be a base".to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("search").map_err(|err| invalid(err.to_string()))
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    settings: ClientSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestSearchClient {
    pub fn new(settings: ClientSettings) -> Result<Self, SearchError> {
        let endpoint = endpoint_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::Transport(err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, SearchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(SearchError::TooLarge { max_bytes });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| SearchError::Transport(err.to_string()))?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(SearchError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl SearchClient for ReqwestSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, SearchError> {
        let body =
            serde_json::to_vec(query).map_err(|err| SearchError::Decode(err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| SearchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            search_warn!("search endpoint answered {}", status);
            return Err(SearchError::Service {
                status: status.as_u16(),
            });
        }

        let bytes = self.read_body(response).await?;
        let hits: Vec<SearchHit> =
            serde_json::from_slice(&bytes).map_err(|err| SearchError::Decode(err.to_string()))?;
        search_debug!("search returned {} hits ({} bytes)", hits.len(), bytes.len());
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_search_to_host() {
        let url = endpoint_url("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/search");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let url = endpoint_url("https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/search");
        let url = endpoint_url("https://api.example.com/v1/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/search");
    }

    #[test]
    fn endpoint_rejects_garbage() {
        let err = endpoint_url("not a url").unwrap_err();
        assert!(matches!(err, SearchError::InvalidEndpoint { .. }));
        let err = endpoint_url("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, SearchError::InvalidEndpoint { .. }));
    }
}
