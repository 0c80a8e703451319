//! HTTP client for the Senate Lobbying Disclosure API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{EntityQuery, FilingQuery, FilterSet, Query},
    types::PageResponse,
    Error,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://lda.senate.gov/api/v1";
/// Root of the public, unauthenticated printable filing documents.
pub const DEFAULT_DOCUMENT_BASE_URL: &str = "https://lda.senate.gov/filings/public/filing";
/// Per-request timeout unless overridden with [`Client::with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Pause before retrying a request that timed out.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);
/// Number of extra attempts after a timeout. Other failures are never retried.
pub const MAX_TIMEOUT_RETRIES: usize = 1;

/// HTTP client for the Lobbying Disclosure REST API.
///
/// Owns one `reqwest::Client` and sends every API request with the
/// `Authorization: Token ...` header. A request that times out is retried
/// once after [`RETRY_DELAY`]; a second timeout surfaces as [`Error::Timeout`].
pub struct Client {
    http: reqwest::Client,
    token: String,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    document_base_url: String,
    timeout: Duration,
    retry_delay: Duration,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self, Error> {
        if token.trim().is_empty() {
            return Err(Error::MissingToken);
        }
        let http = reqwest::Client::builder().build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::RequestFailed
        })?;
        Ok(Self {
            http,
            token: token.trim().to_string(),
            base_api_url: base_url.to_string(),
            document_base_url: DEFAULT_DOCUMENT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pause before the single timeout retry.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Points filing document downloads at another host.
    pub fn with_document_base_url(mut self, document_base_url: &str) -> Self {
        self.document_base_url = document_base_url.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins the base URL and a relative path with exactly one slash between them.
    fn get_url(&self, path: &str) -> Result<Url, Error> {
        let joined = format!(
            "{}/{}",
            self.base_api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    /// URL of the printable document for a filing.
    pub fn document_url(&self, filing_uuid: &str) -> Result<Url, Error> {
        let joined = format!(
            "{}/{}/print/",
            self.document_base_url.trim_end_matches('/'),
            filing_uuid
        );
        Url::parse(&joined).map_err(|e| {
            tracing::error!("Invalid document URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    async fn attempt(
        &self,
        url: &Url,
        authenticated: bool,
    ) -> Result<(reqwest::StatusCode, Vec<u8>), reqwest::Error> {
        let mut request = self.http.get(url.clone()).timeout(self.timeout);
        if authenticated {
            request = request
                .header("authorization", format!("Token {}", self.token))
                .header("accept", "application/json");
        }
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?.to_vec();
        Ok((status, body))
    }

    /// Sends a GET, retrying once on timeout, and rejects non-success statuses.
    async fn execute(&self, url: &Url, authenticated: bool) -> Result<Vec<u8>, Error> {
        for attempt in 0..=MAX_TIMEOUT_RETRIES {
            if attempt > 0 {
                tracing::warn!(
                    "Request to {} timed out, retrying in {:.1}s (attempt {}/{})",
                    url,
                    self.retry_delay.as_secs_f64(),
                    attempt + 1,
                    MAX_TIMEOUT_RETRIES + 1
                );
                tokio::time::sleep(self.retry_delay).await;
            }
            tracing::debug!("GET {}", url);
            match self.attempt(url, authenticated).await {
                Ok((status, body)) => {
                    if !status.is_success() {
                        let text = String::from_utf8_lossy(&body).into_owned();
                        tracing::error!(
                            "Request failed with status {}: {}",
                            status,
                            truncate_body(&text)
                        );
                        return Err(Error::HttpStatus {
                            status: status.as_u16(),
                            body: text,
                        });
                    }
                    return Ok(body);
                }
                Err(e) if e.is_timeout() => {
                    tracing::debug!("Request to {} timed out: {}", url, e);
                }
                Err(e) => {
                    tracing::error!("Failed to get resource: {}", e);
                    return Err(Error::RequestFailed);
                }
            }
        }
        tracing::error!(
            "Request to {} timed out after {} attempts",
            url,
            MAX_TIMEOUT_RETRIES + 1
        );
        Err(Error::Timeout {
            url: url.to_string(),
            timeout: self.timeout,
        })
    }

    /// Issues an authenticated GET for `path` with `params` as the query string
    /// and parses the JSON body.
    pub async fn get<T>(&self, path: &str, params: &FilterSet) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let mut url = self.get_url(path)?;
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }
        let body = self.execute(&url, true).await?;
        serde_json::from_slice::<T>(&body).map_err(|e| {
            let text = String::from_utf8_lossy(&body);
            tracing::error!(
                "Failed to parse resource: {} | body: {}",
                e,
                truncate_body(&text)
            );
            Error::Deserialize(e.to_string())
        })
    }

    /// Searches client records by reported client name.
    pub async fn search_clients(&self, query: &EntityQuery) -> Result<PageResponse, Error> {
        self.search(query, crate::EntityKind::Client).await
    }

    /// Searches lobbyist records by lobbyist name.
    pub async fn search_lobbyists(&self, query: &EntityQuery) -> Result<PageResponse, Error> {
        self.search(query, crate::EntityKind::Lobbyist).await
    }

    async fn search(
        &self,
        query: &EntityQuery,
        kind: crate::EntityKind,
    ) -> Result<PageResponse, Error> {
        let query = query.clone().with_kind(kind);
        let params = query.filters()?;
        self.get(kind.path(), &params).await
    }

    /// Fetches one page of filings. The query is validated before any request is sent.
    pub async fn list_filings(&self, query: &FilingQuery) -> Result<PageResponse, Error> {
        let params = query.filters()?;
        self.get("filings/", &params).await
    }

    /// Downloads the printable document for a filing as raw bytes.
    pub async fn fetch_document(&self, filing_uuid: &str) -> Result<Vec<u8>, Error> {
        let url = self.document_url(filing_uuid)?;
        self.execute(&url, false).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
