//! ClubHub API client
//!
//! A thin async client for the ClubHub club and activity API: users,
//! activities, clubs and school registration.
//!
//! # Example
//!
//! ```rust,no_run
//! use clubhub_client::{BearerToken, Client, Result};
//!
//! # async fn run() -> Result<()> {
//! let client = Client::new("https://api.clubhub.example")?;
//! let token = BearerToken::from("eyJhbGciOi...");
//!
//! let user = client.users().get("42", &token).await?;
//! let clubs = client.clubs().all().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Requests do not inspect the HTTP status by default: whatever JSON the
//! server returns is handed back. Set [`StatusPolicy::Strict`] to turn non-2xx
//! answers into [`Error::Api`]. School registration always checks the status.

use std::sync::Arc;

use reqwest::header;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

pub use error::*;
pub use types::*;

pub mod error;
pub mod services;
pub mod types;

/// Crate version, sent in the user agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Result type alias for ClubHub operations
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Configuration
// =============================================================================

/// How requests treat non-2xx responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Decode whatever the server sends, regardless of status
    #[default]
    Lenient,
    /// Fail with [`Error::Api`] on any non-2xx status
    Strict,
}

/// Configuration for the ClubHub client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub status_policy: StatusPolicy,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            status_policy: StatusPolicy::default(),
            user_agent: format!("clubhub-rust/{}", VERSION),
        }
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// ClubHub API client. Cheap to clone.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    base: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for the given base URL with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    /// Create a client with custom configuration
    pub fn with_config(mut config: ClientConfig) -> Result<Self> {
        let trimmed = config.base_url.trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(Error::Config("base URL is empty".to_string()));
        }
        let base = Url::parse(&trimmed)?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be used as a base URL", trimmed)));
        }
        config.base_url = trimmed;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|_| Error::Config("invalid user agent".to_string()))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            inner: Arc::new(ClientInner { config, base, http }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Base URL with trailing slashes removed
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Get the users service
    pub fn users(&self) -> services::UsersService {
        services::UsersService::new(self.clone())
    }

    /// Get the activities service
    pub fn activities(&self) -> services::ActivitiesService {
        services::ActivitiesService::new(self.clone())
    }

    /// Get the clubs service
    pub fn clubs(&self) -> services::ClubsService {
        services::ClubsService::new(self.clone())
    }

    /// Get the groups service
    pub fn groups(&self) -> services::GroupsService {
        services::GroupsService::new(self.clone())
    }

    /// GET `path` and decode the body as JSON.
    ///
    /// Under [`StatusPolicy::Lenient`] the status code is ignored.
    pub async fn fetch_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&BearerToken>,
    ) -> Result<T> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.fetch_segments(&segments, token).await
    }

    /// POST `body` to `path` and decode the JSON answer.
    ///
    /// Follows the client's [`StatusPolicy`], like reads do.
    pub async fn submit_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        body: RequestBody,
        token: Option<&BearerToken>,
    ) -> Result<T> {
        self.submit_with_policy(path, body, token, self.inner.config.status_policy)
            .await
    }

    /// Like [`Client::submit_resource`], but non-2xx always fails with [`Error::Api`]
    pub async fn submit_checked<T: DeserializeOwned>(
        &self,
        path: &str,
        body: RequestBody,
        token: Option<&BearerToken>,
    ) -> Result<T> {
        self.submit_with_policy(path, body, token, StatusPolicy::Strict)
            .await
    }

    async fn submit_with_policy<T: DeserializeOwned>(
        &self,
        path: &str,
        body: RequestBody,
        token: Option<&BearerToken>,
        policy: StatusPolicy,
    ) -> Result<T> {
        let url = self.endpoint(path.split('/').filter(|s| !s.is_empty()))?;
        debug!(method = "POST", %url, body = body.kind(), "sending request");

        let mut request = self.inner.http.post(url);
        request = match body {
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(form),
            RequestBody::Bytes {
                content,
                content_type,
            } => {
                let request = match content_type {
                    Some(ct) => request.header(header::CONTENT_TYPE, ct),
                    None => request,
                };
                request.body(content)
            }
        };
        request = authorize(request, token)?;

        let response = request.send().await?;
        decode(check_status(response, policy).await?).await
    }

    pub(crate) async fn fetch_segments<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&BearerToken>,
    ) -> Result<T> {
        let url = self.endpoint(segments.iter().copied())?;
        debug!(method = "GET", %url, "sending request");

        let request = authorize(self.inner.http.get(url), token)?;
        let response = request.send().await?;
        decode(check_status(response, self.inner.config.status_policy).await?).await
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.inner.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn authorize(
    request: reqwest::RequestBuilder,
    token: Option<&BearerToken>,
) -> Result<reqwest::RequestBuilder> {
    match token {
        Some(token) => {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token.expose()))
                .map_err(|_| Error::InvalidToken)?;
            value.set_sensitive(true);
            Ok(request.header(header::AUTHORIZATION, value))
        }
        None => Ok(request),
    }
}

/// Under `Strict`, turn a non-2xx response into [`Error::Api`]
async fn check_status(
    response: reqwest::Response,
    policy: StatusPolicy,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if policy == StatusPolicy::Strict {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status_code: status.as_u16(),
            body,
        });
    }
    debug!(status = status.as_u16(), "non-success status, decoding anyway");
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
