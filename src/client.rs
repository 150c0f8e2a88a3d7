// src/client.rs
//! Facilitator discovery client: one authenticated GET, decoded into a listing.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode, Url};
use tracing::{debug, info, warn};

use crate::auth::{ApiKeyAuthenticator, Authenticator};
use crate::config::{Credentials, FacilitatorConfig};
use crate::error::{DiscoveryError, Result};
use crate::types::{ListResponse, ResourceListing};

pub const LIST_RESOURCES_PATH: &str = "discovery/resources";

/// Longest slice of an error body carried into error messages.
const ERROR_BODY_SNIPPET: usize = 200;

/// Anything that can produce the current resource listing.
#[async_trait]
pub trait ResourceDiscovery: Send + Sync {
    async fn list_resources(&self) -> Result<ResourceListing>;
    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct DiscoveryClient {
    http: reqwest::Client,
    endpoint: Url,
    auth: Arc<dyn Authenticator>,
}

impl std::fmt::Debug for DiscoveryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl DiscoveryClient {
    /// Validates credentials and settings. Performs no network I/O.
    pub fn new(credentials: Credentials, config: FacilitatorConfig) -> Result<Self> {
        if config.timeout.is_zero() {
            return Err(DiscoveryError::config("facilitator timeout must be non-zero"));
        }
        let endpoint = list_endpoint(&config.base_url)?;
        let auth = ApiKeyAuthenticator::new(&credentials)?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DiscoveryError::config(format!("building http client: {e}")))?;

        debug!(endpoint = %endpoint, timeout_ms = config.timeout.as_millis() as u64, "discovery client ready");

        Ok(Self {
            http,
            endpoint,
            auth: Arc::new(auth),
        })
    }

    /// Swap the header strategy (e.g. a per-request JWT signer).
    pub fn with_authenticator(mut self, auth: Arc<dyn Authenticator>) -> Self {
        self.auth = auth;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the full listing. Either the whole listing or an error; never partial.
    pub async fn list_resources(&self) -> Result<ResourceListing> {
        let t0 = Instant::now();
        counter!("discovery_requests_total").increment(1);

        let out = self.fetch().await;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("discovery_request_ms").record(ms);
        match &out {
            Ok(listing) => {
                counter!("discovery_items_total").increment(listing.len() as u64);
                info!(endpoint = %self.endpoint, items = listing.len(), elapsed_ms = ms as u64, "listed resources");
            }
            Err(e) => {
                counter!("discovery_errors_total", "kind" => e.kind()).increment(1);
                warn!(endpoint = %self.endpoint, kind = e.kind(), error = %e, "resource listing failed");
            }
        }
        out
    }

    async fn fetch(&self) -> Result<ResourceListing> {
        let headers = self.auth.headers(&Method::GET, &self.endpoint)?;

        let resp = self
            .http
            .get(self.endpoint.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .headers(headers)
            .send()
            .await
            .map_err(|e| DiscoveryError::from_reqwest("facilitator request", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DiscoveryError::from_reqwest("reading facilitator response", e))?;

        check_status(status, &body)?;
        decode_listing(&body)
    }
}

#[async_trait]
impl ResourceDiscovery for DiscoveryClient {
    async fn list_resources(&self) -> Result<ResourceListing> {
        DiscoveryClient::list_resources(self).await
    }

    fn name(&self) -> &'static str {
        "facilitator"
    }
}

/// `{base}/discovery/resources`, tolerating a trailing slash on the base.
/// A query on the base is kept; a fragment is dropped.
fn list_endpoint(base_url: &str) -> Result<Url> {
    let base = base_url.trim();
    let mut url = Url::parse(base)
        .map_err(|e| DiscoveryError::config(format!("invalid facilitator url {base:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DiscoveryError::config(format!(
            "facilitator url must be http(s), got {base:?}"
        )));
    }
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| DiscoveryError::config(format!("facilitator url cannot be a base: {base:?}")))?
        .pop_if_empty()
        .extend(LIST_RESOURCES_PATH.split('/'));
    Ok(url)
}

fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let message = snippet(body, status);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DiscoveryError::Authentication {
            status: status.as_u16(),
            message,
        }),
        _ => Err(DiscoveryError::Transport {
            status: Some(status.as_u16()),
            message: format!("facilitator returned HTTP {}: {message}", status.as_u16()),
            source: None,
        }),
    }
}

fn snippet(body: &str, status: StatusCode) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status.canonical_reason().unwrap_or("no response body").to_string();
    }
    match trimmed.char_indices().nth(ERROR_BODY_SNIPPET) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

fn decode_listing(body: &str) -> Result<ResourceListing> {
    let resp: ListResponse = serde_json::from_str(body)?;
    if let Some(p) = resp.pagination {
        debug!(
            limit = p.limit,
            offset = p.offset,
            total = p.total,
            version = ?resp.x402_version,
            "facilitator pagination"
        );
    }
    Ok(ResourceListing::new(resp.items))
}
