// src/auth.rs
//! Request authentication seam. The client asks an `Authenticator` for headers
//! right before each request, so signed schemes (per-request JWT) can slot in.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, Url};

use crate::config::Credentials;
use crate::error::{DiscoveryError, Result};

pub const HEADER_API_KEY_ID: &str = "x-api-key-id";

pub trait Authenticator: Send + Sync {
    /// Headers to attach to a request for `method url`.
    fn headers(&self, method: &Method, url: &Url) -> Result<HeaderMap>;
}

/// Sends the key id and secret as static headers, validated once at build time.
pub struct ApiKeyAuthenticator {
    headers: HeaderMap,
}

impl ApiKeyAuthenticator {
    /// Fails with a configuration error when either part is not a valid header value.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credentials.key_secret()))
            .map_err(|_| DiscoveryError::config("API key secret contains invalid header characters"))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let key_id = HeaderValue::from_str(credentials.key_id())
            .map_err(|_| DiscoveryError::config("API key id contains invalid header characters"))?;
        headers.insert(HeaderName::from_static(HEADER_API_KEY_ID), key_id);

        Ok(Self { headers })
    }
}

impl Authenticator for ApiKeyAuthenticator {
    fn headers(&self, _method: &Method, _url: &Url) -> Result<HeaderMap> {
        Ok(self.headers.clone())
    }
}
