//! Connection settings for the Translator Text API.

use std::{fmt, time::Duration};

use reqwest::Url;

use crate::error::Error;

/// Global endpoint of the Translator Text API.
pub const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

/// API version sent with every request.
pub const API_VERSION: &str = "3.0";

/// Endpoint, credentials and HTTP client tuning for one translation service.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL; must be an absolute `https` URL.
    pub endpoint: String,
    /// Subscription key, sent as `Ocp-Apim-Subscription-Key`.
    pub key: String,
    /// Subscription region, sent as `Ocp-Apim-Subscription-Region`.
    pub region: String,
    pub request_timeout: Duration,
    /// How long pooled connections may stay idle. `None` keeps them forever.
    pub pool_idle_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            key: String::new(),
            region: String::new(),
            request_timeout: Duration::from_secs(30),
            pool_idle_timeout: Some(Duration::from_secs(90)),
        }
    }
}

// Keeps the subscription key out of logs.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &if self.key.is_empty() { "" } else { "<redacted>" })
            .field("region", &self.region)
            .field("request_timeout", &self.request_timeout)
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .finish()
    }
}

impl ServiceConfig {
    /// Creates a config for the global endpoint with the given credentials.
    pub fn new(key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            region: region.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Parses the endpoint, accepting only absolute `https` URLs.
    pub fn endpoint_url(&self) -> Result<Url, Error> {
        let url = Url::parse(self.endpoint.trim()).map_err(|e| {
            Error::invalid_input(format!("invalid endpoint `{}`: {e}", self.endpoint))
        })?;
        if url.scheme() != "https" || url.host_str().is_none() {
            return Err(Error::invalid_input(format!(
                "endpoint `{}` must be an absolute https URL",
                self.endpoint
            )));
        }
        Ok(url)
    }

    /// Checks everything a translate call needs, without touching the network.
    pub fn validate(&self) -> Result<(), Error> {
        if self.key.trim().is_empty() {
            return Err(Error::invalid_input("subscription key is empty"));
        }
        if self.region.trim().is_empty() {
            return Err(Error::invalid_input("subscription region is empty"));
        }
        self.endpoint_url().map(|_| ())
    }

    /// Builds `{endpoint}/{path}?api-version=3.0&{query}`.
    pub(crate) fn url_for(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = self.endpoint_url()?;
        let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api-version", API_VERSION);
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}
