use crate::domain::model::Candidate;
use crate::domain::ports::{ConfigProvider, GeocodingProvider};
use crate::utils::error::{GeoError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://geocode.maps.co";

/// geocode.maps.co style `GET <base>/search?q=..&api_key=..` client.
pub struct MapsCoGeocoder {
    base_url: String,
    client: Client,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl MapsCoGeocoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
            retry_attempts: 0,
            retry_delay: Duration::from_millis(500),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.endpoint().to_string(),
            client: builder.build().map_err(strip_url)?,
            retry_attempts: config.retry_attempts(),
            retry_delay: config.retry_delay(),
        })
    }

    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    pub fn search_url(&self, query: &str, api_key: &str) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/search", base)).map_err(|e| {
            GeoError::InvalidConfigValueError {
                field: "endpoint".to_string(),
                value: self.base_url.clone(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;
        // form-urlencoded: spaces go out as '+', which providers decode like %20
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("api_key", api_key);
        Ok(url)
    }

    async fn fetch_once(&self, url: &Url) -> Result<Vec<Candidate>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(strip_url)?;
        let status = response.status();
        tracing::debug!("Geocoding response status: {}", status);

        if !status.is_success() {
            return Err(GeoError::TransportError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(strip_url)?;
        let candidates: Vec<Candidate> = serde_json::from_slice(&body)?;
        tracing::debug!("Provider returned {} candidate(s)", candidates.len());
        Ok(candidates)
    }
}

#[async_trait]
impl GeocodingProvider for MapsCoGeocoder {
    async fn search(&self, query: &str, api_key: &str) -> Result<Vec<Candidate>> {
        let url = self.search_url(query, api_key)?;
        tracing::debug!("Making geocoding request to: {}", redact_api_key(&url));

        let mut attempt = 0;
        loop {
            match self.fetch_once(&url).await {
                Err(e) if e.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "Geocoding attempt {} failed ({}), retrying in {:?}",
                        attempt,
                        e,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                other => return other,
            }
        }
    }
}

/// reqwest errors print the request URL, and ours carries the credential.
fn strip_url(e: reqwest::Error) -> GeoError {
    GeoError::HttpError(e.without_url())
}

/// Copy of `url` safe for logs.
pub fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api_key" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
