use crate::domain::model::Candidate;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Anything that can turn a query string into ordered candidate matches.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn search(&self, query: &str, api_key: &str) -> Result<Vec<Candidate>>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout(&self) -> Option<Duration>;
    fn retry_attempts(&self) -> u32;
    fn retry_delay(&self) -> Duration;
}
