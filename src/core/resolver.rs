use crate::domain::model::GeocodeResult;
use crate::domain::ports::GeocodingProvider;
use crate::utils::error::{GeoError, Result};

/// Turns a typed address into the first matching coordinate.
///
/// Holds no state between calls; every `resolve` is a fresh provider lookup.
pub struct AddressResolver<P: GeocodingProvider> {
    provider: P,
}

impl<P: GeocodingProvider> AddressResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn resolve(&self, address: &str, api_key: Option<&str>) -> Result<GeocodeResult> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeoError::validation("address required"));
        }

        let api_key = match api_key.map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return Err(GeoError::config("missing API credential")),
        };

        tracing::debug!("Resolving address: {}", address);
        let candidates = self.provider.search(address, api_key).await?;

        // 信任供應商排序，只取第一筆
        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeoError::NotFoundError {
                address: address.to_string(),
            })?;

        let result = first.into_result()?;
        tracing::info!(
            "Resolved '{}' to ({}, {})",
            address,
            result.coordinate.latitude,
            result.coordinate.longitude
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Candidate, Coordinate, NumericField};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct StubProvider {
        candidates: Vec<Candidate>,
        calls: Arc<AtomicUsize>,
    }

    impl StubProvider {
        fn new(candidates: Vec<Candidate>) -> Self {
            Self {
                candidates,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GeocodingProvider for StubProvider {
        async fn search(&self, _query: &str, _api_key: &str) -> Result<Vec<Candidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.candidates.clone())
        }
    }

    fn candidate(lat: &str, lon: &str, name: &str) -> Candidate {
        Candidate {
            lat: NumericField::Text(lat.to_string()),
            lon: NumericField::Text(lon.to_string()),
            name: Some(name.to_string()),
            display_name: None,
        }
    }

    #[tokio::test]
    async fn test_blank_address_skips_provider() {
        let provider = StubProvider::new(vec![candidate("1", "2", "x")]);
        let resolver = AddressResolver::new(provider.clone());

        for address in ["", "   ", "\t\n"] {
            let err = resolver.resolve(address, Some("key")).await.unwrap_err();
            assert!(matches!(err, GeoError::ValidationError { .. }));
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_skips_provider() {
        let provider = StubProvider::new(vec![candidate("1", "2", "x")]);
        let resolver = AddressResolver::new(provider.clone());

        for key in [None, Some(""), Some("  ")] {
            let err = resolver.resolve("Paris", key).await.unwrap_err();
            assert!(matches!(err, GeoError::ConfigError { .. }));
        }
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_validation_checked_before_credential() {
        let resolver = AddressResolver::new(StubProvider::new(vec![]));
        let err = tokio_test::block_on(resolver.resolve(" ", None)).unwrap_err();
        assert!(matches!(err, GeoError::ValidationError { .. }));
    }

    #[test]
    fn test_numeric_fields_from_provider() {
        let provider = StubProvider::new(vec![Candidate {
            lat: NumericField::Number(-33.87),
            lon: NumericField::Number(151.21),
            name: Some("Sydney".to_string()),
            display_name: Some("Sydney, New South Wales, Australia".to_string()),
        }]);
        let resolver = AddressResolver::new(provider);

        let result = tokio_test::block_on(resolver.resolve("Sydney", Some("key")));
        let result = tokio_test::assert_ok!(result);
        assert_eq!(result.coordinate, Coordinate::new(-33.87, 151.21));
        assert_eq!(result.label, "Sydney");
    }

    #[tokio::test]
    async fn test_first_candidate_wins() {
        let provider = StubProvider::new(vec![
            candidate("48.85", "2.35", "Paris"),
            candidate("33.66", "-95.55", "Paris, Texas"),
        ]);
        let resolver = AddressResolver::new(provider.clone());

        let result = resolver.resolve("Paris", Some("key")).await.unwrap();
        assert_eq!(result.coordinate, Coordinate::new(48.85, 2.35));
        assert_eq!(result.label, "Paris");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_candidates_is_not_found() {
        let resolver = AddressResolver::new(StubProvider::new(vec![]));
        let err = resolver.resolve("Atlantis", Some("key")).await.unwrap_err();
        assert!(matches!(err, GeoError::NotFoundError { ref address } if address == "Atlantis"));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_not_cached() {
        let provider = StubProvider::new(vec![candidate("48.85", "2.35", "Paris")]);
        let resolver = AddressResolver::new(provider.clone());

        let first = resolver.resolve("Paris", Some("key")).await.unwrap();
        let second = resolver.resolve("Paris", Some("key")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls(), 2);
    }
}
