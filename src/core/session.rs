use crate::core::resolver::AddressResolver;
use crate::domain::model::RequestState;
use crate::domain::ports::GeocodingProvider;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Drives the search box state for a UI layer.
///
/// Each `submit` takes a new generation number. A response that arrives after a newer
/// submit has started is dropped, so the latest request always decides the final state.
pub struct SearchSession<P: GeocodingProvider> {
    resolver: AddressResolver<P>,
    api_key: Option<String>,
    generation: AtomicU64,
    state: Mutex<RequestState>,
}

impl<P: GeocodingProvider> SearchSession<P> {
    pub fn new(resolver: AddressResolver<P>, api_key: Option<String>) -> Self {
        Self {
            resolver,
            api_key,
            generation: AtomicU64::new(0),
            state: Mutex::new(RequestState::Idle),
        }
    }

    pub fn state(&self) -> RequestState {
        self.lock_state().clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Returns the new state, or `None` when the response was superseded.
    pub async fn submit(&self, address: &str) -> Option<RequestState> {
        let generation = {
            let mut state = self.lock_state();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = RequestState::Loading;
            generation
        };

        let outcome = self
            .resolver
            .resolve(address, self.api_key.as_deref())
            .await;

        let mut state = self.lock_state();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                "Discarding stale response for generation {} (current {})",
                generation,
                self.generation.load(Ordering::SeqCst)
            );
            return None;
        }

        *state = match outcome {
            Ok(result) => RequestState::Success(result),
            Err(e) => {
                tracing::warn!("Search failed: {} (category: {:?})", e, e.category());
                RequestState::Failed(e.user_friendly_message())
            }
        };
        Some(state.clone())
    }

    fn lock_state(&self) -> MutexGuard<'_, RequestState> {
        // 狀態只是一個值，前一個持有者 panic 後仍可安全沿用
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
