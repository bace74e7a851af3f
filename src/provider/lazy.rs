//! Lazy, lock-guarded provider construction.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use super::{EmbeddingProvider, ProviderResult};

type ProviderFactory = Box<dyn FnOnce() -> ProviderResult<Arc<dyn EmbeddingProvider>> + Send>;

enum ProviderSlot {
    Uninitialized,
    Ready(Arc<dyn EmbeddingProvider>),
    /// Construction failed once; the judgment is memoized so every later
    /// call skips the failing probe.
    Unavailable,
}

/// Memoized, fallible construction of an [`EmbeddingProvider`].
///
/// Uses double-checked locking: the fast path returns an already-resolved
/// handle without taking the init lock; the slow path acquires it, re-checks,
/// and runs the factory exactly once even under concurrent first-time
/// callers. A factory failure is recorded once at warn level and the client
/// then operates without embeddings: [`embed`](Self::embed) returns `None`,
/// it never propagates the failure.
pub struct LazyEmbeddingClient {
    slot: RwLock<ProviderSlot>,
    init: Mutex<Option<ProviderFactory>>,
}

impl LazyEmbeddingClient {
    /// Creates a client that will construct its provider on first use.
    pub fn new<F>(factory: F) -> Self
    where
        F: FnOnce() -> ProviderResult<Arc<dyn EmbeddingProvider>> + Send + 'static,
    {
        Self {
            slot: RwLock::new(ProviderSlot::Uninitialized),
            init: Mutex::new(Some(Box::new(factory))),
        }
    }

    /// Creates a client around an already-constructed provider.
    pub fn with_provider(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            slot: RwLock::new(ProviderSlot::Ready(provider)),
            init: Mutex::new(None),
        }
    }

    /// Embeds `text`, or returns `None` when no provider is available or the
    /// call fails. Absence is a valid terminal state for the request.
    pub async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        let provider = self.provider()?;
        match provider.embed(text).await {
            Ok(vector) => Some(vector),
            Err(e) => {
                warn!(error = %e, "embedding call failed; treating as no embedding");
                None
            }
        }
    }

    /// The provider's vector dimension, once resolved.
    pub fn dimension(&self) -> Option<usize> {
        match &*self.slot.read() {
            ProviderSlot::Ready(provider) => Some(provider.dimension()),
            _ => None,
        }
    }

    /// Returns `true` once the provider has been constructed successfully.
    pub fn is_ready(&self) -> bool {
        matches!(&*self.slot.read(), ProviderSlot::Ready(_))
    }

    /// Returns `true` once construction has failed (and will not be retried).
    pub fn is_unavailable(&self) -> bool {
        matches!(&*self.slot.read(), ProviderSlot::Unavailable)
    }

    fn provider(&self) -> Option<Arc<dyn EmbeddingProvider>> {
        // Fast path: no init lock once the slot is resolved.
        match &*self.slot.read() {
            ProviderSlot::Ready(provider) => return Some(Arc::clone(provider)),
            ProviderSlot::Unavailable => return None,
            ProviderSlot::Uninitialized => {}
        }

        let mut factory_slot = self.init.lock();

        // Re-check under the lock: another caller may have initialized
        // while we waited.
        match &*self.slot.read() {
            ProviderSlot::Ready(provider) => return Some(Arc::clone(provider)),
            ProviderSlot::Unavailable => return None,
            ProviderSlot::Uninitialized => {}
        }

        let Some(factory) = factory_slot.take() else {
            // No factory and still uninitialized: nothing to construct with.
            *self.slot.write() = ProviderSlot::Unavailable;
            return None;
        };

        match factory() {
            Ok(provider) => {
                debug!(dimension = provider.dimension(), "embedding provider initialized");
                *self.slot.write() = ProviderSlot::Ready(Arc::clone(&provider));
                Some(provider)
            }
            Err(e) => {
                warn!(error = %e, "embedding provider initialization failed; operating without embeddings");
                *self.slot.write() = ProviderSlot::Unavailable;
                None
            }
        }
    }
}

impl std::fmt::Debug for LazyEmbeddingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.slot.read() {
            ProviderSlot::Uninitialized => "uninitialized",
            ProviderSlot::Ready(_) => "ready",
            ProviderSlot::Unavailable => "unavailable",
        };
        f.debug_struct("LazyEmbeddingClient")
            .field("state", &state)
            .finish()
    }
}
