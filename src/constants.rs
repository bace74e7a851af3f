//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants (e.g. byte sizes) from primary ones to avoid drift.
//! All durations here are defaults; [`crate::config::Config`] threads the effective values
//! into constructors so tests can run with short TTLs.

/// Default embedding dimension when the provider does not say otherwise.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Bytes per stored embedding at the default dimension (f32).
pub const EMBEDDING_F32_BYTES: usize = DEFAULT_EMBEDDING_DIM * 4;

/// Default absolute TTL for cached embeddings: 30 days.
///
/// Embeddings for fixed text never change, so this is bounded only by
/// provider swaps and cache pressure.
pub const DEFAULT_EMBEDDING_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Default absolute TTL for cached result lists: 15 minutes.
///
/// The underlying document set may change, so result lists go stale much
/// faster than embeddings.
pub const DEFAULT_RESULTS_TTL_SECS: u64 = 15 * 60;

/// Default sliding-expiration window for cached result lists: 5 minutes.
///
/// Reset on each successful read hit, never on write, so frequently-accessed
/// queries stay warm longer than the absolute TTL alone would allow.
pub const DEFAULT_SLIDING_WINDOW_SECS: u64 = 5 * 60;

/// Default cache size budget in bytes (weighted by approximate entry cost).
pub const DEFAULT_CACHE_CAPACITY_BYTES: u64 = 256 * 1024 * 1024;

/// Default candidate pool size produced by the similarity scan.
pub const DEFAULT_SCAN_TOP_N: usize = 50;

/// Default number of results selected by MMR reranking.
pub const DEFAULT_MMR_TOP_K: usize = 10;

/// Default MMR relevance/diversity trade-off.
///
/// `1.0` is pure relevance, `0.0` is pure diversity.
pub const DEFAULT_MMR_LAMBDA: f64 = 0.5;
