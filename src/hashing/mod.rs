//! Content fingerprints and cache-key derivation.
//!
//! Keys are deterministic functions of (content, cache class, and, for
//! result entries, the result element type name), so the two logical cache
//! classes can never collide even when their content strings coincide.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use blake3::Hasher;

/// Length of an encoded fingerprint: 32 BLAKE3 bytes in unpadded base64.
pub const FINGERPRINT_LEN: usize = 43;

/// Computes a collision-resistant fingerprint of `text`.
///
/// BLAKE3-256 over the UTF-8 bytes, encoded URL-safe without padding. Two
/// distinct texts should never plausibly collide.
#[inline]
pub fn fingerprint(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(blake3::hash(text.as_bytes()).as_bytes())
}

/// Cache key for an embedding entry.
#[inline]
pub fn embedding_key(text: &str) -> String {
    format!("emb:{}", fingerprint(text))
}

/// Cache key for a result-list entry.
///
/// The element type name is hashed into the key (separated from the query to
/// prevent concatenation ambiguity), so caching `Vec<A>` and `Vec<B>` for the
/// same query yields distinct entries.
#[inline]
pub fn results_key(query: &str, type_tag: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(query.as_bytes());
    hasher.update(b"|");
    hasher.update(type_tag.as_bytes());
    format!("res:{}", URL_SAFE_NO_PAD.encode(hasher.finalize().as_bytes()))
}
