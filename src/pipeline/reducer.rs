//! Deterministic reduction of per-file digests into one aggregate digest.

use crate::pipeline::hasher;
use crate::types::{digest_to_hex, Digest, DigestMap};

/// Reduce a complete digest map into the aggregate digest.
///
/// Paths are consumed in lexicographic order (the map's key order), each
/// file digest is appended as lowercase hex, and the digest function runs
/// once over the concatenation. The ordering step is what makes the
/// aggregate independent of traversal and arrival order; it must never be
/// skipped. An empty map reduces to the digest of the empty buffer.
pub fn reduce(files: &DigestMap) -> Digest {
    let mut buffer = String::with_capacity(files.len() * 64);
    for digest in files.values() {
        buffer.push_str(&digest_to_hex(digest));
    }
    hasher::digest_bytes(buffer.as_bytes())
}
