//! Core digest types shared across the crate.

use std::collections::BTreeMap;

/// 32-byte BLAKE3 content digest
pub type Digest = [u8; 32];

/// Mapping from root-relative path to content digest.
///
/// Keyed by normalized path strings so iteration order is the lexicographic
/// path order the reducer depends on.
pub type DigestMap = BTreeMap<String, Digest>;

/// Lowercase hex encoding of a digest
pub fn digest_to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

/// Parse a digest from its lowercase hex encoding
pub fn digest_from_hex(s: &str) -> Option<Digest> {
    let bytes = hex::decode(s).ok()?;
    let mut digest = [0u8; 32];
    if bytes.len() != digest.len() {
        return None;
    }
    digest.copy_from_slice(&bytes);
    Some(digest)
}
