//! Path canonicalization and digest-map key derivation.

use crate::error::PipelineError;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize the workspace root for traversal.
///
/// Resolves symlinks, `.` and `..` so that every dispatched file path sits
/// under one stable prefix regardless of how the root was spelled.
pub fn canonicalize_root(root: &Path) -> Result<PathBuf, PipelineError> {
    dunce::canonicalize(root).map_err(|source| PipelineError::InvalidRoot {
        root: root.to_path_buf(),
        source,
    })
}

/// Derive the digest-map key for a file below `root`.
///
/// Keys are root-relative, `/`-separated, NFC-normalized strings. The same
/// tree content therefore produces the same key set (and the same aggregate
/// digest) wherever it is checked out.
pub fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);

    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    joined.nfc().collect()
}
