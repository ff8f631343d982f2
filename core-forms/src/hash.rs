//! Content hash helpers
//!
//! The form server reports content hashes in a prefixed string form
//! (`md5:<hex>`); local records store the bare lowercase hex digest. All
//! comparisons in the sync core happen on the bare form.

use md5::{Digest, Md5};

/// Prefix carried by server-reported hashes.
pub const HASH_PREFIX: &str = "md5:";

/// Compute the bare lowercase hex digest of `data`.
pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Strip the 4-character `md5:` prefix from a server-reported hash.
///
/// Hashes that arrive without the prefix are returned unchanged.
pub fn strip_hash_prefix(hash: &str) -> &str {
    hash.strip_prefix(HASH_PREFIX).unwrap_or(hash)
}
