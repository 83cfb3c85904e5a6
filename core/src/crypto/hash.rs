//! SHA-256 digest helpers.
//!
//! The wallet core uses exactly one hash function. Addresses are truncated
//! SHA-256 digests of public key points, transaction ids are full SHA-256
//! digests of canonical transaction bytes. No truncation happens here —
//! callers that want fewer bytes slice the digest themselves so the policy
//! is visible at the call site.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// Returns a 32-byte digest as a `Vec<u8>`. Most callers immediately pass
/// the result to functions that want `&[u8]`, so the heap allocation is
/// noise compared to the cost of the hash itself.
///
/// # Example
///
/// ```
/// use meridian_core::crypto::sha256;
///
/// let digest = sha256(b"meridian");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
///
/// Same as [`sha256`] but returns `[u8; 32]` for callers that want a
/// fixed-size type without the heap allocation — signing code in
/// particular, where the digest type propagates naturally.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
