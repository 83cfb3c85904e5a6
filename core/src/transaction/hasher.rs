//! Transaction and output digests.
//!
//! `digest = SHA-256(canonical bytes)`, full 32 bytes, no truncation.
//! The transaction id is simply the lowercase hex form of that digest.
//!
//! Ids are computed on demand from the current content — there is no
//! cache to invalidate, so a mutated transaction can never carry a stale
//! id.

use crate::crypto::hash::sha256_array;

use super::serializer::{serialize_output, serialize_transaction};
use super::types::{Transaction, TxOutput};

/// SHA-256 digest of an output's canonical encoding.
pub fn hash_output(output: &TxOutput) -> [u8; 32] {
    sha256_array(&serialize_output(output))
}

/// SHA-256 digest of a transaction's canonical encoding (signature
/// excluded). This is the exact digest the signer signs.
pub fn hash_transaction(tx: &Transaction) -> [u8; 32] {
    sha256_array(&serialize_transaction(tx))
}

/// The externally visible transaction identifier: the lowercase hex
/// encoding of [`hash_transaction`]. Stable for a given content; changes
/// whenever any encoded field changes.
pub fn transaction_id(tx: &Transaction) -> String {
    hex::encode(hash_transaction(tx))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
