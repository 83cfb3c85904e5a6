//! Account, address, and account-id derivation.
//!
//! Both derivations are frozen cross-implementation contracts:
//!
//! - **Address**: SHA-256 over the 65-byte uncompressed SEC1 encoding of
//!   the public point, truncated to the first 20 bytes, lowercase hex.
//! - **Account id**: CRC-32 (IEEE) over the ASCII bytes of the normalized
//!   private key hex *string*, mapped into `[10000000, 99999999]`.
//!
//! Note the account-id checksum runs over the hex characters, not the
//! decoded 32 raw key bytes. That is almost certainly an accident of the
//! first implementation rather than a design choice, but every existing
//! account id depends on it, so it is preserved exactly. Do not "fix" it.

use serde::{Deserialize, Serialize};

use crate::config::{ACCOUNT_ID_DIGITS, ACCOUNT_ID_FLOOR, ACCOUNT_ID_SPAN, ADDRESS_BYTES};
use crate::crypto::hash::sha256;
use crate::crypto::keys::{normalize_priv_hex, KeyError, Keypair, PublicKey};

/// Derives the 8-digit decimal account id from a private key hex string.
///
/// The input is normalized first (optional `0x`/`0X` prefix stripped,
/// lowercased, exactly 64 hex characters enforced), so every spelling of
/// the same key maps to the same id. Fails with
/// [`KeyError::InvalidKeyFormat`] on malformed input.
///
/// The checksum is CRC-32 with the IEEE polynomial over the normalized
/// string's ASCII bytes, then `crc % 90_000_000 + 10_000_000`. The result
/// is always eight digits, so the zero-padding below is belt-and-braces
/// for the formatting contract rather than a reachable case.
pub fn derive_account_id(priv_hex: &str) -> Result<String, KeyError> {
    let normalized = normalize_priv_hex(priv_hex)?;
    let crc = crc32fast::hash(normalized.as_bytes());
    let id = crc % ACCOUNT_ID_SPAN + ACCOUNT_ID_FLOOR;
    Ok(format!("{:0width$}", id, width = ACCOUNT_ID_DIGITS))
}

/// Derives the 40-character lowercase hex address from a public point.
///
/// `address = hex(sha256(0x04 || X || Y)[..20])`. The coordinates are
/// zero-padded 32-byte big-endian integers, so the digest input is always
/// exactly 65 bytes.
pub fn derive_address(public: &PublicKey) -> String {
    let digest = sha256(&public.to_uncompressed_bytes());
    hex::encode(&digest[..ADDRESS_BYTES])
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A fully derived wallet identity.
///
/// Bundles the keypair with its derived account id and address. The
/// derived fields are stored rather than recomputed per access because
/// they are immutable for the life of the identity — the key cannot
/// change under them.
///
/// `Account` itself is deliberately not serializable — serializing it
/// would drag the keypair along. The persistable projection is
/// [`AccountRecord`] via [`record`](Self::record); export the private key
/// explicitly via [`Keypair::priv_hex`] when a caller genuinely needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// 8-digit decimal identifier, zero-padded.
    pub account_id: String,
    /// 40-character lowercase hex spend/receive target.
    pub address: String,
    /// The underlying key material.
    pub keys: Keypair,
}

/// The public, persistable projection of an [`Account`].
///
/// This is the exact shape the storage collaborator persists and the API
/// returns (minus `privHex`, which the API layer adds explicitly for the
/// import/new-account responses). Field formats are part of the
/// interoperability contract: lowercase hex address, zero-padded decimal
/// account id, hex key coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// 8-digit decimal identifier.
    pub account_id: String,
    /// 40-character lowercase hex address.
    pub address: String,
    /// Public key X coordinate, 64 hex characters.
    pub pub_x_hex: String,
    /// Public key Y coordinate, 64 hex characters.
    pub pub_y_hex: String,
}

impl Account {
    /// Reconstructs the full identity from a private key hex string.
    ///
    /// This is the import path: one input, every identity field derived.
    pub fn from_priv_hex(priv_hex: &str) -> Result<Self, KeyError> {
        let keys = Keypair::from_priv_hex(priv_hex)?;
        let account_id = derive_account_id(keys.priv_hex())?;
        let address = derive_address(keys.public_key());
        Ok(Self {
            account_id,
            address,
            keys,
        })
    }

    /// Generates a brand-new identity from the OS RNG.
    pub fn generate() -> Self {
        let keys = Keypair::generate();
        let account_id = derive_account_id(keys.priv_hex())
            .expect("generated keys are always well-formed");
        let address = derive_address(keys.public_key());
        Self {
            account_id,
            address,
            keys,
        }
    }

    /// The public projection of this account, safe to persist or display.
    pub fn record(&self) -> AccountRecord {
        AccountRecord {
            account_id: self.account_id.clone(),
            address: self.address.clone(),
            pub_x_hex: self.keys.public_key().x_hex(),
            pub_y_hex: self.keys.public_key().y_hex(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN_PRIV: &str =
        "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn golden_vector_address_and_account_id() {
        // Drift detector: the key "63 zeros then 1" must always derive this
        // exact (address, account id) pair. If this test breaks, the
        // derivation algorithm changed and every existing account breaks
        // with it.
        let account = Account::from_priv_hex(GOLDEN_PRIV).unwrap();
        assert_eq!(account.address, "698bea63dc44a344663ff1429aea10842df27b6b");
        assert_eq!(account.account_id, "66055389");
    }

    #[test]
    fn account_id_is_checksum_of_hex_string_not_raw_bytes() {
        // CRC-32("aaaa…a" as ASCII) mapped into range — precomputed
        // externally. Hashing the decoded raw bytes instead would give a
        // different value, which is exactly the reimplementation mistake
        // this test exists to catch.
        let id = derive_account_id(&"a".repeat(64)).unwrap();
        assert_eq!(id, "70301013");
    }

    #[test]
    fn account_id_always_eight_digits_in_range() {
        for seed in 0u8..16 {
            let priv_hex = format!("{:064x}", u128::from(seed) + 1);
            let id = derive_account_id(&priv_hex).unwrap();
            assert_eq!(id.len(), 8);
            let n: u32 = id.parse().unwrap();
            assert!((10_000_000..=99_999_999).contains(&n), "id {} out of range", n);
        }
    }

    #[test]
    fn account_id_ignores_prefix_and_case() {
        let plain = derive_account_id(GOLDEN_PRIV).unwrap();
        let prefixed = derive_account_id(&format!("0x{}", GOLDEN_PRIV)).unwrap();
        let upper = derive_account_id(&GOLDEN_PRIV.to_uppercase()).unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain, upper);
    }

    #[test]
    fn account_id_rejects_malformed_input() {
        assert!(derive_account_id("not-a-key").is_err());
        assert!(derive_account_id(&"0".repeat(63)).is_err());
    }

    #[test]
    fn address_is_forty_lowercase_hex_chars() {
        let account = Account::generate();
        assert_eq!(account.address.len(), 40);
        assert!(account
            .address
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = Account::from_priv_hex(GOLDEN_PRIV).unwrap();
        let b = Account::from_priv_hex(&format!("0X{}", GOLDEN_PRIV)).unwrap();
        assert_eq!(a.address, b.address);
        assert_eq!(a.account_id, b.account_id);
    }

    #[test]
    fn account_reconstructible_from_private_key_alone() {
        let original = Account::generate();
        let restored = Account::from_priv_hex(original.keys.priv_hex()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn record_contains_no_private_material() {
        let account = Account::generate();
        let json = serde_json::to_string(&account.record()).unwrap();
        assert!(!json.contains(account.keys.priv_hex()));
        assert!(json.contains(&account.address));
    }

    #[test]
    fn different_keys_give_different_addresses() {
        let a = Account::generate();
        let b = Account::generate();
        assert_ne!(a.address, b.address);
    }
}
