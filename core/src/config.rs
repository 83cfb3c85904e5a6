//! # Protocol Constants
//!
//! Every magic number in the wallet core lives here. If you are hardcoding
//! a constant somewhere else, move it.
//!
//! Several of these values are part of the cross-implementation contract:
//! changing them changes derived addresses and account ids for every
//! existing user, so treat them as frozen.

// ---------------------------------------------------------------------------
// Key & Address Format
// ---------------------------------------------------------------------------

/// Length of a normalized private key in hex characters (32 bytes).
pub const PRIV_KEY_HEX_LEN: usize = 64;

/// Length of one public key coordinate in bytes. P-256 coordinates are
/// 32-byte big-endian integers, zero-padded on the left.
pub const COORDINATE_LEN: usize = 32;

/// Length of the uncompressed SEC1 point encoding: `0x04 || X || Y`.
pub const UNCOMPRESSED_POINT_LEN: usize = 65;

/// Number of digest bytes kept when deriving an address from a public key.
pub const ADDRESS_BYTES: usize = 20;

/// Length of an address in lowercase hex characters.
pub const ADDRESS_HEX_LEN: usize = 40;

// ---------------------------------------------------------------------------
// Account Identifiers
// ---------------------------------------------------------------------------

/// Lower bound of the account-id range (inclusive). All account ids are
/// 8-digit decimal strings, so the floor is the smallest 8-digit number.
pub const ACCOUNT_ID_FLOOR: u32 = 10_000_000;

/// Width of the account-id value range. `checksum % SPAN + FLOOR` always
/// lands in `[10000000, 99999999]`.
pub const ACCOUNT_ID_SPAN: u32 = 90_000_000;

/// Number of decimal digits in an account id.
pub const ACCOUNT_ID_DIGITS: usize = 8;

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// ECDSA over NIST P-256. Chosen for interoperability with the browser's
/// WebCrypto facility, which the companion implementation signs with.
pub const SIGNING_ALGORITHM: &str = "ECDSA-P256";

/// Hex length of each signature component. `r` and `s` are fixed-width
/// 32-byte big-endian integers, so 64 hex characters each.
pub const SIGNATURE_COMPONENT_HEX_LEN: usize = 64;

// ---------------------------------------------------------------------------
// Fee Distribution Defaults
// ---------------------------------------------------------------------------

/// Default share of gas routed to the aggregator node, in percent.
/// The remainder is split evenly across assignment nodes, with any
/// integer leftover assigned back to the aggregator so the distributed
/// total always equals the declared gas exactly.
pub const DEFAULT_AGGREGATOR_PERCENT: u8 = 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_range_covers_all_eight_digit_numbers() {
        assert_eq!(ACCOUNT_ID_FLOOR, 10_000_000);
        assert_eq!(ACCOUNT_ID_FLOOR + ACCOUNT_ID_SPAN - 1, 99_999_999);
    }

    #[test]
    fn address_lengths_are_consistent() {
        assert_eq!(ADDRESS_BYTES * 2, ADDRESS_HEX_LEN);
        assert_eq!(COORDINATE_LEN * 2 + 1, UNCOMPRESSED_POINT_LEN);
    }
}
