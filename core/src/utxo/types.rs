//! Core type definitions for the UTXO model.
//!
//! These are intentionally small value types. A [`Utxo`] is immutable once
//! created — the wallet-state collaborator removes it from the available
//! set when it is consumed, it is never edited in place.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CurrencyType
// ---------------------------------------------------------------------------

/// The currency denomination of an output.
///
/// A closed set with fixed wire values — the canonical transaction
/// encoding writes the numeric value, so the mapping is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyType {
    /// The ledger's native coin.
    Native,
    /// A secondary fuel/fee asset.
    Fuel,
    /// A transaction certificate (TXCer) used in cross-chain and
    /// guarantor-group operations.
    Certificate,
}

impl CurrencyType {
    /// The numeric value used in the canonical encoding.
    pub fn wire_value(self) -> u8 {
        match self {
            Self::Native => 0,
            Self::Fuel => 1,
            Self::Certificate => 2,
        }
    }

    /// Parses a wire value back into a currency type.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Native),
            1 => Some(Self::Fuel),
            2 => Some(Self::Certificate),
            _ => None,
        }
    }
}

impl fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "Native"),
            Self::Fuel => write!(f, "Fuel"),
            Self::Certificate => write!(f, "Certificate"),
        }
    }
}

// ---------------------------------------------------------------------------
// UtxoOrigin
// ---------------------------------------------------------------------------

/// Where an output came from — the reference a spending input carries.
///
/// Ordinary outputs point at the producing transaction and an output
/// index. Certificate outputs (TXCers) are identified by their
/// certificate id instead, because they are minted by guarantor-group
/// operations rather than by a regular transaction output list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtxoOrigin {
    /// `tx_id` is the producing transaction's id (64 hex chars),
    /// `index` its position in that transaction's output list.
    Outpoint { tx_id: String, index: u32 },
    /// A certificate id for TXCer-style outputs.
    Certificate { cert_id: String },
}

impl fmt::Display for UtxoOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outpoint { tx_id, index } => write!(f, "{}:{}", tx_id, index),
            Self::Certificate { cert_id } => write!(f, "cert:{}", cert_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Utxo
// ---------------------------------------------------------------------------

/// One unspent transaction output.
///
/// `value` is an integer in the smallest indivisible unit. No floating
/// point anywhere near money. `locked` marks outputs the owner cannot
/// spend yet (pledges, time locks); the selector skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Value in the smallest unit of `currency`.
    pub value: u64,
    /// Denomination of this output.
    pub currency: CurrencyType,
    /// Reference to where this output was created.
    pub origin: UtxoOrigin,
    /// Whether the output is currently unspendable.
    pub locked: bool,
}

impl Utxo {
    /// Convenience constructor for an outpoint-origin UTXO.
    pub fn new(value: u64, currency: CurrencyType, tx_id: &str, index: u32) -> Self {
        Self {
            value,
            currency,
            origin: UtxoOrigin::Outpoint {
                tx_id: tx_id.to_string(),
                index,
            },
            locked: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_wire_values_are_frozen() {
        assert_eq!(CurrencyType::Native.wire_value(), 0);
        assert_eq!(CurrencyType::Fuel.wire_value(), 1);
        assert_eq!(CurrencyType::Certificate.wire_value(), 2);
    }

    #[test]
    fn currency_wire_roundtrip() {
        for v in 0..=2u8 {
            let c = CurrencyType::from_wire(v).unwrap();
            assert_eq!(c.wire_value(), v);
        }
        assert!(CurrencyType::from_wire(3).is_none());
    }

    #[test]
    fn origin_display_forms() {
        let op = UtxoOrigin::Outpoint {
            tx_id: "ab".repeat(32),
            index: 2,
        };
        assert!(op.to_string().ends_with(":2"));

        let cert = UtxoOrigin::Certificate {
            cert_id: "cafe".into(),
        };
        assert_eq!(cert.to_string(), "cert:cafe");
    }

    #[test]
    fn utxo_serde_roundtrip() {
        let utxo = Utxo::new(1_000, CurrencyType::Native, &"aa".repeat(32), 0);
        let json = serde_json::to_string(&utxo).unwrap();
        let recovered: Utxo = serde_json::from_str(&json).unwrap();
        assert_eq!(utxo, recovered);
    }
}
