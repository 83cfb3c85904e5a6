//! Core type definitions for Meridian transactions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::signer::EcdsaSignature;
use crate::utxo::types::{CurrencyType, UtxoOrigin};

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// Discriminant for the operation a transaction represents.
///
/// A closed set, not an open-ended tag: validation rules and the
/// canonical encoding both match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    /// Ordinary value transfer within the ledger.
    Normal,
    /// Cross-chain transfer involving a transaction certificate (TXCer).
    CrossChain,
    /// Pledge of value to a processing node.
    Pledge,
}

impl TxType {
    /// The token written into the canonical encoding. Frozen — changing a
    /// token changes every transaction id of that type.
    pub fn canonical_token(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::CrossChain => "crossChain",
            Self::Pledge => "pledge",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_token())
    }
}

// ---------------------------------------------------------------------------
// TxInput / TxOutput
// ---------------------------------------------------------------------------

/// A spending input: a reference to the consumed output's origin.
///
/// Inputs carry no value of their own — the value lives in the referenced
/// UTXO, which the ledger resolves at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxInput {
    /// The consumed output's origin.
    pub origin: UtxoOrigin,
}

impl From<UtxoOrigin> for TxInput {
    fn from(origin: UtxoOrigin) -> Self {
        Self { origin }
    }
}

/// A created output: value addressed to a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Recipient address, 40 lowercase hex characters.
    pub to_address: String,
    /// Value in the smallest unit of `currency`.
    pub to_value: u64,
    /// Denomination of the output.
    pub currency: CurrencyType,
}

impl TxOutput {
    /// Convenience constructor.
    pub fn new(to_address: &str, to_value: u64, currency: CurrencyType) -> Self {
        Self {
            to_address: to_address.to_string(),
            to_value,
            currency,
        }
    }
}

// ---------------------------------------------------------------------------
// InterestAssign
// ---------------------------------------------------------------------------

/// One fee-distribution record: a slice of the gas routed to a node.
///
/// A transaction carries an ordered list of these; their amounts sum to
/// the declared gas exactly (enforced by [`super::fee::FeePolicy`] and
/// re-checked by the builder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestAssign {
    /// Identifier of the receiving node.
    pub node: String,
    /// Amount of gas routed to that node.
    pub amount: u64,
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A Meridian transaction.
///
/// Note what is *not* here: an `id` field. The transaction id is the
/// SHA-256 of the canonical encoding and is recomputed on demand via
/// [`super::hasher::transaction_id`], never stored — a cached id and a
/// mutated body cannot drift apart if the cache does not exist.
///
/// `signature` is `None` between build and sign. The canonical encoding
/// excludes it, so signing does not change the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The operation this transaction represents.
    pub tx_type: TxType,
    /// Consumed outputs, in selection order.
    pub inputs: Vec<TxInput>,
    /// Created outputs: recipients first, change (if any) last.
    pub outputs: Vec<TxOutput>,
    /// Gas distribution records, summing exactly to the declared gas.
    pub interest_assign: Vec<InterestAssign>,
    /// ECDSA signature over the transaction digest; `None` until signed.
    pub signature: Option<EcdsaSignature>,
}

impl Transaction {
    /// Total gas this transaction declares, i.e. the sum of its
    /// distribution records.
    ///
    /// Saturates at `u64::MAX` for hand-built transactions with wrapping
    /// amounts; builder-produced transactions never reach saturation
    /// because construction rejects overflowing totals.
    pub fn gas(&self) -> u64 {
        self.interest_assign
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(a.amount))
    }

    /// Sum of all output values, saturating at `u64::MAX`.
    pub fn output_total(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.to_value))
    }

    /// Whether the transaction carries a signature.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_type_tokens_are_frozen() {
        assert_eq!(TxType::Normal.canonical_token(), "normal");
        assert_eq!(TxType::CrossChain.canonical_token(), "crossChain");
        assert_eq!(TxType::Pledge.canonical_token(), "pledge");
    }

    #[test]
    fn gas_sums_distribution_records() {
        let tx = Transaction {
            tx_type: TxType::Normal,
            inputs: vec![],
            outputs: vec![],
            interest_assign: vec![
                InterestAssign {
                    node: "n1".into(),
                    amount: 3,
                },
                InterestAssign {
                    node: "n2".into(),
                    amount: 2,
                },
            ],
            signature: None,
        };
        assert_eq!(tx.gas(), 5);
        assert!(!tx.is_signed());
    }

    #[test]
    fn output_total_sums_values() {
        let tx = Transaction {
            tx_type: TxType::Normal,
            inputs: vec![],
            outputs: vec![
                TxOutput::new(&"c".repeat(40), 120, CurrencyType::Native),
                TxOutput::new(&"d".repeat(40), 25, CurrencyType::Native),
            ],
            interest_assign: vec![],
            signature: None,
        };
        assert_eq!(tx.output_total(), 145);
    }

    #[test]
    fn totals_saturate_instead_of_panicking() {
        let tx = Transaction {
            tx_type: TxType::Normal,
            inputs: vec![],
            outputs: vec![
                TxOutput::new(&"c".repeat(40), u64::MAX, CurrencyType::Native),
                TxOutput::new(&"d".repeat(40), u64::MAX, CurrencyType::Native),
            ],
            interest_assign: vec![
                InterestAssign {
                    node: "n1".into(),
                    amount: u64::MAX,
                },
                InterestAssign {
                    node: "n2".into(),
                    amount: 1,
                },
            ],
            signature: None,
        };
        assert_eq!(tx.output_total(), u64::MAX);
        assert_eq!(tx.gas(), u64::MAX);
    }
}
