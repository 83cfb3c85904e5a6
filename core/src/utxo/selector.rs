//! First-sufficient UTXO selection.
//!
//! The policy is deliberately simple: walk the available outputs in the
//! order the wallet-state collaborator returns them and accumulate until
//! the running total covers `amount + gas`. This is not bin-packing —
//! minimizing input count or transaction size is a non-goal. What matters
//! is that two runs over the same snapshot pick the same outputs, and
//! that a selection is either fully sufficient or not returned at all.

use thiserror::Error;

use super::store::ReservationView;
use super::types::{CurrencyType, Utxo};

/// Errors from coin selection.
///
/// `InsufficientFunds` is the one *recoverable* error in the pipeline:
/// the caller can add funds or lower the amount and try again, which is
/// why it carries both sides of the comparison.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The entire available set for this currency cannot cover the
    /// requirement. No partial selection is returned.
    #[error("insufficient funds: need {required}, only {available} available")]
    InsufficientFunds {
        /// `amount + gas`.
        required: u64,
        /// Sum of every spendable same-currency output.
        available: u64,
    },

    /// `amount + gas` overflowed u64. Practically unreachable with real
    /// balances, but money code does not get to ignore overflow.
    #[error("requested amount plus gas overflows")]
    AmountOverflow,
}

/// A sufficient set of inputs plus the change they imply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The chosen outputs, in selection order.
    pub inputs: Vec<Utxo>,
    /// Sum of the chosen outputs' values.
    pub total: u64,
    /// `total - (amount + gas)` — routed to a change output when nonzero.
    pub change: u64,
}

/// Selects spendable outputs covering `amount + gas` for one currency.
///
/// Skips outputs of other currencies, locked outputs, and outputs
/// reserved by other in-flight drafts (per `reserved`, which this
/// function only reads). Accumulates in snapshot order and stops at the
/// first sufficient prefix.
///
/// Fails with [`SelectionError::InsufficientFunds`] when even the full
/// eligible set falls short — in that case nothing is selected.
pub fn select_utxos(
    available: &[Utxo],
    currency: CurrencyType,
    amount: u64,
    gas: u64,
    reserved: &dyn ReservationView,
) -> Result<Selection, SelectionError> {
    let required = amount
        .checked_add(gas)
        .ok_or(SelectionError::AmountOverflow)?;

    let mut inputs = Vec::new();
    let mut total: u64 = 0;

    for utxo in available {
        if utxo.currency != currency || utxo.locked || reserved.is_reserved(&utxo.origin) {
            continue;
        }
        total = total
            .checked_add(utxo.value)
            .ok_or(SelectionError::AmountOverflow)?;
        inputs.push(utxo.clone());
        if total >= required {
            return Ok(Selection {
                inputs,
                total,
                change: total - required,
            });
        }
    }

    Err(SelectionError::InsufficientFunds {
        required,
        available: total,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
