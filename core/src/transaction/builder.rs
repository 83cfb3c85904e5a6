//! Transaction construction via the builder pattern.
//!
//! The builder assembles the selector's chosen inputs, the recipient
//! outputs, the change output, and the gas distribution into an unsigned
//! [`Transaction`], enforcing the two structural invariants along the way:
//! exact value conservation and input uniqueness. It does not hash and it
//! does not sign — those stages live in [`super::hasher`] and
//! [`super::signing`] so construction stays independent of digest and
//! curve choices.

use std::collections::HashSet;
use thiserror::Error;

use crate::config::ADDRESS_HEX_LEN;
use crate::utxo::selector::Selection;
use crate::utxo::types::{CurrencyType, Utxo};

use super::fee::FeePolicy;
use super::types::{Transaction, TxInput, TxOutput, TxType};

/// Errors from transaction construction.
///
/// All of these are terminal for the call — the builder returns no
/// partial transaction, so a failed build has no side effects to undo.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Input values do not equal output values plus gas, exactly.
    #[error("value mismatch: inputs {input_total} != outputs {output_total} + gas {gas}")]
    ValueMismatch {
        /// Sum of consumed UTXO values.
        input_total: u64,
        /// Sum of created output values.
        output_total: u64,
        /// Declared gas.
        gas: u64,
    },

    /// The same UTXO origin appears more than once among the inputs.
    #[error("duplicate input: {origin}")]
    DuplicateInput {
        /// Display form of the repeated origin.
        origin: String,
    },

    /// A recipient or change address is not 40 hex characters.
    #[error("malformed address: {address}")]
    MalformedAddress {
        /// The offending address string.
        address: String,
    },

    /// Gas was declared but no fee policy was supplied to distribute it.
    #[error("gas is {gas} but no fee policy was configured")]
    MissingFeePolicy {
        /// The undistributable gas amount.
        gas: u64,
    },

    /// Summing the input or output values overflowed `u64`.
    #[error("transaction value totals overflow the 64-bit range")]
    ValueOverflow,

    /// The transaction consumes nothing.
    #[error("transaction has no inputs")]
    NoInputs,

    /// The transaction creates nothing.
    #[error("transaction has no outputs")]
    NoOutputs,
}

fn is_valid_address(address: &str) -> bool {
    address.len() == ADDRESS_HEX_LEN
        && address
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Transaction`]s.
///
/// # Usage
///
/// ```no_run
/// use meridian_core::transaction::{FeePolicy, TransactionBuilder, TxType};
/// use meridian_core::utxo::CurrencyType;
/// # fn demo(selection: meridian_core::utxo::Selection) {
/// let policy = FeePolicy::new("aggregator-1", vec!["assign-1".into()]);
///
/// let tx = TransactionBuilder::new(TxType::Normal)
///     .inputs_from_selection(&selection)
///     .output("00aa11bb22cc33dd44ee55ff66aa77bb88cc99dd", 120, CurrencyType::Native)
///     .change("ffeeddccbbaa99887766554433221100ffeeddcc", selection.change, CurrencyType::Native)
///     .gas(5)
///     .fee_policy(&policy)
///     .build()
///     .unwrap();
/// # }
/// ```
///
/// The builder holds full [`Utxo`]s (not bare input references) so that
/// `build` can check value conservation; the values are dropped at build
/// time and only the origin references end up in the transaction.
pub struct TransactionBuilder {
    tx_type: TxType,
    inputs: Vec<Utxo>,
    outputs: Vec<TxOutput>,
    gas: u64,
    fee_policy: Option<FeePolicy>,
}

impl TransactionBuilder {
    /// Creates a builder for the given transaction type.
    pub fn new(tx_type: TxType) -> Self {
        Self {
            tx_type,
            inputs: Vec::new(),
            outputs: Vec::new(),
            gas: 0,
            fee_policy: None,
        }
    }

    /// Adds every input chosen by the selector. The usual entry point —
    /// selection and construction share the same `Utxo` values, so the
    /// conservation check sees exactly what the selector counted.
    pub fn inputs_from_selection(mut self, selection: &Selection) -> Self {
        self.inputs.extend(selection.inputs.iter().cloned());
        self
    }

    /// Adds a single input UTXO. Mostly useful in tests and for
    /// certificate-origin inputs that bypass ordinary selection.
    pub fn input(mut self, utxo: Utxo) -> Self {
        self.inputs.push(utxo);
        self
    }

    /// Adds a recipient output.
    pub fn output(mut self, to_address: &str, value: u64, currency: CurrencyType) -> Self {
        self.outputs.push(TxOutput::new(to_address, value, currency));
        self
    }

    /// Adds the change output. A zero-value change is skipped entirely
    /// rather than encoded as an empty output, so exact-cover
    /// transactions stay minimal.
    pub fn change(self, to_address: &str, value: u64, currency: CurrencyType) -> Self {
        if value == 0 {
            return self;
        }
        self.output(to_address, value, currency)
    }

    /// Declares the gas amount. Nonzero gas also requires a
    /// [`fee_policy`](Self::fee_policy) to distribute it.
    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    /// Sets the policy that distributes the declared gas.
    pub fn fee_policy(mut self, policy: &FeePolicy) -> Self {
        self.fee_policy = Some(policy.clone());
        self
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    ///
    /// Checks, cheapest first: structure, address formats, input
    /// uniqueness, then exact value conservation
    /// (Σ inputs = Σ outputs + gas — integer equality, no rounding).
    pub fn build(self) -> Result<Transaction, BuildError> {
        if self.inputs.is_empty() {
            return Err(BuildError::NoInputs);
        }
        if self.outputs.is_empty() {
            return Err(BuildError::NoOutputs);
        }

        for output in &self.outputs {
            if !is_valid_address(&output.to_address) {
                return Err(BuildError::MalformedAddress {
                    address: output.to_address.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for utxo in &self.inputs {
            if !seen.insert(&utxo.origin) {
                return Err(BuildError::DuplicateInput {
                    origin: utxo.origin.to_string(),
                });
            }
        }

        let input_total = self
            .inputs
            .iter()
            .try_fold(0u64, |acc, u| acc.checked_add(u.value))
            .ok_or(BuildError::ValueOverflow)?;
        let output_total = self
            .outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.to_value))
            .ok_or(BuildError::ValueOverflow)?;
        let required = output_total.checked_add(self.gas);
        if required != Some(input_total) {
            return Err(BuildError::ValueMismatch {
                input_total,
                output_total,
                gas: self.gas,
            });
        }

        let interest_assign = match (&self.fee_policy, self.gas) {
            (_, 0) => Vec::new(),
            (Some(policy), gas) => policy.distribute(gas),
            (None, gas) => return Err(BuildError::MissingFeePolicy { gas }),
        };

        Ok(Transaction {
            tx_type: self.tx_type,
            inputs: self
                .inputs
                .into_iter()
                .map(|u| TxInput { origin: u.origin })
                .collect(),
            outputs: self.outputs,
            interest_assign,
            signature: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
