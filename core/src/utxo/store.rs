//! The wallet-state collaborator interface.
//!
//! The wallet core never owns the UTXO set. Whoever does — a persistent
//! store on the server, IndexedDB glue in the browser — implements
//! [`UtxoProvider`] and hands the core read-only snapshots. The only
//! mutation in the whole lifecycle is [`UtxoProvider::commit`], called
//! *after* a transaction is signed and the caller has decided to submit
//! it. Selection itself reserves nothing, so a cancelled or failed draft
//! leaves the set untouched.

use std::collections::HashSet;
use thiserror::Error;

use super::types::{CurrencyType, Utxo, UtxoOrigin};

/// Errors from wallet-state mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The origin is already reserved by another in-flight draft.
    /// This is the double-spend choke point firing.
    #[error("output {origin} is already reserved by another draft")]
    AlreadyReserved {
        /// Display form of the contested origin.
        origin: String,
    },

    /// The origin does not exist in the available set.
    #[error("output {origin} is not in the available set")]
    UnknownOutput {
        /// Display form of the missing origin.
        origin: String,
    },
}

/// Read access to reservation state.
///
/// Split out from [`UtxoProvider`] so the selector can take just the
/// capability it needs — it reads reservations, it never creates them.
pub trait ReservationView {
    /// Whether the given origin is held by an unconfirmed local draft.
    fn is_reserved(&self, origin: &UtxoOrigin) -> bool;
}

/// A plain set of origins works as a reservation view, which is handy in
/// tests and for callers that snapshot reservations into a `HashSet`.
impl ReservationView for HashSet<UtxoOrigin> {
    fn is_reserved(&self, origin: &UtxoOrigin) -> bool {
        self.contains(origin)
    }
}

/// The full wallet-state collaborator contract.
///
/// Read operations serve selection; `commit` is invoked exactly once per
/// submitted transaction, after signing succeeds.
pub trait UtxoProvider: ReservationView {
    /// Snapshot of the available (unspent, not locked-out-of-existence)
    /// outputs for one currency, in the provider's stable order. Selection
    /// order follows this order, so providers should keep it deterministic.
    fn available(&self, currency: CurrencyType) -> Vec<Utxo>;

    /// Reserves the given origins for a submitted transaction. All-or-
    /// nothing: if any origin is unknown or already reserved, nothing is
    /// reserved and the error names the first offender.
    fn commit(&mut self, origins: &[UtxoOrigin]) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// MemoryUtxoStore
// ---------------------------------------------------------------------------

/// In-memory wallet state. The reference implementation of
/// [`UtxoProvider`], used by tests and the node's demo paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryUtxoStore {
    utxos: Vec<Utxo>,
    reserved: HashSet<UtxoOrigin>,
}

impl MemoryUtxoStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output to the available set.
    pub fn insert(&mut self, utxo: Utxo) {
        self.utxos.push(utxo);
    }

    /// Number of outputs currently tracked (reserved ones included).
    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    /// Whether the store tracks no outputs at all.
    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }
}

impl ReservationView for MemoryUtxoStore {
    fn is_reserved(&self, origin: &UtxoOrigin) -> bool {
        self.reserved.contains(origin)
    }
}

impl UtxoProvider for MemoryUtxoStore {
    fn available(&self, currency: CurrencyType) -> Vec<Utxo> {
        self.utxos
            .iter()
            .filter(|u| u.currency == currency && !u.locked)
            .cloned()
            .collect()
    }

    fn commit(&mut self, origins: &[UtxoOrigin]) -> Result<(), StoreError> {
        // Validate the whole batch before touching reservation state so a
        // failed commit is a no-op.
        for origin in origins {
            if self.reserved.contains(origin) {
                return Err(StoreError::AlreadyReserved {
                    origin: origin.to_string(),
                });
            }
            if !self.utxos.iter().any(|u| &u.origin == origin) {
                return Err(StoreError::UnknownOutput {
                    origin: origin.to_string(),
                });
            }
        }
        for origin in origins {
            self.reserved.insert(origin.clone());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
