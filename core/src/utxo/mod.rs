//! # UTXO Model & Selection
//!
//! The wallet's view of spendable value: discrete, indivisible outputs
//! that are either unspent or consumed — never partially spent.
//!
//! Ownership is split deliberately:
//!
//! - The **available set** (which outputs exist, which are reserved by
//!   in-flight drafts) is owned by an external wallet-state collaborator
//!   behind the [`UtxoProvider`] trait. It is the single choke point for
//!   double-spend races.
//! - **Selection** ([`select_utxos`]) is a pure function over a snapshot
//!   of that set. It reads, it never reserves — reservation happens only
//!   when the caller commits a signed transaction.

pub mod selector;
pub mod store;
pub mod types;

pub use selector::{select_utxos, Selection, SelectionError};
pub use store::{MemoryUtxoStore, ReservationView, StoreError, UtxoProvider};
pub use types::{CurrencyType, Utxo, UtxoOrigin};
