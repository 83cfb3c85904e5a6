//! # Transaction Pipeline
//!
//! Construction, canonical encoding, hashing, and signing of Meridian
//! transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs      — TxType, TxInput, TxOutput, InterestAssign, Transaction
//! fee.rs        — FeePolicy: fixed-percentage gas distribution
//! builder.rs    — TransactionBuilder with value-conservation checks
//! serializer.rs — Canonical field-order-fixed byte encoding
//! hasher.rs     — SHA-256 digests and transaction ids
//! signing.rs    — Async ECDSA signing / verification of whole transactions
//! ```
//!
//! ## Lifecycle
//!
//! One linear pass: build → serialize → hash → sign → hand off. A signed
//! transaction is never mutated again; its id is always recomputed from
//! the current content rather than cached, so the two cannot drift apart.
//!
//! ## Why the serializer is hand-written
//!
//! The transaction id is a hash of the canonical bytes, and an
//! independently maintained browser implementation must produce the very
//! same bytes. Relying on any serialization library's defaults (field
//! order, number formatting, whitespace) would make the contract
//! implementation-defined. Instead [`serializer`] writes every byte
//! explicitly and documents the format as a schema both sides test
//! against shared golden vectors.

pub mod builder;
pub mod fee;
pub mod hasher;
pub mod serializer;
pub mod signing;
pub mod types;

pub use builder::{BuildError, TransactionBuilder};
pub use fee::FeePolicy;
pub use hasher::{hash_output, hash_transaction, transaction_id};
pub use serializer::{serialize_output, serialize_transaction};
pub use signing::{sign_transaction, verify_transaction};
pub use types::{InterestAssign, Transaction, TxInput, TxOutput, TxType};
