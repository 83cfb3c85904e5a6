// Copyright (c) 2026 Meridian Contributors. MIT License.
// See LICENSE for details.

//! # Meridian Wallet Core
//!
//! The account-derivation and transaction pipeline of the Meridian UTXO
//! wallet. This crate owns everything that must be byte-for-byte
//! reproducible between independent wallet implementations: identity
//! derivation, coin selection, canonical transaction encoding, hashing,
//! and ECDSA signing.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the stages of the pipeline:
//!
//! - **crypto** — P-256 key material, SHA-256 digests, and the async signer.
//! - **identity** — Accounts: address and account-id derivation from a key.
//! - **utxo** — The spendable-output model and first-sufficient selection.
//! - **transaction** — Building, canonical serialization, hashing, signing.
//! - **config** — Protocol constants. Magic numbers live here and only here.
//!
//! ## Determinism contract
//!
//! Two independently written implementations of this pipeline must produce
//! identical addresses, account ids, canonical bytes, and transaction ids
//! from the same inputs. Every function on that path is pure and
//! synchronous; the one suspending operation (ECDSA signing, which may be
//! backed by a host crypto facility) is isolated in [`crypto::signer`].
//!
//! ## Design Philosophy
//!
//! 1. Pure functions over shared state. The UTXO set is owned by the
//!    caller; this crate reads snapshots and never mutates them.
//! 2. No floating point anywhere near value fields.
//! 3. Format, cryptographic, and resource failures are distinct error
//!    types so callers can offer the right remediation.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;
pub mod utxo;
