//! # Identity
//!
//! Account derivation for the Meridian wallet. An identity is one private
//! scalar; everything else — the public point, the 40-hex address, the
//! 8-digit account id — is a deterministic, one-way function of it. An
//! [`Account`] is therefore fully reconstructible from the private key
//! alone, which is what makes "import from private key" possible.

pub mod account;

pub use account::{derive_account_id, derive_address, Account, AccountRecord};
