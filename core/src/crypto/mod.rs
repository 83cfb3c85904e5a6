//! # Cryptographic Primitives
//!
//! Everything security-related in the wallet core flows through here.
//!
//! We deliberately chose boring, audited cryptography:
//!
//! - **ECDSA over NIST P-256** for signatures — because the browser-side
//!   companion implementation signs with WebCrypto, and P-256 is the one
//!   curve WebCrypto supports everywhere.
//! - **SHA-256** for digests — transaction ids and addresses both come
//!   from it, and the companion implementation must reproduce them.
//!
//! Everything here is a thin, type-safe wrapper around the RustCrypto
//! implementations. If you are tempted to optimize these functions, go
//! read about timing attacks first.

pub mod hash;
pub mod keys;
pub mod signer;

// Re-export the things callers actually need so they don't have to
// memorize the module hierarchy.
pub use hash::{sha256, sha256_array};
pub use keys::{KeyError, Keypair, PublicKey};
pub use signer::{sign_digest, verify_digest, EcdsaSignature, SignError};
