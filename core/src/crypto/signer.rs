//! # ECDSA Signer
//!
//! Signature generation and verification over P-256, operating on
//! precomputed 32-byte digests.
//!
//! Signing is the one operation in the wallet core that may suspend: in
//! the browser-side companion it is backed by WebCrypto, which executes
//! asynchronously, and on the server side we push it onto the blocking
//! pool so callers can await or cancel it. Everything upstream of the
//! signer stays synchronous and pure.
//!
//! Nonces are randomized (`OsRng`), so two signatures over the same digest
//! differ — that is fine, the contract is that every produced signature
//! independently verifies. The underlying `p256` signer retries nonce
//! generation internally until both `r` and `s` are nonzero, so an invalid
//! signature is never emitted.

use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::Signature;
use p256::FieldBytes;
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use super::keys::{Keypair, PublicKey};
use crate::config::SIGNATURE_COMPONENT_HEX_LEN;

/// Errors that can occur while producing a signature.
#[derive(Debug, Error)]
pub enum SignError {
    /// The scalar or digest was rejected by the underlying signer.
    /// Retrying with the same inputs cannot succeed.
    #[error("ECDSA signing failed: key material or digest rejected")]
    SigningFailed,

    /// The blocking signing task was cancelled or panicked before
    /// completing. No partial state is left behind.
    #[error("signing task did not complete: {0}")]
    TaskFailed(String),

    /// A signature component string could not be parsed back into a
    /// valid scalar in `[1, n-1]`.
    #[error("malformed signature component: {reason}")]
    MalformedComponent {
        /// What exactly was wrong with the component.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// EcdsaSignature
// ---------------------------------------------------------------------------

/// An ECDSA (r, s) signature pair over P-256.
///
/// Components are stored as fixed-width 32-byte big-endian integers and
/// exposed as 64-character hex strings, matching the wire format the
/// companion implementation emits. Both components of a constructed
/// signature are guaranteed nonzero and below the group order.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EcdsaSignature {
    r: [u8; 32],
    s: [u8; 32],
}

impl EcdsaSignature {
    /// Parses a signature from fixed-width hex components, validating
    /// that both scalars lie in `[1, n-1]`.
    pub fn from_hex_components(r_hex: &str, s_hex: &str) -> Result<Self, SignError> {
        let decode = |name: &str, s: &str| -> Result<[u8; 32], SignError> {
            if s.len() != SIGNATURE_COMPONENT_HEX_LEN {
                return Err(SignError::MalformedComponent {
                    reason: format!(
                        "{} must be {} hex characters, got {}",
                        name,
                        SIGNATURE_COMPONENT_HEX_LEN,
                        s.len()
                    ),
                });
            }
            let bytes = hex::decode(s).map_err(|_| SignError::MalformedComponent {
                reason: format!("{} is not valid hex", name),
            })?;
            Ok(bytes.try_into().expect("length checked above"))
        };

        let r = decode("r", r_hex)?;
        let s = decode("s", s_hex)?;

        // Range-check by round-tripping through the ecdsa crate, which
        // rejects zero and >= n components.
        Signature::from_scalars(FieldBytes::from(r), FieldBytes::from(s)).map_err(|_| {
            SignError::MalformedComponent {
                reason: "component out of range [1, n-1]".into(),
            }
        })?;

        Ok(Self { r, s })
    }

    fn from_p256(sig: &Signature) -> Self {
        let (r, s) = sig.split_bytes();
        Self {
            r: r.into(),
            s: s.into(),
        }
    }

    fn to_p256(self) -> Result<Signature, SignError> {
        Signature::from_scalars(FieldBytes::from(self.r), FieldBytes::from(self.s)).map_err(
            |_| SignError::MalformedComponent {
                reason: "component out of range [1, n-1]".into(),
            },
        )
    }

    /// The `r` component as a 64-character lowercase hex string.
    pub fn r_hex(&self) -> String {
        hex::encode(self.r)
    }

    /// The `s` component as a 64-character lowercase hex string.
    pub fn s_hex(&self) -> String {
        hex::encode(self.s)
    }
}

impl fmt::Debug for EcdsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep Debug readable without dumping 128 hex characters into logs.
        write!(
            f,
            "EcdsaSignature(r={}.., s={}..)",
            &self.r_hex()[..8],
            &self.s_hex()[..8]
        )
    }
}

// ---------------------------------------------------------------------------
// Signing & Verification
// ---------------------------------------------------------------------------

/// Signs a precomputed 32-byte digest with the keypair's secret scalar.
///
/// The actual scalar arithmetic runs on the blocking thread pool so async
/// callers never stall an executor thread. Dropping the returned future
/// cancels the request from the caller's perspective; the detached
/// computation touches no shared state, so cancellation is always safe.
///
/// # Example
///
/// ```no_run
/// # async fn demo() {
/// use meridian_core::crypto::{sha256_array, sign_digest, verify_digest, Keypair};
///
/// let kp = Keypair::generate();
/// let digest = sha256_array(b"canonical transaction bytes");
/// let sig = sign_digest(&kp, digest).await.unwrap();
/// assert!(verify_digest(kp.public_key(), &digest, &sig));
/// # }
/// ```
pub async fn sign_digest(
    keypair: &Keypair,
    digest: [u8; 32],
) -> Result<EcdsaSignature, SignError> {
    let signing_key = keypair.signing_key();

    let sig = tokio::task::spawn_blocking(move || {
        signing_key
            .sign_prehash_with_rng(&mut OsRng, &digest)
            .map_err(|_| SignError::SigningFailed)
    })
    .await
    .map_err(|e| SignError::TaskFailed(e.to_string()))??;

    Ok(EcdsaSignature::from_p256(&sig))
}

/// Verifies an (r, s) signature over a 32-byte digest against a public key.
///
/// Returns a plain `bool` rather than a `Result` because the vast majority
/// of callers want a yes/no answer and do not care about the specific
/// failure mode. Any malformed component, off-curve key, or mismatched
/// digest simply verifies as `false`.
pub fn verify_digest(public: &PublicKey, digest: &[u8; 32], signature: &EcdsaSignature) -> bool {
    let Ok(verifying_key) = public.verifying_key() else {
        return false;
    };
    let Ok(sig) = signature.to_p256() else {
        return false;
    };
    verifying_key.verify_prehash(digest, &sig).is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256_array;

    #[tokio::test]
    async fn sign_verify_roundtrip() {
        let kp = Keypair::generate();
        let digest = sha256_array(b"move 100 units");
        let sig = sign_digest(&kp, digest).await.unwrap();
        assert!(verify_digest(kp.public_key(), &digest, &sig));
    }

    #[tokio::test]
    async fn components_are_fixed_width_hex() {
        let kp = Keypair::generate();
        let digest = sha256_array(b"payload");
        let sig = sign_digest(&kp, digest).await.unwrap();
        assert_eq!(sig.r_hex().len(), 64);
        assert_eq!(sig.s_hex().len(), 64);
        assert!(sig.r_hex().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn wrong_digest_fails_verification() {
        let kp = Keypair::generate();
        let digest = sha256_array(b"original");
        let sig = sign_digest(&kp, digest).await.unwrap();
        let other = sha256_array(b"tampered");
        assert!(!verify_digest(kp.public_key(), &other, &sig));
    }

    #[tokio::test]
    async fn wrong_key_fails_verification() {
        let kp = Keypair::generate();
        let intruder = Keypair::generate();
        let digest = sha256_array(b"message");
        let sig = sign_digest(&kp, digest).await.unwrap();
        assert!(!verify_digest(intruder.public_key(), &digest, &sig));
    }

    #[tokio::test]
    async fn single_bit_flip_invalidates_signature() {
        let kp = Keypair::generate();
        let mut digest = sha256_array(b"exact bytes matter");
        let sig = sign_digest(&kp, digest).await.unwrap();
        digest[0] ^= 0x01;
        assert!(!verify_digest(kp.public_key(), &digest, &sig));
    }

    #[tokio::test]
    async fn randomized_nonces_still_verify() {
        // Nonces are random, so two signatures over the same digest will
        // almost surely differ — but both must verify.
        let kp = Keypair::generate();
        let digest = sha256_array(b"same digest twice");
        let sig1 = sign_digest(&kp, digest).await.unwrap();
        let sig2 = sign_digest(&kp, digest).await.unwrap();
        assert!(verify_digest(kp.public_key(), &digest, &sig1));
        assert!(verify_digest(kp.public_key(), &digest, &sig2));
    }

    #[tokio::test]
    async fn hex_component_roundtrip() {
        let kp = Keypair::generate();
        let digest = sha256_array(b"roundtrip");
        let sig = sign_digest(&kp, digest).await.unwrap();
        let recovered =
            EcdsaSignature::from_hex_components(&sig.r_hex(), &sig.s_hex()).unwrap();
        assert_eq!(sig, recovered);
        assert!(verify_digest(kp.public_key(), &digest, &recovered));
    }

    #[test]
    fn zero_component_is_rejected() {
        let zero = "0".repeat(64);
        let one = format!("{}1", "0".repeat(63));
        assert!(matches!(
            EcdsaSignature::from_hex_components(&zero, &one),
            Err(SignError::MalformedComponent { .. })
        ));
    }

    #[test]
    fn short_component_is_rejected() {
        assert!(EcdsaSignature::from_hex_components("abcd", "abcd").is_err());
    }
}
