//! # Key Management
//!
//! P-256 keypair construction and coordinate encoding for Meridian
//! identities.
//!
//! Every wallet account traces back to one 32-byte private scalar. The
//! scalar is carried around as a 64-character hex string because that is
//! the import/export format users see, and — importantly — because the
//! account id is derived from the ASCII bytes of that string (see
//! [`crate::identity::account`]), so the normalized hex form is itself
//! part of the derivation contract.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS RNG (`OsRng`). If your OS RNG is broken,
//!   you have bigger problems than this wallet.
//! - Key bytes are never logged. If you add logging to this module, you
//!   will be asked to leave.

use p256::ecdsa::{SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::{EncodedPoint, FieldBytes, SecretKey};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use crate::config::{COORDINATE_LEN, PRIV_KEY_HEX_LEN, UNCOMPRESSED_POINT_LEN};

/// Errors that can occur during key operations.
///
/// Format and cryptographic failures are separate variants because callers
/// remediate them differently: a format error is a user typo, a scalar
/// error means the key material itself is unusable.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The private key string is not exactly 64 hex characters after
    /// stripping an optional `0x`/`0X` prefix.
    #[error("invalid private key format: {reason}")]
    InvalidKeyFormat {
        /// What exactly was wrong with the input.
        reason: String,
    },

    /// The decoded scalar is zero or not below the P-256 group order.
    #[error("private key scalar out of range: must lie in [1, n-1]")]
    InvalidScalar,

    /// The supplied coordinates do not satisfy the P-256 curve equation.
    #[error("public key point is not on the P-256 curve")]
    PointNotOnCurve,
}

/// Normalizes a user-supplied private key string.
///
/// Strips an optional `0x`/`0X` prefix, lowercases, and validates that
/// exactly [`PRIV_KEY_HEX_LEN`] hex characters remain. The normalized form
/// is canonical: account-id derivation hashes its ASCII bytes, so two
/// spellings of the same key (`0xAB...` vs `ab...`) must collapse to one
/// string here.
pub fn normalize_priv_hex(input: &str) -> Result<String, KeyError> {
    let stripped = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if stripped.len() != PRIV_KEY_HEX_LEN {
        return Err(KeyError::InvalidKeyFormat {
            reason: format!(
                "expected {} hex characters, got {}",
                PRIV_KEY_HEX_LEN,
                stripped.len()
            ),
        });
    }
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(KeyError::InvalidKeyFormat {
            reason: "contains non-hexadecimal characters".into(),
        });
    }

    Ok(stripped.to_ascii_lowercase())
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// The public half of a Meridian identity: an affine point on P-256.
///
/// Coordinates are stored as 32-byte big-endian integers, zero-padded on
/// the left — the same fixed-width form the companion implementation
/// produces, so hex comparisons between the two are byte-exact.
///
/// Construction always validates the curve equation; a `PublicKey` that
/// exists is a point that is actually on the curve.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    x: [u8; COORDINATE_LEN],
    y: [u8; COORDINATE_LEN],
}

impl PublicKey {
    /// Builds a public key from raw affine coordinates, validating that
    /// the point satisfies the curve equation.
    pub fn from_coordinates(
        x: [u8; COORDINATE_LEN],
        y: [u8; COORDINATE_LEN],
    ) -> Result<Self, KeyError> {
        let point = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(&x),
            FieldBytes::from_slice(&y),
            false,
        );
        let valid: Option<p256::PublicKey> = p256::PublicKey::from_encoded_point(&point).into();
        if valid.is_none() {
            return Err(KeyError::PointNotOnCurve);
        }
        Ok(Self { x, y })
    }

    /// Parses a public key from two 64-character hex coordinate strings.
    pub fn from_hex_coordinates(x_hex: &str, y_hex: &str) -> Result<Self, KeyError> {
        let decode = |s: &str| -> Result<[u8; COORDINATE_LEN], KeyError> {
            let bytes = hex::decode(s).map_err(|_| KeyError::InvalidKeyFormat {
                reason: "coordinate is not valid hex".into(),
            })?;
            bytes
                .try_into()
                .map_err(|_| KeyError::InvalidKeyFormat {
                    reason: format!("coordinate must be {} bytes", COORDINATE_LEN),
                })
        };
        Self::from_coordinates(decode(x_hex)?, decode(y_hex)?)
    }

    /// Internal constructor for coordinates that come straight from the
    /// curve library and are therefore already known to be on the curve.
    pub(crate) fn from_p256(key: &p256::PublicKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut x = [0u8; COORDINATE_LEN];
        let mut y = [0u8; COORDINATE_LEN];
        // SEC1 uncompressed encoding always carries full-width coordinates.
        x.copy_from_slice(point.x().expect("uncompressed point has x"));
        y.copy_from_slice(point.y().expect("uncompressed point has y"));
        Self { x, y }
    }

    /// The X coordinate as 32 big-endian bytes.
    pub fn x(&self) -> &[u8; COORDINATE_LEN] {
        &self.x
    }

    /// The Y coordinate as 32 big-endian bytes.
    pub fn y(&self) -> &[u8; COORDINATE_LEN] {
        &self.y
    }

    /// The X coordinate as a 64-character lowercase hex string.
    pub fn x_hex(&self) -> String {
        hex::encode(self.x)
    }

    /// The Y coordinate as a 64-character lowercase hex string.
    pub fn y_hex(&self) -> String {
        hex::encode(self.y)
    }

    /// The uncompressed SEC1 encoding: `0x04 || X || Y`, 65 bytes.
    ///
    /// This is the exact byte string addresses are derived from, so the
    /// layout is part of the cross-implementation contract.
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_POINT_LEN] {
        let mut out = [0u8; UNCOMPRESSED_POINT_LEN];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x);
        out[33..].copy_from_slice(&self.y);
        out
    }

    /// Converts to a `VerifyingKey` for use with the ECDSA verifier.
    ///
    /// Cannot fail for keys built through our constructors, but crypto
    /// code does not get to assume things are fine.
    pub fn verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        let point = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(&self.x),
            FieldBytes::from_slice(&self.y),
            false,
        );
        VerifyingKey::from_encoded_point(&point).map_err(|_| KeyError::PointNotOnCurve)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x_hex(), self.y_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(x={}…)", &self.x_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// A Meridian identity keypair: a P-256 secret scalar plus its derived
/// public point.
///
/// The normalized private hex string is kept alongside the scalar because
/// account-id derivation operates on the hex string's ASCII bytes, not on
/// the decoded scalar (see [`crate::identity::account::derive_account_id`]).
///
/// `Keypair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Exporting a private key should be a deliberate act, not something that
/// happens because a keypair ended up in a JSON response. Use
/// [`priv_hex`](Self::priv_hex) explicitly.
pub struct Keypair {
    secret: SecretKey,
    public: PublicKey,
    priv_hex: String,
}

impl Keypair {
    /// Generates a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let secret = SecretKey::random(&mut OsRng);
        let priv_hex = hex::encode(secret.to_bytes());
        let public = PublicKey::from_p256(&secret.public_key());
        Self {
            secret,
            public,
            priv_hex,
        }
    }

    /// Reconstructs a keypair from a hex-encoded private key.
    ///
    /// Accepts an optional `0x`/`0X` prefix and mixed case; everything
    /// else about the format is strict. Fails with
    /// [`KeyError::InvalidKeyFormat`] on malformed input and
    /// [`KeyError::InvalidScalar`] when the scalar is zero or not below
    /// the group order.
    pub fn from_priv_hex(input: &str) -> Result<Self, KeyError> {
        let priv_hex = normalize_priv_hex(input)?;
        // Infallible after normalization: 64 lowercase hex chars.
        let bytes = hex::decode(&priv_hex).expect("normalized hex decodes");
        let secret = SecretKey::from_slice(&bytes).map_err(|_| KeyError::InvalidScalar)?;
        let public = PublicKey::from_p256(&secret.public_key());
        Ok(Self {
            secret,
            public,
            priv_hex,
        })
    }

    /// The normalized 64-character lowercase private key hex string.
    ///
    /// Handle with care: this is the only secret standing between an
    /// attacker and the account. Never log it.
    pub fn priv_hex(&self) -> &str {
        &self.priv_hex
    }

    /// The derived public point.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// An ECDSA signing key view of the secret scalar.
    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from(&self.secret)
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
            public: self.public,
            priv_hex: self.priv_hex.clone(),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material in debug output. Not even partially.
        write!(f, "Keypair(pub_x={}…)", &self.public.x_hex()[..16])
    }
}

impl PartialEq for Keypair {
    /// Two keypairs are equal if their public points match. Comparing
    /// secret material non-constant-time is a bad habit, and for identity
    /// purposes the public point is what matters.
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for Keypair {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
