//! Signing and verification of whole transactions.
//!
//! Thin glue between the canonical pipeline and the raw digest signer:
//! hash the transaction, sign the digest, attach the signature. The
//! signature never enters the canonical encoding, so a transaction's id
//! is identical before and after this stage.

use tracing::debug;

use crate::crypto::keys::{Keypair, PublicKey};
use crate::crypto::signer::{sign_digest, verify_digest, SignError};

use super::hasher::{hash_transaction, transaction_id};
use super::types::Transaction;

/// Signs a transaction in place with the account's keypair.
///
/// Any existing signature is replaced. The digest is the SHA-256 of the
/// canonical encoding, so two calls sign the same bytes even though the
/// resulting signatures differ (ECDSA nonces are random).
pub async fn sign_transaction(tx: &mut Transaction, keypair: &Keypair) -> Result<(), SignError> {
    let digest = hash_transaction(tx);
    let signature = sign_digest(keypair, digest).await?;

    debug!(id = %transaction_id(tx), "transaction signed");

    tx.signature = Some(signature);
    Ok(())
}

/// Verifies a transaction's signature against a public key.
///
/// Recomputes the digest from the current content, so a transaction
/// mutated after signing fails verification even though it still carries
/// a well-formed signature. An unsigned transaction verifies as `false`.
pub fn verify_transaction(tx: &Transaction, public: &PublicKey) -> bool {
    let Some(signature) = &tx.signature else {
        return false;
    };
    let digest = hash_transaction(tx);
    verify_digest(public, &digest, signature)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::types::{InterestAssign, TxInput, TxOutput, TxType};
    use crate::utxo::types::{CurrencyType, UtxoOrigin};

    fn sample_tx() -> Transaction {
        Transaction {
            tx_type: TxType::Normal,
            inputs: vec![TxInput {
                origin: UtxoOrigin::Outpoint {
                    tx_id: "a".repeat(64),
                    index: 0,
                },
            }],
            outputs: vec![TxOutput::new(&"c".repeat(40), 95, CurrencyType::Native)],
            interest_assign: vec![InterestAssign {
                node: "agg".into(),
                amount: 5,
            }],
            signature: None,
        }
    }

    #[tokio::test]
    async fn sign_then_verify() {
        let kp = Keypair::generate();
        let mut tx = sample_tx();

        sign_transaction(&mut tx, &kp).await.unwrap();
        assert!(tx.is_signed());
        assert!(verify_transaction(&tx, kp.public_key()));
    }

    #[tokio::test]
    async fn unsigned_transaction_does_not_verify() {
        let kp = Keypair::generate();
        assert!(!verify_transaction(&sample_tx(), kp.public_key()));
    }

    #[tokio::test]
    async fn mutation_after_signing_fails_verification() {
        let kp = Keypair::generate();
        let mut tx = sample_tx();
        sign_transaction(&mut tx, &kp).await.unwrap();

        tx.outputs[0].to_value += 1;
        assert!(!verify_transaction(&tx, kp.public_key()));
    }

    #[tokio::test]
    async fn wrong_key_fails_verification() {
        let kp = Keypair::generate();
        let other = Keypair::generate();
        let mut tx = sample_tx();
        sign_transaction(&mut tx, &kp).await.unwrap();

        assert!(!verify_transaction(&tx, other.public_key()));
    }

    #[tokio::test]
    async fn signing_preserves_transaction_id() {
        let kp = Keypair::generate();
        let mut tx = sample_tx();
        let before = transaction_id(&tx);
        sign_transaction(&mut tx, &kp).await.unwrap();
        assert_eq!(before, transaction_id(&tx));
    }

    #[tokio::test]
    async fn resigning_replaces_signature() {
        let kp = Keypair::generate();
        let mut tx = sample_tx();
        sign_transaction(&mut tx, &kp).await.unwrap();
        let first = tx.signature.clone();
        sign_transaction(&mut tx, &kp).await.unwrap();

        // Randomized nonces make a repeat identical only with negligible
        // probability; both must still verify.
        assert_ne!(first, tx.signature);
        assert!(verify_transaction(&tx, kp.public_key()));
    }
}
