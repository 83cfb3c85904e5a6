//! Canonical transaction encoding.
//!
//! This module is the single most safety-critical contract in the wallet:
//! transaction ids and signatures are computed over these bytes, and the
//! independently maintained browser implementation must reproduce them
//! bit-for-bit. Any divergence silently produces different hashes for
//! logically identical transactions and breaks signature verification
//! downstream. Every byte below is therefore written explicitly — no
//! serialization library defaults, no struct-derived field ordering.
//!
//! ## Encoding schema (frozen)
//!
//! JSON-shaped text, UTF-8, with these rules:
//!
//! - Object keys appear in the exact order given below. No whitespace
//!   anywhere.
//! - Integers are plain decimal digit sequences. Never scientific
//!   notation, never a floating-point representation.
//! - Strings escape only `"` as `\"` and `\` as `\\`. Addresses, tx ids,
//!   and node ids are hex/identifier strings, so in practice nothing is
//!   escaped; the rule exists so both implementations agree on the
//!   degenerate cases.
//! - The signature is never part of the encoding (it signs these bytes,
//!   so including it would be circular).
//!
//! ```text
//! output      = {"toAddress":"<hex40>","toValue":<int>,"currencyType":<0|1|2>}
//! input       = {"txHash":"<hex64>","index":<int>}        (outpoint origin)
//!             | {"certId":"<id>"}                          (certificate origin)
//! assign      = {"node":"<id>","amount":<int>}
//! transaction = {"txType":"<normal|crossChain|pledge>",
//!                "inputs":[input,…],"outputs":[output,…],
//!                "interestAssign":[assign,…]}
//! ```
//!
//! Golden vectors for this schema live in the tests below and in
//! `tests/e2e.rs`; the browser implementation tests against the same
//! literals.

use crate::transaction::types::{Transaction, TxInput, TxOutput};
use crate::utxo::types::UtxoOrigin;

/// Escapes a string per the canonical convention: `"` and `\` only.
fn push_escaped(buf: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            _ => buf.push(c),
        }
    }
}

fn push_output(buf: &mut String, output: &TxOutput) {
    buf.push_str("{\"toAddress\":\"");
    push_escaped(buf, &output.to_address);
    buf.push_str("\",\"toValue\":");
    buf.push_str(&output.to_value.to_string());
    buf.push_str(",\"currencyType\":");
    buf.push_str(&output.currency.wire_value().to_string());
    buf.push('}');
}

fn push_input(buf: &mut String, input: &TxInput) {
    match &input.origin {
        UtxoOrigin::Outpoint { tx_id, index } => {
            buf.push_str("{\"txHash\":\"");
            push_escaped(buf, tx_id);
            buf.push_str("\",\"index\":");
            buf.push_str(&index.to_string());
            buf.push('}');
        }
        UtxoOrigin::Certificate { cert_id } => {
            buf.push_str("{\"certId\":\"");
            push_escaped(buf, cert_id);
            buf.push_str("\"}");
        }
    }
}

/// Canonical encoding of a single output.
pub fn serialize_output(output: &TxOutput) -> Vec<u8> {
    let mut buf = String::with_capacity(96);
    push_output(&mut buf, output);
    buf.into_bytes()
}

/// Canonical encoding of a transaction, signature excluded.
///
/// This is the exact byte string that [`super::hasher::hash_transaction`]
/// digests and the signer signs.
pub fn serialize_transaction(tx: &Transaction) -> Vec<u8> {
    let mut buf = String::with_capacity(256);

    buf.push_str("{\"txType\":\"");
    buf.push_str(tx.tx_type.canonical_token());
    buf.push_str("\",\"inputs\":[");
    for (i, input) in tx.inputs.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        push_input(&mut buf, input);
    }
    buf.push_str("],\"outputs\":[");
    for (i, output) in tx.outputs.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        push_output(&mut buf, output);
    }
    buf.push_str("],\"interestAssign\":[");
    for (i, assign) in tx.interest_assign.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        buf.push_str("{\"node\":\"");
        push_escaped(&mut buf, &assign.node);
        buf.push_str("\",\"amount\":");
        buf.push_str(&assign.amount.to_string());
        buf.push('}');
    }
    buf.push_str("]}");

    buf.into_bytes()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::signer::EcdsaSignature;
    use crate::transaction::types::{InterestAssign, TxType};
    use crate::utxo::types::CurrencyType;

    fn sample_tx() -> Transaction {
        Transaction {
            tx_type: TxType::Normal,
            inputs: vec![
                TxInput {
                    origin: UtxoOrigin::Outpoint {
                        tx_id: "a".repeat(64),
                        index: 0,
                    },
                },
                TxInput {
                    origin: UtxoOrigin::Outpoint {
                        tx_id: "b".repeat(64),
                        index: 1,
                    },
                },
            ],
            outputs: vec![
                TxOutput::new(&"c".repeat(40), 120, CurrencyType::Native),
                TxOutput::new(&"d".repeat(40), 25, CurrencyType::Native),
            ],
            interest_assign: vec![
                InterestAssign {
                    node: "node-1".into(),
                    amount: 3,
                },
                InterestAssign {
                    node: "node-2".into(),
                    amount: 1,
                },
                InterestAssign {
                    node: "node-3".into(),
                    amount: 1,
                },
            ],
            signature: None,
        }
    }

    #[test]
    fn output_golden_vector() {
        // Shared with the browser implementation's test suite. If this
        // literal changes, every existing transaction id changes.
        let output = TxOutput::new(&"c".repeat(40), 120, CurrencyType::Native);
        let expected = format!(
            "{{\"toAddress\":\"{}\",\"toValue\":120,\"currencyType\":0}}",
            "c".repeat(40)
        );
        assert_eq!(serialize_output(&output), expected.as_bytes());
    }

    #[test]
    fn transaction_golden_vector() {
        let expected = format!(
            concat!(
                "{{\"txType\":\"normal\",\"inputs\":[",
                "{{\"txHash\":\"{a}\",\"index\":0}},",
                "{{\"txHash\":\"{b}\",\"index\":1}}",
                "],\"outputs\":[",
                "{{\"toAddress\":\"{c}\",\"toValue\":120,\"currencyType\":0}},",
                "{{\"toAddress\":\"{d}\",\"toValue\":25,\"currencyType\":0}}",
                "],\"interestAssign\":[",
                "{{\"node\":\"node-1\",\"amount\":3}},",
                "{{\"node\":\"node-2\",\"amount\":1}},",
                "{{\"node\":\"node-3\",\"amount\":1}}]}}"
            ),
            a = "a".repeat(64),
            b = "b".repeat(64),
            c = "c".repeat(40),
            d = "d".repeat(40),
        );
        assert_eq!(
            String::from_utf8(serialize_transaction(&sample_tx())).unwrap(),
            expected
        );
    }

    #[test]
    fn signature_is_excluded_from_encoding() {
        let mut tx = sample_tx();
        let before = serialize_transaction(&tx);
        tx.signature = Some(
            EcdsaSignature::from_hex_components(
                &format!("{:0>64}", "1"),
                &format!("{:0>64}", "2"),
            )
            .unwrap(),
        );
        assert_eq!(before, serialize_transaction(&tx));
    }

    #[test]
    fn certificate_input_encoding() {
        let mut tx = sample_tx();
        tx.tx_type = TxType::CrossChain;
        tx.inputs = vec![TxInput {
            origin: UtxoOrigin::Certificate {
                cert_id: "cert-0042".into(),
            },
        }];
        let bytes = String::from_utf8(serialize_transaction(&tx)).unwrap();
        assert!(bytes.starts_with("{\"txType\":\"crossChain\""));
        assert!(bytes.contains("{\"certId\":\"cert-0042\"}"));
        assert!(!bytes.contains("txHash"));
    }

    #[test]
    fn no_whitespace_anywhere() {
        let bytes = serialize_transaction(&sample_tx());
        assert!(!bytes.iter().any(|b| b.is_ascii_whitespace()));
    }

    #[test]
    fn values_encode_as_plain_decimal() {
        // u64::MAX must come out as 20 plain digits, not an exponent form.
        let output = TxOutput::new(&"f".repeat(40), u64::MAX, CurrencyType::Fuel);
        let text = String::from_utf8(serialize_output(&output)).unwrap();
        assert!(text.contains("\"toValue\":18446744073709551615,"));
        assert!(!text.contains('+') && !text.contains('.'));
    }

    #[test]
    fn escaping_convention() {
        let mut buf = String::new();
        push_escaped(&mut buf, "a\"b\\c");
        assert_eq!(buf, "a\\\"b\\\\c");
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(
            serialize_transaction(&sample_tx()),
            serialize_transaction(&sample_tx())
        );
    }

    #[test]
    fn field_change_changes_encoding() {
        let base = serialize_transaction(&sample_tx());
        let mut tx = sample_tx();
        tx.outputs[0].to_value += 1;
        assert_ne!(base, serialize_transaction(&tx));
    }
}
