//! Proof that a request was made by the wallet it names.
//!
//! The client signs [`authorization_message`] with `personal_sign` and sends
//! the signature with the account and the issue time. The server recovers the
//! signer from the signature and accepts the request only when it matches the
//! claimed account and the issue time is within the configured window.

use chrono::Utc;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use sha3::{Digest, Keccak256};
use thiserror::Error;

use crate::ledger::address::same_address;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("no signed authorization was sent")]
    Missing,
    #[error("malformed signature: {0}")]
    Malformed(String),
    #[error("authorization issued at {0} is outside the accepted window")]
    Expired(i64),
    #[error("authorization was signed by {0}")]
    WrongSigner(String),
}

/// Text the wallet signs. The account is lower-cased so any checksum casing
/// of the same address produces the same message.
pub fn authorization_message(account: &str, issued_at: i64) -> String {
    format!(
        "LegalTrack request authorization\nAccount: {}\nIssued at: {issued_at}",
        account.trim().to_lowercase()
    )
}

/// Keccak-256 of the `personal_sign` envelope around `message`.
pub fn message_digest(message: &str) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(format!("\x19Ethereum Signed Message:\n{}", message.len()));
    hasher.update(message);
    hasher.finalize().into()
}

/// Lower-case `0x` address of a public key.
pub fn address_of(key: &VerifyingKey) -> String {
    let point = key.as_affine().to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Recovers the signing address from a 65-byte `r || s || v` hex signature.
pub fn recover_signer(message: &str, signature: &str) -> Result<String, ProofError> {
    let bytes = hex::decode(signature.trim().trim_start_matches("0x"))
        .map_err(|e| ProofError::Malformed(e.to_string()))?;
    if bytes.len() != 65 {
        return Err(ProofError::Malformed(format!(
            "expected 65 bytes, got {}",
            bytes.len()
        )));
    }

    let sig =
        Signature::from_slice(&bytes[..64]).map_err(|e| ProofError::Malformed(e.to_string()))?;
    let v = bytes[64];
    let recovery = RecoveryId::from_byte(if v >= 27 { v - 27 } else { v })
        .ok_or_else(|| ProofError::Malformed(format!("recovery byte {v}")))?;
    let key = VerifyingKey::recover_from_prehash(&message_digest(message), &sig, recovery)
        .map_err(|e| ProofError::Malformed(e.to_string()))?;
    Ok(address_of(&key))
}

/// Checks a signed authorization against an explicit clock.
pub fn verify_at(
    account: &str,
    issued_at: i64,
    signature: Option<&str>,
    now: i64,
    window_secs: i64,
) -> Result<(), ProofError> {
    let signature = signature
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ProofError::Missing)?;
    if (now - issued_at).abs() > window_secs {
        return Err(ProofError::Expired(issued_at));
    }

    let signer = recover_signer(&authorization_message(account, issued_at), signature)?;
    if same_address(&signer, account) {
        Ok(())
    } else {
        Err(ProofError::WrongSigner(signer))
    }
}

pub fn verify(
    account: &str,
    issued_at: i64,
    signature: Option<&str>,
    window_secs: i64,
) -> Result<(), ProofError> {
    verify_at(account, issued_at, signature, Utc::now().timestamp(), window_secs)
}
