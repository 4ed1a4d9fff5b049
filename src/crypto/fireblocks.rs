//! Fireblocks-compatible EdDSA signer
//!
//! The custodial key model hands over a bare 256-bit private scalar, not an
//! Ed25519 seed: there is no hash-expansion or clamping step, and the nonce
//! digest is `SHA-512(scalar bytes || le32(scalar) || message)` instead of
//! the RFC 8032 prefix construction. Both divergences are fixed by the
//! external signing contract and reproduced here byte-exactly. The output
//! is a standard 64-byte `R || s` signature that verifies under normal
//! EdDSA verification.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::errors::WalletError;

const SCALAR_LEN: usize = 32;

/// A parsed private scalar, keeping the raw decoded bytes alongside the
/// reduced scalar because the nonce digest hashes both forms.
struct PrivateScalar {
    /// Big-endian bytes exactly as decoded from the caller's hex.
    raw_bytes: Zeroizing<[u8; 32]>,
    /// The scalar value; canonical (< L) by construction.
    scalar: Scalar,
}

/// Parse a hex-encoded big-endian scalar.
///
/// The hex must decode to exactly 32 bytes and the integer must be below
/// the group order L; anything else fails with `InvalidScalar`.
fn parse_scalar(scalar_hex: &str) -> Result<PrivateScalar, WalletError> {
    let decoded = Zeroizing::new(
        hex::decode(scalar_hex)
            .map_err(|e| WalletError::InvalidScalar(format!("scalar is not valid hex: {}", e)))?,
    );
    if decoded.len() != SCALAR_LEN {
        return Err(WalletError::InvalidScalar(format!(
            "scalar must be {} bytes, got {}",
            SCALAR_LEN,
            decoded.len()
        )));
    }

    let mut raw_bytes = Zeroizing::new([0u8; 32]);
    raw_bytes.copy_from_slice(&decoded);

    // The hex prints the integer big-endian; curve25519-dalek wants
    // little-endian.
    let mut le_bytes = Zeroizing::new(*raw_bytes);
    le_bytes.reverse();
    let scalar = Option::<Scalar>::from(Scalar::from_canonical_bytes(*le_bytes)).ok_or_else(
        || WalletError::InvalidScalar("scalar is not below the group order".to_string()),
    )?;

    Ok(PrivateScalar { raw_bytes, scalar })
}

fn reduce_wide(digest: impl AsRef<[u8]>) -> Scalar {
    let mut wide = [0u8; 64];
    wide.copy_from_slice(digest.as_ref());
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// `A = a * B` from a raw hex scalar, compressed Edwards encoding.
///
/// No hashing, no clamping; the scalar is the private key directly.
pub fn public_key_from_scalar(scalar_hex: &str) -> Result<[u8; 32], WalletError> {
    let parsed = parse_scalar(scalar_hex)?;
    Ok(EdwardsPoint::mul_base(&parsed.scalar).compress().to_bytes())
}

/// Sign `message` with a raw hex scalar, producing `R || s`.
pub fn sign(message: &[u8], scalar_hex: &str) -> Result<[u8; 64], WalletError> {
    let parsed = parse_scalar(scalar_hex)?;
    let a = parsed.scalar;

    // Nonce digest: SHA-512(scalar bytes as decoded || le32(a) || message).
    let mut hasher = Sha512::new();
    hasher.update(parsed.raw_bytes.as_ref());
    hasher.update(a.to_bytes());
    hasher.update(message);
    let r = reduce_wide(hasher.finalize());

    let serialized_r = EdwardsPoint::mul_base(&r).compress().to_bytes();
    let public_key = EdwardsPoint::mul_base(&a).compress().to_bytes();

    // k = H(R || A || message) mod L, the standard Schnorr challenge.
    let mut hasher = Sha512::new();
    hasher.update(serialized_r);
    hasher.update(public_key);
    hasher.update(message);
    let k = reduce_wide(hasher.finalize());

    let s = k * a + r;

    trace!(message_len = message.len(), "produced raw-scalar eddsa signature");
    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(&serialized_r);
    signature[32..].copy_from_slice(&s.to_bytes());
    Ok(signature)
}
