//! Hardened-only HD key derivation for Ed25519
//!
//! Implements the BIP32-style tree adapted for Ed25519 (the SLIP-0010
//! ed25519 scheme): HMAC-SHA512 master split, then hardened child steps
//! over `0x00 || parent_key || be32(index)`. There is no non-hardened
//! branch; Ed25519 scalars cannot support public-key child derivation.
//!
//! Interoperates with hardware signers and other wallet implementations of
//! the same path convention (e.g. m/44'/607'/0'), so the HMAC key string,
//! the zero-byte padding and the big-endian index serialization are all
//! wire-exact.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::errors::WalletError;
use crate::core::path::DerivationPath;

type HmacSha512 = Hmac<Sha512>;

/// Offset added to every path segment before child derivation.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for the master node, fixed by the ed25519 curve convention.
const MASTER_HMAC_KEY: &[u8] = b"ed25519 seed";

/// HMAC-SHA512 per RFC 2104. Sole source of pseudorandomness for the tree.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64], WalletError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::CryptoError(format!("HMAC initialization failed: {}", e)))?;
    mac.update(data);
    let result = mac.finalize().into_bytes();

    let mut out = [0u8; 64];
    out.copy_from_slice(&result);
    Ok(out)
}

/// One node of the derivation tree.
///
/// `key` is a raw 32-byte scalar segment, not yet clamped or expanded into
/// a signing keypair; that step belongs to the caller or a downstream
/// signing library. Derivation never mutates a node, it always produces a
/// fresh one.
pub struct ExtendedKey {
    key: Zeroizing<[u8; 32]>,
    chain_code: [u8; 32],
}

impl ExtendedKey {
    /// Split a 64-byte HMAC output into (key, chain code).
    fn from_hmac_output(output: [u8; 64]) -> Self {
        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&output[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&output[32..]);
        Self { key, chain_code }
    }

    /// Master key: `HMAC-SHA512(key="ed25519 seed", data=seed)`, split 32/32.
    pub fn from_seed(seed: &[u8]) -> Result<Self, WalletError> {
        if seed.is_empty() {
            return Err(WalletError::InvalidSeed("seed must not be empty".to_string()));
        }
        Ok(Self::from_hmac_output(hmac_sha512(MASTER_HMAC_KEY, seed)?))
    }

    /// Hardened child derivation.
    ///
    /// `index` is the final index, hardened offset already applied. Input
    /// data is `0x00 || parent_key || be32(index)`; the leading zero byte
    /// is mandatory padding in the hardened-only scheme.
    pub fn derive_child(&self, index: u32) -> Result<Self, WalletError> {
        let mut data = Zeroizing::new(Vec::with_capacity(37));
        data.push(0x00);
        data.extend_from_slice(self.key.as_ref());
        data.extend_from_slice(&index.to_be_bytes());

        Ok(Self::from_hmac_output(hmac_sha512(&self.chain_code, &data)?))
    }

    /// Raw key segment bytes.
    pub fn private_key(&self) -> &[u8; 32] {
        &self.key
    }

    /// Chain code seeding further child derivations.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}

/// Hex-decode a master seed and compute the tree root.
pub fn master_key_from_seed(seed_hex: &str) -> Result<ExtendedKey, WalletError> {
    let seed = Zeroizing::new(
        hex::decode(seed_hex)
            .map_err(|e| WalletError::InvalidSeed(format!("seed is not valid hex: {}", e)))?,
    );
    ExtendedKey::from_seed(&seed)
}

/// Derive the key at `path` from a hex seed, with the default hardened offset.
pub fn derive_path(seed_hex: &str, path: &str) -> Result<ExtendedKey, WalletError> {
    derive_path_with_offset(seed_hex, path, HARDENED_OFFSET)
}

/// Derive the key at `path`, adding `hardened_offset` to every parsed segment.
///
/// Fails with `InvalidPath` before touching the seed if the path does not
/// parse; no partial derivation is ever returned.
pub fn derive_path_with_offset(
    seed_hex: &str,
    path: &str,
    hardened_offset: u32,
) -> Result<ExtendedKey, WalletError> {
    let path: DerivationPath = path.parse()?;
    trace!(%path, depth = path.segments().len(), "deriving hardened ed25519 key");

    let mut node = master_key_from_seed(seed_hex)?;
    for &segment in path.segments() {
        let index = segment.checked_add(hardened_offset).ok_or_else(|| {
            WalletError::InvalidPath(format!(
                "segment {} overflows with hardened offset {:#010x}",
                segment, hardened_offset
            ))
        })?;
        node = node.derive_child(index)?;
    }
    Ok(node)
}
