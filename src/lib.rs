// src/lib.rs

pub mod core;
pub mod crypto;

// Re-export the surface callers actually touch so downstream code can use
// `wallet_crypto_core::derive_path` etc. without digging through modules.
pub use crate::core::errors::WalletError;
pub use crate::core::path::DerivationPath;
pub use crate::crypto::fireblocks::{public_key_from_scalar, sign};
pub use crate::crypto::hd::{derive_path, master_key_from_seed, ExtendedKey, HARDENED_OFFSET};
pub use crate::crypto::meta::{
    create_meta_certificate, create_meta_keypair, verify_meta_certificate, MetaKeyPair,
};
