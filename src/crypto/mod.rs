pub mod fireblocks;
pub mod hd;
pub mod meta;

pub use self::fireblocks::{public_key_from_scalar, sign};
pub use self::hd::{
    derive_path, derive_path_with_offset, hmac_sha512, master_key_from_seed, ExtendedKey,
    HARDENED_OFFSET,
};
pub use self::meta::{
    create_meta_certificate, create_meta_keypair, verify_meta_certificate, MetaKeyPair,
    META_CERTIFICATE_LEN, META_DOMAIN_TAG,
};
