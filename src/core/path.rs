//! Derivation path parsing and validation
//!
//! Path format: m/44'/607'/0'
//!
//! Every segment is hardened. The apostrophe is syntactically mandatory on
//! each segment but carries no separate meaning; this key tree has no
//! non-hardened branch at all (see crypto::hd).

use std::fmt;
use std::str::FromStr;

use crate::core::errors::WalletError;

/// Largest literal segment value. Adding the hardened offset to anything
/// above this would wrap the u32 index, so such paths are rejected outright.
pub const MAX_SEGMENT: u32 = 0x7FFF_FFFF;

/// A validated, hardened-only derivation path.
///
/// Holds the literal segment values as written in the path string; the
/// hardened offset is applied later, at derivation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    segments: Vec<u32>,
}

impl DerivationPath {
    /// Literal segment values, without the hardened offset applied.
    pub fn segments(&self) -> &[u32] {
        &self.segments
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(WalletError::InvalidPath(format!(
                "path must start with 'm/': {:?}",
                s
            )));
        }

        let mut segments = Vec::new();
        for part in parts {
            let index_str = part.strip_suffix('\'').ok_or_else(|| {
                WalletError::InvalidPath(format!(
                    "segment {:?} is missing the hardened marker",
                    part
                ))
            })?;
            if index_str.is_empty() || !index_str.bytes().all(|b| b.is_ascii_digit()) {
                return Err(WalletError::InvalidPath(format!(
                    "segment {:?} is not an unsigned integer",
                    part
                )));
            }
            let index: u32 = index_str.parse().map_err(|e| {
                WalletError::InvalidPath(format!("segment {:?}: {}", part, e))
            })?;
            if index > MAX_SEGMENT {
                return Err(WalletError::InvalidPath(format!(
                    "segment {} exceeds 2^31 - 1 and would wrap past the hardened offset",
                    index
                )));
            }
            segments.push(index);
        }

        if segments.is_empty() {
            return Err(WalletError::InvalidPath(
                "path must contain at least one segment".to_string(),
            ));
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for segment in &self.segments {
            write!(f, "/{}'", segment)?;
        }
        Ok(())
    }
}
