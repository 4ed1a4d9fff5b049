use thiserror::Error;

/// Custom error type for the derivation and signing core.
///
/// Every variant is a local validation failure detected before any curve
/// arithmetic runs. Nothing is retried internally; retry policy belongs to
/// the caller.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Derivation path string does not match `m(/<index>')+`.
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    /// Seed or other secret input failed hex decoding or has an unusable length.
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Private scalar input is malformed or outside the group order.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// Low-level primitive failure (HMAC initialization, key expansion).
    #[error("Crypto error: {0}")]
    CryptoError(String),

    /// Meta certificate buffer is structurally malformed.
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    /// Certificate signature did not verify against the primary key.
    #[error("Signature verification failed: {0}")]
    VerificationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_path() {
        let err = WalletError::InvalidPath("missing hardened marker".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid derivation path: missing hardened marker"
        );
    }

    #[test]
    fn test_display_invalid_scalar() {
        let err = WalletError::InvalidScalar("odd hex length".to_string());
        assert_eq!(format!("{}", err), "Invalid scalar: odd hex length");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WalletError>();
    }
}
