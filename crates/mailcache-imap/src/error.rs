//! Error types for the IMAP value types.

use thiserror::Error;

/// Errors that can occur when building or decoding IMAP values.
#[derive(Debug, Error)]
pub enum Error {
    /// A protocol identifier that must be non-zero was zero.
    #[error("{kind} cannot be zero")]
    ZeroIdentifier {
        /// Which identifier was rejected (`UID`, `UIDVALIDITY`, ...).
        kind: &'static str,
    },

    /// A serialized body structure could not be encoded or decoded.
    #[cfg(feature = "serde")]
    #[error("Body structure encoding error: {0}")]
    Structure(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
