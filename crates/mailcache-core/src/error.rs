//! Error types for the cache library.

use mailcache_imap::Uid;
use thiserror::Error;

/// Errors that can occur when decoding cached data.
///
/// Cache lookups themselves never fail; a missing entry yields an empty
/// value. Errors only arise when interpreting what was stored.
#[derive(Debug, Error)]
pub enum Error {
    /// Building or decoding an IMAP value failed.
    #[error("IMAP value error: {0}")]
    Imap(#[from] mailcache_imap::Error),

    /// The cached body structure of a message could not be decoded.
    #[error("Cached body structure of UID {uid} is unreadable: {source}")]
    Structure {
        /// Message the structure belongs to.
        uid: Uid,
        /// Underlying decoding error.
        #[source]
        source: mailcache_imap::Error,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
