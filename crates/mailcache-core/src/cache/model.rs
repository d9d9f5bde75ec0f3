//! Composite message records.

use bytes::Bytes;
use mailcache_imap::{BodyStructure, Envelope, Flags, Uid};

use crate::{Error, Result};

/// Everything needed to render one message summary, joined from the
/// per-message stores.
///
/// A bundle only exists for a message whose structure and envelope are both
/// cached. Flags and size are filled in when known and left at their
/// defaults otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDataBundle {
    /// Message UID.
    pub uid: Uid,
    /// Message envelope.
    pub envelope: Envelope,
    /// Body structure in its opaque cached encoding.
    pub serialized_body_structure: Bytes,
    /// Message flags, empty if never cached.
    pub flags: Flags,
    /// RFC822 size in bytes, 0 if never cached.
    pub size: u32,
}

impl MessageDataBundle {
    /// Decodes the cached body structure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structure`] if the stored bytes are not a valid
    /// body-structure encoding.
    pub fn body_structure(&self) -> Result<BodyStructure> {
        BodyStructure::from_bytes(&self.serialized_body_structure).map_err(|source| {
            Error::Structure {
                uid: self.uid,
                source,
            }
        })
    }
}
