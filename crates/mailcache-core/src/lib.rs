//! # mailcache-core
//!
//! The cache behind an IMAP client's view of mailboxes and messages.
//!
//! This crate provides:
//! - **Mailbox hierarchy**: child listings per mailbox, with "never fetched"
//!   kept distinct from "fetched, no children"
//! - **Sync state**: one descriptor per mailbox (UIDVALIDITY, UIDNEXT, counts)
//! - **UID mapping**: sequence number to UID, per mailbox
//! - **Message metadata**: flags, size, envelope, body structure and raw
//!   body-part bytes per message
//! - **Bundles**: envelope, structure, flags and size joined per message for
//!   list rendering
//!
//! The cache is synchronous and demand-agnostic. It never fetches, expires or
//! evicts anything on its own; the IMAP session writes what it learns and
//! invalidates what the server reports gone.
//!
//! ## Example
//!
//! ```
//! use bytes::Bytes;
//! use mailcache_core::{MailboxCache, MemoryCache};
//! use mailcache_imap::{BodyStructure, Envelope, Flags, Uid};
//!
//! # fn main() -> mailcache_core::Result<()> {
//! let mut cache = MemoryCache::new();
//! let uid = Uid::try_from(42u32)?;
//!
//! let structure = BodyStructure::text("plain", 512, 10);
//! cache.set_msg_structure("INBOX", uid, Bytes::from(structure.to_bytes()?));
//! cache.set_msg_flags("INBOX", uid, Flags::parse_all(["\\Seen"]));
//! assert!(cache.message_data_for_mailbox("INBOX").is_empty());
//!
//! cache.set_msg_envelope("INBOX", uid, Envelope::default());
//! let bundles = cache.message_data_for_mailbox("INBOX");
//! assert_eq!(bundles[0].body_structure()?, structure);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod cache;
mod config;
mod error;

pub use cache::{MailboxCache, MemoryCache, MessageDataBundle};
pub use config::{CacheConfig, CacheConfigBuilder, DEFAULT_LABEL};
pub use error::{Error, Result};
