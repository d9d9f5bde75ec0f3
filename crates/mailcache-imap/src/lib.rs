//! # mailcache-imap
//!
//! IMAP value types held by the `mailcache` message store.
//!
//! These are the facts an IMAP session learns about a server and hands to the
//! cache: mailbox listings (`LIST`), per-mailbox status (`SELECT`), and
//! per-message data items (`FLAGS`, `RFC822.SIZE`, `ENVELOPE`,
//! `BODYSTRUCTURE`). Parsing them off the wire is the protocol layer's job;
//! this crate only defines their shape.
//!
//! ## Example
//!
//! ```
//! use mailcache_imap::{Flag, Flags, MailboxAttribute, MailboxEntry, Uid};
//!
//! let entry = MailboxEntry::new("INBOX.Sent", Some('.'))
//!     .with_attributes(vec![MailboxAttribute::Sent, MailboxAttribute::HasNoChildren]);
//! assert_eq!(entry.leaf_name(), "Sent");
//!
//! let flags: Flags = ["\\Seen", "$Forwarded"].into_iter().collect();
//! assert!(flags.contains(&Flag::Seen));
//!
//! assert!(Uid::new(0).is_none());
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for every value type, plus
//!   [`BodyStructure::to_bytes`] and [`BodyStructure::from_bytes`] for the
//!   opaque structure encoding the cache stores.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Address, BodyStructure, Envelope, Flag, Flags, Mailbox, MailboxAttribute, MailboxEntry,
    ModSeq, SeqNum, SyncState, Uid, UidValidity,
};
