//! IMAP value types.
//!
//! Definitions follow RFC 9051 (`IMAP4rev2`) and RFC 3501 (`IMAP4rev1`), with
//! MODSEQ from RFC 7162.

#![allow(clippy::missing_const_for_fn)]

mod body;
mod envelope;
mod flags;
mod identifiers;
mod mailbox;
mod sync_state;

pub use body::BodyStructure;
pub use envelope::{Address, Envelope};
pub use flags::{Flag, Flags};
pub use identifiers::{ModSeq, SeqNum, Uid, UidValidity};
pub use mailbox::{Mailbox, MailboxAttribute, MailboxEntry};
pub use sync_state::SyncState;
