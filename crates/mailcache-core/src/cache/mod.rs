//! Mailbox and message cache.
//!
//! [`MailboxCache`] is the read/write contract between the IMAP session (which
//! writes facts as server responses arrive and invalidates them when the
//! server says they are gone) and the presentation layer (which reads them).
//! [`MemoryCache`] is the volatile implementation; a durable store can offer
//! the same contract.
//!
//! Every lookup is total. A key that was never written reads as the empty or
//! default value of its store; callers treat that as "not known yet".

mod memory;
mod model;

use bytes::Bytes;
use mailcache_imap::{Envelope, Flags, MailboxEntry, SeqNum, SyncState, Uid};

pub use memory::MemoryCache;
pub use model::MessageDataBundle;

/// Keyed store of everything the client knows about a server's mailboxes.
///
/// Mailbox names are used verbatim as keys. Writes replace the previous value
/// wholesale; nothing is merged. Entries disappear only through the
/// `forget_*`/`clear_*` methods.
pub trait MailboxCache {
    /// Returns the cached child listing of `mailbox`, empty if unknown.
    ///
    /// Use [`Self::child_mailboxes_fresh`] to tell "unknown" from "known to
    /// have no children".
    fn child_mailboxes(&self, mailbox: &str) -> Vec<MailboxEntry>;

    /// Returns true if a listing was ever stored for `mailbox`, even an
    /// empty one.
    fn child_mailboxes_fresh(&self, mailbox: &str) -> bool;

    /// Replaces the child listing of `mailbox` and marks it fresh.
    fn set_child_mailboxes(&mut self, mailbox: &str, listing: Vec<MailboxEntry>);

    /// Forgets every listing whose mailbox name starts with `prefix`.
    ///
    /// This is a plain string prefix match: `"INBOX"` also matches
    /// `"INBOX.Sent"` and `"INBOXES"`. The empty prefix forgets everything.
    fn forget_child_mailboxes(&mut self, prefix: &str);

    /// Returns the stored sync state of `mailbox`, or [`SyncState::default`].
    fn mailbox_sync_state(&self, mailbox: &str) -> SyncState;

    /// Replaces the sync state of `mailbox`.
    fn set_mailbox_sync_state(&mut self, mailbox: &str, state: SyncState);

    /// Returns the sequence-to-UID mapping of `mailbox` (index = sequence
    /// number - 1), empty if none is stored.
    fn uid_mapping(&self, mailbox: &str) -> Vec<Uid>;

    /// Returns true if a mapping is stored for `mailbox`, even an empty one.
    fn uid_mapping_known(&self, mailbox: &str) -> bool;

    /// Replaces the sequence-to-UID mapping of `mailbox`.
    fn set_uid_mapping(&mut self, mailbox: &str, seq_to_uid: Vec<Uid>);

    /// Forgets the mapping of `mailbox`.
    ///
    /// Unlike storing an empty mapping, this makes the mapping unknown.
    fn clear_uid_mapping(&mut self, mailbox: &str);

    /// Drops the flags, sizes, envelopes, parts and structures of every
    /// message in `mailbox`.
    ///
    /// The listing, sync state and UID mapping are left alone.
    fn clear_all_messages(&mut self, mailbox: &str);

    /// Drops everything cached about one message.
    ///
    /// Other messages are untouched; data missing for `uid` is not an error.
    fn clear_message(&mut self, mailbox: &str, uid: Uid);

    /// Stores the flags of a message.
    fn set_msg_flags(&mut self, mailbox: &str, uid: Uid, flags: Flags);

    /// Stores the RFC822 size of a message.
    fn set_msg_size(&mut self, mailbox: &str, uid: Uid, size: u32);

    /// Stores the envelope of a message.
    fn set_msg_envelope(&mut self, mailbox: &str, uid: Uid, envelope: Envelope);

    /// Stores the serialized body structure of a message.
    fn set_msg_structure(&mut self, mailbox: &str, uid: Uid, serialized: Bytes);

    /// Stores the raw bytes of one body part of a message.
    fn set_msg_part(&mut self, mailbox: &str, uid: Uid, part_id: &str, data: Bytes);

    /// Forgets the bytes of one body part, leaving the other parts cached.
    fn forget_message_part(&mut self, mailbox: &str, uid: Uid, part_id: &str);

    /// Returns the cached flags of a message, empty if unknown.
    fn msg_flags(&self, mailbox: &str, uid: Uid) -> Flags;

    /// Returns the cached size of a message, 0 if unknown.
    fn msg_size(&self, mailbox: &str, uid: Uid) -> u32;

    /// Returns the cached envelope of a message, [`Envelope::default`] if
    /// unknown.
    fn msg_envelope(&self, mailbox: &str, uid: Uid) -> Envelope;

    /// Returns the cached serialized body structure, empty if unknown.
    fn msg_structure(&self, mailbox: &str, uid: Uid) -> Bytes;

    /// Returns the cached bytes of a body part, empty if the mailbox, the
    /// message or the part is unknown.
    fn message_part(&self, mailbox: &str, uid: Uid, part_id: &str) -> Bytes;

    /// Returns a bundle for every message of `mailbox` that has a cached
    /// body structure and envelope, in ascending UID order.
    ///
    /// Messages with a structure but no envelope are left out. Missing flags
    /// or size never leave a message out.
    fn message_data_for_mailbox(&self, mailbox: &str) -> Vec<MessageDataBundle>;

    /// Returns the bundle of a single message, under the same rules as
    /// [`Self::message_data_for_mailbox`].
    fn message_metadata(&self, mailbox: &str, uid: Uid) -> Option<MessageDataBundle>;

    /// Looks up the UID at sequence number `seq`.
    fn uid_for_seq(&self, mailbox: &str, seq: SeqNum) -> Option<Uid> {
        self.uid_mapping(mailbox).get(seq.index()).copied()
    }

    /// Looks up the sequence number of `uid`.
    fn seq_for_uid(&self, mailbox: &str, uid: Uid) -> Option<SeqNum> {
        self.uid_mapping(mailbox)
            .iter()
            .position(|&u| u == uid)
            .and_then(SeqNum::from_index)
    }
}
