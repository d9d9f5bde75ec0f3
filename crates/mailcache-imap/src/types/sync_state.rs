//! Per-mailbox synchronization state.

use super::{Flags, ModSeq, SeqNum, Uid, UidValidity};

/// What the client last learned about a mailbox from SELECT/EXAMINE/STATUS.
///
/// The cache stores this as one atomic value per mailbox and never looks
/// inside. `SyncState::default()` is the "nothing known yet" descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncState {
    /// Number of messages in the mailbox (EXISTS).
    pub exists: u32,
    /// Number of recent messages (RECENT).
    pub recent: u32,
    /// First unseen message sequence number.
    pub unseen: Option<SeqNum>,
    /// Next UID to be assigned.
    pub uid_next: Option<Uid>,
    /// UIDVALIDITY epoch.
    pub uid_validity: Option<UidValidity>,
    /// Flags defined for this mailbox.
    pub flags: Flags,
    /// Flags that can be permanently stored.
    pub permanent_flags: Flags,
    /// Highest mod-sequence (if CONDSTORE enabled).
    pub highest_mod_seq: Option<ModSeq>,
}

impl SyncState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if this state can seed an incremental resync.
    ///
    /// That needs both the UIDVALIDITY epoch (to detect a rebuilt mailbox)
    /// and UIDNEXT (to know which UIDs arrived since).
    #[must_use]
    pub fn is_usable_for_syncing(&self) -> bool {
        self.uid_validity.is_some() && self.uid_next.is_some()
    }

    /// Returns true if `other` describes a different UID epoch.
    ///
    /// Any UIDs cached under `self` are meaningless once this holds.
    #[must_use]
    pub fn uid_validity_changed(&self, other: &Self) -> bool {
        match (self.uid_validity, other.uid_validity) {
            (Some(ours), Some(theirs)) => ours != theirs,
            _ => false,
        }
    }
}
