//! Volatile in-memory cache.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::ops::Bound;

use bytes::Bytes;
use mailcache_imap::{Envelope, Flags, MailboxEntry, SeqNum, SyncState, Uid};
use tracing::debug;

use super::{MailboxCache, MessageDataBundle};
use crate::CacheConfig;

/// Per-message data of one mailbox.
///
/// Keeping the five stores of a mailbox together makes dropping all of them
/// a single removal.
#[derive(Debug, Clone, Default)]
struct MailboxMessages {
    flags: BTreeMap<Uid, Flags>,
    sizes: BTreeMap<Uid, u32>,
    envelopes: BTreeMap<Uid, Envelope>,
    parts: BTreeMap<Uid, HashMap<String, Bytes>>,
    structures: BTreeMap<Uid, Bytes>,
}

impl MailboxMessages {
    fn forget(&mut self, uid: Uid) {
        self.flags.remove(&uid);
        self.sizes.remove(&uid);
        self.envelopes.remove(&uid);
        self.parts.remove(&uid);
        self.structures.remove(&uid);
    }

    fn is_empty(&self) -> bool {
        self.flags.is_empty()
            && self.sizes.is_empty()
            && self.envelopes.is_empty()
            && self.parts.is_empty()
            && self.structures.is_empty()
    }

    /// Joins the stores for `uid`. The envelope is mandatory, flags and size
    /// fall back to their defaults.
    fn bundle(&self, uid: Uid, structure: &Bytes) -> Option<MessageDataBundle> {
        let envelope = self.envelopes.get(&uid)?;
        Some(MessageDataBundle {
            uid,
            envelope: envelope.clone(),
            serialized_body_structure: structure.clone(),
            flags: self.flags.get(&uid).cloned().unwrap_or_default(),
            size: self.sizes.get(&uid).copied().unwrap_or_default(),
        })
    }
}

/// In-memory [`MailboxCache`].
///
/// Nothing is persisted and nothing is evicted unless asked. The cache does
/// no locking of its own: writes take `&mut self`, so sharing it between
/// threads means wrapping it, e.g. in `Arc<Mutex<MemoryCache>>`.
///
/// ```
/// use mailcache_core::{MailboxCache, MemoryCache};
/// use mailcache_imap::MailboxEntry;
///
/// let mut cache = MemoryCache::new();
/// assert!(!cache.child_mailboxes_fresh("INBOX"));
///
/// cache.set_child_mailboxes("INBOX", vec![MailboxEntry::new("INBOX.Sent", Some('.'))]);
/// assert!(cache.child_mailboxes_fresh("INBOX"));
///
/// cache.forget_child_mailboxes("INBOX");
/// assert!(cache.child_mailboxes("INBOX").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    config: CacheConfig,
    children: BTreeMap<String, Vec<MailboxEntry>>,
    sync_states: HashMap<String, SyncState>,
    seq_to_uid: HashMap<String, Vec<Uid>>,
    messages: HashMap<String, MailboxMessages>,
}

impl MemoryCache {
    /// Creates an empty cache with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with the given configuration.
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the names of all mailboxes with a cached child listing, sorted.
    pub fn known_listings(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    fn log_value(&self, what: &'static str, mailbox: &str, value: &dyn Debug) {
        if self.config.log_values {
            debug!(cache = %self.config.label, mailbox, ?value, "{what}");
        }
    }

    fn messages_mut(&mut self, mailbox: &str) -> &mut MailboxMessages {
        self.messages.entry(mailbox.to_string()).or_default()
    }
}

impl MailboxCache for MemoryCache {
    fn child_mailboxes(&self, mailbox: &str) -> Vec<MailboxEntry> {
        self.children.get(mailbox).cloned().unwrap_or_default()
    }

    fn child_mailboxes_fresh(&self, mailbox: &str) -> bool {
        self.children.contains_key(mailbox)
    }

    fn set_child_mailboxes(&mut self, mailbox: &str, listing: Vec<MailboxEntry>) {
        debug!(
            cache = %self.config.label,
            mailbox,
            count = listing.len(),
            "Setting child mailboxes"
        );
        self.log_value("Child mailboxes", mailbox, &listing);
        self.children.insert(mailbox.to_string(), listing);
    }

    fn forget_child_mailboxes(&mut self, prefix: &str) {
        // Keys sharing a prefix are contiguous in a BTreeMap, starting at the
        // prefix itself.
        let doomed: Vec<String> = self
            .children
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(name, _)| name)
            .take_while(|name| name.starts_with(prefix))
            .cloned()
            .collect();

        for name in doomed {
            debug!(cache = %self.config.label, mailbox = %name, "Forgetting child mailboxes");
            self.children.remove(&name);
        }
    }

    fn mailbox_sync_state(&self, mailbox: &str) -> SyncState {
        self.sync_states.get(mailbox).cloned().unwrap_or_default()
    }

    fn set_mailbox_sync_state(&mut self, mailbox: &str, state: SyncState) {
        debug!(
            cache = %self.config.label,
            mailbox,
            exists = state.exists,
            uid_validity = state.uid_validity.map(|v| v.get()),
            uid_next = state.uid_next.map(Uid::get),
            "Setting mailbox sync state"
        );
        self.log_value("Sync state", mailbox, &state);
        self.sync_states.insert(mailbox.to_string(), state);
    }

    fn uid_mapping(&self, mailbox: &str) -> Vec<Uid> {
        self.seq_to_uid.get(mailbox).cloned().unwrap_or_default()
    }

    fn uid_mapping_known(&self, mailbox: &str) -> bool {
        self.seq_to_uid.contains_key(mailbox)
    }

    fn set_uid_mapping(&mut self, mailbox: &str, seq_to_uid: Vec<Uid>) {
        debug!(
            cache = %self.config.label,
            mailbox,
            count = seq_to_uid.len(),
            "Saving UID mapping"
        );
        self.log_value("UID mapping", mailbox, &seq_to_uid);
        self.seq_to_uid.insert(mailbox.to_string(), seq_to_uid);
    }

    fn clear_uid_mapping(&mut self, mailbox: &str) {
        debug!(cache = %self.config.label, mailbox, "Clearing UID mapping");
        self.seq_to_uid.remove(mailbox);
    }

    fn clear_all_messages(&mut self, mailbox: &str) {
        debug!(cache = %self.config.label, mailbox, "Purging all messages");
        self.messages.remove(mailbox);
    }

    fn clear_message(&mut self, mailbox: &str, uid: Uid) {
        debug!(cache = %self.config.label, mailbox, uid = uid.get(), "Purging message");
        if let Some(messages) = self.messages.get_mut(mailbox) {
            messages.forget(uid);
            if messages.is_empty() {
                self.messages.remove(mailbox);
            }
        }
    }

    fn set_msg_flags(&mut self, mailbox: &str, uid: Uid, flags: Flags) {
        debug!(
            cache = %self.config.label,
            mailbox,
            uid = uid.get(),
            count = flags.len(),
            "Setting FLAGS"
        );
        self.log_value("Flags", mailbox, &flags);
        self.messages_mut(mailbox).flags.insert(uid, flags);
    }

    fn set_msg_size(&mut self, mailbox: &str, uid: Uid, size: u32) {
        debug!(cache = %self.config.label, mailbox, uid = uid.get(), size, "Setting RFC822.SIZE");
        self.messages_mut(mailbox).sizes.insert(uid, size);
    }

    fn set_msg_envelope(&mut self, mailbox: &str, uid: Uid, envelope: Envelope) {
        debug!(
            cache = %self.config.label,
            mailbox,
            uid = uid.get(),
            "Setting ENVELOPE"
        );
        self.log_value("Envelope", mailbox, &envelope);
        self.messages_mut(mailbox).envelopes.insert(uid, envelope);
    }

    fn set_msg_structure(&mut self, mailbox: &str, uid: Uid, serialized: Bytes) {
        debug!(
            cache = %self.config.label,
            mailbox,
            uid = uid.get(),
            bytes = serialized.len(),
            "Setting BODYSTRUCTURE"
        );
        self.messages_mut(mailbox).structures.insert(uid, serialized);
    }

    fn set_msg_part(&mut self, mailbox: &str, uid: Uid, part_id: &str, data: Bytes) {
        debug!(
            cache = %self.config.label,
            mailbox,
            uid = uid.get(),
            part = part_id,
            bytes = data.len(),
            "Setting message part"
        );
        self.messages_mut(mailbox)
            .parts
            .entry(uid)
            .or_default()
            .insert(part_id.to_string(), data);
    }

    fn forget_message_part(&mut self, mailbox: &str, uid: Uid, part_id: &str) {
        debug!(
            cache = %self.config.label,
            mailbox,
            uid = uid.get(),
            part = part_id,
            "Forgetting message part"
        );
        let Some(messages) = self.messages.get_mut(mailbox) else {
            return;
        };
        if let Some(parts) = messages.parts.get_mut(&uid) {
            parts.remove(part_id);
            if parts.is_empty() {
                messages.parts.remove(&uid);
            }
        }
    }

    fn msg_flags(&self, mailbox: &str, uid: Uid) -> Flags {
        self.messages
            .get(mailbox)
            .and_then(|m| m.flags.get(&uid))
            .cloned()
            .unwrap_or_default()
    }

    fn msg_size(&self, mailbox: &str, uid: Uid) -> u32 {
        self.messages
            .get(mailbox)
            .and_then(|m| m.sizes.get(&uid))
            .copied()
            .unwrap_or_default()
    }

    fn msg_envelope(&self, mailbox: &str, uid: Uid) -> Envelope {
        self.messages
            .get(mailbox)
            .and_then(|m| m.envelopes.get(&uid))
            .cloned()
            .unwrap_or_default()
    }

    fn msg_structure(&self, mailbox: &str, uid: Uid) -> Bytes {
        self.messages
            .get(mailbox)
            .and_then(|m| m.structures.get(&uid))
            .cloned()
            .unwrap_or_default()
    }

    fn message_part(&self, mailbox: &str, uid: Uid, part_id: &str) -> Bytes {
        self.messages
            .get(mailbox)
            .and_then(|m| m.parts.get(&uid))
            .and_then(|parts| parts.get(part_id))
            .cloned()
            .unwrap_or_default()
    }

    fn message_data_for_mailbox(&self, mailbox: &str) -> Vec<MessageDataBundle> {
        let Some(messages) = self.messages.get(mailbox) else {
            return Vec::new();
        };

        let bundles: Vec<MessageDataBundle> = messages
            .structures
            .iter()
            .filter_map(|(&uid, structure)| messages.bundle(uid, structure))
            .collect();

        let skipped = messages.structures.len() - bundles.len();
        if skipped > 0 {
            debug!(
                cache = %self.config.label,
                mailbox,
                skipped,
                "Leaving out messages without a cached envelope"
            );
        }
        bundles
    }

    fn message_metadata(&self, mailbox: &str, uid: Uid) -> Option<MessageDataBundle> {
        let messages = self.messages.get(mailbox)?;
        let structure = messages.structures.get(&uid)?;
        messages.bundle(uid, structure)
    }

    fn uid_for_seq(&self, mailbox: &str, seq: SeqNum) -> Option<Uid> {
        self.seq_to_uid.get(mailbox)?.get(seq.index()).copied()
    }

    fn seq_for_uid(&self, mailbox: &str, uid: Uid) -> Option<SeqNum> {
        let position = self.seq_to_uid.get(mailbox)?.iter().position(|&u| u == uid)?;
        SeqNum::from_index(position)
    }
}
