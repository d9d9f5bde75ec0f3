//! Integration tests for the mailbox cache.
//!
//! These drive the cache through the `MailboxCache` trait the way an IMAP
//! session and a message list would.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

use mailcache_core::{CacheConfig, MailboxCache, MemoryCache};
use mailcache_imap::{
    Address, BodyStructure, Envelope, Flags, MailboxAttribute, MailboxEntry, SeqNum, SyncState,
    Uid, UidValidity,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn uid(n: u32) -> Uid {
    Uid::new(n).unwrap()
}

fn cache() -> Box<dyn MailboxCache> {
    init_tracing();
    Box::new(MemoryCache::with_config(
        CacheConfig::builder().label("test").log_values(true).build(),
    ))
}

fn envelope(subject: &str) -> Envelope {
    Envelope {
        date: Some("Mon, 7 Feb 1994 21:52:25 -0800".to_string()),
        subject: Some(subject.to_string()),
        from: vec![Address::new("fred", "example.org").with_name("Fred Foobar")],
        message_id: Some(format!("<{subject}@example.org>")),
        ..Envelope::default()
    }
}

fn structure() -> BodyStructure {
    BodyStructure::multipart(
        "mixed",
        vec![
            BodyStructure::text("plain", 300, 8),
            BodyStructure::basic("image", "png", "BASE64", 2048),
        ],
    )
}

fn populate(cache: &mut dyn MailboxCache, mailbox: &str, u: Uid) {
    let body = structure();
    cache.set_msg_flags(mailbox, u, Flags::parse_all(["\\Seen", "$Work"]));
    cache.set_msg_size(mailbox, u, 4096);
    cache.set_msg_envelope(mailbox, u, envelope("report"));
    for part in body.part_ids() {
        cache.set_msg_part(mailbox, u, &part, Bytes::from(format!("part {part}")));
    }
    cache.set_msg_structure(mailbox, u, Bytes::from(body.to_bytes().unwrap()));
}

#[test]
fn test_listing_write_read() {
    let mut cache = cache();
    let listing = vec![
        MailboxEntry::new("INBOX.Sent", Some('.'))
            .with_attributes(vec![MailboxAttribute::Sent, MailboxAttribute::HasNoChildren]),
        MailboxEntry::new("INBOX.Work", Some('.'))
            .with_attributes(vec![MailboxAttribute::HasChildren]),
    ];

    cache.set_child_mailboxes("INBOX", listing.clone());
    assert_eq!(cache.child_mailboxes("INBOX"), listing);

    cache.set_child_mailboxes("INBOX", Vec::new());
    assert!(cache.child_mailboxes("INBOX").is_empty());
    assert!(cache.child_mailboxes_fresh("INBOX"));
}

#[test]
fn test_listing_freshness() {
    let mut cache = cache();
    assert!(!cache.child_mailboxes_fresh("Archive"));
    assert!(cache.child_mailboxes("Archive").is_empty());

    cache.set_child_mailboxes("Archive", Vec::new());
    assert!(cache.child_mailboxes_fresh("Archive"));
    assert!(cache.child_mailboxes("Archive").is_empty());
}

#[test]
fn test_forget_subtree() {
    let mut cache = cache();
    let names = ["INBOX", "INBOX.Sent", "INBOX.Sent.2024", "Drafts"];
    for name in names {
        cache.set_child_mailboxes(name, vec![MailboxEntry::new(format!("{name}.x"), Some('.'))]);
    }

    cache.forget_child_mailboxes("INBOX.Sent");
    assert!(cache.child_mailboxes_fresh("INBOX"));
    assert!(!cache.child_mailboxes_fresh("INBOX.Sent"));
    assert!(!cache.child_mailboxes_fresh("INBOX.Sent.2024"));
    assert!(cache.child_mailboxes_fresh("Drafts"));

    cache.forget_child_mailboxes("INBOX");
    assert!(!cache.child_mailboxes_fresh("INBOX"));
    assert_eq!(cache.child_mailboxes("Drafts").len(), 1);
}

#[test]
fn test_forget_is_not_delimiter_aware() {
    let mut cache = cache();
    cache.set_child_mailboxes("INBOX", Vec::new());
    cache.set_child_mailboxes("INBOXSPECIAL", Vec::new());

    cache.forget_child_mailboxes("INBOX");
    assert!(!cache.child_mailboxes_fresh("INBOXSPECIAL"));
}

#[test]
fn test_independent_metadata_stores() {
    let mut cache = cache();
    let u = uid(9);
    cache.set_msg_flags("INBOX", u, Flags::parse_all(["\\Seen"]));

    assert!(cache.message_part("INBOX", u, "1").is_empty());
    assert_eq!(cache.msg_envelope("INBOX", u), Envelope::default());
    assert_eq!(cache.msg_size("INBOX", u), 0);
    assert!(cache.message_metadata("INBOX", u).is_none());
    assert!(cache.message_data_for_mailbox("INBOX").is_empty());
}

#[test]
fn test_clear_message_scope() {
    let mut cache = cache();
    populate(cache.as_mut(), "INBOX", uid(1));
    populate(cache.as_mut(), "INBOX", uid(2));
    let before = cache.message_metadata("INBOX", uid(2)).unwrap();

    cache.clear_message("INBOX", uid(1));

    assert!(cache.msg_flags("INBOX", uid(1)).is_empty());
    assert_eq!(cache.msg_size("INBOX", uid(1)), 0);
    assert_eq!(cache.msg_envelope("INBOX", uid(1)), Envelope::default());
    assert!(cache.msg_structure("INBOX", uid(1)).is_empty());
    for part in structure().part_ids() {
        assert!(cache.message_part("INBOX", uid(1), &part).is_empty());
        assert!(!cache.message_part("INBOX", uid(2), &part).is_empty());
    }
    assert_eq!(cache.message_metadata("INBOX", uid(2)), Some(before));
}

#[test]
fn test_clear_all_messages_scope() {
    let mut cache = cache();
    let state = SyncState {
        exists: 2,
        uid_next: Uid::new(3),
        uid_validity: UidValidity::new(1_700_000_000),
        ..SyncState::default()
    };
    cache.set_mailbox_sync_state("INBOX", state.clone());
    cache.set_uid_mapping("INBOX", vec![uid(1), uid(2)]);
    populate(cache.as_mut(), "INBOX", uid(1));
    populate(cache.as_mut(), "INBOX", uid(2));

    cache.clear_all_messages("INBOX");

    assert!(cache.message_data_for_mailbox("INBOX").is_empty());
    for u in [uid(1), uid(2)] {
        assert!(cache.msg_flags("INBOX", u).is_empty());
        assert_eq!(cache.msg_size("INBOX", u), 0);
        assert!(cache.msg_envelope("INBOX", u).is_empty());
        assert!(cache.msg_structure("INBOX", u).is_empty());
        assert!(cache.message_part("INBOX", u, "1").is_empty());
    }
    assert_eq!(cache.mailbox_sync_state("INBOX"), state);
    assert_eq!(cache.uid_mapping("INBOX"), [uid(1), uid(2)]);
}

#[test]
fn test_bundle_skip_rule() {
    let mut cache = cache();
    let bytes = Bytes::from(structure().to_bytes().unwrap());
    cache.set_msg_structure("INBOX", uid(5), bytes.clone());
    cache.set_msg_structure("INBOX", uid(6), bytes);
    cache.set_msg_envelope("INBOX", uid(6), envelope("six"));

    let bundles = cache.message_data_for_mailbox("INBOX");
    let uids: Vec<Uid> = bundles.iter().map(|b| b.uid).collect();
    assert_eq!(uids, [uid(6)]);
    assert!(bundles[0].flags.is_empty());
    assert_eq!(bundles[0].size, 0);
    assert_eq!(bundles[0].body_structure().unwrap(), structure());
}

#[test]
fn test_uid_mapping_replace_versus_clear() {
    let mut cache = cache();
    cache.set_uid_mapping("INBOX", Vec::new());
    assert!(cache.uid_mapping("INBOX").is_empty());
    assert!(cache.uid_mapping_known("INBOX"));

    cache.clear_uid_mapping("INBOX");
    assert!(cache.uid_mapping("INBOX").is_empty());
    assert!(!cache.uid_mapping_known("INBOX"));
}

#[test]
fn test_seq_lookups_through_trait() {
    let mut cache = cache();
    cache.set_uid_mapping("INBOX", vec![uid(4), uid(8), uid(15)]);
    assert_eq!(cache.uid_for_seq("INBOX", SeqNum::new(2).unwrap()), Some(uid(8)));
    assert_eq!(cache.seq_for_uid("INBOX", uid(15)), SeqNum::new(3));

    // Expunging seq 2 renumbers everything after it.
    cache.set_uid_mapping("INBOX", vec![uid(4), uid(15)]);
    assert_eq!(cache.seq_for_uid("INBOX", uid(15)), SeqNum::new(2));
    assert_eq!(cache.seq_for_uid("INBOX", uid(8)), None);
}

#[test]
fn test_sync_state_default() {
    let mut cache = cache();
    assert!(!cache.mailbox_sync_state("INBOX").is_usable_for_syncing());

    let state = SyncState {
        exists: 12,
        uid_next: Uid::new(13),
        uid_validity: UidValidity::new(5),
        ..SyncState::default()
    };
    cache.set_mailbox_sync_state("INBOX", state);
    assert!(cache.mailbox_sync_state("INBOX").is_usable_for_syncing());
    assert!(cache.mailbox_sync_state("Sent").is_empty());
}

#[test]
fn test_composer_reassembles_forwarded_message() {
    // A composer re-attaching a message reads its header and body parts back.
    let mut cache = cache();
    cache.set_msg_part("INBOX", uid(3), "HEADER", Bytes::from_static(b"Subject: hi\r\n\r\n"));
    cache.set_msg_part("INBOX", uid(3), "TEXT", Bytes::from_static(b"hello\r\n"));

    let mut raw = cache.message_part("INBOX", uid(3), "HEADER").to_vec();
    raw.extend_from_slice(&cache.message_part("INBOX", uid(3), "TEXT"));
    assert_eq!(raw, b"Subject: hi\r\n\r\nhello\r\n");
}

#[test]
fn test_shared_behind_mutex() {
    let shared = Arc::new(Mutex::new(MemoryCache::new()));
    let writer = Arc::clone(&shared);

    std::thread::spawn(move || {
        let mut cache = writer.lock().unwrap();
        cache.set_msg_size("INBOX", uid(1), 77);
    })
    .join()
    .unwrap();

    assert_eq!(shared.lock().unwrap().msg_size("INBOX", uid(1)), 77);
}

fn mailbox_name() -> impl Strategy<Value = String> {
    // Short names over a tiny alphabet so prefixes collide often.
    "[AB.]{0,4}"
}

proptest! {
    #[test]
    fn prop_forget_matches_prefix_filter(
        names in proptest::collection::btree_set(mailbox_name(), 0..12),
        prefix in mailbox_name(),
    ) {
        let mut cache = MemoryCache::new();
        for name in &names {
            cache.set_child_mailboxes(name, Vec::new());
        }

        cache.forget_child_mailboxes(&prefix);

        let expected: BTreeSet<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| !name.starts_with(prefix.as_str()))
            .collect();
        let remaining: BTreeSet<&str> = cache.known_listings().collect();
        prop_assert_eq!(remaining, expected);
    }

    #[test]
    fn prop_clear_message_leaves_siblings(
        uids in proptest::collection::btree_set(1u32..50, 1..10),
        victim_index in 0usize..10,
    ) {
        let uids: Vec<Uid> = uids.into_iter().map(uid).collect();
        let victim = uids[victim_index % uids.len()];

        let mut cache = MemoryCache::new();
        for &u in &uids {
            populate(&mut cache, "INBOX", u);
        }

        cache.clear_message("INBOX", victim);

        prop_assert!(cache.message_metadata("INBOX", victim).is_none());
        prop_assert!(cache.message_part("INBOX", victim, "1").is_empty());
        let survivors: Vec<Uid> = cache
            .message_data_for_mailbox("INBOX")
            .into_iter()
            .map(|b| b.uid)
            .collect();
        let expected: Vec<Uid> = uids.iter().copied().filter(|&u| u != victim).collect();
        prop_assert_eq!(survivors, expected);
    }
}
