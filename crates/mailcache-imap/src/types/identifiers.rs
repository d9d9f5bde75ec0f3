//! Core IMAP identifiers.
//!
//! Types for sequence numbers, UIDs, UIDVALIDITY and MODSEQ values.

use std::num::{NonZeroU32, NonZeroU64};

use crate::Error;

/// Message sequence number.
///
/// Sequence numbers are assigned to messages in a mailbox starting from 1.
/// They are ephemeral and change when messages are expunged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SeqNum(pub NonZeroU32);

impl SeqNum {
    /// Creates a new sequence number.
    ///
    /// Returns `None` if the value is 0.
    #[must_use]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    /// Returns the underlying value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the zero-based position of this message in a UID mapping.
    #[must_use]
    pub fn index(self) -> usize {
        // u32 always fits in usize on supported targets.
        self.0.get() as usize - 1
    }

    /// Builds a sequence number from a zero-based mapping position.
    ///
    /// Returns `None` if the position does not fit a 32-bit sequence number.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index.checked_add(1)?).ok().and_then(Self::new)
    }
}

impl std::fmt::Display for SeqNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for SeqNum {
    type Error = Error;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or(Error::ZeroIdentifier {
            kind: "sequence number",
        })
    }
}

/// Unique identifier for a message.
///
/// UIDs are persistent identifiers that don't change when messages are expunged.
/// Combined with `UIDVALIDITY`, they uniquely identify a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Uid(pub NonZeroU32);

impl Uid {
    /// Creates a new UID.
    ///
    /// Returns `None` if the value is 0.
    #[must_use]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    /// Returns the underlying value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Uid {
    type Error = Error;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or(Error::ZeroIdentifier { kind: "UID" })
    }
}

/// UIDVALIDITY value for a mailbox.
///
/// If this value changes, all cached UIDs are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UidValidity(pub NonZeroU32);

impl UidValidity {
    /// Creates a new UIDVALIDITY.
    #[must_use]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    /// Returns the underlying value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for UidValidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for UidValidity {
    type Error = Error;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or(Error::ZeroIdentifier {
            kind: "UIDVALIDITY",
        })
    }
}

/// Modification sequence number (MODSEQ, RFC 7162).
///
/// The server maintains a HIGHESTMODSEQ per mailbox that increases whenever
/// any message metadata changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModSeq(pub NonZeroU64);

impl ModSeq {
    /// Creates a new `ModSeq`, returning `None` if zero.
    #[must_use]
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    /// Returns the raw value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for ModSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for ModSeq {
    type Error = Error;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or(Error::ZeroIdentifier { kind: "MODSEQ" })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::unreadable_literal,
    clippy::similar_names
)]
mod tests {
    use super::*;

    mod seq_num_tests {
        use super::*;

        #[test]
        fn new_zero_returns_none() {
            assert!(SeqNum::new(0).is_none());
            assert!(SeqNum::try_from(0u32).is_err());
        }

        #[test]
        fn index_is_zero_based() {
            let seq = SeqNum::new(1).unwrap();
            assert_eq!(seq.index(), 0);
            assert_eq!(SeqNum::new(42).unwrap().index(), 41);
        }

        #[test]
        fn from_index() {
            assert_eq!(SeqNum::from_index(0), SeqNum::new(1));
            assert_eq!(SeqNum::from_index(9).unwrap().get(), 10);
            assert!(SeqNum::from_index(u32::MAX as usize).is_none());
        }

        #[test]
        fn ordering() {
            assert!(SeqNum::new(1).unwrap() < SeqNum::new(2).unwrap());
        }
    }

    mod uid_tests {
        use super::*;

        #[test]
        fn new_valid() {
            let uid = Uid::new(100);
            assert_eq!(uid.unwrap().get(), 100);
        }

        #[test]
        fn new_zero_returns_none() {
            assert!(Uid::new(0).is_none());
        }

        #[test]
        fn try_from_zero_names_the_identifier() {
            let err = Uid::try_from(0u32).unwrap_err();
            assert_eq!(err.to_string(), "UID cannot be zero");
        }

        #[test]
        fn display() {
            assert_eq!(format!("{}", Uid::new(12345).unwrap()), "12345");
        }

        #[test]
        fn ordering() {
            assert!(Uid::new(100).unwrap() < Uid::new(200).unwrap());
        }
    }

    mod uid_validity_tests {
        use super::*;

        #[test]
        fn equality() {
            let uv1 = UidValidity::new(123).unwrap();
            let uv2 = UidValidity::try_from(123u32).unwrap();
            let uv3 = UidValidity::new(456).unwrap();
            assert_eq!(uv1, uv2);
            assert_ne!(uv1, uv3);
        }

        #[test]
        fn zero_rejected() {
            assert!(UidValidity::new(0).is_none());
        }
    }

    mod property_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn seq_index_round_trip(n in 1u32..) {
                let seq = SeqNum::new(n).unwrap();
                prop_assert_eq!(SeqNum::from_index(seq.index()), Some(seq));
            }

            #[test]
            fn nonzero_uid_accepted(n in 1u32..) {
                prop_assert_eq!(Uid::try_from(n).unwrap().get(), n);
            }
        }
    }

    mod mod_seq_tests {
        use super::*;

        #[test]
        fn creation() {
            assert_eq!(ModSeq::new(987_654_321).unwrap().get(), 987_654_321);
            assert!(ModSeq::new(0).is_none());
        }

        #[test]
        fn try_from() {
            let ok: std::result::Result<ModSeq, _> = 100u64.try_into();
            assert!(ok.is_ok());
            let err: std::result::Result<ModSeq, _> = 0u64.try_into();
            assert!(err.is_err());
        }
    }
}
