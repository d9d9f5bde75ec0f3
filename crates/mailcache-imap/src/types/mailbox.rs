//! Mailbox names and listing entries.

/// Mailbox name.
///
/// Names are hierarchical (segments separated by the server's delimiter) but
/// are kept verbatim: no case folding, no delimiter normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Mailbox(pub String);

impl Mailbox {
    /// Creates a new mailbox name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The INBOX mailbox.
    #[must_use]
    pub fn inbox() -> Self {
        Self("INBOX".to_string())
    }

    /// Returns the mailbox name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Mailbox {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Mailbox {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Mailbox attributes from a LIST response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", from = "String"))]
pub enum MailboxAttribute {
    /// Mailbox cannot be selected.
    NoSelect,
    /// Mailbox cannot have children.
    NoInferiors,
    /// Mailbox has no children.
    HasNoChildren,
    /// Mailbox has children.
    HasChildren,
    /// Mailbox is marked for attention.
    Marked,
    /// Mailbox is not marked.
    Unmarked,
    // SPECIAL-USE mailbox attributes (RFC 6154)
    /// All messages (virtual mailbox).
    All,
    /// Mailbox is the archive folder.
    Archive,
    /// Mailbox is the drafts folder.
    Drafts,
    /// Flagged/starred messages (virtual mailbox).
    Flagged,
    /// Mailbox is the junk/spam folder.
    Junk,
    /// Mailbox is the sent folder.
    Sent,
    /// Mailbox is the trash folder.
    Trash,
    /// Mailbox is subscribed.
    Subscribed,
    /// Unknown attribute, kept verbatim.
    Unknown(String),
}

impl MailboxAttribute {
    /// Parses a mailbox attribute string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "\\NOSELECT" => Self::NoSelect,
            "\\NOINFERIORS" => Self::NoInferiors,
            "\\HASNOCHILDREN" => Self::HasNoChildren,
            "\\HASCHILDREN" => Self::HasChildren,
            "\\MARKED" => Self::Marked,
            "\\UNMARKED" => Self::Unmarked,
            // RFC 6154 SPECIAL-USE
            "\\ALL" => Self::All,
            "\\ARCHIVE" => Self::Archive,
            "\\DRAFTS" => Self::Drafts,
            "\\FLAGGED" => Self::Flagged,
            "\\JUNK" | "\\SPAM" => Self::Junk,
            "\\SENT" => Self::Sent,
            "\\TRASH" => Self::Trash,
            "\\SUBSCRIBED" => Self::Subscribed,
            _ => Self::Unknown(s.to_string()),
        }
    }

    /// Returns the attribute as an IMAP string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NoSelect => "\\Noselect",
            Self::NoInferiors => "\\Noinferiors",
            Self::HasNoChildren => "\\HasNoChildren",
            Self::HasChildren => "\\HasChildren",
            Self::Marked => "\\Marked",
            Self::Unmarked => "\\Unmarked",
            Self::All => "\\All",
            Self::Archive => "\\Archive",
            Self::Drafts => "\\Drafts",
            Self::Flagged => "\\Flagged",
            Self::Junk => "\\Junk",
            Self::Sent => "\\Sent",
            Self::Trash => "\\Trash",
            Self::Subscribed => "\\Subscribed",
            Self::Unknown(s) => s,
        }
    }
}

impl From<String> for MailboxAttribute {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<MailboxAttribute> for String {
    fn from(attr: MailboxAttribute) -> Self {
        match attr {
            MailboxAttribute::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// One child mailbox of a cached listing.
///
/// This is what a `LIST "parent" "%"` response yields per line: the child's
/// full name, the hierarchy delimiter and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailboxEntry {
    /// Full mailbox name.
    pub mailbox: Mailbox,
    /// Hierarchy delimiter, `None` for a flat namespace.
    pub delimiter: Option<char>,
    /// Mailbox attributes.
    pub attributes: Vec<MailboxAttribute>,
}

impl MailboxEntry {
    /// Creates an entry without attributes.
    #[must_use]
    pub fn new(mailbox: impl Into<String>, delimiter: Option<char>) -> Self {
        Self {
            mailbox: Mailbox::new(mailbox),
            delimiter,
            attributes: Vec::new(),
        }
    }

    /// Sets the attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<MailboxAttribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns true if the attribute is present.
    #[must_use]
    pub fn has_attribute(&self, attr: &MailboxAttribute) -> bool {
        self.attributes.contains(attr)
    }

    /// Returns true unless the server marked the mailbox `\Noselect`.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.has_attribute(&MailboxAttribute::NoSelect)
    }

    /// Whether the mailbox has children.
    ///
    /// `None` when the server sent neither `\HasChildren` nor
    /// `\HasNoChildren`, in which case only listing the mailbox tells.
    #[must_use]
    pub fn has_children(&self) -> Option<bool> {
        if self.has_attribute(&MailboxAttribute::HasChildren) {
            Some(true)
        } else if self.has_attribute(&MailboxAttribute::HasNoChildren)
            || self.has_attribute(&MailboxAttribute::NoInferiors)
        {
            Some(false)
        } else {
            None
        }
    }

    /// Returns the last hierarchy segment of the name.
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        let name = self.mailbox.as_str();
        match self.delimiter {
            Some(delim) => name.rsplit(delim).next().unwrap_or(name),
            None => name,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;

    mod mailbox_tests {
        use super::*;

        #[test]
        fn kept_verbatim() {
            let mb = Mailbox::new("inbox.Sent ");
            assert_eq!(mb.as_str(), "inbox.Sent ");
            assert_ne!(mb, Mailbox::new("INBOX.Sent"));
        }

        #[test]
        fn inbox() {
            assert_eq!(Mailbox::inbox().as_str(), "INBOX");
        }

        #[test]
        fn display() {
            assert_eq!(format!("{}", Mailbox::from("Drafts")), "Drafts");
        }
    }

    mod attribute_tests {
        use super::*;

        #[test]
        fn parse_known() {
            assert_eq!(
                MailboxAttribute::parse("\\NoSelect"),
                MailboxAttribute::NoSelect
            );
            assert_eq!(
                MailboxAttribute::parse("\\HASCHILDREN"),
                MailboxAttribute::HasChildren
            );
            assert_eq!(MailboxAttribute::parse("\\Spam"), MailboxAttribute::Junk);
        }

        #[test]
        fn unknown_round_trips_verbatim() {
            let attr = MailboxAttribute::parse("\\X-Custom");
            assert_eq!(attr, MailboxAttribute::Unknown("\\X-Custom".to_string()));
            assert_eq!(String::from(attr), "\\X-Custom");
        }

        #[test]
        fn as_str_parses_back() {
            for attr in [
                MailboxAttribute::NoSelect,
                MailboxAttribute::NoInferiors,
                MailboxAttribute::HasNoChildren,
                MailboxAttribute::Trash,
                MailboxAttribute::Subscribed,
            ] {
                assert_eq!(MailboxAttribute::parse(attr.as_str()), attr);
            }
        }
    }

    mod entry_tests {
        use super::*;

        #[test]
        fn leaf_name_uses_delimiter() {
            let entry = MailboxEntry::new("INBOX.Sent.2024", Some('.'));
            assert_eq!(entry.leaf_name(), "2024");
        }

        #[test]
        fn leaf_name_without_delimiter() {
            let entry = MailboxEntry::new("Archive/Old", None);
            assert_eq!(entry.leaf_name(), "Archive/Old");
        }

        #[test]
        fn children_tristate() {
            let unknown = MailboxEntry::new("A", Some('/'));
            assert_eq!(unknown.has_children(), None);

            let parent = unknown
                .clone()
                .with_attributes(vec![MailboxAttribute::HasChildren]);
            assert_eq!(parent.has_children(), Some(true));

            let leaf = unknown.with_attributes(vec![MailboxAttribute::NoInferiors]);
            assert_eq!(leaf.has_children(), Some(false));
        }

        #[test]
        fn selectable() {
            let entry = MailboxEntry::new("[Gmail]", Some('/'))
                .with_attributes(vec![MailboxAttribute::NoSelect]);
            assert!(!entry.is_selectable());
            assert!(MailboxEntry::new("INBOX", Some('/')).is_selectable());
        }
    }
}
