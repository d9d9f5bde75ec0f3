//! MIME body structure (the BODYSTRUCTURE fetch item).
//!
//! The cache keeps body structures as opaque bytes. This module defines the
//! tree itself, the byte encoding used for it, and the dotted part
//! identifiers (`1`, `2.1`, ...) under which individual parts are fetched.

use super::Envelope;

/// Body structure of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyStructure {
    /// Single-part, non-text body.
    Basic {
        /// MIME type.
        media_type: String,
        /// MIME subtype.
        media_subtype: String,
        /// Body parameters.
        params: Vec<(String, String)>,
        /// Content-ID.
        id: Option<String>,
        /// Content-Description.
        description: Option<String>,
        /// Content-Transfer-Encoding.
        encoding: String,
        /// Body size in bytes.
        size: u32,
    },
    /// Text body.
    Text {
        /// Text subtype.
        subtype: String,
        /// Body parameters.
        params: Vec<(String, String)>,
        /// Content-ID.
        id: Option<String>,
        /// Content-Description.
        description: Option<String>,
        /// Content-Transfer-Encoding.
        encoding: String,
        /// Body size in bytes.
        size: u32,
        /// Size in lines.
        lines: u32,
    },
    /// Message/RFC822 body.
    Message {
        /// Envelope of nested message.
        envelope: Box<Envelope>,
        /// Body structure of nested message.
        body: Box<Self>,
        /// Size in lines.
        lines: u32,
    },
    /// Multipart body.
    Multipart {
        /// Child body parts.
        bodies: Vec<Self>,
        /// Multipart subtype.
        subtype: String,
    },
}

impl BodyStructure {
    /// Creates a `text/<subtype>` leaf with default transfer encoding.
    #[must_use]
    pub fn text(subtype: impl Into<String>, size: u32, lines: u32) -> Self {
        Self::Text {
            subtype: subtype.into(),
            params: Vec::new(),
            id: None,
            description: None,
            encoding: "7BIT".to_string(),
            size,
            lines,
        }
    }

    /// Creates a non-text leaf.
    #[must_use]
    pub fn basic(
        media_type: impl Into<String>,
        media_subtype: impl Into<String>,
        encoding: impl Into<String>,
        size: u32,
    ) -> Self {
        Self::Basic {
            media_type: media_type.into(),
            media_subtype: media_subtype.into(),
            params: Vec::new(),
            id: None,
            description: None,
            encoding: encoding.into(),
            size,
        }
    }

    /// Creates a `multipart/<subtype>` node.
    #[must_use]
    pub fn multipart(subtype: impl Into<String>, bodies: Vec<Self>) -> Self {
        Self::Multipart {
            bodies,
            subtype: subtype.into(),
        }
    }

    /// Returns the lowercase `type/subtype` of this node.
    #[must_use]
    pub fn mime_type(&self) -> String {
        match self {
            Self::Basic {
                media_type,
                media_subtype,
                ..
            } => format!("{media_type}/{media_subtype}").to_lowercase(),
            Self::Text { subtype, .. } => format!("text/{subtype}").to_lowercase(),
            Self::Message { .. } => "message/rfc822".to_string(),
            Self::Multipart { subtype, .. } => format!("multipart/{subtype}").to_lowercase(),
        }
    }

    /// Returns the identifier of every fetchable part, in tree order.
    ///
    /// Multipart containers have no identifier of their own. A non-multipart
    /// top-level body is part `1`. An encapsulated message is listed itself
    /// and its body continues numbering beneath it.
    #[must_use]
    pub fn part_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        match self {
            Self::Multipart { .. } => collect_part_ids(self, "", &mut ids),
            _ => collect_part_ids(self, "1", &mut ids),
        }
        ids
    }

    /// Encodes this structure into the opaque form the cache stores.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    #[cfg(feature = "serde")]
    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a structure previously produced by [`Self::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoding.
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

fn child_id(parent: &str, index: usize) -> String {
    if parent.is_empty() {
        (index + 1).to_string()
    } else {
        format!("{parent}.{}", index + 1)
    }
}

fn collect_part_ids(node: &BodyStructure, id: &str, ids: &mut Vec<String>) {
    match node {
        BodyStructure::Multipart { bodies, .. } => {
            for (i, child) in bodies.iter().enumerate() {
                collect_part_ids(child, &child_id(id, i), ids);
            }
        }
        BodyStructure::Message { body, .. } => {
            ids.push(id.to_string());
            match body.as_ref() {
                BodyStructure::Multipart { .. } => collect_part_ids(body, id, ids),
                _ => collect_part_ids(body, &child_id(id, 0), ids),
            }
        }
        BodyStructure::Basic { .. } | BodyStructure::Text { .. } => ids.push(id.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn report() -> BodyStructure {
        BodyStructure::multipart(
            "mixed",
            vec![
                BodyStructure::multipart(
                    "alternative",
                    vec![
                        BodyStructure::text("plain", 120, 4),
                        BodyStructure::text("html", 480, 12),
                    ],
                ),
                BodyStructure::basic("application", "pdf", "BASE64", 40_960),
            ],
        )
    }

    #[test]
    fn single_part_is_part_one() {
        let body = BodyStructure::text("plain", 10, 1);
        assert_eq!(body.part_ids(), ["1"]);
    }

    #[test]
    fn nested_multipart_numbering() {
        assert_eq!(report().part_ids(), ["1.1", "1.2", "2"]);
    }

    #[test]
    fn encapsulated_message_numbering() {
        let forwarded = BodyStructure::Message {
            envelope: Box::default(),
            body: Box::new(report()),
            lines: 30,
        };
        let outer = BodyStructure::multipart(
            "mixed",
            vec![BodyStructure::text("plain", 5, 1), forwarded],
        );
        assert_eq!(outer.part_ids(), ["1", "2", "2.1.1", "2.1.2", "2.2"]);

        let simple = BodyStructure::Message {
            envelope: Box::default(),
            body: Box::new(BodyStructure::text("plain", 5, 1)),
            lines: 1,
        };
        assert_eq!(simple.part_ids(), ["1", "1.1"]);
    }

    #[test]
    fn mime_type() {
        assert_eq!(report().mime_type(), "multipart/mixed");
        assert_eq!(
            BodyStructure::basic("IMAGE", "PNG", "BASE64", 1).mime_type(),
            "image/png"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bytes_decode_to_same_tree() {
        let bytes = report().to_bytes().unwrap();
        assert_eq!(BodyStructure::from_bytes(&bytes).unwrap(), report());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn garbage_bytes_fail() {
        let err = BodyStructure::from_bytes(b"\x00not a structure").unwrap_err();
        assert!(matches!(err, crate::Error::Structure(_)));
    }
}
