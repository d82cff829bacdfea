use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::node::ContentNode;

/// Root node of an editor document (`{"type": "doc", "content": [...]}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type", default = "doc_kind")]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<ContentNode>,
}

fn doc_kind() -> String {
    "doc".into()
}

impl Document {
    pub fn new(content: Vec<ContentNode>) -> Self {
        Self {
            kind: doc_kind(),
            content,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// A category a wiki page is filed under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: String,
    pub name: String,
}

/// Metadata stored alongside every wiki revision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionMeta {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
    pub author_id: String,
    /// Identifier of the revision this envelope holds.
    pub current_rev: String,
    /// Sequential number of the revision this envelope holds.
    pub current_rev_number: u64,
    #[serde(default)]
    pub categories: Vec<Category>,
}

mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    /// RFC 3339, or an ISO date or date-time without an offset, read as UTC.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(at.with_timezone(&Utc));
        }
        if let Ok(naive) = raw.parse::<NaiveDateTime>() {
            return Ok(naive.and_utc());
        }
        raw.parse::<NaiveDate>()
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// A stored wiki page revision: metadata plus its document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WikiRevision {
    pub meta: RevisionMeta,
    pub content: Document,
}

impl WikiRevision {
    /// The top-level nodes of the revision's document.
    pub fn nodes(&self) -> &[ContentNode] {
        &self.content.content
    }
}

/// Anything that can be compared: a full revision, a bare document, or a
/// plain node list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentInput {
    Revision(WikiRevision),
    Document(Document),
    Nodes(Vec<ContentNode>),
}

impl DocumentInput {
    /// Decode any accepted shape from JSON text.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        serde_json::from_str(json).map_err(|e| TypeError::Deserialization(e.to_string()))
    }

    /// The top-level nodes, whatever the envelope.
    pub fn nodes(&self) -> &[ContentNode] {
        match self {
            Self::Revision(rev) => rev.nodes(),
            Self::Document(doc) => &doc.content,
            Self::Nodes(nodes) => nodes,
        }
    }

    /// Revision number when the input carries revision metadata.
    pub fn revision_number(&self) -> Option<u64> {
        match self {
            Self::Revision(rev) => Some(rev.meta.current_rev_number),
            _ => None,
        }
    }
}

impl From<WikiRevision> for DocumentInput {
    fn from(rev: WikiRevision) -> Self {
        Self::Revision(rev)
    }
}

impl From<Document> for DocumentInput {
    fn from(doc: Document) -> Self {
        Self::Document(doc)
    }
}

impl From<Vec<ContentNode>> for DocumentInput {
    fn from(nodes: Vec<ContentNode>) -> Self {
        Self::Nodes(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    const REVISION_JSON: &str = r#"{
        "meta": {
            "id": "5b1c",
            "title": "Seoul/Campus",
            "created_at": "2025-03-01T09:00:00Z",
            "updated_at": "2025-03-02T10:30:00Z",
            "author_id": "u-1",
            "current_rev": "r-7",
            "current_rev_number": 7,
            "categories": [{ "category_id": "c-1", "name": "Campus" }]
        },
        "content": {
            "type": "doc",
            "content": [
                { "type": "heading", "content": [{ "type": "text", "text": "Intro" }] }
            ]
        }
    }"#;

    #[test]
    fn decode_revision_envelope() {
        let input = DocumentInput::from_json(REVISION_JSON).unwrap();
        assert!(matches!(input, DocumentInput::Revision(_)));
        assert_eq!(input.revision_number(), Some(7));
        assert_eq!(input.nodes().len(), 1);
        assert_eq!(input.nodes()[0].kind, NodeKind::Heading);
    }

    #[test]
    fn timestamps_without_offset_are_utc() {
        let json = REVISION_JSON
            .replace("2025-03-01T09:00:00Z", "2025-03-01T09:00:00")
            .replace("2025-03-02T10:30:00Z", "2025-03-02");
        let DocumentInput::Revision(rev) = DocumentInput::from_json(&json).unwrap() else {
            panic!("expected a revision");
        };
        assert_eq!(rev.meta.created_at.to_rfc3339(), "2025-03-01T09:00:00+00:00");
        assert_eq!(rev.meta.updated_at.to_rfc3339(), "2025-03-02T00:00:00+00:00");

        let offset = REVISION_JSON.replace("2025-03-01T09:00:00Z", "2025-03-01T18:00:00+09:00");
        let DocumentInput::Revision(rev) = DocumentInput::from_json(&offset).unwrap() else {
            panic!("expected a revision");
        };
        assert_eq!(rev.meta.created_at.to_rfc3339(), "2025-03-01T09:00:00+00:00");

        let bad = REVISION_JSON.replace("2025-03-01T09:00:00Z", "yesterday");
        assert!(DocumentInput::from_json(&bad).is_err());
    }

    #[test]
    fn decode_bare_document() {
        let input = DocumentInput::from_json(
            r#"{ "type": "doc", "content": [{ "type": "paragraph" }] }"#,
        )
        .unwrap();
        assert!(matches!(input, DocumentInput::Document(_)));
        assert_eq!(input.revision_number(), None);
        assert_eq!(input.nodes().len(), 1);
    }

    #[test]
    fn decode_node_list() {
        let input = DocumentInput::from_json(r#"[{ "type": "paragraph" }, { "type": "image" }]"#)
            .unwrap();
        assert!(matches!(input, DocumentInput::Nodes(_)));
        assert_eq!(input.nodes().len(), 2);
    }

    #[test]
    fn reject_garbage() {
        let err = DocumentInput::from_json("42").unwrap_err();
        assert!(matches!(err, TypeError::Deserialization(_)));
    }

    #[test]
    fn revision_meta_timestamps() {
        let rev: WikiRevision = serde_json::from_str(REVISION_JSON).unwrap();
        assert!(rev.meta.updated_at > rev.meta.created_at);
        assert_eq!(rev.meta.categories[0].name, "Campus");
    }
}
