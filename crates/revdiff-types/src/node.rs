use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Prefix of the placeholder line an image node flattens to.
pub const IMAGE_TAG: &str = "[image]";

/// Discriminator of a [`ContentNode`].
///
/// Serialized as the editor's `type` string. Unknown names are kept in
/// [`NodeKind::Other`] so a tree survives a decode/encode cycle unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Heading,
    Paragraph,
    BulletList,
    OrderedList,
    ListItem,
    Details,
    Image,
    CodeBlock,
    Other(String),
}

impl NodeKind {
    /// The editor's name for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::BulletList => "bulletList",
            Self::OrderedList => "orderedList",
            Self::ListItem => "listItem",
            Self::Details => "details",
            Self::Image => "image",
            Self::CodeBlock => "codeBlock",
            Self::Other(name) => name,
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        match name {
            "heading" => Self::Heading,
            "paragraph" => Self::Paragraph,
            "bulletList" => Self::BulletList,
            "orderedList" => Self::OrderedList,
            "listItem" => Self::ListItem,
            "details" => Self::Details,
            "image" => Self::Image,
            "codeBlock" => Self::CodeBlock,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Other(_) => Self::Other(name),
            known => known,
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the editor's rich-text content tree.
///
/// The wire shape follows the editor's JSON: `type`, `text`, `attrs` and
/// `content`. A node either carries `text` or has children; a node with
/// neither reads as empty text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    #[serde(rename = "type", default)]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "attrs", default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,

    #[serde(
        rename = "content",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// An empty node of the given kind.
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// A leaf `text` node carrying `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Other("text".into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Append children, builder style.
    pub fn with_children(mut self, children: impl IntoIterator<Item = ContentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set a single attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// The string value of an attribute, if present and a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(key)?.as_str()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ContentNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ContentNode>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_roundtrip_through_names() {
        for name in [
            "heading",
            "paragraph",
            "bulletList",
            "orderedList",
            "listItem",
            "details",
            "image",
            "codeBlock",
        ] {
            let kind = NodeKind::from(name);
            assert!(!matches!(kind, NodeKind::Other(_)), "{name} should be known");
            assert_eq!(kind.as_str(), name);
        }
    }

    #[test]
    fn unknown_kind_keeps_its_name() {
        let kind = NodeKind::from("horizontalRule".to_string());
        assert_eq!(kind, NodeKind::Other("horizontalRule".into()));
        assert_eq!(String::from(kind), "horizontalRule");
    }

    #[test]
    fn decode_editor_json() {
        let json = r#"{
            "type": "paragraph",
            "content": [
                { "type": "text", "text": "Hello " },
                { "type": "text", "text": "world", "marks": [{ "type": "bold" }] }
            ]
        }"#;
        let node: ContentNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Paragraph);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[1].text.as_deref(), Some("world"));
    }

    #[test]
    fn null_content_is_empty() {
        let node: ContentNode =
            serde_json::from_str(r#"{ "type": "paragraph", "content": null }"#).unwrap();
        assert!(node.children.is_empty());
        assert!(node.text.is_none());
    }

    #[test]
    fn image_attributes() {
        let json = r#"{ "type": "image", "attrs": { "alt": "logo", "src": "/x.png", "width": 40 } }"#;
        let node: ContentNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Image);
        assert_eq!(node.attr_str("alt"), Some("logo"));
        assert_eq!(node.attr_str("src"), Some("/x.png"));
        assert_eq!(node.attr_str("width"), None);
        assert_eq!(node.attr_str("url"), None);
    }

    #[test]
    fn builder_matches_decoded() {
        let built = ContentNode::new(NodeKind::Image)
            .with_attr("alt", "logo")
            .with_attr("src", "/x.png");
        let decoded: ContentNode = serde_json::from_str(
            r#"{ "type": "image", "attrs": { "alt": "logo", "src": "/x.png" } }"#,
        )
        .unwrap();
        assert_eq!(built, decoded);
    }

    #[test]
    fn encode_skips_absent_fields() {
        let node = ContentNode::new(NodeKind::Paragraph).with_children([ContentNode::text("hi")]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "paragraph",
                "content": [{ "type": "text", "text": "hi" }]
            })
        );
    }
}
