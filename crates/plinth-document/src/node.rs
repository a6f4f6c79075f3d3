//! Node tree for structured rich-text documents
//!
//! Documents travel as a typed tree in the editor's JSON shape: every node
//! carries a `"type"` tag, attributes live under `"attrs"`, children under
//! `"content"`, and text marks under `"marks"`. Unknown node or mark types
//! fail deserialization instead of being carried along untyped.

use serde::{Deserialize, Serialize};

/// Root of a structured document, tagged `"type": "doc"` on the wire.
///
/// The tree is the editable source of truth; its HTML rendering is a derived
/// cache (see [`crate::render_html`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    tag: DocTag,
    /// Top-level block nodes in display order
    #[serde(default)]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum DocTag {
    #[default]
    #[serde(rename = "doc")]
    Doc,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from top-level blocks.
    pub fn from_blocks(content: Vec<Node>) -> Self {
        Self {
            tag: DocTag::Doc,
            content,
        }
    }

    /// Whether the document holds no content.
    ///
    /// Matches the editing surface's probe: no blocks, or exactly one block
    /// with no children, counts as empty.
    pub fn is_empty(&self) -> bool {
        match self.content.as_slice() {
            [] => true,
            [only] => !only.has_children(),
            _ => false,
        }
    }
}

/// A block or inline node within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    BulletList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    OrderedList {
        #[serde(default)]
        attrs: OrderedListAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    ListItem {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Blockquote {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    CodeBlock {
        #[serde(default)]
        attrs: CodeBlockAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
    Image {
        attrs: ImageAttrs,
    },
    HardBreak,
    HorizontalRule,
}

impl Node {
    /// Plain text node without marks.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Paragraph wrapping the given inline nodes.
    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }

    /// Whether this node carries child content.
    ///
    /// Text counts its own characters; image, rule and break nodes never
    /// have children.
    pub fn has_children(&self) -> bool {
        match self {
            Node::Text { text, .. } => !text.is_empty(),
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::Blockquote { content }
            | Node::CodeBlock { content, .. } => !content.is_empty(),
            Node::Image { .. } | Node::HardBreak | Node::HorizontalRule => false,
        }
    }
}

/// An inline formatting mark applied to a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
    Link { attrs: LinkAttrs },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    /// Heading depth; rendering clamps to 1..=6
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    /// Number of the first item
    #[serde(default = "default_list_start")]
    pub start: i32,
}

impl Default for OrderedListAttrs {
    fn default() -> Self {
        Self { start: 1 }
    }
}

fn default_list_start() -> i32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttrs {
    /// Asset URL; documents never embed inline binary data
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}
