//! Structured rich-text documents for the plinth content stack
//!
//! Long-form bodies (blog posts, experience descriptions) are stored as a
//! typed node tree plus a pre-rendered HTML string. The tree is the source
//! of truth; [`DocumentBody`] keeps the pair in sync through every edit.
//!
//! # Example
//!
//! ```rust
//! use plinth_document::{derive_slug, DocumentBody, Node};
//!
//! let mut body = DocumentBody::new();
//! body.edit(|blocks| blocks.push(Node::paragraph(vec![Node::text("Hello World")])));
//!
//! assert_eq!(body.html(), "<p>Hello World</p>");
//! assert_eq!(derive_slug("Hello World"), "hello-world");
//! ```

pub mod body;
pub mod html;
pub mod node;
pub mod slug;

// Re-export main types
pub use body::DocumentBody;
pub use html::render_html;
pub use node::{
    CodeBlockAttrs, Document, HeadingAttrs, ImageAttrs, LinkAttrs, Mark, Node, OrderedListAttrs,
};
pub use slug::derive_slug;
