//! Paired document/HTML body for editable long-form content

use crate::html::render_html;
use crate::node::{Document, Node};

/// An editable document body holding the structured tree and its rendered
/// HTML together.
///
/// The tree is the source of truth. Every mutation re-renders the HTML, so
/// the two representations cannot be observed out of sync and a save always
/// persists a matching pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentBody {
    document: Document,
    html: String,
}

impl DocumentBody {
    /// Create an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing tree, rendering its HTML.
    pub fn from_document(document: Document) -> Self {
        let html = render_html(&document);
        Self { document, html }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Replace the tree wholesale.
    pub fn replace(&mut self, document: Document) {
        self.html = render_html(&document);
        self.document = document;
    }

    /// Edit the tree's blocks in place; the HTML is re-rendered afterwards.
    pub fn edit(&mut self, f: impl FnOnce(&mut Vec<Node>)) {
        f(&mut self.document.content);
        self.html = render_html(&self.document);
    }

    /// Apply loaded content only while the body is still empty.
    ///
    /// A load that arrives after editing has begun must not clobber the
    /// edits, and an absent tree is treated as a fresh empty document.
    pub fn load(&mut self, saved: Option<Document>) {
        if let Some(document) = saved {
            if self.is_empty() {
                self.replace(document);
            }
        }
    }

    /// Take the `(content, content_html)` pair for a save payload.
    pub fn to_parts(&self) -> (Document, String) {
        (self.document.clone(), self.html.clone())
    }
}
