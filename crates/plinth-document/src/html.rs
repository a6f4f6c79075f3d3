//! HTML rendering for document trees
//!
//! Produces the same markup the editing surface emits so stored
//! `content_html` stays interchangeable with editor output: list items keep
//! their inner paragraphs, links open in a new tab with rel protection, and
//! text and attribute values are escaped.

use crate::node::{Document, Mark, Node};

/// Render a document tree to an HTML string.
pub fn render_html(doc: &Document) -> String {
    let mut out = String::new();
    render_children(&doc.content, &mut out);
    out
}

fn render_children(children: &[Node], out: &mut String) {
    for child in children {
        render_node(child, out);
    }
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Paragraph { content } => {
            out.push_str("<p>");
            render_children(content, out);
            out.push_str("</p>");
        }
        Node::Heading { attrs, content } => {
            let level = attrs.level.clamp(1, 6);
            out.push_str(&format!("<h{}>", level));
            render_children(content, out);
            out.push_str(&format!("</h{}>", level));
        }
        Node::Text { text, marks } => render_text(text, marks, out),
        Node::BulletList { content } => {
            out.push_str("<ul>");
            render_children(content, out);
            out.push_str("</ul>");
        }
        Node::OrderedList { attrs, content } => {
            if attrs.start == 1 {
                out.push_str("<ol>");
            } else {
                out.push_str(&format!("<ol start=\"{}\">", attrs.start));
            }
            render_children(content, out);
            out.push_str("</ol>");
        }
        Node::ListItem { content } => {
            out.push_str("<li>");
            render_children(content, out);
            out.push_str("</li>");
        }
        Node::Blockquote { content } => {
            out.push_str("<blockquote>");
            render_children(content, out);
            out.push_str("</blockquote>");
        }
        Node::CodeBlock { attrs, content } => {
            match &attrs.language {
                Some(language) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    escape_attr(language)
                )),
                None => out.push_str("<pre><code>"),
            }
            // Code blocks hold plain text; marks are not rendered inside.
            for child in content {
                if let Node::Text { text, .. } = child {
                    out.push_str(&escape_text(text));
                }
            }
            out.push_str("</code></pre>");
        }
        Node::Image { attrs } => {
            out.push_str(&format!("<img src=\"{}\"", escape_attr(&attrs.src)));
            if let Some(alt) = &attrs.alt {
                out.push_str(&format!(" alt=\"{}\"", escape_attr(alt)));
            }
            if let Some(title) = &attrs.title {
                out.push_str(&format!(" title=\"{}\"", escape_attr(title)));
            }
            out.push('>');
        }
        Node::HardBreak => out.push_str("<br>"),
        Node::HorizontalRule => out.push_str("<hr>"),
    }
}

fn render_text(text: &str, marks: &[Mark], out: &mut String) {
    for mark in marks {
        match mark {
            Mark::Bold => out.push_str("<strong>"),
            Mark::Italic => out.push_str("<em>"),
            Mark::Underline => out.push_str("<u>"),
            Mark::Code => out.push_str("<code>"),
            Mark::Link { attrs } => out.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer nofollow\">",
                escape_attr(&attrs.href)
            )),
        }
    }
    out.push_str(&escape_text(text));
    for mark in marks.iter().rev() {
        match mark {
            Mark::Bold => out.push_str("</strong>"),
            Mark::Italic => out.push_str("</em>"),
            Mark::Underline => out.push_str("</u>"),
            Mark::Code => out.push_str("</code>"),
            Mark::Link { .. } => out.push_str("</a>"),
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
