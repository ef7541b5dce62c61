//! Canonical markup serialization for rich text.
//!
//! Output is deterministic: formatting tags are emitted with their canonical
//! names, link attributes in a fixed order (`href`, then `target`), and the
//! value is normalized first so equal content always yields identical bytes.

use crate::types::{ContentValue, InlineFormat, InlineNode};

/// Escape text content (`&`, `<`, `>`).
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Serialize a value's inline nodes without any wrapper element.
pub fn serialize_inline(value: &ContentValue) -> String {
    let canonical = value.clone().normalize();
    let mut html = String::new();
    for node in canonical.nodes() {
        write_node(node, &mut html);
    }
    html
}

/// Serialize a value wrapped in a single `tag` element with no attributes.
pub fn serialize_element(tag: &str, value: &ContentValue) -> String {
    format!("<{tag}>{}</{tag}>", serialize_inline(value))
}

fn write_node(node: &InlineNode, html: &mut String) {
    match node {
        InlineNode::Text { text } => html.push_str(&escape_text(text)),
        InlineNode::LineBreak => html.push_str("<br>"),
        InlineNode::Formatted { format, children } => {
            let tag = format.tag_name();
            html.push('<');
            html.push_str(tag);
            if let InlineFormat::Link { href, target } = format {
                html.push_str(&format!(" href=\"{}\"", escape_attr(href)));
                if let Some(target) = target {
                    html.push_str(&format!(" target=\"{}\"", escape_attr(target)));
                }
            }
            html.push('>');
            for child in children {
                write_node(child, html);
            }
            html.push_str(&format!("</{tag}>"));
        }
    }
}
