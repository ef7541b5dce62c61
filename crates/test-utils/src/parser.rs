//! Reference markup parser for attribute sources.
//!
//! Reads saved block markup into a small element tree, finds the first
//! element whose tag matches the source selector, and extracts the value the
//! source asks for. Selectors are plain tag names.

use std::collections::BTreeMap;

use cgb_block_sdk::error::BlockError;
use cgb_block_sdk::host::MarkupParser;
use cgb_block_sdk::markup::{escape_attr, escape_text};
use cgb_block_sdk::schema::{AttributeSource, AttributeValue};
use cgb_block_sdk::types::{ContentValue, InlineFormat, InlineNode};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "wbr"];

#[derive(Debug, Clone, PartialEq)]
enum MarkupNode {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        children: Vec<MarkupNode>,
    },
    Text(String),
}

/// Parser implementing the `children`, `attribute`, `text` and `html`
/// sources.
///
/// A `children` source with no matching element yields the empty sequence,
/// matching how absent rich text is treated. The other sources report
/// [`BlockError::SelectorNotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceParser;

impl ReferenceParser {
    pub fn new() -> Self {
        Self
    }
}

impl MarkupParser for ReferenceParser {
    fn parse(&self, markup: &str, source: &AttributeSource) -> Result<AttributeValue, BlockError> {
        let selector = source.selector();
        let tree = parse_tree(markup).map_err(|e| BlockError::parse(selector, e))?;
        let matched = find(&tree, selector);

        match (source, matched) {
            (AttributeSource::Children { .. }, None) => {
                Ok(AttributeValue::Content(ContentValue::empty()))
            }
            (_, None) => Err(BlockError::SelectorNotFound {
                selector: selector.to_string(),
            }),
            (AttributeSource::Children { .. }, Some((_, children))) => {
                let value = ContentValue::new(to_inline(children)).normalize();
                Ok(AttributeValue::Content(value))
            }
            (AttributeSource::Text { .. }, Some((_, children))) => {
                let mut text = String::new();
                for child in children {
                    push_text(child, &mut text);
                }
                Ok(AttributeValue::String(text))
            }
            (AttributeSource::Html { .. }, Some((_, children))) => {
                let mut html = String::new();
                for child in children {
                    push_html(child, &mut html);
                }
                Ok(AttributeValue::String(html))
            }
            (AttributeSource::Attribute { attribute, .. }, Some((attrs, _))) => attrs
                .get(attribute)
                .cloned()
                .map(AttributeValue::String)
                .ok_or_else(|| BlockError::MissingAttribute {
                    selector: selector.to_string(),
                    attribute: attribute.clone(),
                }),
        }
    }
}

fn parse_tree(markup: &str) -> Result<Vec<MarkupNode>, quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);
    // Void elements such as `<br>` have no closing tag.
    reader.config_mut().check_end_names = false;
    parse_children(&mut reader, None)
}

fn parse_children(
    reader: &mut Reader<&[u8]>,
    parent: Option<&str>,
) -> Result<Vec<MarkupNode>, quick_xml::Error> {
    let mut nodes = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = decode_tag(reader, e.name().as_ref());
                let attrs = decode_attrs(reader, &e);
                let children = if VOID_ELEMENTS.contains(&tag.as_str()) {
                    Vec::new()
                } else {
                    parse_children(reader, Some(&tag))?
                };
                nodes.push(MarkupNode::Element {
                    tag,
                    attrs,
                    children,
                });
            }
            Event::Empty(e) => {
                nodes.push(MarkupNode::Element {
                    tag: decode_tag(reader, e.name().as_ref()),
                    attrs: decode_attrs(reader, &e),
                    children: Vec::new(),
                });
            }
            Event::Text(e) => {
                let text = decode_lossy(reader, &e);
                push_text_node(&mut nodes, &text);
            }
            Event::GeneralRef(e) => {
                let entity = decode_lossy(reader, &e);
                push_text_node(&mut nodes, &decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                push_text_node(&mut nodes, &text);
            }
            Event::End(e) => {
                let end = decode_tag(reader, e.name().as_ref());
                if parent == Some(end.as_str()) {
                    return Ok(nodes);
                }
                // Stray close tag, e.g. `</br>`.
            }
            Event::Eof => return Ok(nodes),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }
}

fn decode_lossy(reader: &Reader<&[u8]>, bytes: &[u8]) -> String {
    reader.decoder().decode(bytes).map_or_else(
        |_| String::from_utf8_lossy(bytes).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_tag(reader: &Reader<&[u8]>, name: &[u8]) -> String {
    decode_lossy(reader, name).to_ascii_lowercase()
}

fn decode_attrs(reader: &Reader<&[u8]>, e: &BytesStart) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    for attr in e.attributes().flatten() {
        let key = decode_tag(reader, attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.insert(key, value);
    }
    attrs
}

/// Resolve an entity reference name (the part between `&` and `;`).
fn decode_entity(entity: &str) -> String {
    let named = match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    };
    let numeric = || {
        let code = if let Some(hex) = entity
            .strip_prefix("#x")
            .or_else(|| entity.strip_prefix("#X"))
        {
            u32::from_str_radix(hex, 16).ok()
        } else {
            entity.strip_prefix('#').and_then(|dec| dec.parse().ok())
        };
        code.and_then(char::from_u32)
    };
    named
        .or_else(numeric)
        .map_or_else(|| format!("&{entity};"), String::from)
}

fn push_text_node(nodes: &mut Vec<MarkupNode>, text: &str) {
    if let Some(MarkupNode::Text(prev)) = nodes.last_mut() {
        prev.push_str(text);
    } else {
        nodes.push(MarkupNode::Text(text.to_string()));
    }
}

/// First element (depth-first, document order) with tag `selector`.
fn find<'a>(
    nodes: &'a [MarkupNode],
    selector: &str,
) -> Option<(&'a BTreeMap<String, String>, &'a [MarkupNode])> {
    for node in nodes {
        if let MarkupNode::Element {
            tag,
            attrs,
            children,
        } = node
        {
            if tag.eq_ignore_ascii_case(selector) {
                return Some((attrs, children));
            }
            if let Some(found) = find(children, selector) {
                return Some(found);
            }
        }
    }
    None
}

/// Convert markup nodes to rich text. Unknown wrappers such as `span`
/// contribute their children only.
fn to_inline(nodes: &[MarkupNode]) -> Vec<InlineNode> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            MarkupNode::Text(text) => out.push(InlineNode::text(text.clone())),
            MarkupNode::Element { tag, .. } if tag == "br" => out.push(InlineNode::LineBreak),
            MarkupNode::Element {
                tag,
                attrs,
                children,
            } => {
                let format = InlineFormat::from_tag(
                    tag,
                    attrs.get("href").cloned(),
                    attrs.get("target").cloned(),
                );
                match format {
                    Some(format) => out.push(InlineNode::formatted(format, to_inline(children))),
                    None => out.extend(to_inline(children)),
                }
            }
        }
    }
    out
}

fn push_text(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Text(text) => out.push_str(text),
        MarkupNode::Element { children, .. } => {
            for child in children {
                push_text(child, out);
            }
        }
    }
}

fn push_html(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Text(text) => out.push_str(&escape_text(text)),
        MarkupNode::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (key, value) in attrs {
                out.push_str(&format!(" {key}=\"{}\"", escape_attr(value)));
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            for child in children {
                push_html(child, out);
            }
            out.push_str(&format!("</{tag}>"));
        }
    }
}
