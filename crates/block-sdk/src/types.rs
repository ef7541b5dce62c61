//! Rich-text content model shared by blocks and the host editor.
//!
//! A [`ContentValue`] is an ordered sequence of inline nodes: text runs, hard
//! line breaks, and inline formatting wrapping further inline nodes. There is
//! no block-level nesting.

use serde::{Deserialize, Serialize};

/// Inline formatting applied to a run of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineFormat {
    Bold,
    Italic,
    Code,
    Strikethrough,
    Subscript,
    Superscript,
    Link {
        href: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
}

impl InlineFormat {
    /// Canonical markup tag for this format.
    pub fn tag_name(&self) -> &'static str {
        match self {
            InlineFormat::Bold => "strong",
            InlineFormat::Italic => "em",
            InlineFormat::Code => "code",
            InlineFormat::Strikethrough => "s",
            InlineFormat::Subscript => "sub",
            InlineFormat::Superscript => "sup",
            InlineFormat::Link { .. } => "a",
        }
    }

    /// Map a markup tag back to a format.
    ///
    /// Accepts the legacy aliases `b`, `i` and `del` besides the canonical
    /// tags. Returns `None` for tags that carry no inline formatting.
    pub fn from_tag(tag: &str, href: Option<String>, target: Option<String>) -> Option<Self> {
        let format = match tag {
            "strong" | "b" => InlineFormat::Bold,
            "em" | "i" => InlineFormat::Italic,
            "code" => InlineFormat::Code,
            "s" | "del" => InlineFormat::Strikethrough,
            "sub" => InlineFormat::Subscript,
            "sup" => InlineFormat::Superscript,
            "a" => InlineFormat::Link {
                href: href.unwrap_or_default(),
                target,
            },
            _ => return None,
        };
        Some(format)
    }
}

/// A single inline node of rich text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineNode {
    Text {
        text: String,
    },
    LineBreak,
    Formatted {
        format: InlineFormat,
        children: Vec<InlineNode>,
    },
}

impl InlineNode {
    pub fn text(text: impl Into<String>) -> Self {
        InlineNode::Text { text: text.into() }
    }

    pub fn formatted(format: InlineFormat, children: Vec<InlineNode>) -> Self {
        InlineNode::Formatted { format, children }
    }

    pub fn bold(children: Vec<InlineNode>) -> Self {
        Self::formatted(InlineFormat::Bold, children)
    }

    pub fn italic(children: Vec<InlineNode>) -> Self {
        Self::formatted(InlineFormat::Italic, children)
    }

    pub fn link(href: impl Into<String>, children: Vec<InlineNode>) -> Self {
        Self::formatted(
            InlineFormat::Link {
                href: href.into(),
                target: None,
            },
            children,
        )
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            InlineNode::Text { text } => out.push_str(text),
            InlineNode::LineBreak => out.push('\n'),
            InlineNode::Formatted { children, .. } => {
                for child in children {
                    child.push_plain_text(out);
                }
            }
        }
    }
}

/// Paragraph content: an ordered sequence of inline nodes.
///
/// Deserializes from a node array, a plain string (a single text run), or
/// `null` (the empty sequence).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<RawContent>", into = "Vec<InlineNode>")]
pub struct ContentValue(Vec<InlineNode>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContent {
    Nodes(Vec<InlineNode>),
    Plain(String),
}

impl From<Option<RawContent>> for ContentValue {
    fn from(raw: Option<RawContent>) -> Self {
        match raw {
            Some(RawContent::Nodes(nodes)) => ContentValue(nodes),
            Some(RawContent::Plain(text)) => ContentValue::from(text),
            None => ContentValue::empty(),
        }
    }
}

impl From<ContentValue> for Vec<InlineNode> {
    fn from(value: ContentValue) -> Self {
        value.0
    }
}

impl ContentValue {
    pub fn new(nodes: Vec<InlineNode>) -> Self {
        Self(nodes)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn nodes(&self) -> &[InlineNode] {
        &self.0
    }

    pub fn into_nodes(self) -> Vec<InlineNode> {
        self.0
    }

    /// Concatenated text of every run, with line breaks as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.push_plain_text(&mut out);
        }
        out
    }

    /// Canonical form: no empty text runs, no adjacent text runs, and no
    /// formatting wrappers without children.
    pub fn normalize(self) -> Self {
        Self(normalize_nodes(self.0))
    }

    pub fn is_canonical(&self) -> bool {
        self.clone().normalize() == *self
    }
}

fn normalize_nodes(nodes: Vec<InlineNode>) -> Vec<InlineNode> {
    let mut out: Vec<InlineNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            InlineNode::Text { text } => {
                if text.is_empty() {
                    continue;
                }
                if let Some(InlineNode::Text { text: prev }) = out.last_mut() {
                    prev.push_str(&text);
                } else {
                    out.push(InlineNode::Text { text });
                }
            }
            InlineNode::LineBreak => out.push(InlineNode::LineBreak),
            InlineNode::Formatted { format, children } => {
                let children = normalize_nodes(children);
                if !children.is_empty() {
                    out.push(InlineNode::Formatted { format, children });
                }
            }
        }
    }
    out
}

impl From<&str> for ContentValue {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

impl From<String> for ContentValue {
    fn from(text: String) -> Self {
        if text.is_empty() {
            Self::empty()
        } else {
            Self(vec![InlineNode::Text { text }])
        }
    }
}

impl From<Vec<InlineNode>> for ContentValue {
    fn from(nodes: Vec<InlineNode>) -> Self {
        Self(nodes)
    }
}

impl FromIterator<InlineNode> for ContentValue {
    fn from_iter<I: IntoIterator<Item = InlineNode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
