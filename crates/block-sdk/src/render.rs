//! Render element builder API.
//!
//! Edit views return structured render elements (never raw HTML). The host
//! editor mounts these; a `rich_text` element becomes an editable node bound
//! to the change target the widget was given.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ContentValue;

/// A render element in the JSON render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderElement {
    #[serde(rename = "#type")]
    pub element_type: String,
    #[serde(rename = "#tag", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "#content", skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentValue>,
    #[serde(rename = "#attributes", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
}

impl RenderElement {
    /// Class list from `#attributes.class`, in insertion order.
    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.get("class"))
            .and_then(Value::as_array)
            .map(|classes| classes.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// String attribute from `#attributes`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.get(key))
            .and_then(Value::as_str)
    }
}

/// Builder for constructing render elements.
pub struct ElementBuilder {
    element_type: String,
    tag: Option<String>,
    content: Option<ContentValue>,
    classes: Vec<String>,
    attrs: serde_json::Map<String, Value>,
}

impl ElementBuilder {
    fn new(element_type: &str) -> Self {
        Self {
            element_type: element_type.into(),
            tag: None,
            content: None,
            classes: Vec::new(),
            attrs: serde_json::Map::new(),
        }
    }

    /// Add a class; empty class names are ignored.
    pub fn class(mut self, class: &str) -> Self {
        if !class.is_empty() {
            self.classes.push(class.into());
        }
        self
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.into(), Value::String(value.into()));
        self
    }

    pub fn build(self) -> RenderElement {
        let attributes = if self.classes.is_empty() && self.attrs.is_empty() {
            None
        } else {
            let mut map = self.attrs;
            if !self.classes.is_empty() {
                map.insert(
                    "class".into(),
                    Value::Array(self.classes.into_iter().map(Value::String).collect()),
                );
            }
            Some(Value::Object(map))
        };

        RenderElement {
            element_type: self.element_type,
            tag: self.tag,
            content: self.content,
            attributes,
        }
    }
}

/// Create an editable rich-text element rendered as `tag`.
pub fn rich_text(tag: &str, content: &ContentValue) -> ElementBuilder {
    let mut b = ElementBuilder::new("rich_text");
    b.tag = Some(tag.into());
    b.content = Some(content.clone());
    b
}
