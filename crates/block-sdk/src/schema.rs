//! Declarative attribute schemas.
//!
//! An [`AttributeSchema`] tells the host's markup parser how to recover one
//! block attribute from saved markup. The block never interprets the schema
//! itself; it only has to save markup the rule can read back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::ContentValue;

/// Where in the saved markup an attribute value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AttributeSource {
    /// Child nodes of the first element matching `selector`, as rich text.
    Children { selector: String },
    /// Value of `attribute` on the first element matching `selector`.
    Attribute { selector: String, attribute: String },
    /// Text content of the first element matching `selector`.
    Text { selector: String },
    /// Inner markup of the first element matching `selector`.
    Html { selector: String },
}

impl AttributeSource {
    pub fn selector(&self) -> &str {
        match self {
            AttributeSource::Children { selector }
            | AttributeSource::Attribute { selector, .. }
            | AttributeSource::Text { selector }
            | AttributeSource::Html { selector } => selector,
        }
    }

    /// The matcher name used in serialized block settings.
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeSource::Children { .. } => "children",
            AttributeSource::Attribute { .. } => "attribute",
            AttributeSource::Text { .. } => "text",
            AttributeSource::Html { .. } => "html",
        }
    }
}

/// Declared value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Array,
    String,
}

/// Schema for a single block attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    #[serde(skip)]
    name: String,
    #[serde(rename = "type")]
    kind: AttributeType,
    #[serde(flatten)]
    source: AttributeSource,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, kind: AttributeType, source: AttributeSource) -> Self {
        Self {
            name: name.into(),
            kind,
            source,
        }
    }

    /// Rich-text attribute sourced from the children of `selector`.
    pub fn children(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::new(
            name,
            AttributeType::Array,
            AttributeSource::Children {
                selector: selector.into(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeType {
        self.kind
    }

    pub fn source(&self) -> &AttributeSource {
        &self.source
    }
}

/// A recovered attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Content(ContentValue),
    String(String),
}

impl AttributeValue {
    pub fn as_content(&self) -> Option<&ContentValue> {
        match self {
            AttributeValue::Content(value) => Some(value),
            AttributeValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value),
            AttributeValue::Content(_) => None,
        }
    }
}

impl From<ContentValue> for AttributeValue {
    fn from(value: ContentValue) -> Self {
        AttributeValue::Content(value)
    }
}

/// Attribute values keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<AttributeValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Rich-text attribute by name; absent or non-rich-text values read as
    /// the empty sequence.
    pub fn content(&self, name: &str) -> ContentValue {
        self.get(name)
            .and_then(AttributeValue::as_content)
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
