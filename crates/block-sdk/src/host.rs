//! Host services a block depends on.
//!
//! The editor supplies these; blocks receive them as explicit parameters.
//! [`Identity`] is the one implementation shipped here, for hosts without a
//! translation catalog.

use crate::block::{BlockDefinition, ChangeHandler};
use crate::error::BlockError;
use crate::render::RenderElement;
use crate::schema::{AttributeSource, AttributeValue};
use crate::types::ContentValue;

/// Registry of block types owned by the host editor.
pub trait BlockRegistry {
    /// Register `definition` under `name`.
    ///
    /// Returns the registered definition, or `None` if the host rejects it
    /// (for example a duplicate name).
    fn register(&mut self, name: &str, definition: BlockDefinition) -> Option<BlockDefinition>;
}

/// Props handed to the rich-text widget.
pub struct RichTextProps {
    /// Element the editable node renders as.
    pub tag_name: &'static str,
    pub class_name: String,
    pub value: ContentValue,
    /// Invoked once per user edit with the new value. Never called while
    /// rendering.
    pub on_change: ChangeHandler,
}

/// The host's interactive rich-text editor component.
pub trait RichTextWidget {
    fn render(&self, props: RichTextProps) -> RenderElement;
}

/// The host's parser applying attribute sources to saved markup.
pub trait MarkupParser {
    fn parse(&self, markup: &str, source: &AttributeSource) -> Result<AttributeValue, BlockError>;
}

/// Literal-to-locale string lookup.
pub trait Localizer {
    fn translate(&self, literal: &str) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, literal: &str) -> String {
        self(literal)
    }
}

/// Localizer with no catalog: every literal translates to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Localizer for Identity {
    fn translate(&self, literal: &str) -> String {
        literal.to_string()
    }
}
