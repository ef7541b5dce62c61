//! Block definitions.
//!
//! A [`BlockDefinition`] bundles a namespaced name, display metadata, the
//! attribute schemas used to re-read saved markup, an optional preview
//! example, and the two render functions the host calls:
//!
//! - `edit` describes the interactive editor view; content changes flow back
//!   through the change target in [`EditProps`], never through the return
//!   value.
//! - `save` flattens attributes into the markup stored with the post.
//!
//! The definition is built once and never mutated after registration.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::BlockError;
use crate::host::{MarkupParser, RichTextWidget};
use crate::render::RenderElement;
use crate::schema::{AttributeSchema, AttributeSource, AttributeValue, Attributes};
use crate::types::ContentValue;

/// Change target receiving each new content value.
pub type ChangeHandler = Box<dyn FnMut(ContentValue)>;

/// Edit view: renders the editor node for the given props.
pub type EditFn = fn(EditProps, &dyn RichTextWidget) -> RenderElement;

/// Save view: produces the markup persisted for the given props.
pub type SaveFn = fn(&SaveProps) -> String;

#[allow(clippy::expect_used)]
static BLOCK_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*/[a-z][a-z0-9-]*$").expect("block name pattern is valid")
});

/// Whether `name` is a valid `namespace/block-name`.
pub(crate) fn is_valid_name(name: &str) -> bool {
    BLOCK_NAME.is_match(name)
}

/// Props passed to a block's edit view.
pub struct EditProps {
    pub content: ContentValue,
    pub on_change: ChangeHandler,
    /// Class the host assigns to the block's root element.
    pub class_name: String,
}

impl fmt::Debug for EditProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditProps")
            .field("content", &self.content)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

/// Props passed to a block's save view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveProps {
    pub content: ContentValue,
}

/// Display metadata shown in the block inserter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockMetadata {
    pub title: String,
    /// Dashicon identifier (e.g. "shield").
    pub icon: String,
    /// Inserter category (e.g. "common", "formatting", "layout").
    pub category: String,
    /// Search keywords, in display order.
    pub keywords: Vec<String>,
}

/// Attributes used to render the inserter preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockExample {
    pub attributes: Attributes,
}

/// A complete block type definition.
#[derive(Clone, Serialize)]
pub struct BlockDefinition {
    name: String,
    #[serde(flatten)]
    metadata: BlockMetadata,
    attributes: BTreeMap<String, AttributeSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example: Option<BlockExample>,
    #[serde(skip)]
    edit: EditFn,
    #[serde(skip)]
    save: SaveFn,
}

impl fmt::Debug for BlockDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockDefinition")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .field("attributes", &self.attributes)
            .field("example", &self.example)
            .finish_non_exhaustive()
    }
}

impl BlockDefinition {
    /// Create a definition, validating the block name.
    pub fn new(
        name: &str,
        metadata: BlockMetadata,
        edit: EditFn,
        save: SaveFn,
    ) -> Result<Self, BlockError> {
        if !is_valid_name(name) {
            return Err(BlockError::invalid_name(name));
        }
        Ok(Self {
            name: name.to_string(),
            metadata,
            attributes: BTreeMap::new(),
            example: None,
            edit,
            save,
        })
    }

    /// Declare an attribute schema.
    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name().to_string(), schema);
        self
    }

    /// Set the inserter preview example.
    pub fn example(mut self, attributes: Attributes) -> Self {
        self.example = Some(BlockExample { attributes });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    pub fn attribute_schema(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    pub fn attribute_schemas(&self) -> impl Iterator<Item = &AttributeSchema> {
        self.attributes.values()
    }

    pub fn example_attributes(&self) -> Option<&Attributes> {
        self.example.as_ref().map(|e| &e.attributes)
    }

    /// Class the host assigns to the block's root element:
    /// `wp-block-{namespace}-{name}`, with the `core` namespace omitted.
    pub fn default_class_name(&self) -> String {
        let flat = self.name.replacen('/', "-", 1);
        let flat = flat.strip_prefix("core-").unwrap_or(&flat);
        format!("wp-block-{flat}")
    }

    /// Render the edit view for `content`.
    ///
    /// Falls back to [`default_class_name`](Self::default_class_name) when
    /// the host supplies no class.
    pub fn render_editable(
        &self,
        content: ContentValue,
        on_change: ChangeHandler,
        class_name: Option<&str>,
        widget: &dyn RichTextWidget,
    ) -> RenderElement {
        let class_name = class_name
            .map(str::to_string)
            .unwrap_or_else(|| self.default_class_name());
        tracing::trace!(block = %self.name, class = %class_name, "render edit view");
        (self.edit)(
            EditProps {
                content,
                on_change,
                class_name,
            },
            widget,
        )
    }

    /// Render the save view for a set of attributes.
    pub fn render_markup(&self, attributes: &Attributes) -> String {
        let props = SaveProps {
            content: attributes.content("content"),
        };
        let markup = (self.save)(&props);
        tracing::trace!(block = %self.name, bytes = markup.len(), "render save view");
        markup
    }

    /// Re-read every declared attribute from saved markup.
    pub fn attributes_from(
        &self,
        markup: &str,
        parser: &dyn MarkupParser,
    ) -> Result<Attributes, BlockError> {
        let mut attributes = Attributes::new();
        for schema in self.attributes.values() {
            let value = parser.parse(markup, schema.source())?;
            tracing::debug!(
                block = %self.name,
                attribute = schema.name(),
                source = schema.source().kind(),
                "extracted attribute"
            );
            attributes.set(schema.name(), value);
        }
        Ok(attributes)
    }

    /// Re-read one attribute from saved markup.
    pub fn attribute_from(
        &self,
        name: &str,
        markup: &str,
        parser: &dyn MarkupParser,
    ) -> Result<AttributeValue, BlockError> {
        let source: &AttributeSource = self
            .attributes
            .get(name)
            .map(AttributeSchema::source)
            .ok_or_else(|| BlockError::UnknownAttribute {
                block: self.name.clone(),
                attribute: name.to_string(),
            })?;
        parser.parse(markup, source)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::render;

    fn edit(props: EditProps, _widget: &dyn RichTextWidget) -> RenderElement {
        render::rich_text("p", &props.content)
            .class(&props.class_name)
            .build()
    }

    fn save(props: &SaveProps) -> String {
        crate::markup::serialize_element("p", &props.content)
    }

    fn metadata() -> BlockMetadata {
        BlockMetadata {
            title: "Sample".into(),
            icon: "shield".into(),
            category: "common".into(),
            keywords: vec!["sample".into()],
        }
    }

    struct NoWidget;

    impl RichTextWidget for NoWidget {
        fn render(&self, props: crate::host::RichTextProps) -> RenderElement {
            render::rich_text(props.tag_name, &props.value).build()
        }
    }

    #[test]
    fn accepts_namespaced_names() {
        assert!(BlockDefinition::new("cgb/block-test-block", metadata(), edit, save).is_ok());
        assert!(BlockDefinition::new("my-plugin/b2", metadata(), edit, save).is_ok());
    }

    #[test]
    fn rejects_malformed_names() {
        for name in ["test-block", "CGB/Block", "cgb/", "/block", "cgb/block/extra", "1cgb/x"] {
            let err = BlockDefinition::new(name, metadata(), edit, save).unwrap_err();
            assert!(matches!(err, BlockError::InvalidName { .. }), "{name}");
        }
    }

    #[test]
    fn default_class_name_flattens_namespace() {
        let def = BlockDefinition::new("cgb/block-test-block", metadata(), edit, save).unwrap();
        assert_eq!(def.default_class_name(), "wp-block-cgb-block-test-block");

        let core = BlockDefinition::new("core/paragraph", metadata(), edit, save).unwrap();
        assert_eq!(core.default_class_name(), "wp-block-paragraph");
    }

    #[test]
    fn render_editable_uses_default_class_when_absent() {
        let def = BlockDefinition::new("cgb/sample", metadata(), edit, save).unwrap();
        let el = def.render_editable(ContentValue::from("x"), Box::new(|_| {}), None, &NoWidget);
        assert_eq!(el.classes(), vec!["wp-block-cgb-sample"]);

        let el = def.render_editable(
            ContentValue::from("x"),
            Box::new(|_| {}),
            Some("custom"),
            &NoWidget,
        );
        assert_eq!(el.classes(), vec!["custom"]);
    }

    #[test]
    fn render_markup_reads_content_attribute() {
        let def = BlockDefinition::new("cgb/sample", metadata(), edit, save).unwrap();
        let attrs = Attributes::new().with("content", ContentValue::from("Hi"));
        assert_eq!(def.render_markup(&attrs), "<p>Hi</p>");
        assert_eq!(def.render_markup(&Attributes::new()), "<p></p>");
    }

    #[test]
    fn unknown_attribute_is_reported() {
        struct Never;
        impl MarkupParser for Never {
            fn parse(&self, _: &str, source: &AttributeSource) -> Result<AttributeValue, BlockError> {
                Err(BlockError::SelectorNotFound {
                    selector: source.selector().to_string(),
                })
            }
        }

        let def = BlockDefinition::new("cgb/sample", metadata(), edit, save).unwrap();
        let err = def.attribute_from("content", "<p></p>", &Never).unwrap_err();
        assert!(matches!(err, BlockError::UnknownAttribute { .. }));
    }

    #[test]
    fn serializes_settings_without_functions() {
        let def = BlockDefinition::new("cgb/sample", metadata(), edit, save)
            .unwrap()
            .attribute(AttributeSchema::children("content", "p"))
            .example(Attributes::new().with("content", ContentValue::from("Hello world")));
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["name"], "cgb/sample");
        assert_eq!(json["title"], "Sample");
        assert_eq!(json["attributes"]["content"]["source"], "children");
        assert_eq!(json["example"]["attributes"]["content"][0]["text"], "Hello world");
        assert!(json.get("edit").is_none());
    }
}
