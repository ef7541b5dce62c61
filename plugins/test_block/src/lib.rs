//! test-block: a basic rich-text paragraph block.
//!
//! Renders and saves the same content without any interactivity. The edit
//! view hands the paragraph to the host's rich-text widget; the save view
//! writes it as a single `<p>` element, which the `content` attribute schema
//! (`children` of `p`) reads back unchanged.

use std::path::Path;

use cgb_block_sdk::markup;
use cgb_block_sdk::prelude::*;

/// Registered block name.
pub const BLOCK_NAME: &str = "cgb/block-test-block";

/// Element the paragraph is edited and saved as.
pub const TAG_NAME: &str = "p";

const MANIFEST: &str = include_str!("../test_block.info.toml");

/// Plugin manifest shipped alongside the crate.
pub fn manifest() -> anyhow::Result<PluginManifest> {
    PluginManifest::parse_str(MANIFEST, Path::new("test_block.info.toml"))
}

/// Build the block definition, localizing every user-visible literal.
pub fn definition(l10n: &dyn Localizer) -> Result<BlockDefinition, BlockError> {
    let metadata = BlockMetadata {
        title: l10n.translate("test-block - CGB Block"),
        icon: "shield".into(),
        category: "common".into(),
        keywords: vec![
            l10n.translate("test-block — CGB Block"),
            l10n.translate("CGB Example"),
            l10n.translate("create-guten-block"),
        ],
    };

    let example =
        Attributes::new().with("content", ContentValue::from(l10n.translate("Hello world")));

    Ok(BlockDefinition::new(BLOCK_NAME, metadata, edit, save)?
        .attribute(AttributeSchema::children("content", TAG_NAME))
        .example(example))
}

/// Edit view: an editable paragraph bound to the content attribute.
pub fn edit(props: EditProps, widget: &dyn RichTextWidget) -> RenderElement {
    let EditProps {
        content,
        on_change,
        class_name,
    } = props;

    widget.render(RichTextProps {
        tag_name: TAG_NAME,
        class_name,
        value: content,
        on_change,
    })
}

/// Save view: the paragraph as `<p>…</p>` with no attributes.
pub fn save(props: &SaveProps) -> String {
    markup::serialize_element(TAG_NAME, &props.content)
}

/// Register the block with the host.
///
/// Returns what the registry returned: the definition, or `None` when the
/// host rejected it.
pub fn register(
    registry: &mut dyn BlockRegistry,
    l10n: &dyn Localizer,
) -> Result<Option<BlockDefinition>, BlockError> {
    let definition = definition(l10n)?;
    let registered = registry.register(BLOCK_NAME, definition);
    match &registered {
        Some(_) => tracing::debug!(block = BLOCK_NAME, "registered block"),
        None => tracing::warn!(block = BLOCK_NAME, "host rejected block registration"),
    }
    Ok(registered)
}
