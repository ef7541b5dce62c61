//! Parser for block plugin `.info.toml` manifest files.
//!
//! Each block plugin ships a `{name}.info.toml` declaring:
//! - name, version, description
//! - the block it registers (`[block]` name, category, icon)

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::block::{self, BlockDefinition};

/// Plugin metadata parsed from `.info.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    /// Plugin machine name (must match the crate name).
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// Semantic version (e.g., "1.0.0").
    pub version: String,

    /// The block this plugin registers.
    pub block: BlockManifest,
}

/// The `[block]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockManifest {
    /// Namespaced block name, e.g. "cgb/block-test-block".
    pub name: String,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_category() -> String {
    "common".into()
}

fn default_icon() -> String {
    "block-default".into()
}

impl PluginManifest {
    /// Parse a manifest file from the given path.
    pub fn parse(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plugin manifest: {}", path.display()))?;

        Self::parse_str(&content, path)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let manifest: PluginManifest = toml::from_str(content).with_context(|| {
            format!("failed to parse plugin manifest TOML at {}", path.display())
        })?;

        manifest.validate(path)?;
        Ok(manifest)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.name.is_empty() {
            anyhow::bail!("plugin manifest at {} has empty 'name' field", path.display());
        }

        if self.version.is_empty() {
            anyhow::bail!(
                "plugin '{}' at {} has empty 'version' field",
                self.name,
                path.display()
            );
        }

        if !block::is_valid_name(&self.block.name) {
            anyhow::bail!(
                "plugin '{}' declares block '{}': expected a lowercase 'namespace/block-name'",
                self.name,
                self.block.name
            );
        }

        Ok(())
    }

    /// Check that a built definition matches what the manifest declares.
    pub fn check(&self, definition: &BlockDefinition) -> Result<()> {
        let metadata = definition.metadata();
        if definition.name() != self.block.name {
            anyhow::bail!(
                "plugin '{}' declares block '{}' but registers '{}'",
                self.name,
                self.block.name,
                definition.name()
            );
        }
        if metadata.category != self.block.category || metadata.icon != self.block.icon {
            anyhow::bail!(
                "block '{}': manifest category/icon ({}/{}) differ from definition ({}/{})",
                self.block.name,
                self.block.category,
                self.block.icon,
                metadata.category,
                metadata.icon
            );
        }
        Ok(())
    }
}
