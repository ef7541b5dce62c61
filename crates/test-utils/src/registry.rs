//! In-memory block registry.

use std::collections::BTreeMap;

use cgb_block_sdk::block::BlockDefinition;
use cgb_block_sdk::host::BlockRegistry;

/// Registry of block definitions keyed by name. Duplicate names are
/// rejected, as the editor does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    blocks: BTreeMap<String, BlockDefinition>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a block by name.
    pub fn get(&self, name: &str) -> Option<&BlockDefinition> {
        self.blocks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.blocks.keys().cloned().collect()
    }
}

impl BlockRegistry for InMemoryRegistry {
    fn register(&mut self, name: &str, definition: BlockDefinition) -> Option<BlockDefinition> {
        if self.blocks.contains_key(name) {
            tracing::warn!(block = name, "block is already registered");
            return None;
        }
        self.blocks.insert(name.to_string(), definition.clone());
        Some(definition)
    }
}
