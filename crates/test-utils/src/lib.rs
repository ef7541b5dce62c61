//! Block test utilities.
//!
//! Stand-ins for the editor host so blocks can be tested without it: an
//! in-memory registry, a scripted rich-text widget that replays user edits,
//! a reference markup parser for attribute sources, and a catalog localizer.

mod parser;
mod registry;
mod widget;

use std::collections::HashMap;

use cgb_block_sdk::host::Localizer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use parser::ReferenceParser;
pub use registry::InMemoryRegistry;
pub use widget::ScriptedWidget;

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Localizer backed by a fixed translation table.
///
/// Literals without an entry translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct CatalogLocalizer {
    entries: HashMap<String, String>,
}

impl CatalogLocalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation.
    pub fn with(mut self, source: &str, translation: &str) -> Self {
        self.entries.insert(source.to_string(), translation.to_string());
        self
    }
}

impl Localizer for CatalogLocalizer {
    fn translate(&self, literal: &str) -> String {
        self.entries
            .get(literal)
            .cloned()
            .unwrap_or_else(|| literal.to_string())
    }
}
