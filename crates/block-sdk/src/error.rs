//! Block error types with clear, actionable messages.

use thiserror::Error;

/// Errors raised while defining, registering, or re-reading a block.
#[derive(Debug, Error)]
pub enum BlockError {
    /// Block names must be `namespace/block-name` in lowercase.
    #[error(
        "invalid block name '{name}': expected 'namespace/block-name' using lowercase letters, digits and dashes"
    )]
    InvalidName { name: String },

    /// A render function needs an attribute the definition does not declare.
    #[error("block '{block}': no attribute named '{attribute}'")]
    UnknownAttribute { block: String, attribute: String },

    /// Saved markup has no element matching the attribute selector.
    #[error("no element matches selector '{selector}'")]
    SelectorNotFound { selector: String },

    /// The matched element lacks the attribute the source reads.
    #[error("element '{selector}' has no attribute '{attribute}'")]
    MissingAttribute { selector: String, attribute: String },

    /// Saved markup could not be parsed.
    #[error("failed to parse markup for selector '{selector}': {details}")]
    Parse { selector: String, details: String },
}

impl BlockError {
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    pub fn parse(selector: impl Into<String>, details: impl ToString) -> Self {
        Self::Parse {
            selector: selector.into(),
            details: details.to_string(),
        }
    }
}
