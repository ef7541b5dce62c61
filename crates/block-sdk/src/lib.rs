//! Block SDK
//!
//! Types, traits, and host bindings for editor blocks. A block crate builds a
//! [`block::BlockDefinition`] from static metadata, an attribute schema and
//! two render functions, then hands it to the host's [`host::BlockRegistry`].
//! Every host service the block touches is passed in explicitly, so blocks
//! can be exercised without a running editor.

pub mod block;
pub mod error;
pub mod host;
pub mod manifest;
pub mod markup;
pub mod render;
pub mod schema;
pub mod types;

pub mod prelude {
    pub use crate::block::*;
    pub use crate::error::BlockError;
    pub use crate::host::*;
    pub use crate::manifest::PluginManifest;
    pub use crate::render;
    pub use crate::render::RenderElement;
    pub use crate::schema::*;
    pub use crate::types::*;
}
