//! Renderer module: Markdown fragments for documentation nodes.

pub mod markdown;
pub mod types;

pub use markdown::{NodeRenderer, RenderedNode};
pub use types::TypeLinker;
