//! Parser module: turns comment blocks into documentation nodes.

pub mod annotations;
pub mod block;

pub use annotations::Annotator;
