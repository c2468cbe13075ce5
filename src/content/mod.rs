//! Content module - posts, metadata and markdown processing

pub mod loader;
mod markdown;
pub mod metadata;
mod post;

pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSource};
