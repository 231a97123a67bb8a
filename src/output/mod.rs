pub mod files;

pub use files::FileSpecWriter;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::GenerateError;

/// Trait for persisting generated project specs
#[async_trait]
pub trait OutputWriter: Send + Sync {
    /// Write the Markdown spec for `slug`, returning the per-project
    /// directory it was written into.
    async fn write_spec(&self, slug: &str, markdown: &str) -> Result<PathBuf, GenerateError>;
}
