use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::config::OutputConfig;
use crate::error::GenerateError;

use super::OutputWriter;

/// Filename of the spec inside each per-slug directory
pub const SPEC_FILENAME: &str = "project_spec.md";

/// File-based output writer: `<root>/<slug>/project_spec.md`, full overwrite
/// on every write.
pub struct FileSpecWriter {
    config: OutputConfig,
}

impl FileSpecWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl OutputWriter for FileSpecWriter {
    async fn write_spec(&self, slug: &str, markdown: &str) -> Result<PathBuf, GenerateError> {
        let project_dir = self.config.root.join(slug);
        fs::create_dir_all(&project_dir).await?;

        let spec_path = project_dir.join(SPEC_FILENAME);
        fs::write(&spec_path, markdown).await?;
        info!("Wrote {:?}", spec_path);

        Ok(project_dir)
    }
}
