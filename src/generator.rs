//! Generation pipeline orchestrator.
//!
//! Invokes the LLM client, picks the final project name (hint, else first
//! Markdown heading, else a fixed default), derives the slug, and optionally
//! persists the spec through the output writer.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::llm::{self, LlmClient};
use crate::output::{FileSpecWriter, OutputWriter};
use crate::slug::slugify;

/// Project name used when neither a hint nor an inferred title is available
const DEFAULT_PROJECT_NAME: &str = "MCP Portfolio Project";

/// Result of one generation call. Immutable once constructed; each call
/// produces a fresh, independent record.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedProject {
    pub project_name: String,
    pub slug: String,
    /// Directory the spec was written into, when persistence was requested
    pub path: Option<PathBuf>,
    pub markdown: String,
}

/// Orchestrates the LLM call, naming, slug derivation, and persistence.
pub struct ProjectGenerator {
    llm: Arc<dyn LlmClient>,
    output: Arc<dyn OutputWriter>,
}

impl ProjectGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, output: Arc<dyn OutputWriter>) -> Self {
        Self { llm, output }
    }

    /// Build a generator from resolved configuration: live or stub LLM
    /// client plus a file writer rooted at the configured output directory.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            llm: llm::resolve_client(config),
            output: Arc::new(FileSpecWriter::new(config.output.clone())),
        }
    }

    /// Generate a portfolio project spec from a raw job description.
    ///
    /// Failures from the LLM call or from storage propagate typed; the tool
    /// surface is responsible for rendering them.
    pub async fn generate(
        &self,
        job_description: &str,
        project_name: Option<&str>,
        write_to_disk: bool,
    ) -> Result<GeneratedProject, GenerateError> {
        // An empty or whitespace-only hint counts as no hint at all, so the
        // name falls through to the inferred title and then the default.
        let project_name = project_name.map(str::trim).filter(|s| !s.is_empty());

        let markdown = self
            .llm
            .generate_markdown(job_description, project_name)
            .await?;

        let inferred_title = infer_title_from_markdown(&markdown);
        let final_name = project_name
            .map(str::to_string)
            .or(inferred_title)
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
        let slug = slugify(&final_name);
        debug!(%slug, "Resolved project name '{}'", final_name);

        let path = if write_to_disk {
            Some(self.output.write_spec(&slug, &markdown).await?)
        } else {
            None
        };

        Ok(GeneratedProject {
            project_name: final_name,
            slug,
            path,
            markdown,
        })
    }
}

/// Recover a human-readable title from generated Markdown: the text of the
/// first heading line that is non-empty after stripping its `#` run.
pub fn infer_title_from_markdown(markdown: &str) -> Option<String> {
    for line in markdown.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            let title = line.trim_start_matches('#').trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[test]
    fn test_infer_title_first_heading() {
        assert_eq!(
            infer_title_from_markdown("intro\n# Hello World\nbody"),
            Some("Hello World".to_string())
        );
    }

    #[test]
    fn test_infer_title_skips_empty_headings() {
        assert_eq!(
            infer_title_from_markdown("##\n### Real Title\ntext"),
            Some("Real Title".to_string())
        );
    }

    #[test]
    fn test_infer_title_none_without_heading() {
        assert_eq!(infer_title_from_markdown("just\nplain\ntext"), None);
        assert_eq!(infer_title_from_markdown(""), None);
    }

    #[test]
    fn test_infer_title_strips_hash_run_and_whitespace() {
        assert_eq!(
            infer_title_from_markdown("  ##   Spaced Out  "),
            Some("Spaced Out".to_string())
        );
    }

    // Minimal failing LLM client for error propagation checks
    struct FailingClient;

    #[async_trait]
    impl LlmClient for FailingClient {
        async fn generate_markdown(
            &self,
            _job_description: &str,
            _project_name: Option<&str>,
        ) -> Result<String, GenerateError> {
            Err(GenerateError::EmptyResponse)
        }
    }

    struct NullWriter;

    #[async_trait]
    impl OutputWriter for NullWriter {
        async fn write_spec(&self, _slug: &str, _markdown: &str) -> Result<PathBuf, GenerateError> {
            panic!("writer must not be reached when the LLM call fails");
        }
    }

    #[tokio::test]
    async fn test_llm_failure_propagates_before_write() {
        let generator = ProjectGenerator::new(Arc::new(FailingClient), Arc::new(NullWriter));
        let err = generator.generate("jd", None, true).await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));
    }
}
