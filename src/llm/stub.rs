//! Deterministic offline stub for the LLM client.
//!
//! Used when no API key is configured. Produces a fixed-shape Markdown spec
//! embedding a preview of the job description, so the rest of the pipeline
//! (MCP tools, slugs, file writing) can be exercised without network access.

use async_trait::async_trait;

use crate::error::GenerateError;

use super::LlmClient;

/// Maximum number of characters of the job description embedded in the stub
const PREVIEW_LIMIT: usize = 600;

/// Title used when the caller supplies no project name hint
const STUB_TITLE: &str = "MCP Portfolio Project (Test Mode)";

/// Offline LLM substitute. Pure: identical inputs produce identical output.
pub struct StubClient;

#[async_trait]
impl LlmClient for StubClient {
    async fn generate_markdown(
        &self,
        job_description: &str,
        project_name: Option<&str>,
    ) -> Result<String, GenerateError> {
        let preview = truncate_preview(job_description.trim());
        let title = project_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(STUB_TITLE);

        Ok(format!(
            "# {title}\n\n\
             ## Executive Purpose\n\
             This is a **test-mode** project spec generated without calling an external LLM.\n\
             It exists to verify MCP wiring, file generation, and prompt/template loading.\n\n\
             ## Domain & Knowledge Area\n\
             Derived from the following job description snippet:\n\n\
             ```text\n\
             {preview}\n\
             ```\n\n\
             ## Core MCP + AI Solution\n\
             In a real run (with OPENAI_API_KEY set), this section would describe a full MCP\n\
             architecture tailored to the role, including tools, data sources, and AI flows.\n\n\
             ## Portfolio Value\n\
             This stub proves the generator pipeline works end-to-end (MCP tool → generator →\n\
             file on disk) even when external LLM access is disabled.\n"
        ))
    }
}

/// Truncate the job description to `PREVIEW_LIMIT` characters, appending
/// `" ..."` directly after the cut when truncation occurs.
fn truncate_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LIMIT) {
        Some((byte_idx, _)) => format!("{} ...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
