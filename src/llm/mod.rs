//! LLM invocation layer.
//!
//! All chat-completion calls go through the [`LlmClient`] trait. The concrete
//! implementation is resolved once at startup from configuration: a live
//! OpenAI-backed client when an API key is present, otherwise a deterministic
//! offline stub. Callers never inspect the environment themselves.

pub mod openai;
pub mod prompt;
pub mod stub;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;

pub use openai::OpenAiClient;
pub use stub::StubClient;

/// Capability for turning a job description into a Markdown project spec.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate the full Markdown spec for a job description, optionally
    /// steered by a preferred project name.
    async fn generate_markdown(
        &self,
        job_description: &str,
        project_name: Option<&str>,
    ) -> Result<String, GenerateError>;
}

/// Resolve the LLM client from configuration.
///
/// Chosen once at startup so the stub/live branch is a constructor decision,
/// not a per-call environment lookup.
pub fn resolve_client(config: &GeneratorConfig) -> Arc<dyn LlmClient> {
    match &config.llm.api_key {
        Some(api_key) => {
            info!(model = %config.llm.model, "Using live LLM client");
            Arc::new(OpenAiClient::new(
                api_key.clone(),
                config.llm.model.clone(),
                config.resources.clone(),
            ))
        }
        None => {
            info!("No API key configured, using deterministic stub client");
            Arc::new(StubClient)
        }
    }
}
