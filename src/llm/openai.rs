//! Live chat-completion client.
//!
//! Single point of entry for OpenAI API calls. One non-streaming request per
//! generation, fixed sampling temperature, no retries and no caching: two
//! identical generation requests are two billed calls and may legitimately
//! return different Markdown.

use serde::{Deserialize, Serialize};
use tracing::debug;

use async_trait::async_trait;

use crate::config::ResourceConfig;
use crate::error::GenerateError;

use super::LlmClient;
use super::prompt::{self, ChatMessage};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const TEMPERATURE: f32 = 0.4;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completion backed implementation of [`LlmClient`].
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    resources: ResourceConfig,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, resources: ResourceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            resources,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate_markdown(
        &self,
        job_description: &str,
        project_name: Option<&str>,
    ) -> Result<String, GenerateError> {
        let messages = prompt::build_messages(&self.resources, job_description, project_name).await?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: TEMPERATURE,
            stream: false,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerateError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        debug!(model = %self.model, "Chat completion call succeeded");

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }
        Ok(content)
    }
}
