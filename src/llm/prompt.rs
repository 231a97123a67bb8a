//! Prompt assembly for live LLM calls.
//!
//! Loads the instruction prompt and spec template from disk on every call
//! (no caching, so edits take effect immediately) and composes the
//! two-message conversation sent to the chat-completion endpoint.

use std::path::Path;

use serde::Serialize;

use crate::config::ResourceConfig;
use crate::error::GenerateError;

/// Fixed system prompt framing the assistant's role
pub const SYSTEM_PROMPT: &str = "You are a Senior Solutions Architect and Technical Project Manager. \
     You design MCP-based AI projects that demonstrate deep understanding of a given job \
     description and the required skills. You always produce structured, professional \
     Markdown following the provided template sections exactly.";

/// One entry in a chat-completion conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Read a required resource file, mapping absence to a configuration error.
async fn load_resource(path: &Path) -> Result<String, GenerateError> {
    if !path.exists() {
        return Err(GenerateError::MissingResource(path.to_path_buf()));
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

/// Build the system + user message pair for a generation request.
///
/// The user message concatenates the job description, the instruction prompt,
/// the template document, and (if given) a one-line project name suggestion,
/// separated by blank lines. Resource contents are trimmed but otherwise
/// passed through verbatim.
pub async fn build_messages(
    resources: &ResourceConfig,
    job_description: &str,
    project_name: Option<&str>,
) -> Result<Vec<ChatMessage>, GenerateError> {
    let prompt_text = load_resource(&resources.prompt).await?;
    let template_text = load_resource(&resources.template).await?;

    let mut user_parts = vec![
        "JOB DESCRIPTION:".to_string(),
        job_description.trim().to_string(),
        String::new(),
        "INSTRUCTIONS:".to_string(),
        prompt_text.trim().to_string(),
        String::new(),
        "TEMPLATE (STRUCTURE AND HEADINGS TO FOLLOW):".to_string(),
        template_text.trim().to_string(),
    ];

    if let Some(name) = project_name {
        user_parts.push(String::new());
        user_parts.push(format!(
            "Use this working project name if it fits: {}",
            name.trim()
        ));
    }

    Ok(vec![
        ChatMessage {
            role: "system",
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user",
            content: user_parts.join("\n"),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_resources(dir: &Path) -> ResourceConfig {
        let prompt = dir.join("prompt.txt");
        let template = dir.join("template.md");
        std::fs::write(&prompt, "Follow the template.\n").unwrap();
        std::fs::write(&template, "# Title\n\n## Executive Purpose\n").unwrap();
        ResourceConfig { prompt, template }
    }

    #[tokio::test]
    async fn test_build_messages_shape() {
        let dir = tempfile::tempdir().unwrap();
        let resources = test_resources(dir.path());

        let messages = build_messages(&resources, "  A job description.  ", None)
            .await
            .unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, "user");

        let user = &messages[1].content;
        assert!(user.starts_with("JOB DESCRIPTION:\nA job description.\n\nINSTRUCTIONS:"));
        assert!(user.contains("Follow the template."));
        assert!(user.contains("TEMPLATE (STRUCTURE AND HEADINGS TO FOLLOW):"));
        assert!(!user.contains("working project name"));
    }

    #[tokio::test]
    async fn test_build_messages_with_project_name() {
        let dir = tempfile::tempdir().unwrap();
        let resources = test_resources(dir.path());

        let messages = build_messages(&resources, "jd", Some("  Cool Project  "))
            .await
            .unwrap();

        assert!(
            messages[1]
                .content
                .ends_with("Use this working project name if it fits: Cool Project")
        );
    }

    #[tokio::test]
    async fn test_missing_prompt_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let resources = ResourceConfig {
            prompt: dir.path().join("missing.txt"),
            template: dir.path().join("also_missing.md"),
        };

        let err = build_messages(&resources, "jd", None).await.unwrap_err();
        match err {
            GenerateError::MissingResource(path) => {
                assert_eq!(path, PathBuf::from(dir.path().join("missing.txt")));
            }
            other => panic!("expected MissingResource, got {other:?}"),
        }
    }
}
