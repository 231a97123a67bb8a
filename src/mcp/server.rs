//! Portfolio-Forge MCP server implementation.
//!
//! Exposes the generation pipeline as two MCP tools. Both tools are total
//! with respect to the caller: every failure is rendered as a descriptive
//! text payload, never a protocol error.

use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, ErrorData, Implementation, Role, ServerCapabilities, ServerInfo},
    schemars::JsonSchema,
    tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::fetch::fetch_job_description;
use crate::generator::{GeneratedProject, ProjectGenerator};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the generate_portfolio_project_from_text tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GenerateFromTextParams {
    /// Raw job description text
    pub job_description: String,
    /// Preferred project name. If omitted, the name is inferred from the
    /// generated spec's first heading.
    pub project_name: Option<String>,
}

/// Parameters for the generate_portfolio_project_from_url tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GenerateFromUrlParams {
    /// Public URL of the job posting
    pub url: String,
    /// Preferred project name. If omitted, the name is inferred from the
    /// generated spec's first heading.
    pub project_name: Option<String>,
}

// ============================================================================
// Server Implementation
// ============================================================================

/// Portfolio-Forge MCP Server
///
/// Exposes tools that turn job descriptions into portfolio-ready MCP
/// project specs.
#[derive(Clone)]
pub struct PortfolioForgeServer {
    tool_router: ToolRouter<Self>,
    generator: Arc<ProjectGenerator>,
    fetch_timeout: Duration,
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PortfolioForgeServer {
    fn get_info(&self) -> ServerInfo {
        let instructions = r#"Portfolio-Forge: generate MCP-based portfolio project specs from job descriptions.

Available tools:
- generate_portfolio_project_from_text: generate from a raw job description string
- generate_portfolio_project_from_url: fetch a job posting from a URL, then generate

Generated specs are written to <output-root>/<slug>/project_spec.md.
Without OPENAI_API_KEY set, the server runs in deterministic test mode.
"#
        .to_string();

        ServerInfo {
            server_info: Implementation {
                name: "portfolio-forge".to_string(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                title: Some("Portfolio-Forge".to_string()),
                icons: None,
                website_url: None,
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(instructions),
            ..Default::default()
        }
    }
}

#[tool_router(router = tool_router)]
impl PortfolioForgeServer {
    /// Create a new server with auto-detected config and env overrides.
    ///
    /// Config resolution:
    /// 1. Try ./.portfolio-forge/config.yaml, ./portfolio-forge.yaml,
    ///    ./config/default.yaml
    /// 2. Use defaults
    /// 3. Apply OPENAI_* / PORTFOLIO_FORGE_* environment overrides
    pub fn new() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
        let config_path = GeneratorConfig::auto_detect(&base_dir);
        let config = GeneratorConfig::load_with_env(config_path.as_ref())
            .unwrap_or_else(|_| GeneratorConfig::default().apply_env_overrides());

        Self::with_config(config)
    }

    /// Create with explicit configuration (already env-resolved or not —
    /// overrides are applied here)
    pub fn with_config(config: GeneratorConfig) -> Self {
        let config = config.apply_env_overrides();

        Self {
            tool_router: Self::tool_router(),
            generator: Arc::new(ProjectGenerator::from_config(&config)),
            fetch_timeout: Duration::from_secs(config.fetch.timeout_secs),
        }
    }

    /// Generate a portfolio-ready MCP project spec from a raw job
    /// description string.
    ///
    /// The spec is also written to the configured output directory under
    /// its slug.
    #[tool(
        name = "generate_portfolio_project_from_text",
        description = "Generate a portfolio-ready MCP project spec from a raw job description string. The spec is written to <output-root>/<slug>/project_spec.md. Requires OPENAI_API_KEY for real LLM output; without it a deterministic test-mode spec is produced."
    )]
    pub async fn generate_from_text(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<GenerateFromTextParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let GenerateFromTextParams {
            job_description,
            project_name,
        } = params.0;

        let text = self
            .run_generation(&job_description, project_name.as_deref())
            .await;

        Ok(CallToolResult::success(vec![
            Content::text(text).with_audience(vec![Role::Assistant]),
        ]))
    }

    /// Fetch a job description from a public URL and generate a
    /// portfolio-ready MCP project spec.
    ///
    /// First fetches and cleans the page text, then runs the same generator
    /// as generate_portfolio_project_from_text.
    #[tool(
        name = "generate_portfolio_project_from_url",
        description = "Fetch a job description from a public URL and generate a portfolio-ready MCP project spec. The page is fetched, stripped of markup, and fed to the same generator as generate_portfolio_project_from_text."
    )]
    pub async fn generate_from_url(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<GenerateFromUrlParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let GenerateFromUrlParams { url, project_name } = params.0;

        let text = self
            .run_url_generation(&url, project_name.as_deref())
            .await;

        Ok(CallToolResult::success(vec![
            Content::text(text).with_audience(vec![Role::Assistant]),
        ]))
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Fetch, clean, and generate from a URL, rendering fetch failures and
    /// empty pages as plain text without touching the generator.
    async fn run_url_generation(&self, url: &str, project_name: Option<&str>) -> String {
        match fetch_job_description(url, self.fetch_timeout).await {
            Ok(jd) if jd.is_empty() => {
                "Fetched page appears to be empty or could not be parsed into text.".to_string()
            }
            Ok(jd) => self.run_generation(&jd, project_name).await,
            Err(e) => format!("Failed to fetch job description from URL: {e}"),
        }
    }

    /// Run the generator with persistence enabled, rendering both success
    /// and failure as plain text.
    async fn run_generation(&self, job_description: &str, project_name: Option<&str>) -> String {
        match self
            .generator
            .generate(job_description, project_name, true)
            .await
        {
            Ok(record) => render_summary(&record),
            Err(e) => format!("Portfolio project generation failed: {e}"),
        }
    }
}

impl Default for PortfolioForgeServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format the human-readable tool response: name, slug, save location (when
/// persisted), then the full Markdown after a blank line.
pub fn render_summary(record: &GeneratedProject) -> String {
    let mut lines = vec![
        format!("Project name: {}", record.project_name),
        format!("Slug: {}", record.slug),
    ];
    if let Some(path) = &record.path {
        lines.push(format!("Saved project spec to: {}", path.display()));
    }
    lines.push(String::new());
    lines.push(record.markdown.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(path: Option<PathBuf>) -> GeneratedProject {
        GeneratedProject {
            project_name: "My Cool Project".to_string(),
            slug: "my-cool-project".to_string(),
            path,
            markdown: "# My Cool Project\n\nBody.\n".to_string(),
        }
    }

    #[test]
    fn test_render_summary_with_path() {
        let summary = render_summary(&record(Some(PathBuf::from("out/my-cool-project"))));
        assert_eq!(
            summary,
            "Project name: My Cool Project\n\
             Slug: my-cool-project\n\
             Saved project spec to: out/my-cool-project\n\
             \n\
             # My Cool Project\n\nBody.\n"
        );
    }

    #[test]
    fn test_render_summary_without_path() {
        let summary = render_summary(&record(None));
        assert!(!summary.contains("Saved project spec to:"));
        assert!(summary.starts_with("Project name: My Cool Project\nSlug: my-cool-project\n\n"));
    }

    // ========================================================================
    // URL Tool Boundary
    // ========================================================================

    /// Serve one canned HTTP response on a local port, returning the URL.
    async fn spawn_one_shot_http(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        format!("http://{addr}/job")
    }

    fn test_server(output_root: std::path::PathBuf) -> PortfolioForgeServer {
        let mut config = GeneratorConfig::default();
        config.output.root = output_root;
        PortfolioForgeServer::with_config(config)
    }

    #[tokio::test]
    async fn test_url_tool_renders_fetch_failure_and_writes_nothing() {
        let url = spawn_one_shot_http(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let out_root = dir.path().join("generated");
        let server = test_server(out_root.clone());

        let text = server.run_url_generation(&url, None).await;

        assert!(
            text.starts_with("Failed to fetch job description from URL:"),
            "unexpected response: {text}"
        );
        assert!(text.contains("404"));
        assert!(!out_root.exists());
    }

    #[tokio::test]
    async fn test_url_tool_reports_empty_page_and_writes_nothing() {
        let body = "<html><body></body></html>";
        let url = spawn_one_shot_http(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: 26\r\nconnection: close\r\n\r\n<html><body></body></html>",
        )
        .await;
        assert_eq!(body.len(), 26);

        let dir = tempfile::tempdir().unwrap();
        let out_root = dir.path().join("generated");
        let server = test_server(out_root.clone());

        let text = server.run_url_generation(&url, None).await;

        assert_eq!(
            text,
            "Fetched page appears to be empty or could not be parsed into text."
        );
        assert!(!out_root.exists());
    }
}
