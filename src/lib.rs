pub mod config;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod llm;
pub mod mcp;
pub mod output;
pub mod slug;

// Re-export main types
pub use config::{FetchConfig, GeneratorConfig, LlmConfig, OutputConfig, ResourceConfig};
pub use error::GenerateError;
pub use generator::{GeneratedProject, ProjectGenerator, infer_title_from_markdown};
pub use llm::{LlmClient, OpenAiClient, StubClient, resolve_client};
pub use output::{FileSpecWriter, OutputWriter};

// Re-export MCP server
pub use mcp::PortfolioForgeServer;

// Re-export slug utilities
pub use slug::slugify;
