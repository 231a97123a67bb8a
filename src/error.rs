use std::path::PathBuf;

/// Errors produced by the generation pipeline.
///
/// Variants map to the failure kinds the tool surface needs to distinguish:
/// configuration (missing resource files), transport, upstream status,
/// empty LLM output, and filesystem I/O. Stringification happens only at the
/// outermost boundary (MCP tools and CLI), never inside the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A required prompt or template file is missing.
    #[error("required file not found: {0}")]
    MissingResource(PathBuf),

    /// Transport-level HTTP failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status.
    #[error("upstream returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// The LLM answered, but with no usable text content.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// Filesystem failure while persisting the generated spec.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
