use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat-completion model identifier
    pub model: String,
    /// API key for live LLM calls. Absent means stub mode.
    /// Never read from the config file, only from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Instruction prompt sent to the LLM alongside the job description
    pub prompt: PathBuf,
    /// Markdown template whose structure the LLM is asked to follow
    pub template: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for generated specs; each project gets
    /// `<root>/<slug>/project_spec.md`
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Total timeout for fetching a job description URL
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_key: None,
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            prompt: PathBuf::from("prompts/generate_mcp_project.txt"),
            template: PathBuf::from("template/MCP_Project_Template.md"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("generated_projects"),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 20 }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            resources: ResourceConfig::default(),
            output: OutputConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: Option<&PathBuf>) -> anyhow::Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration and apply environment overrides
    pub fn load_with_env(path: Option<&PathBuf>) -> anyhow::Result<Self> {
        Ok(Self::load_or_default(path)?.apply_env_overrides())
    }

    /// Apply environment variable overrides.
    ///
    /// - `OPENAI_API_KEY`: enables live LLM calls (absent = stub mode)
    /// - `OPENAI_MODEL`: overrides the chat-completion model
    /// - `PORTFOLIO_FORGE_OUTPUT_DIR`: overrides the output root
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY")
            && !key.trim().is_empty()
        {
            self.llm.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL")
            && !model.trim().is_empty()
        {
            self.llm.model = model;
        }
        if let Ok(dir) = std::env::var("PORTFOLIO_FORGE_OUTPUT_DIR")
            && !dir.trim().is_empty()
        {
            self.output.root = PathBuf::from(dir);
        }
        self
    }

    /// Auto-detect a config file in the given directory.
    ///
    /// Checks common locations in priority order.
    pub fn auto_detect(base_dir: &Path) -> Option<PathBuf> {
        let candidates = [
            base_dir.join(".portfolio-forge/config.yaml"),
            base_dir.join("portfolio-forge.yaml"),
            base_dir.join("config/default.yaml"),
        ];

        candidates.into_iter().find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.fetch.timeout_secs, 20);
        assert_eq!(config.output.root, PathBuf::from("generated_projects"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            GeneratorConfig::load_or_default(Some(&PathBuf::from("/nonexistent/config.yaml")))
                .unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn test_from_file_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm:\n  model: gpt-4o\noutput:\n  root: /tmp/specs").unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.output.root, PathBuf::from("/tmp/specs"));
        // Unspecified sections fall back to defaults
        assert_eq!(config.fetch.timeout_secs, 20);
    }

    #[test]
    fn test_api_key_never_deserialized_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm:\n  model: gpt-4o").unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert!(config.llm.api_key.is_none());
    }
}
