pub mod settings;

pub use settings::{FetchConfig, GeneratorConfig, LlmConfig, OutputConfig, ResourceConfig};
