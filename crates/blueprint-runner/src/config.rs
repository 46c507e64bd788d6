use std::path::PathBuf;

use blueprint_llm::DEFAULT_ENDPOINT;
use blueprint_store::StoreConfig;
use clap::Parser;

use crate::options::{ContextOverflow, GenerationOptions};

#[derive(Debug, Parser)]
#[command(name = "blueprint", about = "Generate a project from a description")]
pub struct GeneratorConfig {
    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Chat completions endpoint
    #[arg(long, env = "BLUEPRINT_BASE_URL", default_value = DEFAULT_ENDPOINT)]
    pub base_url: String,

    /// Model for spec synthesis and file generation
    #[arg(long, env = "BLUEPRINT_MODEL", default_value = "gpt-4-turbo")]
    pub model: String,

    /// Model for the README summary
    #[arg(long, env = "BLUEPRINT_SUMMARY_MODEL", default_value = "gpt-4o")]
    pub summary_model: String,

    /// Sampling temperature for every call
    #[arg(long, default_value = "0.2")]
    pub temperature: f32,

    /// Directory under which each project directory is created
    #[arg(long, env = "BLUEPRINT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum prompt size in characters (system + user)
    #[arg(long, env = "BLUEPRINT_MAX_CONTEXT_CHARS", default_value = "400000")]
    pub max_context_chars: usize,

    /// Behaviour when a prompt exceeds the maximum size
    #[arg(long, value_enum, default_value_t = ContextOverflow::Fail)]
    pub context_overflow: ContextOverflow,
}

impl GeneratorConfig {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            model: Some(self.model.clone()),
            summary_model: Some(self.summary_model.clone()),
            max_context_chars: self.max_context_chars,
            context_overflow: self.context_overflow,
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            output_dir: Some(self.output_dir.clone()),
        }
    }
}
