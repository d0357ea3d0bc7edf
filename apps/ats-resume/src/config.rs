use std::fmt;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::errors::AppError;
use crate::llm_client::{ClientConfig, CompletionParams, DEFAULT_BASE_URL};

pub const DEFAULT_MODEL: &str = "gpt-5-thinking-mini";

/// Run configuration: CLI flags merged with environment variables.
/// Flags win over the environment.
#[derive(Clone)]
pub struct Config {
    pub raw_file: Option<PathBuf>,
    pub jd_file: Option<PathBuf>,
    pub candidate_name: String,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub template_file: Option<PathBuf>,
    pub print_prompt: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Self {
        // A blank flag counts as absent, so the environment still applies.
        let api_key = cli
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env("OPENAI_API_KEY"))
            .filter(|key| !key.trim().is_empty());

        Config {
            raw_file: cli.raw_file,
            jd_file: cli.jd_file,
            candidate_name: cli.name,
            model: cli
                .model
                .or_else(|| env("OPENAI_MODEL"))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            base_url: cli
                .base_url
                .or_else(|| env("OPENAI_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_tokens: cli.max_tokens,
            temperature: cli.temperature,
            template_file: cli.template_file,
            print_prompt: cli.print_prompt,
            rust_log: env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Connection settings for the completion client. Fails when no API key
    /// was supplied by flag or environment.
    pub fn client_config(&self) -> Result<ClientConfig, AppError> {
        let api_key = self.api_key.clone().ok_or(AppError::MissingCredential)?;
        Ok(ClientConfig {
            api_key,
            base_url: self.base_url.clone(),
        })
    }

    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_tokens,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("raw_file", &self.raw_file)
            .field("jd_file", &self.jd_file)
            .field("candidate_name", &self.candidate_name)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("template_file", &self.template_file)
            .field("print_prompt", &self.print_prompt)
            .finish()
    }
}
