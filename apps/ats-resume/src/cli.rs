use std::path::PathBuf;

use clap::Parser;

use crate::inputs::DEFAULT_CANDIDATE_NAME;

/// Build an ATS resume prompt and send it to a chat-completion service.
///
/// The API key is read from OPENAI_API_KEY unless --api-key is given.
/// The resume text is written to stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "ats-resume", version)]
pub struct Cli {
    /// Path to a file containing raw career data (default: built-in sample)
    #[arg(long)]
    pub raw_file: Option<PathBuf>,

    /// Path to a file containing the target job description (default: built-in sample)
    #[arg(long)]
    pub jd_file: Option<PathBuf>,

    /// Candidate full name
    #[arg(long, default_value = DEFAULT_CANDIDATE_NAME)]
    pub name: String,

    /// Model to use (default: OPENAI_MODEL or gpt-5-thinking-mini)
    #[arg(long)]
    pub model: Option<String>,

    /// API key (prefer the OPENAI_API_KEY env var)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API (default: OPENAI_BASE_URL or the OpenAI API)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Maximum tokens the model may generate
    #[arg(long, default_value_t = 1200)]
    pub max_tokens: u32,

    /// Sampling temperature (0.0 = deterministic)
    #[arg(long, default_value_t = 0.0)]
    pub temperature: f32,

    /// Use an alternative instruction template
    #[arg(long)]
    pub template_file: Option<PathBuf>,

    /// Print the composed prompt and exit without calling the API
    #[arg(long)]
    pub print_prompt: bool,
}
