//! One CLI invocation: credential check, template, inputs, then the call.
//!
//! Order matters for exit codes. A missing key is reported before any input
//! file is read, and a bad template fails before the client is built.

use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::generator::{generate_resume, GenerateRequest};
use crate::inputs::{read_file_or_default, JD_SAMPLE, RAW_SAMPLE};
use crate::llm_client::CompletionClient;
use crate::prompt::prompts::TEMPLATE_VERSION;
use crate::prompt::{PromptBuilder, Template};

/// Runs the conversion and returns the text to write to stdout: the model's
/// reply, or the composed prompt under `--print-prompt`.
pub async fn run(config: &Config) -> Result<String, AppError> {
    let client_config = if config.print_prompt {
        None
    } else {
        Some(config.client_config()?)
    };

    let builder = load_prompt_builder(config)?;

    let request = GenerateRequest {
        raw_career_text: read_file_or_default(config.raw_file.as_deref(), RAW_SAMPLE)?,
        job_description_text: read_file_or_default(config.jd_file.as_deref(), JD_SAMPLE)?,
        candidate_name: config.candidate_name.clone(),
    };

    let Some(client_config) = client_config else {
        let prompt = builder.build(
            &request.raw_career_text,
            &request.job_description_text,
            &request.candidate_name,
        )?;
        return Ok(prompt.into_string());
    };

    let llm = CompletionClient::new(&client_config)?;
    info!("Completion client initialized (base url: {})", client_config.base_url);

    generate_resume(&builder, &llm, &request, &config.completion_params()).await
}

pub fn load_prompt_builder(config: &Config) -> Result<PromptBuilder, AppError> {
    match &config.template_file {
        Some(path) => {
            let source = read_file_or_default(Some(path.as_path()), "")?;
            info!("Using instruction template from {}", path.display());
            Ok(PromptBuilder::new(Template::parse(&source)?))
        }
        None => {
            info!("Using bundled instruction template v{TEMPLATE_VERSION}");
            Ok(PromptBuilder::ats_resume()?)
        }
    }
}
