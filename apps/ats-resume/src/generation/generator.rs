//! Resume Generation: composes the prompt and runs the single completion call.
//!
//! Flow: build prompt → complete → return the model's text untouched.
//!
//! The output-format contract (delimiter, three code blocks, section headers)
//! is only requested of the model. The returned text is not checked against it.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{CompletionClient, CompletionParams};
use crate::prompt::PromptBuilder;

/// Untrusted inputs for one conversion.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub raw_career_text: String,
    pub job_description_text: String,
    pub candidate_name: String,
}

/// Builds the ATS prompt for `request` and returns the completion text.
pub async fn generate_resume(
    builder: &PromptBuilder,
    llm: &CompletionClient,
    request: &GenerateRequest,
    params: &CompletionParams,
) -> Result<String, AppError> {
    let prompt = builder.build(
        &request.raw_career_text,
        &request.job_description_text,
        &request.candidate_name,
    )?;
    info!(
        "Composed ATS prompt ({} chars), requesting completion from {}",
        prompt.as_str().len(),
        params.model
    );

    let text = llm
        .complete(
            prompt.as_str(),
            &params.model,
            params.temperature,
            params.max_output_tokens,
        )
        .await?;

    info!("Received {} chars of resume text", text.len());
    Ok(text)
}
