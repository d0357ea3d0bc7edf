use thiserror::Error;

use crate::llm_client::ServiceError;
use crate::prompt::TemplateError;

/// Application-level error type.
/// Each variant maps onto the process exit code reported by the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("OPENAI_API_KEY is not set. Provide via env or --api-key.")]
    MissingCredential,

    #[error("Template configuration error: {0}")]
    Template(#[from] TemplateError),

    #[error("Completion request failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Input error: {0:#}")]
    Input(#[from] anyhow::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::MissingCredential => 2,
            AppError::Service(_) => 3,
            AppError::Template(_) | AppError::Input(_) | AppError::Output(_) => 1,
        }
    }
}
