//! Prompt Builder: composes the ATS instruction prompt from untrusted inputs.
//!
//! All user-controlled values are escaped before substitution, so text such
//! as `{invented_slot}` in a career narrative reaches the model verbatim and
//! can never be interpreted as a template directive.

use std::fmt;

use tracing::debug;

pub mod prompts;
pub mod template;

pub use template::{Slot, SlotValues, Template, TemplateError};

use crate::prompt::prompts::ATS_RESUME_TEMPLATE;

/// The prompt after slot substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    escaped: String,
    text: String,
}

impl ComposedPrompt {
    /// Final text sent to the completion service (single braces).
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The pre-render form, in template syntax with every brace doubled.
    pub fn escaped(&self) -> &str {
        &self.escaped
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Lowercases `name` and drops every whitespace character. Punctuation is kept.
pub fn normalized_handle(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: Template,
}

impl PromptBuilder {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Builder over the bundled ATS resume template.
    pub fn ats_resume() -> Result<Self, TemplateError> {
        Template::parse(ATS_RESUME_TEMPLATE).map(Self::new)
    }

    pub fn build(
        &self,
        raw_career_text: &str,
        job_description_text: &str,
        candidate_name: &str,
    ) -> Result<ComposedPrompt, TemplateError> {
        let handle = normalized_handle(candidate_name);
        let values = SlotValues {
            raw_career_text,
            job_description_text,
            candidate_name,
            normalized_handle: &handle,
        };

        let escaped = self.template.bind(&values);
        let text = template::unescape(&escaped)?;

        debug!(
            raw_chars = raw_career_text.len(),
            jd_chars = job_description_text.len(),
            prompt_chars = text.len(),
            "Composed prompt"
        );

        Ok(ComposedPrompt { escaped, text })
    }
}
