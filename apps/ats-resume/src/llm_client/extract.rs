//! Response extraction.
//!
//! Chat-completion payloads drift between providers and client versions, so
//! the text is looked up through an ordered chain of extractors. The first
//! one that yields non-empty text wins; if none does, the raw response is
//! handed back inside [`ServiceError::UnexpectedShape`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::ServiceError;

/// The representations a completion response may arrive in.
#[derive(Debug, Clone)]
pub enum CompletionResponse {
    /// Dynamic JSON mapping, as decoded straight off the wire.
    Json(Value),
    /// Typed object, as produced by transports that decode into structs.
    Typed(ChatCompletion),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ChoiceMessage>,
    /// Legacy `/completions` text field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl CompletionResponse {
    /// Token usage, when the provider reports it.
    pub fn usage(&self) -> Option<Usage> {
        match self {
            CompletionResponse::Json(value) => value
                .get("usage")
                .and_then(|usage| Usage::deserialize(usage).ok()),
            CompletionResponse::Typed(completion) => completion.usage.clone(),
        }
    }

    /// The response as JSON, for diagnostics.
    pub fn into_raw(self) -> Value {
        match self {
            CompletionResponse::Json(value) => value,
            CompletionResponse::Typed(completion) => {
                serde_json::to_value(completion).unwrap_or(Value::Null)
            }
        }
    }
}

type Extractor = fn(&CompletionResponse) -> Option<String>;

/// Access paths, tried in this order.
const EXTRACTORS: &[(&str, Extractor)] = &[
    ("choices[0].message.content (mapping)", from_mapping),
    ("choices[0].message.content (typed)", from_typed_message),
    ("choices[0].text (legacy)", from_legacy_text),
];

/// Extracts the assistant text. Never returns an empty string.
pub fn extract_text(response: CompletionResponse) -> Result<String, ServiceError> {
    for (path, extractor) in EXTRACTORS {
        if let Some(text) = extractor(&response) {
            debug!("Extracted completion text via {path}");
            return Ok(text);
        }
    }

    Err(ServiceError::UnexpectedShape {
        raw: response.into_raw(),
    })
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn first_choice(value: &Value) -> Option<&Value> {
    value.get("choices")?.get(0)
}

fn from_mapping(response: &CompletionResponse) -> Option<String> {
    let CompletionResponse::Json(value) = response else {
        return None;
    };
    first_choice(value)?
        .get("message")?
        .get("content")?
        .as_str()
        .and_then(non_empty)
}

fn from_typed_message(response: &CompletionResponse) -> Option<String> {
    let completion = match response {
        CompletionResponse::Typed(completion) => Cow::Borrowed(completion),
        CompletionResponse::Json(value) => Cow::Owned(ChatCompletion::deserialize(value).ok()?),
    };
    completion
        .choices
        .first()?
        .message
        .as_ref()?
        .content
        .as_deref()
        .and_then(non_empty)
}

fn from_legacy_text(response: &CompletionResponse) -> Option<String> {
    match response {
        CompletionResponse::Json(value) => {
            first_choice(value)?.get("text")?.as_str().and_then(non_empty)
        }
        CompletionResponse::Typed(completion) => {
            completion.choices.first()?.text.as_deref().and_then(non_empty)
        }
    }
}
