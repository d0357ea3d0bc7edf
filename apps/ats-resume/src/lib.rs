//! ATS resume converter.
//!
//! Composes a strict instruction prompt from a candidate's career narrative
//! and a target job description, then asks a chat-completion service to
//! rewrite it as an ATS-optimized resume.

pub mod cli;
pub mod config;
pub mod errors;
pub mod generation;
pub mod inputs;
pub mod llm_client;
pub mod prompt;
