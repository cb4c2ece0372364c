//! OpenAI API key resolution.

use std::env;

use crate::error::OpenAiError;

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Resolve the OpenAI API key from the environment.
///
/// A set-but-empty (or whitespace-only) value is treated the same as an
/// unset one.
pub fn resolve_api_key() -> Result<String, OpenAiError> {
    match env::var(API_KEY_ENV_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(OpenAiError::MissingApiKey),
    }
}
