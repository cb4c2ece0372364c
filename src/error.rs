//! Error types for supercoder modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the OpenAI chat-completions API.
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error(
        "Missing OPENAI_API_KEY. Export it in your shell, e.g.:\n  export OPENAI_API_KEY=your_real_key_here"
    )]
    MissingApiKey,

    #[error("Invalid OPENAI_API_KEY (401). Fix the key and try again.")]
    AuthFailed,

    #[error("OpenAI request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("OpenAI request failed with status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Failed to parse OpenAI response: {0}")]
    InvalidResponse(String),

    #[error("OpenAI response contained no choices")]
    EmptyResponse,
}

/// Errors from the generate-write-execute loop.
#[derive(Error, Debug)]
pub enum CodeGenError {
    #[error("Model did not wrap code with {marker} markers. Response began:\n{snippet}")]
    MissingMarkers {
        marker: &'static str,
        snippet: String,
    },

    #[error("Code generation failed after {0} attempts")]
    AttemptsExhausted(usize),

    #[error("Failed to write generated program to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Api(#[from] OpenAiError),
}

/// Errors from running the generated program.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Python interpreter '{0}' not found. Install it or point --python at one.")]
    NotInstalled(String),

    #[error("Failed to spawn the generated program: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Generated program timed out after {0} seconds")]
    Timeout(u64),

    #[error("Generated program exited with code {code}:\n{stderr}")]
    NonZeroExit { code: i32, stderr: String },
}
