//! The bounded generate-write-execute loop.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{CodeGenError, OpenAiError};
use crate::openai::CodeModel;
use crate::runner::ProgramRunner;

use super::prompt::{SYSTEM_PROMPT, build_initial_request, build_repair_request, extract_code};

/// Retry budget: one session makes at most this many attempts.
pub const MAX_ATTEMPTS: usize = 5;

/// Where the generated program lands and what runs it.
pub struct SessionConfig {
    pub output: PathBuf,
    pub python: String,
}

/// Outcome of a successful session.
#[derive(Debug)]
pub struct SessionReport {
    /// 1-based attempt number that succeeded.
    pub attempts: usize,
    pub code: String,
    pub stdout: String,
}

/// Run the generate-write-execute loop until the program runs cleanly or
/// the retry budget is exhausted.
///
/// Any failed attempt becomes feedback text for the next request, no matter
/// what failed. The one exception is an invalid API key, which aborts the
/// session immediately.
pub async fn run_session(
    model: &dyn CodeModel,
    runner: &dyn ProgramRunner,
    request: &str,
    config: &SessionConfig,
) -> Result<SessionReport, CodeGenError> {
    let mut last_error: Option<String> = None;
    let mut last_code = String::new();

    for attempt in 1..=MAX_ATTEMPTS {
        let user_request = match &last_error {
            Some(error) => build_repair_request(error, &last_code),
            None => build_initial_request(request),
        };

        println!("Attempt {attempt}/{MAX_ATTEMPTS}: generating code...");
        debug!(%user_request, "model request");

        let response = match model.complete(SYSTEM_PROMPT, &user_request).await {
            Ok(response) => response,
            Err(OpenAiError::AuthFailed) => return Err(OpenAiError::AuthFailed.into()),
            Err(e) => {
                warn!(attempt, error = %e, "model request failed");
                println!("  [FAIL] {e}");
                last_error = Some(e.to_string());
                continue;
            }
        };

        let code = match extract_code(&response) {
            Ok(code) => code,
            Err(e) => {
                println!("  [FAIL] {e}");
                last_error = Some(e.to_string());
                continue;
            }
        };

        // Write the raw code first (on disk even if execution fails).
        fs::write(&config.output, &code).map_err(|source| CodeGenError::WriteFailed {
            path: config.output.clone(),
            source,
        })?;
        last_code = code.clone();

        match runner.run(&config.python, &config.output).await {
            Ok(stdout) => {
                println!("  [PASS] Program ran cleanly");
                return Ok(SessionReport {
                    attempts: attempt,
                    code,
                    stdout,
                });
            }
            Err(e) => {
                let error_text = e.to_string();
                println!("  [FAIL] {error_text}");
                last_error = Some(error_text);
                // A failed attempt's file is not authoritative output.
                let _ = fs::remove_file(&config.output);
            }
        }
    }

    Err(CodeGenError::AttemptsExhausted(MAX_ATTEMPTS))
}
