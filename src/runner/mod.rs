//! Generated-program execution.

use std::env;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use crate::error::RunError;

/// Default timeout for the generated program (30 seconds). Generated code
/// can loop forever; the bound turns that into an ordinary failed attempt.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "SUPERCODER_RUN_TIMEOUT";

/// Get the configured timeout duration.
///
/// Reads from SUPERCODER_RUN_TIMEOUT if set, otherwise uses the default of
/// 30 seconds. Logs a warning if the variable is set but unparseable.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Check that the configured Python interpreter is installed and runs.
///
/// Uses the `which` crate for cross-platform executable detection, then
/// verifies the binary actually executes by asking for its version.
pub async fn check_python_installed(interpreter: &str) -> Result<(), RunError> {
    if which::which(interpreter).is_err() {
        return Err(RunError::NotInstalled(interpreter.to_string()));
    }

    let version_check = Command::new(interpreter)
        .arg("--version")
        .output()
        .await
        .map_err(RunError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(RunError::NotInstalled(interpreter.to_string()));
    }

    Ok(())
}

/// Execute a program file with the given interpreter and return its stdout.
///
/// A non-zero exit returns `RunError::NonZeroExit` carrying the captured
/// stderr (the traceback, for Python) so the caller can feed it back to the
/// model. Exceeding the timeout returns `RunError::Timeout`.
pub async fn run_program(interpreter: &str, path: &Path) -> Result<String, RunError> {
    let timeout_duration = get_timeout();
    let timeout_secs = timeout_duration.as_secs();

    let output = timeout(
        timeout_duration,
        Command::new(interpreter)
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output(),
    )
    .await
    .map_err(|_| RunError::Timeout(timeout_secs))?
    .map_err(RunError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(RunError::NonZeroExit { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Execution seam for the attempt loop.
#[async_trait]
pub trait ProgramRunner: Send + Sync {
    async fn run(&self, interpreter: &str, path: &Path) -> Result<String, RunError>;
}

/// Runner that executes the program as a real child process.
pub struct PythonRunner;

#[async_trait]
impl ProgramRunner for PythonRunner {
    async fn run(&self, interpreter: &str, path: &Path) -> Result<String, RunError> {
        run_program(interpreter, path).await
    }
}
