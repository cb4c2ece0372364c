//! Prompt construction and code extraction.

use crate::error::CodeGenError;

/// Marker the model must wrap the program with.
pub const CODE_MARKER: &str = "@@D";

/// Longest raw-response snippet quoted back in a marker error.
const SNIPPET_LEN: usize = 500;

/// Instructions sent as the system message on every request.
pub const SYSTEM_PROMPT: &str = "You are a Python developer. Output ONLY Python code.\n\
Include assert-based tests (at least 5 different test cases).\n\
Wrap the FULL code between @@D markers like:\n\
@@D\n<code>\n@@D\n\
Do not add explanations or extra text.";

/// Build the first request of a session.
pub fn build_initial_request(program: &str) -> String {
    format!(
        "Write this program in Python: {program}\n\
         Include assert tests with 5 different inputs.\n\
         Wrap code with {CODE_MARKER}."
    )
}

/// Build a follow-up request carrying the previous attempt's failure.
pub fn build_repair_request(error: &str, code: &str) -> String {
    format!(
        "I ran your previous code and got an error.\n\n\
         ERROR:\n{error}\n\n\
         CODE I RAN:\n{code}\n\n\
         Please return the FULL fixed code with assert tests.\n\
         Remember: wrap code with {CODE_MARKER}."
    )
}

/// Extract the program from a model response.
///
/// The response must contain the code between two `@@D` markers; anything
/// outside them is discarded. A response with fewer than two markers is a
/// generation failure carrying a truncated snippet of what came back.
pub fn extract_code(response: &str) -> Result<String, CodeGenError> {
    let parts: Vec<&str> = response.split(CODE_MARKER).collect();
    if parts.len() < 3 {
        let snippet: String = response.chars().take(SNIPPET_LEN).collect();
        return Err(CodeGenError::MissingMarkers {
            marker: CODE_MARKER,
            snippet,
        });
    }
    Ok(parts[1].trim().to_string())
}
