//! supercoder - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use supercoder::codegen::{SessionConfig, random_idea, run_session};
use supercoder::error::CodeGenError;
use supercoder::openai::{DEFAULT_MODEL, OpenAiClient, resolve_api_key};
use supercoder::runner::{PythonRunner, check_python_installed};

/// Generate and run a Python program with OpenAI, retrying on errors.
#[derive(Parser, Debug)]
#[command(name = "supercoder")]
#[command(about = "Generate and run a Python program with OpenAI, retrying on errors")]
#[command(version)]
struct Cli {
    /// Program description (prompts interactively when omitted; empty picks
    /// a random idea)
    request: Option<String>,

    /// Path for the generated program
    #[arg(short = 'o', long, default_value = "code_generate.py")]
    output: PathBuf,

    /// OpenAI model used for generation
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Python interpreter used to run the generated program
    #[arg(long, default_value = "python3")]
    python: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Dev diagnostics via RUST_LOG; defaults to warn if unset.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Step 1: Check prerequisites
    let api_key = resolve_api_key().context("OpenAI API access is required")?;

    check_python_installed(&cli.python)
        .await
        .context("A working Python interpreter is required")?;

    // Step 2: Resolve the program request
    let request = match cli.request.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ if cli.request.is_some() => pick_random_idea(),
        _ => prompt_for_request()?,
    };

    println!("Program: {request}");
    println!();

    // Step 3: Run the generate-and-fix loop
    let client = OpenAiClient::new(cli.model, api_key, None)
        .context("Failed to create OpenAI client")?;

    let config = SessionConfig {
        output: cli.output,
        python: cli.python,
    };

    match run_session(&client, &PythonRunner, &request, &config).await {
        Ok(report) => {
            println!();
            println!(
                "Code creation completed successfully after {} attempt(s)!",
                report.attempts
            );
            println!("Saved to {}", config.output.display());
            if !report.stdout.trim().is_empty() {
                println!();
                println!("Program output:");
                println!("{}", report.stdout.trim_end());
            }
            Ok(())
        }
        Err(CodeGenError::AttemptsExhausted(attempts)) => {
            eprintln!();
            eprintln!("Code generation FAILED after {attempts} attempts.");
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Code generation aborted"),
    }
}

/// Ask the operator what to build; Enter on an empty line picks a random idea.
fn prompt_for_request() -> Result<String> {
    let input: String = Input::new()
        .with_prompt("Tell me what program you want (press Enter for a random one)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read program request")?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(pick_random_idea())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Pick and announce a random idea from the built-in catalogue.
fn pick_random_idea() -> String {
    let idea = random_idea();
    println!("No request given, picking a random idea.");
    idea.to_string()
}
