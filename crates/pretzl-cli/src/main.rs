//! Pretzl command-line host.
//!
//! Main entry point for the `pretzl` command.

mod stdio;

use clap::{Parser, Subcommand};
use pretzl_eval::{Interpreter, DEFAULT_MAX_DEPTH};
use pretzl_types::{ErrorCode, PretzlError, SourceFile};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::stdio::{LineInput, StreamOutput};

#[derive(Parser)]
#[command(name = "pretzl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "The Pretzl interpreter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit diagnostics as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Pretzl program, reading `input` lines from stdin
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum nesting of evaluations before the run is aborted
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Parse a Pretzl program without running it
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let outcome = match &cli.command {
        Commands::Run { input, max_depth } => run(input, *max_depth),
        Commands::Check { input } => check(input, cli.json),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err((name, err)) => {
            report(&name, &err, cli.json);
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<(), (String, PretzlError)>;

fn load(path: &Path) -> Result<SourceFile, (String, PretzlError)> {
    let name = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(SourceFile::new(name, text)),
        Err(e) => {
            tracing::debug!(error = %e, "read failed");
            Err((
                name,
                PretzlError::new(
                    ErrorCode::INPUT_FAILED,
                    format!("cannot read file: {e}"),
                    None,
                ),
            ))
        }
    }
}

fn run(path: &Path, max_depth: usize) -> CliResult {
    let source = load(path)?;
    tracing::info!(file = %source.name, max_depth, "running");

    let mut input = LineInput::new(io::stdin().lock());
    let mut output = StreamOutput::new(io::stdout());
    let mut interp = Interpreter::new(&mut input, &mut output).with_depth_limit(max_depth);
    interp
        .run_source(&source)
        .map(|_| ())
        .map_err(|e| (source.name.clone(), e))
}

fn check(path: &Path, json: bool) -> CliResult {
    let source = load(path)?;
    let program = pretzl_parser::parse(&source).map_err(|e| (source.name.clone(), e))?;
    if json {
        println!(
            "{}",
            serde_json::json!({ "success": true, "expressions": program.len() })
        );
    } else {
        println!("{}: ok ({} expressions)", source.name, program.len());
    }
    Ok(())
}

fn report(name: &str, err: &PretzlError, json: bool) {
    if json {
        match serde_json::to_string(err) {
            Ok(text) => eprintln!("{text}"),
            Err(e) => eprintln!("{name}: {err} (serialization error: {e})"),
        }
    } else {
        eprint!("{}", render_error(name, err));
    }
}

/// Human-readable diagnostic: the error, then the offending line if known.
fn render_error(name: &str, err: &PretzlError) -> String {
    let mut text = format!("{name}: {err}\n");
    if let (Some(line), Some(source_line)) = (err.line, &err.source_line) {
        text.push_str(&format!("{line:>5} | {source_line}\n"));
    }
    text
}
