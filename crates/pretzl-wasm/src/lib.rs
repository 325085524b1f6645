//! Pretzl interpreter as a WASM module for browser environments.
//!
//! This crate exposes the Pretzl run pipeline via `wasm-bindgen`, suitable
//! for a playground running in a Web Worker. Input lines are supplied up
//! front; every `print` payload is collected and returned.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { run, check } from 'pretzl-wasm';
//!
//! await init();
//!
//! const result = run('set n input\nprint (* n 2)', ["21"]);
//! console.log(JSON.parse(result));
//! // { success: true, output: ["42"], inputs_consumed: 1 }
//! ```

use pretzl_eval::{BufferOutput, Interpreter, ScriptedInput, DEFAULT_MAX_DEPTH};
use pretzl_types::{PretzlError, SourceFile};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

const PLAYGROUND_FILE: &str = "playground.pz";

/// Outcome of running a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    /// Each `print` payload, in order. Kept on failure.
    pub output: Vec<String>,
    /// How many of the supplied input lines were read.
    pub inputs_consumed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PretzlError>,
}

/// Outcome of parsing a program without running it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub success: bool,
    /// Number of top-level expressions read.
    pub expressions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PretzlError>,
}

/// Run `source`, answering `input` forms from `inputs` in order.
pub fn run_to_result(source: &str, inputs: Vec<String>, max_depth: usize) -> RunResult {
    let mut input = ScriptedInput::new(inputs);
    let mut output = BufferOutput::new();
    let outcome = Interpreter::new(&mut input, &mut output)
        .with_depth_limit(max_depth)
        .run_source(&SourceFile::new(PLAYGROUND_FILE, source));
    RunResult {
        success: outcome.is_ok(),
        output: output.payloads,
        inputs_consumed: input.served(),
        error: outcome.err(),
    }
}

fn to_json(result: &RunResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"output":[],"inputs_consumed":0,"error":{{"message":"Serialization error: {}"}}}}"#,
            e
        )
    })
}

/// Parse `source` and report the first reader error, if any.
pub fn check_to_result(source: &str) -> CheckResult {
    match pretzl_parser::parse(&SourceFile::new(PLAYGROUND_FILE, source)) {
        Ok(program) => CheckResult {
            success: true,
            expressions: program.len(),
            error: None,
        },
        Err(e) => CheckResult {
            success: false,
            expressions: 0,
            error: Some(e),
        },
    }
}

/// Run a Pretzl program.
///
/// Returns a JSON string containing a `RunResult`:
/// ```json
/// { "success": false, "output": ["1"], "inputs_consumed": 0,
///   "error": { "code": 200, "category": "binding", "message": "undefined variable 'y'",
///              "line": 2, "source_line": "print y" } }
/// ```
#[wasm_bindgen]
pub fn run(source: &str, inputs: Vec<String>) -> String {
    to_json(&run_to_result(source, inputs, DEFAULT_MAX_DEPTH))
}

/// Like `run`, with a custom limit on nested evaluations.
///
/// The browser engine's stack is fixed, so embedders on small stacks lower
/// the limit here to get a depth error instead of a trap.
#[wasm_bindgen]
pub fn run_with_depth_limit(source: &str, inputs: Vec<String>, max_depth: u32) -> String {
    to_json(&run_to_result(source, inputs, max_depth as usize))
}

/// Parse a Pretzl program without evaluating it.
///
/// Returns a JSON string containing a `CheckResult`. Faster than `run` when
/// only reader diagnostics are needed (e.g., editor integration).
#[wasm_bindgen]
pub fn check(source: &str) -> String {
    let result = check_to_result(source);
    serde_json::to_string(&result).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"expressions":0,"error":{{"message":"Serialization error: {}"}}}}"#,
            e
        )
    })
}

/// Return the interpreter version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
