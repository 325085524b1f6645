//! Pretzl tree-walking evaluator.
//!
//! Executes parsed Pretzl programs directly from their expression trees.
//! Hosts connect through two seams: an [`InputProvider`] consulted by the
//! `input` form and an [`OutputHandler`] fed by `print`.

mod builtins;
mod env;
mod error;
mod evaluator;
mod forms;
mod io;
mod value;

pub use builtins::Builtin;
pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::{Interpreter, DEFAULT_MAX_DEPTH};
pub use forms::SpecialForm;
pub use io::{BufferOutput, InputProvider, OutputHandler, ScriptedInput};
pub use value::{format_number, Closure, Value};

use pretzl_types::{PretzlError, SourceFile};

/// Run a complete program.
///
/// Calls `input` once per evaluated `input` form and `output` once per
/// evaluated `print`, in program order. Stops at the first error.
pub fn run(
    source: &str,
    input: &mut dyn InputProvider,
    output: &mut dyn OutputHandler,
) -> Result<(), PretzlError> {
    let source_file = SourceFile::new("<program>", source);
    Interpreter::new(input, output)
        .run_source(&source_file)
        .map(|_| ())
}
