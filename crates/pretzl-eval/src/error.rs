//! Runtime error types for the Pretzl evaluator.

use pretzl_types::{ErrorCode, PretzlError};
use thiserror::Error;

/// Evaluation error. Every variant carries the line of the expression that
/// failed; none of them is recoverable from inside the language.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A symbol with no binding anywhere in the scope chain.
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String, line: u32 },

    /// Wrong number of arguments to a closure, builtin or special form.
    #[error("'{callee}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        callee: String,
        expected: String,
        actual: usize,
        line: u32,
    },

    /// An operand of the wrong type.
    #[error("type mismatch: {message}")]
    TypeMismatch { message: String, line: u32 },

    /// A `lambda` parameter list entry that is not a symbol.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String, line: u32 },

    /// `get` with an index outside the list.
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: String, len: usize, line: u32 },

    /// `/` or `%` with a zero divisor.
    #[error("'{op}' by zero")]
    DivisionByZero { op: &'static str, line: u32 },

    /// Arithmetic overflowed to infinity or produced NaN.
    #[error("'{op}' produced a non-finite result")]
    NonFiniteResult { op: &'static str, line: u32 },

    /// `()` in evaluated position.
    #[error("cannot evaluate an empty expression")]
    EmptyExpression { line: u32 },

    /// Applying something that is not a closure or builtin.
    #[error("cannot call a {kind} value")]
    NotCallable { kind: &'static str, line: u32 },

    /// Nesting exceeded the interpreter's depth limit.
    #[error("maximum evaluation depth of {limit} exceeded")]
    DepthExceeded { limit: usize, line: u32 },

    /// The host's input provider failed.
    #[error("input provider failed: {message}")]
    Input { message: String, line: u32 },
}

impl EvalError {
    /// Source line the error is attributed to.
    pub fn line(&self) -> u32 {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::InvalidParameter { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::DivisionByZero { line, .. }
            | Self::NonFiniteResult { line, .. }
            | Self::EmptyExpression { line }
            | Self::NotCallable { line, .. }
            | Self::DepthExceeded { line, .. }
            | Self::Input { line, .. } => *line,
        }
    }

    /// Structured error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UndefinedVariable { .. } => ErrorCode::UNDEFINED_VARIABLE,
            Self::ArityMismatch { .. } => ErrorCode::WRONG_ARG_COUNT,
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::InvalidParameter { .. } => ErrorCode::INVALID_PARAMETER,
            Self::IndexOutOfBounds { .. } => ErrorCode::INDEX_OUT_OF_BOUNDS,
            Self::DivisionByZero { .. } => ErrorCode::DIVISION_BY_ZERO,
            Self::NonFiniteResult { .. } => ErrorCode::NON_FINITE_RESULT,
            Self::EmptyExpression { .. } => ErrorCode::EMPTY_EXPRESSION,
            Self::NotCallable { .. } => ErrorCode::NOT_CALLABLE,
            Self::DepthExceeded { .. } => ErrorCode::DEPTH_EXCEEDED,
            Self::Input { .. } => ErrorCode::INPUT_FAILED,
        }
    }

    pub(crate) fn type_mismatch(message: impl Into<String>, line: u32) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            line,
        }
    }

    pub(crate) fn arity(callee: impl Into<String>, expected: impl ToString, actual: usize, line: u32) -> Self {
        Self::ArityMismatch {
            callee: callee.into(),
            expected: expected.to_string(),
            actual,
            line,
        }
    }
}

impl From<EvalError> for PretzlError {
    fn from(err: EvalError) -> Self {
        PretzlError::at_line(err.code(), err.to_string(), err.line())
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretzl_types::ErrorCategory;

    #[test]
    fn test_arity_message_names_both_counts() {
        let err = EvalError::arity("closure", 1, 2, 7);
        assert_eq!(err.to_string(), "'closure' expects 1 argument(s), got 2");
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_conversion_keeps_line_and_category() {
        let err: PretzlError = EvalError::DivisionByZero { op: "/", line: 3 }.into();
        assert_eq!(err.line, Some(3));
        assert_eq!(err.category, ErrorCategory::Arithmetic);
        assert_eq!(err.message, "'/' by zero");
    }

    #[test]
    fn test_every_variant_maps_to_its_category() {
        let cases = [
            (
                EvalError::UndefinedVariable {
                    name: "x".into(),
                    line: 1,
                },
                ErrorCategory::Binding,
            ),
            (EvalError::arity("f", 1, 0, 1), ErrorCategory::Arity),
            (EvalError::type_mismatch("m", 1), ErrorCategory::Type),
            (
                EvalError::IndexOutOfBounds {
                    index: "3".into(),
                    len: 3,
                    line: 1,
                },
                ErrorCategory::Type,
            ),
            (
                EvalError::NonFiniteResult { op: "*", line: 1 },
                ErrorCategory::Arithmetic,
            ),
            (EvalError::EmptyExpression { line: 1 }, ErrorCategory::Structural),
            (
                EvalError::NotCallable {
                    kind: "null",
                    line: 1,
                },
                ErrorCategory::Structural,
            ),
            (
                EvalError::Input {
                    message: "eof".into(),
                    line: 1,
                },
                ErrorCategory::Input,
            ),
        ];
        for (err, category) in cases {
            assert_eq!(err.code().category(), category, "{err}");
        }
    }
}
