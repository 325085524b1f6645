use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Parse,
    Binding,
    Arity,
    Type,
    Arithmetic,
    Structural,
    Input,
}

/// Numeric error code (E100–E799).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Parse errors (E100–E199) ──
    pub const UNEXPECTED_CLOSE: Self = Self(100);
    pub const UNCLOSED_BRACKET: Self = Self(101);
    pub const MISMATCHED_BRACKET: Self = Self(102);
    pub const UNEXPECTED_EOF: Self = Self(103);
    pub const NESTING_TOO_DEEP: Self = Self(104);

    // ── Binding errors (E200–E299) ──
    pub const UNDEFINED_VARIABLE: Self = Self(200);

    // ── Arity errors (E300–E399) ──
    pub const WRONG_ARG_COUNT: Self = Self(300);

    // ── Type errors (E400–E499) ──
    pub const TYPE_MISMATCH: Self = Self(400);
    pub const INVALID_PARAMETER: Self = Self(401);
    pub const INDEX_OUT_OF_BOUNDS: Self = Self(402);

    // ── Arithmetic errors (E500–E599) ──
    pub const DIVISION_BY_ZERO: Self = Self(500);
    pub const NON_FINITE_RESULT: Self = Self(501);

    // ── Structural errors (E600–E699) ──
    pub const EMPTY_EXPRESSION: Self = Self(600);
    pub const NOT_CALLABLE: Self = Self(601);
    pub const DEPTH_EXCEEDED: Self = Self(602);

    // ── Input errors (E700–E799) ──
    pub const INPUT_FAILED: Self = Self(700);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Parse,
            200..=299 => ErrorCategory::Binding,
            300..=399 => ErrorCategory::Arity,
            400..=499 => ErrorCategory::Type,
            500..=599 => ErrorCategory::Arithmetic,
            600..=699 => ErrorCategory::Structural,
            700..=799 => ErrorCategory::Input,
            _ => ErrorCategory::Structural, // fallback
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured Pretzl error.
///
/// Every failure, parse-time or run-time, surfaces to the host as exactly
/// one of these. Hosts render it; they must not parse free-form strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PretzlError {
    /// Error code (e.g., E200).
    pub code: ErrorCode,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// 1-based source line, when the failure can be tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// The exact source line for context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl PretzlError {
    /// Create a new error without source context.
    pub fn new(code: ErrorCode, message: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            code,
            category: code.category(),
            message: message.into(),
            line,
            source_line: None,
        }
    }

    /// Create a new error tagged with a source line.
    pub fn at_line(code: ErrorCode, message: impl Into<String>, line: u32) -> Self {
        Self::new(code, message, Some(line))
    }

    /// Attach the text of the offending source line.
    pub fn with_source_line(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }
}

impl fmt::Display for PretzlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "{} [{}] {}", self.code, self.category, self.message)
    }
}

impl std::error::Error for PretzlError {}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "parse"),
            Self::Binding => write!(f, "binding"),
            Self::Arity => write!(f, "arity"),
            Self::Type => write!(f, "type"),
            Self::Arithmetic => write!(f, "arithmetic"),
            Self::Structural => write!(f, "structural"),
            Self::Input => write!(f, "input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::UNEXPECTED_CLOSE.category(), ErrorCategory::Parse);
        assert_eq!(
            ErrorCode::UNDEFINED_VARIABLE.category(),
            ErrorCategory::Binding
        );
        assert_eq!(ErrorCode::WRONG_ARG_COUNT.category(), ErrorCategory::Arity);
        assert_eq!(
            ErrorCode::INDEX_OUT_OF_BOUNDS.category(),
            ErrorCategory::Type
        );
        assert_eq!(
            ErrorCode::DIVISION_BY_ZERO.category(),
            ErrorCategory::Arithmetic
        );
        assert_eq!(ErrorCode::NOT_CALLABLE.category(), ErrorCategory::Structural);
        assert_eq!(ErrorCode::INPUT_FAILED.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::UNDEFINED_VARIABLE), "E200");
        assert_eq!(format!("{}", ErrorCode::UNCLOSED_BRACKET), "E101");
    }

    #[test]
    fn test_error_display_with_line() {
        let err = PretzlError::at_line(
            ErrorCode::UNDEFINED_VARIABLE,
            "undefined variable 'x'",
            4,
        );
        assert_eq!(
            err.to_string(),
            "line 4: E200 [binding] undefined variable 'x'"
        );
    }

    #[test]
    fn test_error_display_without_line() {
        let err = PretzlError::new(ErrorCode::INPUT_FAILED, "stdin closed", None);
        assert_eq!(err.to_string(), "E700 [input] stdin closed");
    }

    #[test]
    fn test_error_json_serialization() {
        let err = PretzlError::at_line(ErrorCode::DIVISION_BY_ZERO, "division by zero", 2)
            .with_source_line("/ 1 0");

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":500"));
        assert!(json.contains("\"category\":\"arithmetic\""));
        assert!(json.contains("\"line\":2"));
        assert!(json.contains("\"source_line\":\"/ 1 0\""));

        let back: PretzlError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_error_json_omits_missing_line() {
        let err = PretzlError::new(ErrorCode::INPUT_FAILED, "closed", None);
        let json = serde_json::to_string(&err).unwrap();
        assert!(!json.contains("\"line\""));
        assert!(!json.contains("\"source_line\""));
    }
}
