//! Shared types for the Pretzl interpreter.
//!
//! This crate defines the expression tree, source files, and the structured
//! error type used across every interpreter stage, plus the stack guard the
//! recursive stages share.

mod error;
mod source;
mod stack;
pub mod ast;

pub use error::{ErrorCategory, ErrorCode, PretzlError};
pub use source::SourceFile;
pub use stack::ensure_sufficient_stack;

/// Result type used throughout the Pretzl interpreter.
pub type Result<T> = std::result::Result<T, PretzlError>;
