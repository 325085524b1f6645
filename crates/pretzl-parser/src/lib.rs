//! Pretzl reader: converts an atom stream into top-level expressions.

mod arity;
mod parser;

pub use arity::{implicit_arity, IMPLICIT_ARITY};
pub use parser::{parse, Parser, MAX_NESTING};
