//! Pretzl lexer: converts source text into a token stream, then into atoms.

pub mod atom;
pub mod lexer;
pub mod token;

pub use atom::{atomize, atomize_all, parse_number};
pub use lexer::{strip_comments, Lexer};
pub use token::Token;
