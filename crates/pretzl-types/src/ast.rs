//! Expression trees for the Pretzl language.
//!
//! A program is an ordered sequence of [`Expr`]s. Every leaf is an [`Atom`]
//! carrying its source line; every list carries the line of its opening
//! bracket (or of its operator, for lists synthesized by the reader).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classified literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Atom {
    /// `"hello"` with the quotes removed.
    String(String, u32),
    /// A finite numeric literal.
    Number(f64, u32),
    /// Anything else: names, operators, stray quotes.
    Symbol(String, u32),
}

impl Atom {
    /// Source line of this atom.
    pub fn line(&self) -> u32 {
        match self {
            Atom::String(_, line) | Atom::Number(_, line) | Atom::Symbol(_, line) => *line,
        }
    }

    /// The symbol name, if this atom is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Atom::Symbol(name, _) => Some(name),
            _ => None,
        }
    }
}

/// A parse-tree node: a leaf atom or an ordered sequence of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Atom(Atom),
    List(Vec<Expr>, u32),
}

impl Expr {
    /// Build a symbol leaf.
    pub fn symbol(name: impl Into<String>, line: u32) -> Self {
        Expr::Atom(Atom::Symbol(name.into(), line))
    }

    /// Build a number leaf.
    pub fn number(value: f64, line: u32) -> Self {
        Expr::Atom(Atom::Number(value, line))
    }

    /// Build a string leaf.
    pub fn string(value: impl Into<String>, line: u32) -> Self {
        Expr::Atom(Atom::String(value.into(), line))
    }

    /// Source line of this node.
    pub fn line(&self) -> u32 {
        match self {
            Expr::Atom(atom) => atom.line(),
            Expr::List(_, line) => *line,
        }
    }

    /// The symbol name, if this node is a symbol leaf.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Atom(atom) => atom.as_symbol(),
            Expr::List(..) => None,
        }
    }
}

/// Renders the node back in explicit notation, e.g. `(+ 1 (f "a"))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(Atom::String(s, _)) => write!(f, "\"{s}\""),
            Expr::Atom(Atom::Number(n, _)) => write!(f, "{n}"),
            Expr::Atom(Atom::Symbol(s, _)) => write!(f, "{s}"),
            Expr::List(items, _) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_line() {
        let e = Expr::List(vec![Expr::symbol("+", 3), Expr::number(1.0, 4)], 3);
        assert_eq!(e.line(), 3);
        assert_eq!(Expr::string("hi", 7).line(), 7);
    }

    #[test]
    fn test_as_symbol() {
        assert_eq!(Expr::symbol("set", 1).as_symbol(), Some("set"));
        assert_eq!(Expr::number(1.0, 1).as_symbol(), None);
        assert_eq!(Expr::List(vec![], 1).as_symbol(), None);
    }

    #[test]
    fn test_display_explicit_notation() {
        let e = Expr::List(
            vec![
                Expr::symbol("print", 1),
                Expr::List(
                    vec![
                        Expr::symbol("concat", 1),
                        Expr::string("n=", 1),
                        Expr::number(2.5, 1),
                    ],
                    1,
                ),
            ],
            1,
        );
        assert_eq!(e.to_string(), "(print (concat \"n=\" 2.5))");
    }
}
