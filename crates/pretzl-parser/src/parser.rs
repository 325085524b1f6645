//! The reader: atom cursor, bracket matching, implicit-call expansion.

use pretzl_lexer::{atomize_all, Lexer};
use pretzl_types::ast::{Atom, Expr};
use pretzl_types::{ensure_sufficient_stack, ErrorCode, PretzlError, Result, SourceFile};

use crate::arity::implicit_arity;

/// Deepest bracket nesting the reader accepts.
pub const MAX_NESTING: usize = 1024;

/// Lex, atomize and read a whole program.
///
/// Errors come back annotated with the offending source line.
pub fn parse(source_file: &SourceFile) -> Result<Vec<Expr>> {
    let tokens = Lexer::new(source_file).lex();
    tracing::trace!(tokens = tokens.len(), "lexed");
    let program = Parser::new(atomize_all(&tokens))
        .parse()
        .map_err(|e| source_file.annotate(e))?;
    tracing::debug!(
        file = %source_file.name,
        expressions = program.len(),
        "parsed program"
    );
    Ok(program)
}

/// The Pretzl reader.
///
/// Consumes a classified atom stream and produces the ordered sequence of
/// top-level expressions. Bracket atoms arrive as `Symbol("(")` and friends;
/// the lexer guarantees a bracket symbol can only come from a bracket token.
pub struct Parser {
    /// The atom stream.
    atoms: Vec<Atom>,
    /// Current index into `atoms`.
    pos: usize,
    /// Brackets currently open.
    nesting: usize,
}

fn is_open(atom: &Atom) -> bool {
    matches!(atom.as_symbol(), Some("(" | "["))
}

fn is_close(atom: &Atom) -> bool {
    matches!(atom.as_symbol(), Some(")" | "]"))
}

impl Parser {
    /// Create a new parser over an atom stream.
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            pos: 0,
            nesting: 0,
        }
    }

    /// Read every top-level expression.
    pub fn parse(mut self) -> Result<Vec<Expr>> {
        let mut program = Vec::new();
        while !self.at_end() {
            program.push(self.read_expr(false)?);
        }
        Ok(program)
    }

    // ── Atom Cursor ───────────────────────────────────────────────────────────

    fn peek(&self) -> Option<&Atom> {
        self.atoms.get(self.pos)
    }

    fn advance(&mut self) -> Option<Atom> {
        let atom = self.atoms.get(self.pos).cloned()?;
        self.pos += 1;
        Some(atom)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.atoms.len()
    }

    fn last_line(&self) -> u32 {
        self.atoms.last().map(Atom::line).unwrap_or(1)
    }

    // ── Reading ───────────────────────────────────────────────────────────────

    /// Read one expression. `in_list` disables implicit-call expansion.
    fn read_expr(&mut self, in_list: bool) -> Result<Expr> {
        let Some(atom) = self.advance() else {
            return Err(PretzlError::at_line(
                ErrorCode::UNEXPECTED_EOF,
                "unexpected end of input",
                self.last_line(),
            ));
        };

        if is_open(&atom) {
            if self.nesting >= MAX_NESTING {
                return Err(PretzlError::at_line(
                    ErrorCode::NESTING_TOO_DEEP,
                    format!("brackets nested deeper than {MAX_NESTING} levels"),
                    atom.line(),
                ));
            }
            self.nesting += 1;
            let list = ensure_sufficient_stack(|| self.read_list(&atom));
            self.nesting -= 1;
            return list;
        }
        if is_close(&atom) {
            return Err(PretzlError::at_line(
                ErrorCode::UNEXPECTED_CLOSE,
                format!("unexpected '{}'", atom.as_symbol().unwrap_or_default()),
                atom.line(),
            ));
        }

        if !in_list {
            if let Atom::Symbol(name, line) = &atom {
                if let Some(arity) = implicit_arity(name) {
                    return self.read_implicit(name, arity, *line);
                }
            }
        }

        Ok(Expr::Atom(atom))
    }

    /// Read the rest of a bracketed sequence whose opener was just consumed.
    ///
    /// `[a b]` is rewritten to `(list a b)`.
    fn read_list(&mut self, open: &Atom) -> Result<Expr> {
        let line = open.line();
        let square = open.as_symbol() == Some("[");
        let (opener, closer) = if square { ("[", "]") } else { ("(", ")") };

        let mut items = Vec::new();
        if square {
            items.push(Expr::symbol("list", line));
        }

        loop {
            match self.peek() {
                None => {
                    return Err(PretzlError::at_line(
                        ErrorCode::UNCLOSED_BRACKET,
                        format!("unclosed '{opener}'"),
                        line,
                    ));
                }
                Some(atom) if is_close(atom) => {
                    let found = atom.as_symbol().unwrap_or_default();
                    if found != closer {
                        return Err(PretzlError::at_line(
                            ErrorCode::MISMATCHED_BRACKET,
                            format!("expected '{closer}' to close '{opener}' from line {line}, found '{found}'"),
                            atom.line(),
                        ));
                    }
                    self.pos += 1;
                    return Ok(Expr::List(items, line));
                }
                Some(_) => items.push(self.read_expr(true)?),
            }
        }
    }

    /// Expand a bracket-free call: the operator plus exactly `arity` operands.
    fn read_implicit(&mut self, name: &str, arity: usize, line: u32) -> Result<Expr> {
        let mut items = Vec::with_capacity(arity + 1);
        items.push(Expr::symbol(name, line));
        for found in 0..arity {
            if self.at_end() {
                return Err(PretzlError::at_line(
                    ErrorCode::UNEXPECTED_EOF,
                    format!("'{name}' expects {arity} arguments, found {found}"),
                    line,
                ));
            }
            items.push(self.read_expr(true)?);
        }
        Ok(Expr::List(items, line))
    }
}
