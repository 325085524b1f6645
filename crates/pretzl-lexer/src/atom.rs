//! Token classification: every token becomes a String, Number or Symbol atom.

use pretzl_types::ast::Atom;

use crate::token::Token;

/// Parse text as a finite number, the same way source literals and
/// `input` responses are read.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Classify a single token. Never fails.
pub fn atomize(token: &Token) -> Atom {
    let text = token.text.as_str();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Atom::String(text[1..text.len() - 1].to_string(), token.line);
    }
    match parse_number(text) {
        Some(n) => Atom::Number(n, token.line),
        None => Atom::Symbol(text.to_string(), token.line),
    }
}

/// Classify a whole token stream, keeping brackets as symbols for the reader.
pub fn atomize_all(tokens: &[Token]) -> Vec<Atom> {
    tokens.iter().map(atomize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(text: &str) -> Atom {
        atomize(&Token::new(text, 1))
    }

    #[test]
    fn test_string_atom_strips_quotes() {
        assert_eq!(atom("\"hi there\""), Atom::String("hi there".into(), 1));
        assert_eq!(atom("\"\""), Atom::String(String::new(), 1));
    }

    #[test]
    fn test_lone_quote_is_symbol() {
        assert_eq!(atom("\""), Atom::Symbol("\"".into(), 1));
        assert_eq!(atom("\"abc"), Atom::Symbol("\"abc".into(), 1));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(atom("42"), Atom::Number(42.0, 1));
        assert_eq!(atom("-3.5"), Atom::Number(-3.5, 1));
        assert_eq!(atom("1e3"), Atom::Number(1000.0, 1));
        assert_eq!(atom(".5"), Atom::Number(0.5, 1));
    }

    #[test]
    fn test_non_finite_literals_are_symbols() {
        assert_eq!(atom("inf"), Atom::Symbol("inf".into(), 1));
        assert_eq!(atom("NaN"), Atom::Symbol("NaN".into(), 1));
        assert_eq!(atom("infinity"), Atom::Symbol("infinity".into(), 1));
        assert_eq!(atom("1e999"), Atom::Symbol("1e999".into(), 1));
    }

    #[test]
    fn test_operators_are_symbols() {
        for op in ["+", "-", "<=", "==", "%"] {
            assert_eq!(atom(op), Atom::Symbol(op.into(), 1), "operator '{op}'");
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("7"), Some(7.0));
        assert_eq!(parse_number(" 7"), None);
        assert_eq!(parse_number("seven"), None);
        assert_eq!(parse_number("-inf"), None);
    }
}
