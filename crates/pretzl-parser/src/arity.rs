//! Fixed arities for the bracket-free statement syntax.

/// Symbols that may be written without brackets at statement position,
/// with the number of expressions each one consumes.
///
/// Variadic forms (`begin`, `concat`, `list`) are absent: they always need
/// explicit brackets.
pub const IMPLICIT_ARITY: &[(&str, usize)] = &[
    // Special forms
    ("set", 2),
    ("lambda", 2),
    ("if", 3),
    ("while", 2),
    ("for", 3),
    ("print", 1),
    ("input", 0),
    ("inc", 1),
    ("dec", 1),
    // Arithmetic & comparison
    ("+", 2),
    ("-", 2),
    ("*", 2),
    ("/", 2),
    ("%", 2),
    ("<=", 2),
    (">=", 2),
    ("<", 2),
    (">", 2),
    ("==", 2),
    // List & value primitives
    ("append", 2),
    ("sort", 1),
    ("length", 1),
    ("get", 2),
    ("type", 1),
];

/// Look up the implicit-call arity of a symbol.
pub fn implicit_arity(name: &str) -> Option<usize> {
    IMPLICIT_ARITY
        .iter()
        .find(|(sym, _)| *sym == name)
        .map(|(_, arity)| *arity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_arities() {
        assert_eq!(implicit_arity("input"), Some(0));
        assert_eq!(implicit_arity("print"), Some(1));
        assert_eq!(implicit_arity("+"), Some(2));
        assert_eq!(implicit_arity("if"), Some(3));
    }

    #[test]
    fn test_variadic_forms_are_not_implicit() {
        assert_eq!(implicit_arity("begin"), None);
        assert_eq!(implicit_arity("concat"), None);
        assert_eq!(implicit_arity("list"), None);
    }

    #[test]
    fn test_table_has_no_duplicates() {
        for (i, (a, _)) in IMPLICIT_ARITY.iter().enumerate() {
            for (b, _) in &IMPLICIT_ARITY[i + 1..] {
                assert_ne!(a, b, "duplicate arity entry '{a}'");
            }
        }
    }
}
