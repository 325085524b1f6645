//! Head symbols the evaluator handles itself instead of applying.

/// A special form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    Set,
    Lambda,
    If,
    While,
    For,
    Begin,
    Print,
    Input,
    Inc,
    Dec,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 10] = [
        SpecialForm::Set,
        SpecialForm::Lambda,
        SpecialForm::If,
        SpecialForm::While,
        SpecialForm::For,
        SpecialForm::Begin,
        SpecialForm::Print,
        SpecialForm::Input,
        SpecialForm::Inc,
        SpecialForm::Dec,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::Set => "set",
            SpecialForm::Lambda => "lambda",
            SpecialForm::If => "if",
            SpecialForm::While => "while",
            SpecialForm::For => "for",
            SpecialForm::Begin => "begin",
            SpecialForm::Print => "print",
            SpecialForm::Input => "input",
            SpecialForm::Inc => "inc",
            SpecialForm::Dec => "dec",
        }
    }

    /// Exact operand count, or `None` for `begin` (one or more).
    pub fn arity(self) -> Option<usize> {
        match self {
            SpecialForm::Input => Some(0),
            SpecialForm::Print | SpecialForm::Inc | SpecialForm::Dec => Some(1),
            SpecialForm::Set | SpecialForm::Lambda | SpecialForm::While => Some(2),
            SpecialForm::If | SpecialForm::For => Some(3),
            SpecialForm::Begin => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::Builtin;
    use pretzl_parser::{implicit_arity, IMPLICIT_ARITY};

    #[test]
    fn test_name_round_trip() {
        for form in SpecialForm::ALL {
            assert_eq!(SpecialForm::from_name(form.name()), Some(form));
        }
        assert_eq!(SpecialForm::from_name("+"), None);
    }

    #[test]
    fn test_reader_table_agrees_with_forms() {
        for form in SpecialForm::ALL {
            assert_eq!(implicit_arity(form.name()), form.arity(), "form '{}'", form.name());
        }
    }

    #[test]
    fn test_reader_table_agrees_with_builtins() {
        for b in Builtin::ALL {
            assert_eq!(implicit_arity(b.name()), b.arity(), "builtin '{}'", b.name());
        }
    }

    #[test]
    fn test_reader_table_has_no_unknown_names() {
        for (name, _) in IMPLICIT_ARITY {
            assert!(
                SpecialForm::from_name(name).is_some() || Builtin::from_name(name).is_some(),
                "'{name}' is neither a form nor a builtin"
            );
        }
    }
}
