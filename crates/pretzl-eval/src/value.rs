//! Runtime values.

use crate::builtins::Builtin;
use crate::env::Environment;
use pretzl_types::ast::Expr;
use std::fmt;
use std::rc::Rc;

/// A function value: formals, body and the scope it was created in.
///
/// Immutable once built. The captured environment is shared, so mutations
/// made through one closure are visible to every other closure over the
/// same scope.
pub struct Closure {
    pub params: Vec<String>,
    pub body: Expr,
    pub env: Environment,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    /// No result: `set`, `print`, a loop that never ran.
    Null,
    Number(f64),
    String(String),
    /// Lists only ever hold numbers.
    List(Vec<f64>),
    Closure(Rc<Closure>),
    /// A primitive referenced by name, e.g. `+` passed as an argument.
    Builtin(Builtin),
}

impl Value {
    /// Name reported by the `type` builtin.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Closure(_) => "closure",
            Value::Builtin(_) => "unknown",
        }
    }

    /// Number 0 and null are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Number(n) => *n != 0.0,
            _ => true,
        }
    }
}

/// Closures compare by identity; everything else structurally.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

/// Render a number the way `print` shows it: `3`, `2.5`, `-0.125`.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, use exponent form with
/// an explicit sign: `1e+21`, `2.5e-7`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // also folds negative zero
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exponent_form = format!("{n:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exponent_form,
    }
}

/// The text `print` and `concat` produce for a value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(|n| format_number(*n)).collect();
                write!(f, "[{}]", rendered.join(" "))
            }
            Value::Closure(_) => write!(f, "<closure>"),
            Value::Builtin(b) => write!(f, "{}", b.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(Value::Number(-1.0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
        assert!(Value::List(vec![]).is_truthy());
        assert!(Value::Builtin(Builtin::Add).is_truthy());
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-7.0), "-7");
    }

    #[test]
    fn test_extreme_magnitudes_use_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1.5e300), "-1.5e+300");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(2.5e-7), "2.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e-6), "0.000001");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::List(vec![1.0, 2.5, 3.0]).to_string(), "[1 2.5 3]");
        assert_eq!(Value::List(vec![]).to_string(), "[]");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::String("hi".into()).to_string(), "hi");
        assert_eq!(Value::Builtin(Builtin::LessEq).to_string(), "<=");
    }

    #[test]
    fn test_closure_identity_equality() {
        let make = || {
            Rc::new(Closure {
                params: vec!["x".into()],
                body: Expr::symbol("x", 1),
                env: Environment::new(),
            })
        };
        let a = make();
        assert_eq!(Value::Closure(a.clone()), Value::Closure(a));
        assert_ne!(Value::Closure(make()), Value::Closure(make()));
    }
}
