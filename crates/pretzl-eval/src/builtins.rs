//! Primitive operations, dispatched by name.

use crate::error::{EvalError, EvalResult};
use crate::value::{format_number, Value};
use pretzl_lexer::parse_number;

/// A builtin primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    LessEq,
    GreaterEq,
    Less,
    Greater,
    Equal,
    Concat,
    List,
    Append,
    Sort,
    Length,
    Get,
    Type,
}

impl Builtin {
    pub const ALL: [Builtin; 17] = [
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Mod,
        Builtin::LessEq,
        Builtin::GreaterEq,
        Builtin::Less,
        Builtin::Greater,
        Builtin::Equal,
        Builtin::Concat,
        Builtin::List,
        Builtin::Append,
        Builtin::Sort,
        Builtin::Length,
        Builtin::Get,
        Builtin::Type,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
            Builtin::Mod => "%",
            Builtin::LessEq => "<=",
            Builtin::GreaterEq => ">=",
            Builtin::Less => "<",
            Builtin::Greater => ">",
            Builtin::Equal => "==",
            Builtin::Concat => "concat",
            Builtin::List => "list",
            Builtin::Append => "append",
            Builtin::Sort => "sort",
            Builtin::Length => "length",
            Builtin::Get => "get",
            Builtin::Type => "type",
        }
    }

    /// Fixed argument count, or `None` for variadic primitives.
    pub fn arity(self) -> Option<usize> {
        match self {
            Builtin::Concat | Builtin::List => None,
            Builtin::Sort | Builtin::Length | Builtin::Type => Some(1),
            _ => Some(2),
        }
    }

    /// Apply to already-evaluated arguments. `line` is the call site.
    pub fn apply(self, args: Vec<Value>, line: u32) -> EvalResult<Value> {
        if let Some(expected) = self.arity() {
            if args.len() != expected {
                return Err(EvalError::arity(self.name(), expected, args.len(), line));
            }
        }

        match self {
            Builtin::Add => self.arith(&args, line, |a, b| a + b),
            Builtin::Sub => self.arith(&args, line, |a, b| a - b),
            Builtin::Mul => self.arith(&args, line, |a, b| a * b),
            Builtin::Div | Builtin::Mod => {
                let (a, b) = self.operands(&args, line)?;
                if b == 0.0 {
                    return Err(EvalError::DivisionByZero {
                        op: self.name(),
                        line,
                    });
                }
                if self == Builtin::Div {
                    self.finite(a / b, line)
                } else {
                    self.finite(a % b, line)
                }
            }
            Builtin::LessEq => self.compare(&args, line, |a, b| a <= b),
            Builtin::GreaterEq => self.compare(&args, line, |a, b| a >= b),
            Builtin::Less => self.compare(&args, line, |a, b| a < b),
            Builtin::Greater => self.compare(&args, line, |a, b| a > b),
            Builtin::Equal => self.compare(&args, line, |a, b| a == b),

            Builtin::Concat => Ok(Value::String(
                args.iter().map(ToString::to_string).collect(),
            )),
            Builtin::List => {
                let mut items = Vec::with_capacity(args.len());
                for (i, arg) in args.iter().enumerate() {
                    match arg {
                        Value::Number(n) => items.push(*n),
                        other => {
                            return Err(EvalError::type_mismatch(
                                format!(
                                    "'list' element {} is a {}, expected a number",
                                    i + 1,
                                    other.type_name()
                                ),
                                line,
                            ));
                        }
                    }
                }
                Ok(Value::List(items))
            }
            Builtin::Append => {
                let mut items = self.list_arg(&args[0], line)?.to_vec();
                let value = match &args[1] {
                    Value::Number(n) => *n,
                    Value::String(s) => parse_number(s).ok_or_else(|| {
                        EvalError::type_mismatch(
                            format!("'append' cannot add non-numeric string \"{s}\" to a list"),
                            line,
                        )
                    })?,
                    other => {
                        return Err(EvalError::type_mismatch(
                            format!("'append' cannot add a {} to a list", other.type_name()),
                            line,
                        ));
                    }
                };
                items.push(value);
                Ok(Value::List(items))
            }
            Builtin::Sort => {
                let mut items = self.list_arg(&args[0], line)?.to_vec();
                items.sort_by(f64::total_cmp);
                Ok(Value::List(items))
            }
            Builtin::Length => Ok(Value::Number(self.list_arg(&args[0], line)?.len() as f64)),
            Builtin::Get => {
                let items = self.list_arg(&args[0], line)?;
                let index = match &args[1] {
                    Value::Number(n) => *n,
                    other => {
                        return Err(EvalError::type_mismatch(
                            format!("'get' index must be a number, got {}", other.type_name()),
                            line,
                        ));
                    }
                };
                if index.fract() != 0.0 || index < 0.0 || index >= items.len() as f64 {
                    return Err(EvalError::IndexOutOfBounds {
                        index: format_number(index),
                        len: items.len(),
                        line,
                    });
                }
                Ok(Value::Number(items[index as usize]))
            }
            Builtin::Type => Ok(Value::String(args[0].type_name().to_string())),
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn operands(self, args: &[Value], line: u32) -> EvalResult<(f64, f64)> {
        match (&args[0], &args[1]) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            (a, b) => Err(EvalError::type_mismatch(
                format!(
                    "cannot apply '{}' to {} and {}",
                    self.name(),
                    a.type_name(),
                    b.type_name()
                ),
                line,
            )),
        }
    }

    fn finite(self, result: f64, line: u32) -> EvalResult<Value> {
        if result.is_finite() {
            Ok(Value::Number(result))
        } else {
            Err(EvalError::NonFiniteResult {
                op: self.name(),
                line,
            })
        }
    }

    fn arith(self, args: &[Value], line: u32, op: fn(f64, f64) -> f64) -> EvalResult<Value> {
        let (a, b) = self.operands(args, line)?;
        self.finite(op(a, b), line)
    }

    fn compare(self, args: &[Value], line: u32, op: fn(f64, f64) -> bool) -> EvalResult<Value> {
        let (a, b) = self.operands(args, line)?;
        Ok(Value::Number(if op(a, b) { 1.0 } else { 0.0 }))
    }

    fn list_arg<'a>(self, value: &'a Value, line: u32) -> EvalResult<&'a [f64]> {
        match value {
            Value::List(items) => Ok(items),
            other => Err(EvalError::type_mismatch(
                format!("'{}' expects a list, got {}", self.name(), other.type_name()),
                line,
            )),
        }
    }
}
