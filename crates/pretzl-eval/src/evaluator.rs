//! Core expression evaluator.

use crate::builtins::Builtin;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::forms::SpecialForm;
use crate::io::{InputProvider, OutputHandler};
use crate::value::{Closure, Value};
use pretzl_lexer::parse_number;
use pretzl_types::ast::{Atom, Expr};
use pretzl_types::{ensure_sufficient_stack, PretzlError, SourceFile};
use std::rc::Rc;

/// Default limit on nested evaluations before a run is aborted.
///
/// A recursive call costs about three levels, so this admits recursion a few
/// thousand calls deep.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// The core evaluator: walks expression trees and produces Values.
///
/// One interpreter owns one global environment; it lives as long as the
/// interpreter does, so several sources run through the same instance see
/// each other's top-level bindings.
pub struct Interpreter<'io> {
    /// Top-level scope.
    globals: Environment,
    input: &'io mut dyn InputProvider,
    output: &'io mut dyn OutputHandler,
    /// Current nesting of `eval` calls.
    depth: usize,
    max_depth: usize,
}

impl<'io> Interpreter<'io> {
    /// Create an interpreter wired to the given host callbacks.
    pub fn new(input: &'io mut dyn InputProvider, output: &'io mut dyn OutputHandler) -> Self {
        Self {
            globals: Environment::new(),
            input,
            output,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the nesting limit.
    pub fn with_depth_limit(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The top-level scope.
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Parse and evaluate a whole source file.
    ///
    /// Returns the value of the last top-level expression (null for an
    /// empty program). Errors carry the offending source line.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %source_file.name))]
    pub fn run_source(&mut self, source_file: &SourceFile) -> Result<Value, PretzlError> {
        let program = pretzl_parser::parse(source_file)?;
        self.eval_program(&program).map_err(|e| {
            tracing::debug!(error = %e, "run aborted");
            source_file.annotate(e.into())
        })
    }

    /// Evaluate top-level expressions in order in the global scope.
    pub fn eval_program(&mut self, program: &[Expr]) -> EvalResult<Value> {
        let globals = self.globals.clone();
        let mut last = Value::Null;
        for expr in program {
            last = self.eval(expr, &globals)?;
        }
        Ok(last)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate an expression to a Value in `env`.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        if self.depth >= self.max_depth {
            return Err(EvalError::DepthExceeded {
                limit: self.max_depth,
                line: expr.line(),
            });
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.eval_inner(expr, env));
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Atom(Atom::Number(n, _)) => Ok(Value::Number(*n)),
            Expr::Atom(Atom::String(s, _)) => Ok(Value::String(s.clone())),
            Expr::Atom(Atom::Symbol(name, line)) => self.eval_symbol(name, *line, env),
            Expr::List(items, line) => self.eval_list(items, *line, env),
        }
    }

    /// Bindings win; an unbound builtin name is a reference to the builtin;
    /// a bare unbound `input` reads input.
    fn eval_symbol(&mut self, name: &str, line: u32, env: &Environment) -> EvalResult<Value> {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }
        if let Some(builtin) = Builtin::from_name(name) {
            return Ok(Value::Builtin(builtin));
        }
        if SpecialForm::from_name(name) == Some(SpecialForm::Input) {
            return self.read_input(line);
        }
        Err(EvalError::UndefinedVariable {
            name: name.to_string(),
            line,
        })
    }

    fn eval_list(&mut self, items: &[Expr], line: u32, env: &Environment) -> EvalResult<Value> {
        let Some((head, args)) = items.split_first() else {
            return Err(EvalError::EmptyExpression { line });
        };

        if let Some(form) = head.as_symbol().and_then(SpecialForm::from_name) {
            return self.eval_special(form, args, line, env);
        }

        let callee = self.eval(head, env)?;
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, env)?);
        }
        self.apply(callee, values, line)
    }

    /// Apply an evaluated operator to evaluated arguments.
    pub fn apply(&mut self, callee: Value, args: Vec<Value>, line: u32) -> EvalResult<Value> {
        match callee {
            Value::Closure(closure) => self.apply_closure(&closure, args, line),
            Value::Builtin(builtin) => builtin.apply(args, line),
            other => Err(EvalError::NotCallable {
                kind: other.type_name(),
                line,
            }),
        }
    }

    fn apply_closure(&mut self, closure: &Closure, args: Vec<Value>, line: u32) -> EvalResult<Value> {
        if args.len() != closure.params.len() {
            return Err(EvalError::arity("closure", closure.params.len(), args.len(), line));
        }
        let frame = closure.env.child();
        for (param, arg) in closure.params.iter().zip(args) {
            frame.define(param.as_str(), arg);
        }
        tracing::trace!(params = ?closure.params, line, "apply closure");
        self.eval(&closure.body, &frame)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Special forms
    // ══════════════════════════════════════════════════════════════════════

    fn eval_special(
        &mut self,
        form: SpecialForm,
        args: &[Expr],
        line: u32,
        env: &Environment,
    ) -> EvalResult<Value> {
        match form.arity() {
            Some(expected) if args.len() != expected => {
                return Err(EvalError::arity(form.name(), expected, args.len(), line));
            }
            None if args.is_empty() => {
                return Err(EvalError::arity(form.name(), "at least 1", 0, line));
            }
            _ => {}
        }

        match form {
            SpecialForm::Set => {
                let name = self.target_name(form, &args[0])?;
                let value = self.eval(&args[1], env)?;
                env.define(name, value);
                Ok(Value::Null)
            }
            SpecialForm::Lambda => self.eval_lambda(&args[0], &args[1], env),
            SpecialForm::If => {
                if self.eval(&args[0], env)?.is_truthy() {
                    self.eval(&args[1], env)
                } else {
                    self.eval(&args[2], env)
                }
            }
            SpecialForm::While => self.eval_loop(&args[0], &args[1], env),
            SpecialForm::For => {
                self.eval(&args[0], env)?;
                self.eval_loop(&args[1], &args[2], env)
            }
            SpecialForm::Begin => {
                let mut last = Value::Null;
                for expr in args {
                    last = self.eval(expr, env)?;
                }
                Ok(last)
            }
            SpecialForm::Print => {
                let value = self.eval(&args[0], env)?;
                let text = value.to_string().replace("\\n", "\n");
                tracing::trace!(line, len = text.len(), "print");
                self.output.write_output(&text);
                Ok(Value::Null)
            }
            SpecialForm::Input => self.read_input(line),
            SpecialForm::Inc => self.step(form, &args[0], 1.0, env),
            SpecialForm::Dec => self.step(form, &args[0], -1.0, env),
        }
    }

    /// The symbol operand of `set`, `inc` and `dec`.
    fn target_name<'e>(&self, form: SpecialForm, target: &'e Expr) -> EvalResult<&'e str> {
        target.as_symbol().ok_or_else(|| {
            EvalError::type_mismatch(
                format!("'{}' needs a variable name, got {target}", form.name()),
                target.line(),
            )
        })
    }

    fn eval_lambda(&mut self, params: &Expr, body: &Expr, env: &Environment) -> EvalResult<Value> {
        let params = match params {
            Expr::Atom(Atom::Symbol(name, _)) => vec![name.clone()],
            Expr::List(items, _) => items
                .iter()
                .map(|item| {
                    item.as_symbol().map(str::to_string).ok_or_else(|| {
                        EvalError::InvalidParameter {
                            message: format!("expected a symbol, got {item}"),
                            line: item.line(),
                        }
                    })
                })
                .collect::<EvalResult<Vec<_>>>()?,
            other => {
                return Err(EvalError::InvalidParameter {
                    message: format!("expected a symbol or parameter list, got {other}"),
                    line: other.line(),
                });
            }
        };
        Ok(Value::Closure(Rc::new(Closure {
            params,
            body: body.clone(),
            env: env.clone(),
        })))
    }

    fn eval_loop(&mut self, cond: &Expr, body: &Expr, env: &Environment) -> EvalResult<Value> {
        let mut last = Value::Null;
        while self.eval(cond, env)?.is_truthy() {
            last = self.eval(body, env)?;
        }
        Ok(last)
    }

    /// `inc` / `dec`: the new value lands in the scope that holds the binding.
    fn step(&mut self, form: SpecialForm, target: &Expr, delta: f64, env: &Environment) -> EvalResult<Value> {
        let name = self.target_name(form, target)?;
        let line = target.line();
        let current = env.get(name).ok_or_else(|| EvalError::UndefinedVariable {
            name: name.to_string(),
            line,
        })?;
        let n = match current {
            Value::Number(n) => n,
            other => {
                return Err(EvalError::type_mismatch(
                    format!(
                        "'{}' needs a number, but '{name}' is a {}",
                        form.name(),
                        other.type_name()
                    ),
                    line,
                ));
            }
        };
        let updated = Value::Number(n + delta);
        env.assign(name, updated.clone());
        Ok(updated)
    }

    /// The only point where evaluation waits on the host.
    fn read_input(&mut self, line: u32) -> EvalResult<Value> {
        tracing::trace!(line, "awaiting input");
        let raw = self.input.read_input().map_err(|e| EvalError::Input {
            message: e.to_string(),
            line,
        })?;
        Ok(match parse_number(&raw) {
            Some(n) => Value::Number(n),
            None => Value::String(raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{BufferOutput, ScriptedInput};

    fn eval_str(source: &str) -> Result<Value, PretzlError> {
        let mut input = ScriptedInput::default();
        let mut output = BufferOutput::new();
        let mut interp = Interpreter::new(&mut input, &mut output);
        interp.run_source(&SourceFile::new("test.pz", source))
    }

    #[test]
    fn test_last_value_is_returned() {
        assert_eq!(eval_str("+ 1 2\n* 3 4"), Ok(Value::Number(12.0)));
    }

    #[test]
    fn test_empty_program_is_null() {
        assert_eq!(eval_str(""), Ok(Value::Null));
    }

    #[test]
    fn test_depth_restored_after_error() {
        let mut input = ScriptedInput::default();
        let mut output = BufferOutput::new();
        let mut interp = Interpreter::new(&mut input, &mut output);
        let sf = SourceFile::new("test.pz", "(+ 1 (/ 1 0))");
        assert!(interp.run_source(&sf).is_err());
        assert_eq!(interp.depth, 0);
    }

    #[test]
    fn test_globals_persist_between_sources() {
        let mut input = ScriptedInput::default();
        let mut output = BufferOutput::new();
        let mut interp = Interpreter::new(&mut input, &mut output);
        interp
            .run_source(&SourceFile::new("a.pz", "set x 41"))
            .unwrap();
        let v = interp
            .run_source(&SourceFile::new("b.pz", "+ x 1"))
            .unwrap();
        assert_eq!(v, Value::Number(42.0));
    }
}
