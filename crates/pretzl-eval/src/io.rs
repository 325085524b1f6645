//! Host seams: where `input` reads from and where `print` writes to.

use std::collections::VecDeque;
use std::io;

/// Supplies one string per evaluated `input` form.
///
/// The interpreter is parked inside `read_input` until it returns, and it
/// never calls again before the previous call has returned.
pub trait InputProvider {
    fn read_input(&mut self) -> io::Result<String>;
}

impl<F> InputProvider for F
where
    F: FnMut() -> io::Result<String>,
{
    fn read_input(&mut self) -> io::Result<String> {
        self()
    }
}

/// Receives the fully rendered text of every evaluated `print`, in order.
pub trait OutputHandler {
    fn write_output(&mut self, text: &str);
}

impl<F> OutputHandler for F
where
    F: FnMut(&str),
{
    fn write_output(&mut self, text: &str) {
        self(text)
    }
}

/// Input provider that replays a fixed list of responses.
///
/// Running out of responses is an `UnexpectedEof` error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    responses: VecDeque<String>,
    served: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            served: 0,
        }
    }

    /// How many responses have been handed out so far.
    pub fn served(&self) -> usize {
        self.served
    }
}

impl InputProvider for ScriptedInput {
    fn read_input(&mut self) -> io::Result<String> {
        let response = self.responses.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted input")
        })?;
        self.served += 1;
        Ok(response)
    }
}

/// Output handler that records each payload separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferOutput {
    pub payloads: Vec<String>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputHandler for BufferOutput {
    fn write_output(&mut self, text: &str) {
        self.payloads.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_in_order_then_eof() {
        let mut input = ScriptedInput::new(["a", "b"]);
        assert_eq!(input.read_input().unwrap(), "a");
        assert_eq!(input.read_input().unwrap(), "b");
        assert_eq!(input.served(), 2);
        let err = input.read_input().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(input.served(), 2);
    }

    #[test]
    fn test_buffer_output_keeps_payloads_apart() {
        let mut out = BufferOutput::new();
        out.write_output("x");
        out.write_output("y\n");
        assert_eq!(out.payloads, vec!["x", "y\n"]);
    }

    #[test]
    fn test_closures_are_providers_and_handlers() {
        let mut calls = 0;
        let mut provider = || {
            calls += 1;
            Ok::<_, io::Error>(format!("{calls}"))
        };
        assert_eq!(provider.read_input().unwrap(), "1");

        let mut seen = Vec::new();
        let mut handler = |text: &str| seen.push(text.to_string());
        handler.write_output("hello");
        assert_eq!(seen, vec!["hello"]);
    }
}
