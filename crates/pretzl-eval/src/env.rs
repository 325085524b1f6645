//! Parent-chained variable environments.

use crate::value::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

// Internal state holding the bindings and parent pointer
struct Frame {
    bindings: BTreeMap<String, Value>,
    parent: Option<Environment>,
}

/// A lexical scope: own bindings plus a link to the enclosing scope.
///
/// Cloning is cheap (an `Rc` increment) and yields a handle to the *same*
/// scope, which is how closures share their defining environment.
#[derive(Clone)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

impl Environment {
    /// Create a new, empty global environment.
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    fn with_parent(parent: Option<Environment>) -> Self {
        Self {
            frame: Rc::new(RefCell::new(Frame {
                bindings: BTreeMap::new(),
                parent,
            })),
        }
    }

    /// Create an empty scope whose parent is `self`.
    pub fn child(&self) -> Self {
        Self::with_parent(Some(self.clone()))
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.frame.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Look up a variable, walking outward to the nearest defining scope.
    pub fn get(&self, name: &str) -> Option<Value> {
        let frame = self.frame.borrow();
        match frame.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => frame.parent.as_ref().and_then(|p| p.get(name)),
        }
    }

    /// Overwrite `name` in the nearest scope that already binds it.
    /// Returns `false` if no scope does.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        let mut frame = self.frame.borrow_mut();
        if let Some(slot) = frame.bindings.get_mut(name) {
            *slot = value;
            return true;
        }
        match &frame.parent {
            Some(parent) => parent.assign(name, value),
            None => false,
        }
    }

    /// Names bound directly in this scope, in sorted order.
    pub fn local_names(&self) -> Vec<String> {
        self.frame.borrow().bindings.keys().cloned().collect()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Scopes can reach themselves through closures, so only the local names
// are shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("locals", &self.local_names())
            .field("has_parent", &self.frame.borrow().parent.is_some())
            .finish()
    }
}
