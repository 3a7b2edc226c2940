use rill_value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A set of variable bindings, chained to the enclosing scope.
///
/// Scopes only point to their parent, so a chain is always finite and lookups walk upward.
#[derive(Debug)]
pub struct Scope {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Scope>>,
}

impl Scope {
    /// Creates a scope nested in `parent`, or a root scope if `parent` is `None`.
    pub fn new(parent: Option<Rc<Scope>>) -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(HashMap::new()),
            parent,
        })
    }

    /// Looks `name` up in this scope, then in every enclosing scope.
    pub fn resolve(&self, name: &str) -> Option<Value> {
        let mut scope = self;
        loop {
            if let Some(value) = scope.resolve_local(name) {
                return Some(value);
            }
            scope = scope.parent.as_deref()?;
        }
    }

    /// Looks `name` up in this scope only.
    pub fn resolve_local(&self, name: &str) -> Option<Value> {
        self.bindings.borrow().get(name).copied()
    }

    /// Binds `name` in this scope, overwriting any previous binding here. Enclosing scopes are
    /// never modified, so a binding with the same name in a parent is shadowed.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    pub fn parent(&self) -> Option<&Rc<Scope>> {
        self.parent.as_ref()
    }
}
