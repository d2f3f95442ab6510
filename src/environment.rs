pub use crate::envref::{EnvRef, EnvWeak};
use crate::errors::*;
use crate::symbol::Symbol;
use crate::value::{Closure, Value};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone)]
pub enum Entry {
    Value(Value),
    /// A closure that captured the frame it is stored in.
    Closure(Closure<EnvWeak>),
}

impl Entry {
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Entry::Value(value) => Some(value.clone()),
            Entry::Closure(closure) => closure.upgrade().map(Value::Closure),
        }
    }

    pub fn short_repr(&self) -> String {
        match self {
            Entry::Value(value) => value.short_repr(),
            Entry::Closure(closure) => format!("{}", closure),
        }
    }
}

/// One level of the lexical scope chain.
///
/// The parent is fixed when the frame is created.
pub struct Environment {
    map: HashMap<Symbol, Entry>,
    parent: Option<EnvRef>,
}

impl Environment {
    pub fn new(parent: Option<EnvRef>) -> Environment {
        Environment {
            map: Default::default(),
            parent,
        }
    }

    pub fn parent(&self) -> Option<&EnvRef> {
        self.parent.as_ref()
    }

    pub fn lookup(&self, key: &str) -> Option<Value> {
        match self.map.get(key) {
            None => self.parent.as_ref().and_then(|p| p.borrow().lookup(key)),
            Some(entry) => entry.to_value(),
        }
    }

    /// Look only at this frame, ignoring the parent chain.
    pub fn get_local(&self, key: &str) -> Option<Value> {
        self.map.get(key).and_then(Entry::to_value)
    }

    pub fn insert<K: Into<Symbol>>(&mut self, key: K, value: Value) {
        let entry = self.value_to_entry(value);
        self.map.insert(key.into(), entry);
    }

    fn value_to_entry(&self, value: Value) -> Entry {
        // avoid Rc loops by storing closures that refer to the
        // environment they live in as weak references.
        match value {
            Value::Closure(closure) if closure.env().as_ptr() == self as *const _ => {
                Entry::Closure(closure.downgrade())
            }
            value => Entry::Value(value),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn all_keys(&self) -> impl Iterator<Item = Symbol> {
        let mut keys: Vec<_> = self.map.keys().cloned().collect();
        keys.extend(
            self.parent
                .iter()
                .flat_map(|parent| parent.borrow().all_keys()),
        );
        keys.into_iter()
    }

    /// Bindings of this frame only, sorted by name.
    pub fn items(&self) -> Vec<(&Symbol, &Entry)> {
        let mut items: Vec<_> = self.map.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
    }
}

impl EnvRef {
    /// Insert or overwrite `name` in this frame. Parents are never touched.
    pub fn bind(&self, name: Symbol, value: Value) {
        trace!(name = name.name(), value = %value, "bind");
        self.borrow_mut().insert(name, value);
    }

    /// Resolve `name` in the nearest frame that defines it.
    pub fn lookup(&self, name: &Symbol) -> Result<Value> {
        self.borrow()
            .lookup(name.name())
            .ok_or_else(|| ErrorKind::UnboundSymbol(name.clone()).into())
    }
}
