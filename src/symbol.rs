use std::borrow::Borrow;
use std::rc::Rc;

/// A name as it appears in source: symbols in token trees, variables in the
/// AST and keys in environment frames. Cloning shares the underlying text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    name: Rc<str>,
}

impl Symbol {
    pub fn new<T: AsRef<str>>(name: T) -> Self {
        Symbol {
            name: name.as_ref().into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol { name: s.into() }
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, s: &str) -> bool {
        self.name() == s
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
