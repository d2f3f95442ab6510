use crate::environment::Environment;
use std::cell::{self, RefCell};
use std::rc::{Rc, Weak};

/// Shared handle to an environment frame.
///
/// Every frame is reference counted: a frame captured by a closure must
/// outlive the call that created it.
#[derive(Clone)]
pub struct EnvRef(Rc<RefCell<Environment>>);

pub type EnvTmpRef<'a> = cell::Ref<'a, Environment>;
pub type EnvMutRef<'a> = cell::RefMut<'a, Environment>;

impl From<Environment> for EnvRef {
    fn from(env: Environment) -> Self {
        EnvRef(Rc::new(RefCell::new(env)))
    }
}

impl EnvRef {
    /// A frame without parent.
    pub fn new_root() -> Self {
        Environment::new(None).into()
    }

    /// A fresh frame that falls back to `parent` on lookup.
    pub fn new_child(parent: EnvRef) -> Self {
        Environment::new(Some(parent)).into()
    }

    pub fn borrow(&self) -> EnvTmpRef {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> EnvMutRef {
        self.0.borrow_mut()
    }

    pub fn downgrade(&self) -> EnvWeak {
        EnvWeak(Rc::downgrade(&self.0))
    }

    pub fn as_ptr(&self) -> *const Environment {
        self.0.as_ptr()
    }

    pub fn ptr_eq(&self, other: &EnvRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for EnvRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "<env {:p}>", self.as_ptr())
    }
}

#[derive(Clone, Default)]
pub struct EnvWeak(Weak<RefCell<Environment>>);

impl EnvWeak {
    pub fn upgrade(&self) -> Option<EnvRef> {
        self.0.upgrade().map(EnvRef)
    }
}
