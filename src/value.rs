use crate::envref::{EnvRef, EnvWeak};
use crate::errors::*;
use crate::reader::Token;
use crate::symbol::Symbol;
use crate::syntax::{Ast, LambdaDef};
use std::rc::Rc;

/// Runtime values. Immutable once constructed.
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Bool(bool),
    /// Unevaluated data, carried opaquely.
    Quoted(Rc<Token>),
    Closure(Closure),
}

impl Value {
    pub fn quoted(token: Token) -> Self {
        Value::Quoted(Rc::new(token))
    }

    /// `#f` and `0` are false, everything else is true.
    pub fn is_true(&self) -> bool {
        match self {
            Value::Bool(false) => false,
            Value::Integer(0) => false,
            _ => true,
        }
    }

    pub fn try_as_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => Err(ErrorKind::TypeError(format!(
                "expected integer, got {} {}",
                self.type_name(),
                self.short_repr()
            )))?,
        }
    }

    pub fn try_as_closure(&self) -> Result<&Closure> {
        match self {
            Value::Closure(c) => Ok(c),
            _ => Err(ErrorKind::NotCallable(self.short_repr()))?,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Quoted(_) => "quote",
            Value::Closure(_) => "closure",
        }
    }

    pub fn short_repr(&self) -> String {
        format!("{}", self)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Closure> for Value {
    fn from(c: Closure) -> Self {
        Value::Closure(c)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Quoted(a), Quoted(b)) => a == b,
            (Closure(a), Closure(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Bool(true) => write!(f, "#t"),
            Value::Bool(false) => write!(f, "#f"),
            Value::Quoted(token) => write!(f, "'{}", token),
            Value::Closure(c) => write!(f, "{}", c),
        }
    }
}

/// A lambda's parameters and body paired with the frame it was created in.
///
/// The frame handle is `EnvRef` for closures in circulation. A closure stored
/// in the very frame it captured holds an `EnvWeak` instead, so that frame
/// does not keep itself alive.
#[derive(Clone)]
pub struct Closure<E = EnvRef> {
    def: Rc<LambdaDef>,
    env: E,
}

impl<E> Closure<E> {
    pub fn params(&self) -> &[Symbol] {
        &self.def.params
    }

    pub fn body(&self) -> &Ast {
        &self.def.body
    }

    pub fn arity(&self) -> usize {
        self.def.params.len()
    }

    pub fn def(&self) -> &Rc<LambdaDef> {
        &self.def
    }
}

impl Closure<EnvRef> {
    pub fn new(def: Rc<LambdaDef>, env: EnvRef) -> Self {
        Closure { def, env }
    }

    pub fn env(&self) -> &EnvRef {
        &self.env
    }

    pub fn downgrade(&self) -> Closure<EnvWeak> {
        Closure {
            def: self.def.clone(),
            env: self.env.downgrade(),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.def, &other.def) && self.env.ptr_eq(&other.env)
    }
}

impl Closure<EnvWeak> {
    pub fn upgrade(&self) -> Option<Closure> {
        self.env.upgrade().map(|env| Closure {
            def: self.def.clone(),
            env,
        })
    }
}

impl<E> std::fmt::Display for Closure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let params: Vec<_> = self.params().iter().map(Symbol::name).collect();
        write!(f, "#<closure ({})>", params.join(" "))
    }
}

impl<E> std::fmt::Debug for Closure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
