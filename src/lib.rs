//! A minimal Lisp interpreter.
//!
//! Source text goes through three stages:
//!
//! 1. [`reader`] turns text into untyped token trees,
//! 2. [`syntax`] classifies each tree into a typed [`Ast`],
//! 3. [`interpreter`] evaluates the AST against a chain of [`environment`] frames.
//!
//! [`Interpreter`] ties the stages together and owns the root frame of a session.
//!
//! ```
//! use minilisp::{Interpreter, Value};
//!
//! let interp = Interpreter::new();
//! interp.eval_str("(define sq (lambda (x) (* x x)))").unwrap();
//! assert_eq!(interp.eval_str("(sq 7)").unwrap(), Value::Integer(49));
//! ```

pub mod envref;
pub mod environment;
pub mod errors;
pub mod interpreter;
pub mod pretty;
pub mod reader;
pub mod symbol;
pub mod syntax;
pub mod value;

#[cfg(test)]
mod tests;

pub use environment::EnvRef;
pub use errors::{Error, ErrorKind, Result};
pub use interpreter::eval;
pub use pretty::Pretty;
pub use reader::{Reader, Token};
pub use symbol::Symbol;
pub use syntax::{Ast, BinOp, Operators};
pub use value::{Closure, Value};

use tracing::debug;

/// Top-level driver: owns the root environment and the operator table.
///
/// Forms evaluated through the same interpreter share the root frame, so
/// definitions persist from one call to the next until [`reset`](Self::reset).
pub struct Interpreter {
    env: EnvRef,
    operators: Operators,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::with_operators(Operators::default())
    }

    pub fn with_operators(operators: Operators) -> Self {
        Interpreter {
            env: EnvRef::new_root(),
            operators,
        }
    }

    pub fn env(&self) -> &EnvRef {
        &self.env
    }

    pub fn operators(&self) -> &Operators {
        &self.operators
    }

    /// Start over with an empty root frame.
    ///
    /// Closures from the old session keep their own frames alive. The old
    /// root is only released if no closure built inside a call was bound
    /// into it: such a closure owns its call frame, whose parent is the old
    /// root, and the resulting `Rc` cycle is never collected.
    pub fn reset(&mut self) {
        debug!("resetting root environment");
        self.env = EnvRef::new_root();
    }

    pub fn build(&self, token: &Token) -> Result<Ast> {
        syntax::build(token, &self.operators)
    }

    /// Read and build every form in `src` without evaluating anything.
    pub fn parse(&self, src: &str) -> Result<Vec<Ast>> {
        Reader::new(src)
            .map(|token| token.and_then(|t| self.build(&t)))
            .collect()
    }

    pub fn eval_ast(&self, ast: &Ast) -> Result<Value> {
        debug!(form = %ast, "eval");
        eval(ast, &self.env)
    }

    /// Evaluate every form in `src` in order and return the last value.
    ///
    /// Stops at the first error.
    pub fn eval_str(&self, src: &str) -> Result<Value> {
        let mut last = None;
        for result in self.forms(src) {
            last = Some(result?);
        }
        last.ok_or_else(|| ErrorKind::UnexpectedEof.into())
    }

    /// Per-form results for `src`, so a caller can decide whether to carry
    /// on after an error. A read error ends the sequence.
    pub fn forms<'a>(&'a self, src: &'a str) -> Forms<'a> {
        Forms {
            interp: self,
            reader: Reader::new(src),
        }
    }
}

pub struct Forms<'a> {
    interp: &'a Interpreter,
    reader: Reader<'a>,
}

impl<'a> Iterator for Forms<'a> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.reader.next()?;
        Some(token.and_then(|t| {
            let ast = self.interp.build(&t)?;
            self.interp.eval_ast(&ast)
        }))
    }
}
