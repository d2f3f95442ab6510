mod conditionals;
mod environment;
mod session;

use crate::errors::Result;
use crate::{Interpreter, Value};

fn run<T: AsRef<str>>(src: T) -> Result<Value> {
    Interpreter::new().eval_str(src.as_ref())
}

fn run_in_env<T: AsRef<str>>(src: T, interp: &Interpreter) -> Result<Value> {
    interp.eval_str(src.as_ref())
}
