use crate::environment::EnvRef;
use crate::errors::*;
use crate::reader::Token;
use crate::syntax::{Ast, BinOp};
use crate::value::{Closure, Value};
use tracing::trace;

/// simple version without tail calls
pub fn eval(ast: &Ast, env: &EnvRef) -> Result<Value> {
    match ast {
        Ast::Literal(token) => literal(token),
        Ast::Symbol(s) => env.lookup(s),
        Ast::Definition { name, value } => {
            let value = eval(value, env).map_err(|e| e.with_context(ast.short_repr()))?;
            env.bind(name.clone(), value.clone());
            Ok(value)
        }
        Ast::Conditional {
            cond,
            then,
            otherwise,
        } => {
            if eval(cond, env)?.is_true() {
                eval(then, env)
            } else {
                eval(otherwise, env)
            }
        }
        Ast::BinaryOp { op, left, right } => {
            let left = eval(left, env)?;
            let right = eval(right, env)?;
            apply_binop(*op, &left, &right)
        }
        Ast::Lambda(def) => Ok(Closure::new(def.clone(), env.clone()).into()),
        Ast::Call { callee, args } => {
            call(callee, args, env).map_err(|e| e.with_context(ast.short_repr()))
        }
    }
}

fn literal(token: &Token) -> Result<Value> {
    match token {
        Token::Integer(i) => Ok(Value::Integer(*i)),
        Token::Bool(b) => Ok(Value::Bool(*b)),
        Token::Quote(quoted) => Ok(Value::quoted((**quoted).clone())),
        Token::List(_) | Token::Symbol(_) => Err(ErrorKind::Syntax(format!(
            "not a self-evaluating literal: {}",
            token
        )))?,
    }
}

fn call(callee: &Ast, args: &[Ast], env: &EnvRef) -> Result<Value> {
    let proc = eval(callee, env)?;
    let closure = proc.try_as_closure()?;
    let args: Vec<_> = args
        .iter()
        .map(|arg| eval(arg, env))
        .collect::<Result<_>>()?;
    apply(closure, args)
}

/// Invoke `closure` on already evaluated arguments.
///
/// The new frame's parent is the frame the closure captured, not the
/// caller's frame.
pub fn apply(closure: &Closure, args: Vec<Value>) -> Result<Value> {
    if args.len() != closure.arity() {
        return Err(ErrorKind::Arity {
            expected: closure.arity(),
            found: args.len(),
        })?;
    }

    trace!(closure = %closure, nargs = args.len(), "call");

    let local_env = EnvRef::new_child(closure.env().clone());
    for (param, arg) in closure.params().iter().zip(args) {
        local_env.bind(param.clone(), arg);
    }
    eval(closure.body(), &local_env)
}

pub fn apply_binop(op: BinOp, left: &Value, right: &Value) -> Result<Value> {
    let a = left
        .try_as_integer()
        .map_err(|e| e.with_context(format!("operator {}", op)))?;
    let b = right
        .try_as_integer()
        .map_err(|e| e.with_context(format!("operator {}", op)))?;

    let checked = |result: Option<i64>| -> Result<Value> {
        result
            .map(Value::Integer)
            .ok_or_else(|| ErrorKind::IntegerOverflow(format!("({} {} {})", op, a, b)).into())
    };

    match op {
        BinOp::Add => checked(a.checked_add(b)),
        BinOp::Sub => checked(a.checked_sub(b)),
        BinOp::Mul => checked(a.checked_mul(b)),
        BinOp::Div if b == 0 => Err(ErrorKind::DivisionByZero)?,
        BinOp::Div => checked(a.checked_div(b)),
        BinOp::Greater => Ok(Value::Bool(a > b)),
        BinOp::Less => Ok(Value::Bool(a < b)),
        BinOp::Equal => Ok(Value::Bool(a == b)),
    }
}
