//! Multi-line, indented rendering of token trees, AST nodes and values.
//!
//! Meant for display only; the output cannot be read back in.

use crate::reader::Token;
use crate::syntax::Ast;
use crate::value::Value;

pub const INDENT: usize = 2;

pub trait Pretty {
    fn pretty(&self, indent: usize) -> String;

    fn pretty_print(&self) -> String {
        self.pretty(0)
    }
}

fn pad(indent: usize) -> String {
    " ".repeat(indent)
}

impl Pretty for Token {
    fn pretty(&self, indent: usize) -> String {
        match self {
            Token::List(items) => {
                let mut res = pad(indent) + "(\n";
                for item in items {
                    res += &item.pretty(indent + INDENT);
                }
                res + &pad(indent) + ")\n"
            }
            Token::Symbol(s) => format!("{}symbol: {}\n", pad(indent), s),
            Token::Integer(i) => format!("{}integer: {}\n", pad(indent), i),
            Token::Bool(b) => format!("{}boolean: {}\n", pad(indent), b),
            Token::Quote(quoted) => {
                format!("{}quote:\n{}", pad(indent), quoted.pretty(indent + INDENT))
            }
        }
    }
}

impl Pretty for Ast {
    fn pretty(&self, indent: usize) -> String {
        let next = indent + INDENT;
        match self {
            Ast::Literal(token) => token.pretty(indent),
            Ast::Symbol(s) => format!("{}symbol: {}\n", pad(indent), s),
            Ast::Definition { name, value } => {
                format!("{}define: {}\n{}", pad(indent), name, value.pretty(next))
            }
            Ast::Conditional {
                cond,
                then,
                otherwise,
            } => format!(
                "{p}if:\n{}{p}then:\n{}{p}else:\n{}",
                cond.pretty(next),
                then.pretty(next),
                otherwise.pretty(next),
                p = pad(indent)
            ),
            Ast::BinaryOp { op, left, right } => format!(
                "{}binop: {}\n{}{}",
                pad(indent),
                op,
                left.pretty(next),
                right.pretty(next)
            ),
            Ast::Lambda(def) => {
                let params: Vec<_> = def.params.iter().map(|p| p.name()).collect();
                format!(
                    "{}lambda: ({})\n{}",
                    pad(indent),
                    params.join(" "),
                    def.body.pretty(next)
                )
            }
            Ast::Call { callee, args } => {
                let mut res = format!("{}call:\n{}", pad(indent), callee.pretty(next));
                if !args.is_empty() {
                    res += &format!("{}args:\n", pad(next));
                    for arg in args {
                        res += &arg.pretty(next + INDENT);
                    }
                }
                res
            }
        }
    }
}

impl Pretty for Value {
    fn pretty(&self, indent: usize) -> String {
        match self {
            Value::Integer(i) => format!("{}integer: {}\n", pad(indent), i),
            Value::Bool(b) => format!("{}boolean: {}\n", pad(indent), b),
            Value::Quoted(token) => {
                format!("{}quote:\n{}", pad(indent), token.pretty(indent + INDENT))
            }
            Value::Closure(closure) => {
                let params: Vec<_> = closure.params().iter().map(|p| p.name()).collect();
                format!(
                    "{}closure: ({})\n{}",
                    pad(indent),
                    params.join(" "),
                    closure.body().pretty(indent + INDENT)
                )
            }
        }
    }
}
