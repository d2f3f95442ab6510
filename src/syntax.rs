//! Classification of token trees into the typed AST.
//!
//! Building is purely structural: nothing is looked up or evaluated here, so
//! a form can be checked without an environment.

use crate::errors::*;
use crate::reader::Token;
use crate::symbol::Symbol;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::rc::Rc;

pub const DEFINE: &str = "define";
pub const IF: &str = "if";
pub const LAMBDA: &str = "lambda";

pub const KEYWORDS: [&str; 3] = [DEFINE, IF, LAMBDA];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Greater,
    Less,
    Equal,
}

impl BinOp {
    pub const ALL: [BinOp; 7] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Greater,
        BinOp::Less,
        BinOp::Equal,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Greater => ">",
            BinOp::Less => "<",
            BinOp::Equal => "=",
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

lazy_static! {
    static ref DEFAULT_OPERATORS: Operators = Operators::only(&BinOp::ALL);
}

/// The set of symbols the builder treats as binary operators.
///
/// A list whose head is one of these symbols always becomes a [`Ast::BinaryOp`],
/// even if the same name is later bound to a closure.
#[derive(Debug, Clone, PartialEq)]
pub struct Operators {
    table: HashMap<String, BinOp>,
}

impl Operators {
    pub fn only(ops: &[BinOp]) -> Self {
        Operators {
            table: ops.iter().map(|&op| (op.symbol().to_string(), op)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<BinOp> {
        self.table.get(name).copied()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

impl Default for Operators {
    fn default() -> Self {
        DEFAULT_OPERATORS.clone()
    }
}

/// Parameter list and body of a lambda expression.
///
/// Shared between the AST and every closure created from it.
#[derive(Debug, PartialEq)]
pub struct LambdaDef {
    pub params: Vec<Symbol>,
    pub body: Ast,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// Integer, Bool or Quote token, passed through unchanged.
    Literal(Token),
    Symbol(Symbol),
    Definition {
        name: Symbol,
        value: Box<Ast>,
    },
    Conditional {
        cond: Box<Ast>,
        then: Box<Ast>,
        otherwise: Box<Ast>,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    Lambda(Rc<LambdaDef>),
    Call {
        callee: Box<Ast>,
        args: Vec<Ast>,
    },
}

impl Ast {
    pub fn short_repr(&self) -> String {
        format!("{}", self)
    }
}

impl std::fmt::Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ast::Literal(token) => write!(f, "{}", token),
            Ast::Symbol(s) => write!(f, "{}", s),
            Ast::Definition { name, value } => write!(f, "({} {} {})", DEFINE, name, value),
            Ast::Conditional {
                cond,
                then,
                otherwise,
            } => write!(f, "({} {} {} {})", IF, cond, then, otherwise),
            Ast::BinaryOp { op, left, right } => write!(f, "({} {} {})", op, left, right),
            Ast::Lambda(def) => write!(
                f,
                "({} ({}) {})",
                LAMBDA,
                join(def.params.iter()),
                def.body
            ),
            Ast::Call { callee, args } => {
                if args.is_empty() {
                    write!(f, "({})", callee)
                } else {
                    write!(f, "({} {})", callee, join(args.iter()))
                }
            }
        }
    }
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| format!("{}", item))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify a token tree into an AST node.
pub fn build(token: &Token, operators: &Operators) -> Result<Ast> {
    match token {
        Token::Symbol(s) => Ok(Ast::Symbol(s.clone())),
        Token::Integer(_) | Token::Bool(_) | Token::Quote(_) => Ok(Ast::Literal(token.clone())),
        Token::List(items) => build_list(items, operators),
    }
}

fn build_list(items: &[Token], operators: &Operators) -> Result<Ast> {
    let (head, rest) = items
        .split_first()
        .ok_or_else(|| syntax_error("empty combination ()"))?;

    if let Token::Symbol(s) = head {
        if let Some(op) = operators.get(s.name()) {
            return build_binop(op, rest, operators);
        }
        match s.name() {
            DEFINE => return build_define(rest, operators),
            IF => return build_if(rest, operators),
            LAMBDA => return build_lambda(rest, operators),
            _ => {}
        }
    }

    Ok(Ast::Call {
        callee: Box::new(build(head, operators)?),
        args: rest
            .iter()
            .map(|arg| build(arg, operators))
            .collect::<Result<_>>()?,
    })
}

fn build_binop(op: BinOp, operands: &[Token], operators: &Operators) -> Result<Ast> {
    match operands {
        [left, right] => Ok(Ast::BinaryOp {
            op,
            left: Box::new(build(left, operators)?),
            right: Box::new(build(right, operators)?),
        }),
        _ => Err(syntax_error(format!(
            "({} a b) takes exactly two operands, got {}",
            op,
            operands.len()
        ))),
    }
}

fn build_define(args: &[Token], operators: &Operators) -> Result<Ast> {
    match args {
        [Token::Symbol(name), value] => Ok(Ast::Definition {
            name: name.clone(),
            value: Box::new(build(value, operators)?),
        }),
        [other, _] => Err(syntax_error(format!(
            "({} name exp) needs a symbol as name, got {}",
            DEFINE, other
        ))),
        _ => Err(syntax_error(format!(
            "({} name exp) takes exactly two forms, got {}",
            DEFINE,
            args.len()
        ))),
    }
}

fn build_if(args: &[Token], operators: &Operators) -> Result<Ast> {
    match args {
        [cond, then, otherwise] => Ok(Ast::Conditional {
            cond: Box::new(build(cond, operators)?),
            then: Box::new(build(then, operators)?),
            otherwise: Box::new(build(otherwise, operators)?),
        }),
        _ => Err(syntax_error(format!(
            "({} cond iftrue iffalse) takes exactly three forms, got {}",
            IF,
            args.len()
        ))),
    }
}

fn build_lambda(args: &[Token], operators: &Operators) -> Result<Ast> {
    let (params, body) = match args {
        [Token::List(params), body] => (params, body),
        [other, _] => {
            return Err(syntax_error(format!(
                "({} (params...) body) needs a parameter list, got {}",
                LAMBDA, other
            )))
        }
        _ => {
            return Err(syntax_error(format!(
                "({} (params...) body) takes a parameter list and one body form, got {} form(s)",
                LAMBDA,
                args.len()
            )))
        }
    };

    let params: Vec<Symbol> = params
        .iter()
        .map(|p| {
            p.as_symbol().cloned().ok_or_else(|| {
                syntax_error(format!("lambda parameter must be a symbol, got {}", p))
            })
        })
        .collect::<Result<_>>()?;

    Ok(Ast::Lambda(Rc::new(LambdaDef {
        params,
        body: build(body, operators)?,
    })))
}

fn syntax_error(msg: impl Into<String>) -> Error {
    ErrorKind::Syntax(msg.into()).into()
}
