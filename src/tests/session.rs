use super::run_in_env;
use crate::errors::ErrorKind;
use crate::pretty::Pretty;
use crate::reader::Token;
use crate::syntax::{BinOp, Operators};
use crate::{Interpreter, Value};

#[test]
fn definitions_persist_across_forms() {
    let interp = Interpreter::new();
    assert_eq!(
        run_in_env("(define a 2)", &interp).unwrap(),
        Value::Integer(2)
    );
    assert_eq!(run_in_env("(+ a a)", &interp).unwrap(), Value::Integer(4));
}

#[test]
fn eval_str_returns_the_last_value() {
    let interp = Interpreter::new();
    assert_eq!(
        run_in_env("(define a 2) (define b 3) (* a b)", &interp).unwrap(),
        Value::Integer(6)
    );
}

#[test]
fn forms_yields_one_result_per_form() {
    let interp = Interpreter::new();
    let results: Vec<_> = interp.forms("1 undefined (+ 1 1)").collect();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap(), &Value::Integer(1));
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap(), &Value::Integer(2));
}

#[test]
fn reset_forgets_definitions() {
    let mut interp = Interpreter::new();
    run_in_env("(define a 2)", &interp).unwrap();
    let old = run_in_env("(define get-a (lambda () a))", &interp).unwrap();
    interp.reset();
    assert!(matches!(
        run_in_env("a", &interp).unwrap_err().kind(),
        ErrorKind::UnboundSymbol(_)
    ));
    // closures from before the reset still see their own frame
    let old = old.try_as_closure().unwrap().clone();
    assert_eq!(
        crate::interpreter::apply(&old, vec![]).unwrap(),
        Value::Integer(2)
    );
}

#[test]
fn quoted_data_is_not_evaluated() {
    let interp = Interpreter::new();
    let value = run_in_env("'(undefined (1 2))", &interp).unwrap();
    match &value {
        Value::Quoted(token) => assert_eq!(format!("{}", token), "(undefined (1 2))"),
        other => panic!("unexpected value {}", other),
    }
    assert_eq!(format!("{}", value), "'(undefined (1 2))");
    assert_eq!(
        run_in_env("'x", &interp).unwrap(),
        Value::quoted(Token::symbol("x"))
    );
}

#[test]
fn quoted_values_can_be_bound_and_passed() {
    let interp = Interpreter::new();
    run_in_env("(define q '(a b))", &interp).unwrap();
    assert_eq!(
        run_in_env("((lambda (x) x) q)", &interp).unwrap(),
        Value::quoted(Token::List(vec![Token::symbol("a"), Token::symbol("b")]))
    );
}

#[test]
fn operator_table_is_configurable() {
    let interp = Interpreter::with_operators(Operators::only(&[BinOp::Add, BinOp::Less]));
    // `*` is now an ordinary name
    run_in_env("(define * (lambda (a b) (+ a (+ a b))))", &interp).unwrap();
    assert_eq!(run_in_env("(* 2 3)", &interp).unwrap(), Value::Integer(7));
}

#[test]
fn operator_names_cannot_be_called() {
    let interp = Interpreter::new();
    run_in_env("(define + (lambda (a b) 0))", &interp).unwrap();
    assert_eq!(run_in_env("(+ 2 3)", &interp).unwrap(), Value::Integer(5));
}

#[test]
fn parse_builds_without_evaluating() {
    let interp = Interpreter::new();
    let forms = interp.parse("(define x (undefined)) (f x)").unwrap();
    assert_eq!(forms.len(), 2);
    assert!(run_in_env("x", &interp).is_err());
    assert_eq!(
        forms[1].pretty_print(),
        "call:\n  symbol: f\n  args:\n    symbol: x\n"
    );
}

#[test]
fn pretty_printed_results() {
    let interp = Interpreter::new();
    let value = run_in_env("(lambda (n) (* n n))", &interp).unwrap();
    assert_eq!(
        value.pretty_print(),
        "closure: (n)\n  binop: *\n    symbol: n\n    symbol: n\n"
    );
}
