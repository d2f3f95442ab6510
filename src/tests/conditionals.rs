use super::{run, run_in_env};
use crate::{Interpreter, Value};

#[test]
fn picks_a_branch() {
    assert_eq!(run("(if #t 1 2)").unwrap(), Value::Integer(1));
    assert_eq!(run("(if #f 1 2)").unwrap(), Value::Integer(2));
}

#[test]
fn unchosen_branch_is_never_evaluated() {
    let interp = Interpreter::new();
    run_in_env("(define boom (lambda () (/ 1 0)))", &interp).unwrap();
    assert_eq!(
        run_in_env("(if #t 1 (boom))", &interp).unwrap(),
        Value::Integer(1)
    );
    assert_eq!(
        run_in_env("(if #f (boom) 2)", &interp).unwrap(),
        Value::Integer(2)
    );
    assert_eq!(
        run_in_env("(if #f (undefined 1) 2)", &interp).unwrap(),
        Value::Integer(2)
    );
}

#[test]
fn unchosen_definition_does_not_bind() {
    let interp = Interpreter::new();
    run_in_env("(if #t 1 (define x 5))", &interp).unwrap();
    assert!(run_in_env("x", &interp).is_err());
    run_in_env("(if #t (define x 5) 1)", &interp).unwrap();
    assert_eq!(run_in_env("x", &interp).unwrap(), Value::Integer(5));
}

#[test]
fn zero_is_false() {
    assert_eq!(run("(if 0 1 2)").unwrap(), Value::Integer(2));
    assert_eq!(run("(if 7 1 2)").unwrap(), Value::Integer(1));
    assert_eq!(run("(if (- 3 3) 1 2)").unwrap(), Value::Integer(2));
}

#[test]
fn quotes_and_closures_are_true() {
    assert_eq!(run("(if '() 1 2)").unwrap(), Value::Integer(1));
    assert_eq!(run("(if (lambda () 0) 1 2)").unwrap(), Value::Integer(1));
}

#[test]
fn comparison_as_condition() {
    assert_eq!(run("(if (< 1 2) 10 20)").unwrap(), Value::Integer(10));
    assert_eq!(run("(if (= 1 2) 10 20)").unwrap(), Value::Integer(20));
}
