use crate::environment::EnvRef;
use crate::errors::ErrorKind;
use crate::symbol::Symbol;
use crate::{Interpreter, Value};
use std::rc::Rc;

#[test]
fn bind_then_lookup() {
    let env = EnvRef::new_root();
    let n = Symbol::new("n");
    env.bind(n.clone(), Value::Integer(1));
    assert_eq!(env.lookup(&n).unwrap(), Value::Integer(1));
}

#[test]
fn last_bind_wins_within_a_frame() {
    let env = EnvRef::new_root();
    let n = Symbol::new("n");
    env.bind(n.clone(), Value::Integer(1));
    env.bind(n.clone(), Value::Bool(true));
    assert_eq!(env.lookup(&n).unwrap(), Value::Bool(true));
    assert_eq!(env.borrow().len(), 1);
}

#[test]
fn local_binding_shadows_parent() {
    let root = EnvRef::new_root();
    let child = EnvRef::new_child(root.clone());
    let n = Symbol::new("n");
    root.bind(n.clone(), Value::Integer(1));
    assert_eq!(child.lookup(&n).unwrap(), Value::Integer(1));

    child.bind(n.clone(), Value::Integer(2));
    assert_eq!(child.lookup(&n).unwrap(), Value::Integer(2));
    assert_eq!(root.lookup(&n).unwrap(), Value::Integer(1));
}

#[test]
fn lookup_walks_the_whole_chain() {
    let root = EnvRef::new_root();
    let middle = EnvRef::new_child(root.clone());
    let leaf = EnvRef::new_child(middle.clone());
    root.bind("deep".into(), Value::Integer(3));
    assert_eq!(leaf.lookup(&"deep".into()).unwrap(), Value::Integer(3));
    assert!(leaf.borrow().get_local("deep").is_none());
    assert!(leaf.borrow().parent().unwrap().ptr_eq(&middle));
}

#[test]
fn unbound_symbol() {
    let root = EnvRef::new_root();
    let child = EnvRef::new_child(root);
    let err = child.lookup(&"nope".into()).unwrap_err();
    match err.kind() {
        ErrorKind::UnboundSymbol(s) => assert_eq!(s.name(), "nope"),
        other => panic!("unexpected error {}", other),
    }
}

#[test]
fn bind_never_touches_the_parent() {
    let root = EnvRef::new_root();
    let child = EnvRef::new_child(root.clone());
    child.bind("x".into(), Value::Integer(1));
    assert!(root.lookup(&"x".into()).is_err());
}

#[test]
fn self_capturing_closure_does_not_keep_its_frame_alive() {
    let interp = Interpreter::new();
    let frame = {
        let value = interp
            .eval_str("((lambda (x) (define f (lambda () (f)))) 1)")
            .unwrap();
        let closure = value.try_as_closure().unwrap().clone();
        closure.env().downgrade()
    };
    // the only strong handles were the returned closure and the call itself
    assert!(frame.upgrade().is_none());
}

#[test]
fn returned_closure_keeps_its_frame_alive() {
    let interp = Interpreter::new();
    let value = interp
        .eval_str("((lambda (x) (lambda () x)) 1)")
        .unwrap();
    let closure = value.try_as_closure().unwrap();
    let frame = closure.env().downgrade();
    assert!(frame.upgrade().is_some());
    assert_eq!(
        frame.upgrade().unwrap().lookup(&"x".into()).unwrap(),
        Value::Integer(1)
    );
    drop(value);
    assert!(frame.upgrade().is_none());
}

#[test]
fn closures_share_their_lambda_body() {
    let interp = Interpreter::new();
    interp
        .eval_str("(define mk (lambda (x) (lambda () x)))")
        .unwrap();
    let a = interp.eval_str("(mk 1)").unwrap();
    let b = interp.eval_str("(mk 2)").unwrap();
    let (a, b) = (a.try_as_closure().unwrap(), b.try_as_closure().unwrap());
    assert!(Rc::ptr_eq(a.def(), b.def()));
    assert!(!a.env().ptr_eq(b.env()));
}

#[test]
fn all_keys_includes_parents() {
    let root = EnvRef::new_root();
    let child = EnvRef::new_child(root.clone());
    root.bind("a".into(), Value::Integer(1));
    child.bind("b".into(), Value::Integer(2));
    let mut keys: Vec<_> = child.borrow().all_keys().map(|k| k.name().to_string()).collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn reset_releases_root_holding_only_self_capturing_closures() {
    let mut interp = Interpreter::new();
    interp
        .eval_str("(define f (lambda (n) (if (< n 1) 0 (f (- n 1)))))")
        .unwrap();
    let old_root = interp.env().downgrade();
    interp.reset();
    assert!(old_root.upgrade().is_none());
}

#[test]
fn closure_from_inner_call_keeps_old_root_alive() {
    let mut interp = Interpreter::new();
    interp
        .eval_str("(define g ((lambda (x) (lambda () x)) 1))")
        .unwrap();
    let old_root = interp.env().downgrade();
    interp.reset();
    // root -> g -> call frame -> root
    assert!(old_root.upgrade().is_some());
}
