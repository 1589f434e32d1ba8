//! Tests for emlisp special forms

use emlisp::{Error, Interpreter};

fn eval_lisp(source: &str) -> Result<String, Error> {
    Interpreter::new().unwrap().rep(source)
}

#[test]
fn test_def_binds_and_returns_the_value() {
    assert_eq!(eval_lisp("(def! x 3)").unwrap(), "3");
    assert_eq!(eval_lisp("(def! x 3) (+ x x)").unwrap(), "6");
    // def! of a computed value
    assert_eq!(eval_lisp("(def! y (+ 1 7)) y").unwrap(), "8");
}

#[test]
fn test_def_requires_a_symbol_target() {
    assert!(matches!(
        eval_lisp("(def! 1 2)"),
        Err(Error::MalformedForm { .. })
    ));
    assert!(matches!(
        eval_lisp("(def! x)"),
        Err(Error::MalformedForm { .. })
    ));
}

#[test]
fn test_let_creates_a_child_scope() {
    assert_eq!(eval_lisp("(def! x 4) (let* (x 9) x)").unwrap(), "9");
    // The outer binding is untouched afterwards
    assert_eq!(eval_lisp("(def! x 4) (let* (x 9) x) x").unwrap(), "4");
    // Vector binding lists work too
    assert_eq!(eval_lisp("(let* [a 1 b 2] (+ a b))").unwrap(), "3");
}

#[test]
fn test_let_bindings_see_earlier_bindings() {
    assert_eq!(
        eval_lisp("(let* (a 2 b (* a a) c (+ a b)) c)").unwrap(),
        "6"
    );
}

#[test]
fn test_do_evaluates_in_order_and_returns_last() {
    assert_eq!(eval_lisp("(do 1 2 3)").unwrap(), "3");
    // Side effects of earlier forms are visible to later ones
    assert_eq!(eval_lisp("(do (def! a 5) (+ a 1))").unwrap(), "6");
}

#[test]
fn test_if_branches() {
    assert_eq!(eval_lisp("(if true 1 2)").unwrap(), "1");
    assert_eq!(eval_lisp("(if false 1 2)").unwrap(), "2");
    assert_eq!(eval_lisp("(if nil 1 2)").unwrap(), "2");
    assert_eq!(eval_lisp("(if true 1)").unwrap(), "1");
    assert_eq!(eval_lisp("(if false 1)").unwrap(), "nil");
}

#[test]
fn test_if_never_evaluates_the_untaken_branch() {
    // The else branch would throw if evaluated
    assert_eq!(eval_lisp("(if true 1 (throw \"no\"))").unwrap(), "1");
    assert_eq!(eval_lisp("(if false (throw \"no\") 2)").unwrap(), "2");
}

#[test]
fn test_fn_closes_over_definition_scope() {
    let source = r#"
(def! counter-base 100)
(def! offset (fn* (n) (+ counter-base n)))
(offset 5)
"#;
    assert_eq!(eval_lisp(source).unwrap(), "105");
}

#[test]
fn test_closures_share_their_captured_frame() {
    // Both closures capture the same let* frame; top-level def! after
    // capture is also visible through the chain
    let source = r#"
(def! pair (let* (n 10) (list (fn* () n) (fn* () (+ n shift)))))
(def! shift 1)
(list ((first pair)) ((first (rest pair))))
"#;
    assert_eq!(eval_lisp(source).unwrap(), "(10 11)");
}

#[test]
fn test_immediate_lambda_call() {
    assert_eq!(eval_lisp("((fn* (a b) (+ a b)) 2 3)").unwrap(), "5");
}

#[test]
fn test_arity_errors() {
    assert!(matches!(
        eval_lisp("((fn* (a b) a) 1)"),
        Err(Error::Arity {
            expected: 2,
            got: 1
        })
    ));
    assert!(matches!(
        eval_lisp("((fn* (a) a) 1 2)"),
        Err(Error::Arity {
            expected: 1,
            got: 2
        })
    ));
}

#[test]
fn test_variadic_parameters() {
    assert_eq!(eval_lisp("((fn* (& xs) (count xs)) 1 2 3)").unwrap(), "3");
    assert_eq!(eval_lisp("((fn* (a & xs) xs) 1)").unwrap(), "()");
    assert_eq!(
        eval_lisp("((fn* (a b & xs) (list a b xs)) 1 2 3 4)").unwrap(),
        "(1 2 (3 4))"
    );
}

#[test]
fn test_quote_prevents_evaluation() {
    assert_eq!(eval_lisp("(quote (1 2 undefined))").unwrap(), "(1 2 undefined)");
    assert_eq!(eval_lisp("'(+ 1 2)").unwrap(), "(+ 1 2)");
}

#[test]
fn test_vectors_and_maps_evaluate_inline() {
    assert_eq!(eval_lisp("[1 (+ 1 1) 3]").unwrap(), "[1 2 3]");
    assert_eq!(eval_lisp("{:sum (+ 2 2)}").unwrap(), "{:sum 4}");
}

#[test]
fn test_empty_list_self_evaluates() {
    assert_eq!(eval_lisp("()").unwrap(), "()");
}
