//! Tests for quasiquote, unquote, and splice-unquote

use emlisp::{Error, Interpreter};

fn eval_lisp(source: &str) -> Result<String, Error> {
    Interpreter::new().unwrap().rep(source)
}

#[test]
fn test_quasiquote_of_atoms() {
    assert_eq!(eval_lisp("`7").unwrap(), "7");
    assert_eq!(eval_lisp("`\"s\"").unwrap(), "\"s\"");
    assert_eq!(eval_lisp("`nil").unwrap(), "nil");
}

#[test]
fn test_quasiquote_quotes_symbols() {
    // Unbound symbol, but quasiquote protects it from lookup
    assert_eq!(eval_lisp("`abc").unwrap(), "abc");
    assert_eq!(eval_lisp("`(a b c)").unwrap(), "(a b c)");
}

#[test]
fn test_unquote_evaluates_in_place() {
    assert_eq!(eval_lisp("(def! x 5) `(head ~x tail)").unwrap(), "(head 5 tail)");
    assert_eq!(eval_lisp("`(1 ~(+ 1 1) 3)").unwrap(), "(1 2 3)");
    // Top-level unquote degenerates to plain evaluation
    assert_eq!(eval_lisp("(def! x 5) `~x").unwrap(), "5");
}

#[test]
fn test_splice_unquote_inlines_a_list() {
    let source = "(def! xs '(2 3)) `(1 ~@xs 4)";
    assert_eq!(eval_lisp(source).unwrap(), "(1 2 3 4)");
}

#[test]
fn test_splice_unquote_of_empty_list() {
    assert_eq!(eval_lisp("(def! xs '()) `(1 ~@xs 2)").unwrap(), "(1 2)");
}

#[test]
fn test_splice_unquote_requires_a_sequence() {
    assert!(matches!(
        eval_lisp("(def! x 7) `(1 ~@x 2)"),
        Err(Error::TypeError { .. })
    ));
}

#[test]
fn test_quasiquote_inside_vectors() {
    let source = "(def! xs '(2 3)) `[1 ~@xs 4]";
    assert_eq!(eval_lisp(source).unwrap(), "[1 2 3 4]");
}

#[test]
fn test_nested_structure_reconstructs() {
    let source = "(def! x 9) `(a (b ~x) c)";
    assert_eq!(eval_lisp(source).unwrap(), "(a (b 9) c)");
}

#[test]
fn test_map_templates_pass_through_quoted() {
    assert_eq!(eval_lisp("`{:a 1}").unwrap(), "{:a 1}");
}

#[test]
fn test_quasiquote_without_unquotes_is_like_quote() {
    assert_eq!(eval_lisp("`(1 2 (3 4))").unwrap(), "(1 2 (3 4))");
}
