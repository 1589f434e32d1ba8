//! Property-based fuzzing for the reader and evaluator
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The scanner and reader never panic on arbitrary input
//! 2. Atoms survive a print/read round trip
//! 3. Pure expressions evaluate deterministically

use emlisp::{read_str, Expr, Interpreter, Scanner};
use proptest::prelude::*;

/// Random strings that might break the scanner
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,300}").unwrap()
}

/// Tokens that look like pieces of source text
fn source_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("'".to_string()),
        Just("`".to_string()),
        Just("~".to_string()),
        Just("~@".to_string()),
        Just("def!".to_string()),
        Just("let*".to_string()),
        Just("fn*".to_string()),
        Just("if".to_string()),
        Just("do".to_string()),
        Just("quote".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("nil".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        (-1000i64..1000i64).prop_map(|n| n.to_string()),
        (0.0f64..100.0f64).prop_map(|f| format!("{:.2}", f)),
        r#""[a-zA-Z0-9 ]{0,16}""#.prop_map(|s| s),
        "[a-z][a-z0-9-]{0,8}".prop_map(|s| s),
        ":[a-z]{1,8}".prop_map(|s| s),
        ";[^\n]{0,16}".prop_map(|s| s),
    ]
}

fn sexp_like_string() -> impl Strategy<Value = String> {
    prop::collection::vec(source_token(), 0..40).prop_map(|tokens| tokens.join(" "))
}

proptest! {
    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let mut scanner = Scanner::new(&source);
        let _ = scanner.scan_tokens();
    }

    #[test]
    fn reader_never_panics(source in sexp_like_string()) {
        let _ = read_str(&source);
    }

    #[test]
    fn integer_atoms_round_trip(n in any::<i64>()) {
        let printed = Expr::Int(n).to_string();
        prop_assert_eq!(read_str(&printed).unwrap(), Expr::Int(n));
    }

    #[test]
    fn string_atoms_round_trip(s in "[a-zA-Z0-9 \\\\\"\n\t]{0,32}") {
        let printed = Expr::Str(s.clone()).to_string();
        prop_assert_eq!(read_str(&printed).unwrap(), Expr::Str(s));
    }

    #[test]
    fn keyword_atoms_round_trip(name in "[a-z][a-z0-9-]{0,12}") {
        let printed = Expr::Keyword(name.clone()).to_string();
        prop_assert_eq!(read_str(&printed).unwrap(), Expr::Keyword(name));
    }

    #[test]
    fn addition_is_deterministic(a in -10000i64..10000, b in -10000i64..10000) {
        let source = format!("(+ {} {})", a, b);
        let first = Interpreter::new().unwrap().rep(&source).unwrap();
        let second = Interpreter::new().unwrap().rep(&source).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, (a + b).to_string());
    }

    #[test]
    fn quoting_arbitrary_forms_is_identity(source in sexp_like_string()) {
        // Whatever reads successfully must print back out of a quote intact
        if let Ok(form) = read_str(&source) {
            let i = Interpreter::new().unwrap();
            let quoted = Expr::list(vec![Expr::symbol("quote"), form.clone()]);
            prop_assert_eq!(i.eval(&quoted).unwrap(), form);
        }
    }
}
