//! String, printing, and IO builtins
//!
//! The printing split follows the two modes of [`crate::printer::pr_str`]:
//! `pr-str`/`prn` produce readable output (strings quoted and escaped),
//! `str`/`println` produce display output (strings raw). `slurp` and
//! `read-string` are the IO half of `load-file`.

use std::fs;

use crate::core::{expect_arity, register};
use crate::error::{Error, Result};
use crate::parser::read_str;
use crate::printer::pr_str;
use crate::runtime::{EnvRef, Expr};

pub fn install(env: &EnvRef) {
    register(env, "str", |args| {
        let joined: String = args.iter().map(|e| pr_str(e, false)).collect();
        Ok(Expr::Str(joined))
    });
    register(env, "pr-str", |args| Ok(Expr::Str(join(args, true))));
    register(env, "prn", |args| {
        println!("{}", join(args, true));
        Ok(Expr::Nil)
    });
    register(env, "println", |args| {
        println!("{}", join(args, false));
        Ok(Expr::Nil)
    });

    register(env, "read-string", |args| {
        expect_arity(args, 1)?;
        read_str(args[0].as_str()?)
    });
    register(env, "slurp", |args| {
        expect_arity(args, 1)?;
        let path = args[0].as_str()?;
        fs::read_to_string(path).map(Expr::Str).map_err(|e| Error::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    });

    register(env, "symbol", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::symbol(args[0].as_str()?))
    });
    register(env, "keyword", |args| {
        expect_arity(args, 1)?;
        match &args[0] {
            Expr::Keyword(_) => Ok(args[0].clone()),
            other => Ok(Expr::Keyword(other.as_str()?.to_string())),
        }
    });
}

fn join(args: &[Expr], readable: bool) -> String {
    args.iter()
        .map(|e| pr_str(e, readable))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Env;

    fn call(name: &str, args: &[Expr]) -> Result<Expr> {
        let env = Env::new(None);
        install(&env);
        let Expr::Builtin(f) = env.get(name).unwrap() else {
            panic!("{} not installed", name);
        };
        (f.func)(args)
    }

    #[test]
    fn test_str_concatenates_display_forms() {
        let out = call(
            "str",
            &[
                Expr::Str("a".to_string()),
                Expr::Int(1),
                Expr::list(vec![Expr::Int(2)]),
            ],
        )
        .unwrap();
        assert_eq!(out, Expr::Str("a1(2)".to_string()));
        assert_eq!(call("str", &[]).unwrap(), Expr::Str(String::new()));
    }

    #[test]
    fn test_pr_str_quotes_strings() {
        let out = call("pr-str", &[Expr::Str("a\"b".to_string()), Expr::Int(1)]).unwrap();
        assert_eq!(out, Expr::Str("\"a\\\"b\" 1".to_string()));
    }

    #[test]
    fn test_read_string_round_trip() {
        let out = call("read-string", &[Expr::Str("(+ 1 2)".to_string())]).unwrap();
        assert_eq!(out.to_string(), "(+ 1 2)");
    }

    #[test]
    fn test_read_string_blank_input() {
        let err = call("read-string", &[Expr::Str("  ".to_string())]).unwrap_err();
        assert!(matches!(err, Error::BlankInput));
    }

    #[test]
    fn test_slurp_missing_file() {
        let err = call(
            "slurp",
            &[Expr::Str("/nonexistent/definitely-missing.lisp".to_string())],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_symbol_and_keyword_constructors() {
        assert_eq!(
            call("symbol", &[Expr::Str("abc".to_string())]).unwrap(),
            Expr::symbol("abc")
        );
        assert_eq!(
            call("keyword", &[Expr::Str("k".to_string())]).unwrap(),
            Expr::Keyword("k".to_string())
        );
        // Idempotent on keywords
        assert_eq!(
            call("keyword", &[Expr::Keyword("k".to_string())]).unwrap(),
            Expr::Keyword("k".to_string())
        );
    }
}
