//! The builtin namespace
//!
//! Host functions installed into the top-level environment at interpreter
//! startup. Builtins receive already-evaluated arguments and are opaque to
//! the evaluator; everything here is pure except `slurp` and the printing
//! builtins.

pub mod collections;
pub mod math;
pub mod strings;

use crate::error::{Error, Result};
use crate::runtime::{Builtin, EnvRef, Expr};

/// Installs every builtin into `env`
pub fn install(env: &EnvRef) {
    math::install(env);
    collections::install(env);
    strings::install(env);

    // throw surfaces any value as an error; uncaught, it unwinds to the
    // host with the value attached
    register(env, "throw", |args| {
        expect_arity(args, 1)?;
        Err(Error::Thrown(args[0].clone()))
    });

    register(env, "nil?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(matches!(args[0], Expr::Nil)))
    });
    register(env, "symbol?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(matches!(args[0], Expr::Symbol(_))))
    });
    register(env, "keyword?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(matches!(args[0], Expr::Keyword(_))))
    });
    register(env, "string?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(matches!(args[0], Expr::Str(_))))
    });
    register(env, "number?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(matches!(args[0], Expr::Int(_) | Expr::Float(_))))
    });
}

pub(crate) fn register(
    env: &EnvRef,
    name: &'static str,
    func: impl Fn(&[Expr]) -> Result<Expr> + 'static,
) {
    env.set(name, Expr::Builtin(Builtin::new(name, func)));
}

pub(crate) fn expect_arity(args: &[Expr], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::Arity {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Env;

    #[test]
    fn test_throw_carries_the_value() {
        let env = Env::new(None);
        install(&env);
        let Expr::Builtin(throw) = env.get("throw").unwrap() else {
            panic!("throw not installed");
        };
        let err = (throw.func)(&[Expr::Int(7)]).unwrap_err();
        assert!(matches!(err, Error::Thrown(Expr::Int(7))));
    }

    #[test]
    fn test_type_predicates() {
        let env = Env::new(None);
        install(&env);
        let check = |name: &str, arg: Expr, want: bool| {
            let Expr::Builtin(f) = env.get(name).unwrap() else {
                panic!("{} not installed", name);
            };
            assert_eq!((f.func)(&[arg]).unwrap(), Expr::Bool(want));
        };
        check("nil?", Expr::Nil, true);
        check("nil?", Expr::Bool(false), false);
        check("symbol?", Expr::symbol("x"), true);
        check("keyword?", Expr::Keyword("k".to_string()), true);
        check("string?", Expr::Str("s".to_string()), true);
        check("number?", Expr::Float(1.5), true);
        check("number?", Expr::Str("1".to_string()), false);
    }
}
