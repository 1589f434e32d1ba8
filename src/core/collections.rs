//! Sequence and map builtins
//!
//! Sequence functions accept lists and vectors interchangeably and always
//! return lists (except `vec` and `vector`). Map operations never mutate:
//! `assoc`/`dissoc` build new maps sharing nothing with the input.

use crate::core::{expect_arity, register};
use crate::error::{Error, Result};
use crate::runtime::{apply, EnvRef, Expr};

pub fn install(env: &EnvRef) {
    register(env, "list", |args| Ok(Expr::list(args.to_vec())));
    register(env, "list?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(matches!(args[0], Expr::List(_))))
    });
    register(env, "vector", |args| Ok(Expr::vector(args.to_vec())));
    register(env, "vector?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(matches!(args[0], Expr::Vector(_))))
    });
    register(env, "map?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(matches!(args[0], Expr::Map(_))))
    });

    register(env, "empty?", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Bool(count_of(&args[0])? == 0))
    });
    register(env, "count", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::Int(count_of(&args[0])? as i64))
    });

    register(env, "cons", |args| {
        expect_arity(args, 2)?;
        let tail = args[1].as_seq()?;
        let mut items = Vec::with_capacity(tail.len() + 1);
        items.push(args[0].clone());
        items.extend_from_slice(tail);
        Ok(Expr::list(items))
    });
    register(env, "concat", |args| {
        let mut items = Vec::new();
        for arg in args {
            items.extend_from_slice(arg.as_seq()?);
        }
        Ok(Expr::list(items))
    });
    register(env, "vec", |args| {
        expect_arity(args, 1)?;
        Ok(Expr::vector(args[0].as_seq()?.to_vec()))
    });

    register(env, "nth", |args| {
        expect_arity(args, 2)?;
        let seq = args[0].as_seq()?;
        let i = args[1].as_int()?;
        usize::try_from(i)
            .ok()
            .and_then(|i| seq.get(i))
            .cloned()
            // Catchable, like any user-level throw
            .ok_or_else(|| Error::Thrown(Expr::Str("nth: index out of range".to_string())))
    });
    register(env, "first", |args| {
        expect_arity(args, 1)?;
        match &args[0] {
            Expr::Nil => Ok(Expr::Nil),
            seq => Ok(seq.as_seq()?.first().cloned().unwrap_or(Expr::Nil)),
        }
    });
    register(env, "rest", |args| {
        expect_arity(args, 1)?;
        match &args[0] {
            Expr::Nil => Ok(Expr::list(vec![])),
            seq => {
                let items = seq.as_seq()?;
                Ok(Expr::list(items.get(1..).unwrap_or(&[]).to_vec()))
            }
        }
    });

    register(env, "hash-map", |args| {
        if args.len() % 2 != 0 {
            return Err(Error::malformed(
                "hash-map",
                "expected an even number of arguments",
            ));
        }
        let pairs = args
            .chunks_exact(2)
            .map(|kv| (kv[0].clone(), kv[1].clone()))
            .collect();
        Ok(Expr::map(pairs))
    });
    register(env, "get", |args| {
        expect_arity(args, 2)?;
        if matches!(args[0], Expr::Nil) {
            return Ok(Expr::Nil);
        }
        let pairs = args[0].as_map()?;
        Ok(lookup(pairs, &args[1]).cloned().unwrap_or(Expr::Nil))
    });
    register(env, "contains?", |args| {
        expect_arity(args, 2)?;
        let pairs = args[0].as_map()?;
        Ok(Expr::Bool(lookup(pairs, &args[1]).is_some()))
    });
    register(env, "keys", |args| {
        expect_arity(args, 1)?;
        let pairs = args[0].as_map()?;
        Ok(Expr::list(pairs.iter().map(|(k, _)| k.clone()).collect()))
    });
    register(env, "vals", |args| {
        expect_arity(args, 1)?;
        let pairs = args[0].as_map()?;
        Ok(Expr::list(pairs.iter().map(|(_, v)| v.clone()).collect()))
    });
    register(env, "assoc", |args| {
        if args.is_empty() || args.len() % 2 != 1 {
            return Err(Error::malformed(
                "assoc",
                "expected a map and an even number of key/value arguments",
            ));
        }
        let mut pairs = args[0].as_map()?.to_vec();
        pairs.extend(
            args[1..]
                .chunks_exact(2)
                .map(|kv| (kv[0].clone(), kv[1].clone())),
        );
        Ok(Expr::map(pairs))
    });
    register(env, "dissoc", |args| {
        if args.is_empty() {
            return Err(Error::Arity {
                expected: 1,
                got: 0,
            });
        }
        let pairs = args[0]
            .as_map()?
            .iter()
            .filter(|(k, _)| !args[1..].contains(k))
            .cloned()
            .collect();
        Ok(Expr::Map(std::rc::Rc::new(pairs)))
    });

    register(env, "apply", |args| {
        if args.len() < 2 {
            return Err(Error::Arity {
                expected: 2,
                got: args.len(),
            });
        }
        let f = &args[0];
        let last = &args[args.len() - 1];
        let mut call_args = args[1..args.len() - 1].to_vec();
        call_args.extend_from_slice(last.as_seq()?);
        apply(f, &call_args)
    });
    register(env, "map", |args| {
        expect_arity(args, 2)?;
        let f = &args[0];
        let mapped = args[1]
            .as_seq()?
            .iter()
            .map(|item| apply(f, std::slice::from_ref(item)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Expr::list(mapped))
    });
}

fn count_of(e: &Expr) -> Result<usize> {
    match e {
        Expr::Nil => Ok(0),
        Expr::List(items) | Expr::Vector(items) => Ok(items.len()),
        Expr::Map(pairs) => Ok(pairs.len()),
        Expr::Str(s) => Ok(s.chars().count()),
        other => Err(Error::TypeError {
            expected: "countable collection".to_string(),
            got: other.type_name().to_string(),
        }),
    }
}

fn lookup<'a>(pairs: &'a [(Expr, Expr)], key: &Expr) -> Option<&'a Expr> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}
