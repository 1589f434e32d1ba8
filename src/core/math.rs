//! Arithmetic and comparison builtins
//!
//! Arithmetic stays in `i64` while every operand is an integer and promotes
//! to `f64` as soon as a float appears. Integer overflow wraps; division by
//! an exact zero is an error in either representation.

use std::cmp::Ordering;

use crate::core::{expect_arity, register};
use crate::error::{Error, Result};
use crate::runtime::{EnvRef, Expr};

pub fn install(env: &EnvRef) {
    register(env, "+", |args| fold(args, Op::Add));
    register(env, "-", |args| fold(args, Op::Sub));
    register(env, "*", |args| fold(args, Op::Mul));
    register(env, "/", |args| fold(args, Op::Div));

    register(env, "<", |args| compare(args, Ordering::is_lt));
    register(env, "<=", |args| compare(args, Ordering::is_le));
    register(env, ">", |args| compare(args, Ordering::is_gt));
    register(env, ">=", |args| compare(args, Ordering::is_ge));

    register(env, "=", |args| {
        expect_arity(args, 2)?;
        Ok(Expr::Bool(args[0] == args[1]))
    });
}

#[derive(Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }

    fn into_expr(self) -> Expr {
        match self {
            Num::Int(n) => Expr::Int(n),
            Num::Float(f) => Expr::Float(f),
        }
    }
}

fn to_num(e: &Expr) -> Result<Num> {
    match e {
        Expr::Int(n) => Ok(Num::Int(*n)),
        Expr::Float(f) => Ok(Num::Float(*f)),
        other => Err(Error::TypeError {
            expected: "number".to_string(),
            got: other.type_name().to_string(),
        }),
    }
}

/// Left-folds the arguments under `op`.
///
/// `+` and `*` accept zero arguments (their identities); `-` and `/` need
/// at least one, and with exactly one act as negation and reciprocal.
fn fold(args: &[Expr], op: Op) -> Result<Expr> {
    let mut iter = args.iter();
    let first = match iter.next() {
        Some(e) => e,
        None => {
            return match op {
                Op::Add => Ok(Expr::Int(0)),
                Op::Mul => Ok(Expr::Int(1)),
                Op::Sub | Op::Div => Err(Error::Arity {
                    expected: 1,
                    got: 0,
                }),
            }
        }
    };
    let mut acc = to_num(first)?;

    if args.len() == 1 {
        return match op {
            Op::Sub => apply_op(op, Num::Int(0), acc).map(Num::into_expr),
            Op::Div => apply_op(op, Num::Int(1), acc).map(Num::into_expr),
            Op::Add | Op::Mul => Ok(acc.into_expr()),
        };
    }

    for e in iter {
        acc = apply_op(op, acc, to_num(e)?)?;
    }
    Ok(acc.into_expr())
}

fn apply_op(op: Op, a: Num, b: Num) -> Result<Num> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Ok(Num::Int(match op {
            Op::Add => x.wrapping_add(y),
            Op::Sub => x.wrapping_sub(y),
            Op::Mul => x.wrapping_mul(y),
            Op::Div => {
                if y == 0 {
                    return Err(Error::DivisionByZero);
                }
                x.wrapping_div(y)
            }
        })),
        _ => {
            let (x, y) = (a.as_f64(), b.as_f64());
            if matches!(op, Op::Div) && y == 0.0 {
                return Err(Error::DivisionByZero);
            }
            Ok(Num::Float(match op {
                Op::Add => x + y,
                Op::Sub => x - y,
                Op::Mul => x * y,
                Op::Div => x / y,
            }))
        }
    }
}

fn compare(args: &[Expr], pred: fn(Ordering) -> bool) -> Result<Expr> {
    expect_arity(args, 2)?;
    let a = to_num(&args[0])?.as_f64();
    let b = to_num(&args[1])?.as_f64();
    let ord = a.partial_cmp(&b).ok_or_else(|| Error::TypeError {
        expected: "comparable numbers".to_string(),
        got: "NaN".to_string(),
    })?;
    Ok(Expr::Bool(pred(ord)))
}
