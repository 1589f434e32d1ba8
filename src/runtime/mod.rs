//! emlisp runtime
//!
//! The value model, environment chain, quasiquote expander, and the
//! trampolined evaluator.

mod environment;
mod evaluator;
pub mod quasiquote;
mod value;

pub use environment::{Env, EnvRef, VARIADIC_MARKER};
pub use evaluator::{apply, eval, Interpreter};
pub use value::{Builtin, BuiltinFn, Closure, Expr};
