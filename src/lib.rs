//! # emlisp - an embeddable Lisp interpreter
//!
//! A small Lisp with lexically scoped closures, user-defined macros, and a
//! tail-call-optimizing evaluator. Designed to be embedded: the interpreter
//! is a plain value, evaluation is synchronous and single-threaded, and host
//! functions are ordinary Rust closures.
//!
//! ## Quick Start
//!
//! ```rust
//! use emlisp::Interpreter;
//!
//! # fn main() -> emlisp::Result<()> {
//! let interp = Interpreter::new()?;
//! assert_eq!(interp.rep("(+ 1 2 3)")?, "6");
//!
//! interp.rep("(def! twice (fn* (x) (* 2 x)))")?;
//! assert_eq!(interp.rep("(twice 21)")?, "42");
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Atoms**: integers, floats, strings, keywords (`:name`), `true`,
//!   `false`, `nil`
//! - **Collections**: lists `(1 2 3)`, vectors `[1 2 3]`, maps `{:a 1}`
//! - **Special forms**: `def!`, `let*`, `quote`, `quasiquote`, `defmacro!`,
//!   `do`, `if`, `fn*`
//! - **Reader sugar**: `'x`, `` `x ``, `~x`, `~@x`
//!
//! Macros are closures flagged at definition time: `defmacro!` receives a
//! function value, clones it, and marks the clone. A macro call gets its
//! arguments unevaluated and its expansion is evaluated in the caller's
//! environment:
//!
//! ```rust
//! use emlisp::Interpreter;
//!
//! # fn main() -> emlisp::Result<()> {
//! let interp = Interpreter::new()?;
//! interp.rep("(defmacro! unless (fn* (pred a b) `(if ~pred ~b ~a)))")?;
//! assert_eq!(interp.rep("(unless false 7 8)")?, "7");
//! # Ok(())
//! # }
//! ```
//!
//! ## Tail Calls
//!
//! The evaluator is a trampoline: calls in tail position (the last form of
//! `do`, either branch of `if`, a `let*` body, a function's body position)
//! reuse the current loop iteration instead of recursing, so tail-recursive
//! Lisp runs in constant native stack:
//!
//! ```rust
//! use emlisp::Interpreter;
//!
//! # fn main() -> emlisp::Result<()> {
//! let interp = Interpreter::new()?;
//! interp.rep("(def! loop (fn* (n) (if (= n 0) n (loop (- n 1)))))")?;
//! assert_eq!(interp.rep("(loop 100000)")?, "0");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Scanner → Tokens → Reader → Expr → Evaluator → Expr → Printer
//! ```
//!
//! The language is homoiconic, so there is no separate AST type: the reader
//! produces [`Expr`] values and the evaluator reduces them.
//!
//! ### Main Components
//!
//! - [`Scanner`] - tokenizes source text
//! - [`Reader`] - reads tokens into expressions, expanding quote sugar
//! - [`Interpreter`] - top-level environment plus read-eval-print entry points
//! - [`Expr`] - runtime value and syntax representation
//! - [`Env`] - lexical scope frame, shared by reference
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Result`] with a structured [`Error`].
//! Reader errors carry positions; `(throw value)` surfaces as
//! [`Error::Thrown`] carrying the language value:
//!
//! ```rust
//! use emlisp::{Error, Interpreter};
//!
//! # fn main() -> emlisp::Result<()> {
//! let interp = Interpreter::new()?;
//! match interp.rep("(undefined-symbol)") {
//!     Err(Error::UnboundSymbol { name }) => assert_eq!(name, "undefined-symbol"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! # Ok(())
//! # }
//! ```

/// Version of the emlisp interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod core;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod runtime;

// Re-export main types
pub use error::{Error, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{read_str, Reader};
pub use printer::pr_str;
pub use runtime::{Builtin, BuiltinFn, Closure, Env, EnvRef, Expr, Interpreter};
