//! emlisp reader module
//!
//! Turns token streams into expressions. emlisp is homoiconic, so the
//! "AST" is the runtime value type [`crate::runtime::Expr`].

mod reader;

pub use reader::{read_str, Reader};
