use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::EnvRef;

/// Runtime value and AST representation
///
/// emlisp is homoiconic: the reader produces `Expr`, the evaluator reduces
/// `Expr`, and macros transform `Expr`. There is no separate AST type.
#[derive(Debug, Clone)]
pub enum Expr {
    // Self-evaluating atoms
    /// Nil value
    Nil,
    /// Boolean value
    Bool(bool),
    /// 64-bit integer value
    Int(i64),
    /// 64-bit floating-point value
    Float(f64),
    /// String value
    Str(String),
    /// Keyword value, stored without the leading `:`
    Keyword(String),

    /// Interned identifier; equality by name
    Symbol(String),

    // Collections (reference-counted, cheap to clone)
    /// The primary syntactic/semantic form; a non-empty list evaluates as a call
    List(Rc<Vec<Expr>>),
    /// Evaluates element-wise; never invoked as a call
    Vector(Rc<Vec<Expr>>),
    /// Ordered key/value pairs, keys unique by value-equality.
    /// Values evaluate, keys pass through unevaluated.
    Map(Rc<Vec<(Expr, Expr)>>),

    /// User-defined function or macro
    Closure(Rc<Closure>),
    /// Host-provided primitive, opaque to the evaluator
    Builtin(Builtin),
}

/// A user-defined function or macro
///
/// Captures the environment active at its definition site (lexical scoping).
/// A macro is a closure with `is_macro` set: it is invoked with unevaluated
/// arguments and its result is re-evaluated. The flag is only ever set on a
/// clone made by `defmacro!`, so converting a function into a macro never
/// mutates the original value.
#[derive(Debug, Clone)]
pub struct Closure {
    /// Parameter names; a `&` entry marks the next name as the variadic rest
    pub params: Vec<String>,
    /// Body expression, evaluated on application
    pub body: Expr,
    /// Definition-site environment
    pub env: EnvRef,
    /// Expansion-time invocation (args unevaluated, result re-evaluated)
    pub is_macro: bool,
}

/// Native function type for builtins
pub type BuiltinFn = Rc<dyn Fn(&[Expr]) -> Result<Expr>>;

/// A named host function installed into the top-level environment
#[derive(Clone)]
pub struct Builtin {
    /// Builtin name, used for printing and identity
    pub name: &'static str,
    /// The native implementation
    pub func: BuiltinFn,
}

impl Builtin {
    /// Creates a builtin from a name and a native function
    pub fn new(name: &'static str, func: impl Fn(&[Expr]) -> Result<Expr> + 'static) -> Self {
        Builtin {
            name,
            func: Rc::new(func),
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl Expr {
    /// Creates a list value from a vector of expressions
    pub fn list(items: Vec<Expr>) -> Self {
        Expr::List(Rc::new(items))
    }

    /// Creates a vector value from a vector of expressions
    pub fn vector(items: Vec<Expr>) -> Self {
        Expr::Vector(Rc::new(items))
    }

    /// Creates a map value, deduplicating keys by value-equality (last wins)
    pub fn map(pairs: Vec<(Expr, Expr)>) -> Self {
        let mut deduped: Vec<(Expr, Expr)> = Vec::with_capacity(pairs.len());
        for (k, v) in pairs {
            if let Some(slot) = deduped.iter_mut().find(|(existing, _)| *existing == k) {
                slot.1 = v;
            } else {
                deduped.push((k, v));
            }
        }
        Expr::Map(Rc::new(deduped))
    }

    /// Creates a symbol value
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Nil => "nil",
            Expr::Bool(_) => "bool",
            Expr::Int(_) => "int",
            Expr::Float(_) => "float",
            Expr::Str(_) => "string",
            Expr::Keyword(_) => "keyword",
            Expr::Symbol(_) => "symbol",
            Expr::List(_) => "list",
            Expr::Vector(_) => "vector",
            Expr::Map(_) => "map",
            Expr::Closure(c) => {
                if c.is_macro {
                    "macro"
                } else {
                    "function"
                }
            }
            Expr::Builtin(_) => "builtin",
        }
    }

    /// Returns true if the value is truthy in a boolean context.
    ///
    /// Only `nil` and `false` are falsy; `0`, `""` and `()` are all truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Expr::Nil | Expr::Bool(false))
    }

    /// Converts the value to a 64-bit integer
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Expr::Int(n) => Ok(*n),
            _ => Err(Error::TypeError {
                expected: "int".to_string(),
                got: self.type_name().to_string(),
            }),
        }
    }

    /// Converts the value to a 64-bit floating-point number
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Expr::Float(f) => Ok(*f),
            Expr::Int(n) => Ok(*n as f64),
            _ => Err(Error::TypeError {
                expected: "float".to_string(),
                got: self.type_name().to_string(),
            }),
        }
    }

    /// Returns a reference to the string value
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Expr::Str(s) => Ok(s),
            _ => Err(Error::TypeError {
                expected: "string".to_string(),
                got: self.type_name().to_string(),
            }),
        }
    }

    /// Returns a reference to the symbol name
    pub fn as_symbol(&self) -> Result<&str> {
        match self {
            Expr::Symbol(s) => Ok(s),
            _ => Err(Error::TypeError {
                expected: "symbol".to_string(),
                got: self.type_name().to_string(),
            }),
        }
    }

    /// Returns the elements of a list or vector
    pub fn as_seq(&self) -> Result<&[Expr]> {
        match self {
            Expr::List(items) | Expr::Vector(items) => Ok(items),
            _ => Err(Error::TypeError {
                expected: "list or vector".to_string(),
                got: self.type_name().to_string(),
            }),
        }
    }

    /// Returns the elements of a list only (vectors are rejected)
    pub fn as_list(&self) -> Result<&[Expr]> {
        match self {
            Expr::List(items) => Ok(items),
            _ => Err(Error::TypeError {
                expected: "list".to_string(),
                got: self.type_name().to_string(),
            }),
        }
    }

    /// Returns the key/value pairs of a map
    pub fn as_map(&self) -> Result<&[(Expr, Expr)]> {
        match self {
            Expr::Map(pairs) => Ok(pairs),
            _ => Err(Error::TypeError {
                expected: "map".to_string(),
                got: self.type_name().to_string(),
            }),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", crate::printer::pr_str(self, true))
    }
}

// Equality is structural for atoms and collections; lists and vectors with
// equal elements compare equal (sequence semantics). Closures and builtins
// compare by reference identity.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Nil, Expr::Nil) => true,
            (Expr::Bool(a), Expr::Bool(b)) => a == b,
            (Expr::Int(a), Expr::Int(b)) => a == b,
            (Expr::Float(a), Expr::Float(b)) => a == b,
            (Expr::Int(a), Expr::Float(b)) | (Expr::Float(b), Expr::Int(a)) => *a as f64 == *b,
            (Expr::Str(a), Expr::Str(b)) => a == b,
            (Expr::Keyword(a), Expr::Keyword(b)) => a == b,
            (Expr::Symbol(a), Expr::Symbol(b)) => a == b,
            (Expr::List(a) | Expr::Vector(a), Expr::List(b) | Expr::Vector(b)) => a == b,
            (Expr::Map(a), Expr::Map(b)) => {
                // Key order is insertion order, so compare as unordered pairs
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(k2, v2)| k == k2 && v == v2))
            }
            (Expr::Closure(a), Expr::Closure(b)) => Rc::ptr_eq(a, b),
            (Expr::Builtin(a), Expr::Builtin(b)) => Rc::ptr_eq(&a.func, &b.func),
            _ => false,
        }
    }
}
