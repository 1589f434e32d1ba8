//! Error types for the emlisp interpreter

use thiserror::Error;

/// emlisp interpreter errors
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Reader errors
    /// Input contained nothing but whitespace and comments
    ///
    /// **Triggered by:** Reading an empty line or a line of comments
    /// **Recovery:** The REPL treats this as a no-op, not a failure
    #[error("blank input")]
    BlankInput,

    /// Syntax error encountered while scanning or reading
    ///
    /// **Triggered by:** Invalid source text (stray characters, bad escapes)
    /// **Example:** `"unterminated` (missing closing quote)
    #[error("syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where the error occurred
        line: usize,
        /// Column number where the error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Unexpected end of input while reading a form
    ///
    /// **Triggered by:** An unclosed `(`, `[` or `{`
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),

    // Runtime errors
    /// Symbol absent from the environment chain
    ///
    /// **Triggered by:** Using a symbol before it is defined
    /// **Prevention:** Define symbols with `(def! name value)` before use
    #[error("'{name}' not found")]
    UnboundSymbol {
        /// Symbol name
        name: String,
    },

    /// Attempt to call a non-callable value
    #[error("value is not callable: {type_name}")]
    NotCallable {
        /// Type of the non-callable value
        type_name: String,
    },

    /// Parameter/argument count mismatch without a variadic marker
    #[error("wrong number of arguments: expected {expected}, got {got}")]
    Arity {
        /// Expected argument count
        expected: usize,
        /// Actual argument count
        got: usize,
    },

    /// Structurally invalid special form
    ///
    /// **Triggered by:** e.g. `(let* (x) body)` (odd binding count)
    #[error("malformed {form}: {message}")]
    MalformedForm {
        /// Special form name
        form: String,
        /// What is wrong with it
        message: String,
    },

    /// Type mismatch error
    ///
    /// **Triggered by:** An operation expecting one type but receiving another
    /// **Example:** `(+ "hello" 5)`, splicing a non-list inside a quasiquote
    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Division by zero error
    #[error("division by zero")]
    DivisionByZero,

    /// File I/O failure from a builtin such as `slurp`
    #[error("io error reading {path}: {message}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error text
        message: String,
    },

    /// A value raised by the language-level `throw` primitive
    ///
    /// Distinct from host-level errors: it carries an arbitrary language
    /// value and is the kind a language-level `try/catch` would intercept.
    #[error("uncaught throw: {}", crate::printer::pr_str(.0, true))]
    Thrown(crate::runtime::Expr),
}

impl Error {
    /// Create a malformed-form error for a named special form
    pub fn malformed(form: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedForm {
            form: form.into(),
            message: message.into(),
        }
    }
}

/// Result type for emlisp operations
pub type Result<T> = std::result::Result<T, Error>;
