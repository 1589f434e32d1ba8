/// A single token from the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where the token appears (1-indexed)
    pub line: usize,
    /// Column number where the token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// All possible token types in emlisp source text
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal
    Integer(i64),
    /// Floating-point literal
    Float(f64),
    /// String literal (escapes already processed)
    String(String),
    /// Boolean true literal
    True,
    /// Boolean false literal
    False,
    /// Nil literal
    Nil,
    /// Keyword literal, stored without the leading `:`
    Keyword(String),
    /// Symbol (identifiers, operators, special form names)
    Symbol(String),

    // Delimiters
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Left bracket [
    LeftBracket,
    /// Right bracket ]
    RightBracket,
    /// Left brace {
    LeftBrace,
    /// Right brace }
    RightBrace,

    // Reader macros
    /// Quote sugar (')
    Quote,
    /// Quasiquote sugar (`)
    Backtick,
    /// Unquote sugar (~)
    Tilde,
    /// Splice-unquote sugar (~@)
    TildeAt,

    // Special
    /// End of input marker
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Float(fl) => write!(f, "{}", fl),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Keyword(k) => write!(f, ":{}", k),
            TokenKind::Symbol(s) => write!(f, "{}", s),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Nil => write!(f, "nil"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::LeftBracket => write!(f, "["),
            TokenKind::RightBracket => write!(f, "]"),
            TokenKind::LeftBrace => write!(f, "{{"),
            TokenKind::RightBrace => write!(f, "}}"),
            TokenKind::Quote => write!(f, "'"),
            TokenKind::Backtick => write!(f, "`"),
            TokenKind::Tilde => write!(f, "~"),
            TokenKind::TildeAt => write!(f, "~@"),
            TokenKind::Eof => write!(f, "<eof>"),
        }
    }
}
