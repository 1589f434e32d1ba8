use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for emlisp source text
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of the current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

impl Scanner {
    /// Creates a new scanner from source text
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans all tokens from the source text and returns them as a vector
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            self.line,
            self.column,
        ));

        Ok(self.tokens.clone())
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            // Whitespace; commas are whitespace in emlisp, so (1, 2) reads as (1 2)
            ' ' | '\r' | '\t' | ',' => {}
            '\n' => {
                self.line += 1;
                self.column = 1;
            }

            // Comments run to end of line
            ';' => {
                self.skip_line_comment();
            }

            // Delimiters
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '[' => self.add_token(TokenKind::LeftBracket),
            ']' => self.add_token(TokenKind::RightBracket),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),

            // Reader macros
            '\'' => self.add_token(TokenKind::Quote),
            '`' => self.add_token(TokenKind::Backtick),
            '~' => {
                if self.match_char('@') {
                    self.add_token(TokenKind::TildeAt);
                } else {
                    self.add_token(TokenKind::Tilde);
                }
            }

            // Strings
            '"' => self.scan_string()?,

            // Everything else is an atom: number, keyword, bool, nil, or symbol
            c if Self::is_atom_char(c) => self.scan_atom()?,

            _ => {
                return Err(Error::SyntaxError {
                    line: self.line,
                    col: self.column,
                    message: format!("unexpected character '{}'", c),
                });
            }
        }

        Ok(())
    }

    /// Characters that may appear in an unquoted atom.
    ///
    /// Lisp symbols are permissive: `let*`, `def!`, `+`, `<=`, `&` and
    /// `*ARGV*` are all single symbols. Anything that is not whitespace,
    /// a delimiter, or a reader macro character qualifies.
    fn is_atom_char(c: char) -> bool {
        !c.is_whitespace() && !matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '`' | '~' | '"' | ';' | ',')
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_string(&mut self) -> Result<()> {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\\' {
                self.advance();
                if self.is_at_end() {
                    break;
                }
                let escaped = self.advance();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    _ => {
                        return Err(Error::SyntaxError {
                            line: self.line,
                            col: self.column,
                            message: format!("invalid escape sequence \\{}", escaped),
                        });
                    }
                }
            } else {
                if self.peek() == '\n' {
                    self.line += 1;
                    self.column = 1;
                }
                value.push(self.advance());
            }
        }

        if self.is_at_end() {
            return Err(Error::UnexpectedEof(format!(
                "unterminated string starting on line {}",
                self.line
            )));
        }

        self.advance(); // closing "

        self.add_token(TokenKind::String(value));
        Ok(())
    }

    fn scan_atom(&mut self) -> Result<()> {
        while !self.is_at_end() && Self::is_atom_char(self.peek()) {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();

        let kind = match text.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "nil" => TokenKind::Nil,
            _ if text.starts_with(':') && text.len() > 1 => {
                TokenKind::Keyword(text[1..].to_string())
            }
            _ if Self::looks_numeric(&text) => self.number_token(&text)?,
            _ => TokenKind::Symbol(text.clone()),
        };

        self.add_token(kind);
        Ok(())
    }

    /// A leading digit, or a sign followed by a digit, marks a number.
    /// A bare `-` or `+` stays a symbol.
    fn looks_numeric(text: &str) -> bool {
        let mut chars = text.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('-') | Some('+') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn number_token(&self, text: &str) -> Result<TokenKind> {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(TokenKind::Integer(n));
        }
        if let Ok(f) = text.parse::<f64>() {
            return Ok(TokenKind::Float(f));
        }
        Err(Error::SyntaxError {
            line: self.line,
            col: self.column,
            message: format!("invalid number literal '{}'", text),
        })
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.current += 1;
            self.column += 1;
            true
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(kind, lexeme, self.line, self.column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_sexpr() {
        let mut scanner = Scanner::new("(+ 1 2)");
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens.len(), 6); // ( + 1 2 ) EOF
        assert_eq!(tokens[0].kind, TokenKind::LeftParen);
        assert_eq!(tokens[1].kind, TokenKind::Symbol("+".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Integer(1));
        assert_eq!(tokens[3].kind, TokenKind::Integer(2));
        assert_eq!(tokens[4].kind, TokenKind::RightParen);
        assert_eq!(tokens[5].kind, TokenKind::Eof);
    }

    #[test]
    fn test_special_form_symbols() {
        let mut scanner = Scanner::new("(def! let* fn* defmacro!)");
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens[1].kind, TokenKind::Symbol("def!".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Symbol("let*".to_string()));
        assert_eq!(tokens[3].kind, TokenKind::Symbol("fn*".to_string()));
        assert_eq!(tokens[4].kind, TokenKind::Symbol("defmacro!".to_string()));
    }

    #[test]
    fn test_negative_number_vs_minus() {
        let mut scanner = Scanner::new("(- -5 3.5)");
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens[1].kind, TokenKind::Symbol("-".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Integer(-5));
        assert_eq!(tokens[3].kind, TokenKind::Float(3.5));
    }

    #[test]
    fn test_quote_sugar() {
        let mut scanner = Scanner::new("'x `(a ~b ~@c)");
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Quote);
        assert_eq!(tokens[2].kind, TokenKind::Backtick);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Tilde));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::TildeAt));
    }

    #[test]
    fn test_string_escapes() {
        let mut scanner = Scanner::new(r#""a\nb\"c""#);
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::String("a\nb\"c".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("\"abc");
        assert!(matches!(
            scanner.scan_tokens(),
            Err(Error::UnexpectedEof(_))
        ));
    }

    #[test]
    fn test_comment_only_input() {
        let mut scanner = Scanner::new("; nothing here\n");
        let tokens = scanner.scan_tokens().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keyword_literal() {
        let mut scanner = Scanner::new("{:name \"a\"}");
        let tokens = scanner.scan_tokens().unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Keyword("name".to_string()));
    }
}
