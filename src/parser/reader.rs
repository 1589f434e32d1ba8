use crate::error::{Error, Result};
use crate::lexer::{Scanner, Token, TokenKind};
use crate::runtime::Expr;

/// Reader for emlisp: turns a token stream into expressions
///
/// The reader is syntax only. Quote sugar expands to its long form here
/// (`'x` to `(quote x)`, `` `x `` to `(quasiquote x)`, `~x` to `(unquote x)`,
/// `~@x` to `(splice-unquote x)`) so the evaluator never sees reader macros.
pub struct Reader {
    tokens: Vec<Token>,
    current: usize,
}

/// Reads a single expression from source text.
///
/// Fails with [`Error::BlankInput`] when the text contains nothing but
/// whitespace and comments. This is the contract behind the `read-string`
/// builtin and the REPL's silent handling of empty lines.
pub fn read_str(source: &str) -> Result<Expr> {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens()?;
    Reader::new(tokens).read_form()
}

impl Reader {
    /// Creates a reader over a token stream
    pub fn new(tokens: Vec<Token>) -> Self {
        Reader { tokens, current: 0 }
    }

    /// Reads all top-level forms.
    ///
    /// Fails with [`Error::BlankInput`] when there are none.
    pub fn parse_forms(&mut self) -> Result<Vec<Expr>> {
        let mut forms = Vec::new();
        while !self.is_at_end() {
            forms.push(self.read_form()?);
        }
        if forms.is_empty() {
            return Err(Error::BlankInput);
        }
        Ok(forms)
    }

    /// Reads one form
    pub fn read_form(&mut self) -> Result<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Eof => Err(Error::BlankInput),
            TokenKind::LeftParen => {
                self.advance();
                let items = self.read_until(&TokenKind::RightParen, "(")?;
                Ok(Expr::list(items))
            }
            TokenKind::LeftBracket => {
                self.advance();
                let items = self.read_until(&TokenKind::RightBracket, "[")?;
                Ok(Expr::vector(items))
            }
            TokenKind::LeftBrace => {
                self.advance();
                self.read_map(&token)
            }
            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                Err(Error::SyntaxError {
                    line: token.line,
                    col: token.column,
                    message: format!("unexpected '{}'", token.kind),
                })
            }
            TokenKind::Quote => self.read_wrapped("quote"),
            TokenKind::Backtick => self.read_wrapped("quasiquote"),
            TokenKind::Tilde => self.read_wrapped("unquote"),
            TokenKind::TildeAt => self.read_wrapped("splice-unquote"),
            _ => self.read_atom(),
        }
    }

    /// Reads forms until `closer`, consuming it
    fn read_until(&mut self, closer: &TokenKind, opener: &str) -> Result<Vec<Expr>> {
        let mut items = Vec::new();
        loop {
            if self.check(&TokenKind::Eof) {
                return Err(Error::UnexpectedEof(format!("unclosed '{}'", opener)));
            }
            if self.check(closer) {
                self.advance();
                return Ok(items);
            }
            items.push(self.read_form()?);
        }
    }

    /// Reads `{k v k v ...}` into a map, deduplicating keys
    fn read_map(&mut self, opener: &Token) -> Result<Expr> {
        let items = self.read_until(&TokenKind::RightBrace, "{")?;
        if items.len() % 2 != 0 {
            return Err(Error::SyntaxError {
                line: opener.line,
                col: opener.column,
                message: "map literal needs an even number of forms".to_string(),
            });
        }
        let pairs = items
            .chunks_exact(2)
            .map(|kv| (kv[0].clone(), kv[1].clone()))
            .collect();
        Ok(Expr::map(pairs))
    }

    /// Expands reader sugar: consumes the marker, reads the next form,
    /// and wraps it in a two-element list headed by `name`
    fn read_wrapped(&mut self, name: &str) -> Result<Expr> {
        let marker = self.advance();
        if self.check(&TokenKind::Eof) {
            return Err(Error::UnexpectedEof(format!(
                "'{}' on line {} needs a form to wrap",
                marker.kind, marker.line
            )));
        }
        let form = self.read_form()?;
        Ok(Expr::list(vec![Expr::symbol(name), form]))
    }

    fn read_atom(&mut self) -> Result<Expr> {
        let token = self.advance();
        match token.kind {
            TokenKind::Integer(n) => Ok(Expr::Int(n)),
            TokenKind::Float(f) => Ok(Expr::Float(f)),
            TokenKind::String(s) => Ok(Expr::Str(s)),
            TokenKind::True => Ok(Expr::Bool(true)),
            TokenKind::False => Ok(Expr::Bool(false)),
            TokenKind::Nil => Ok(Expr::Nil),
            TokenKind::Keyword(k) => Ok(Expr::Keyword(k)),
            TokenKind::Symbol(s) => Ok(Expr::Symbol(s)),
            other => Err(Error::SyntaxError {
                line: token.line,
                col: token.column,
                message: format!("unexpected token '{}'", other),
            }),
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current - 1].clone()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_list() {
        let expr = read_str("(+ 1 2)").unwrap();
        assert_eq!(
            expr,
            Expr::list(vec![Expr::symbol("+"), Expr::Int(1), Expr::Int(2)])
        );
    }

    #[test]
    fn test_read_vector_and_map() {
        let expr = read_str("[1 {:a 2}]").unwrap();
        assert_eq!(
            expr,
            Expr::vector(vec![
                Expr::Int(1),
                Expr::map(vec![(Expr::Keyword("a".to_string()), Expr::Int(2))]),
            ])
        );
    }

    #[test]
    fn test_blank_input() {
        assert!(matches!(read_str(""), Err(Error::BlankInput)));
        assert!(matches!(read_str("  \n\t"), Err(Error::BlankInput)));
        assert!(matches!(read_str("; only a comment"), Err(Error::BlankInput)));
    }

    #[test]
    fn test_unclosed_list() {
        assert!(matches!(read_str("(1 2"), Err(Error::UnexpectedEof(_))));
    }

    #[test]
    fn test_stray_closer() {
        assert!(matches!(read_str(")"), Err(Error::SyntaxError { .. })));
    }

    #[test]
    fn test_quote_sugar() {
        assert_eq!(
            read_str("'x").unwrap(),
            Expr::list(vec![Expr::symbol("quote"), Expr::symbol("x")])
        );
        assert_eq!(
            read_str("`(a ~b ~@c)").unwrap(),
            Expr::list(vec![
                Expr::symbol("quasiquote"),
                Expr::list(vec![
                    Expr::symbol("a"),
                    Expr::list(vec![Expr::symbol("unquote"), Expr::symbol("b")]),
                    Expr::list(vec![Expr::symbol("splice-unquote"), Expr::symbol("c")]),
                ]),
            ])
        );
    }

    #[test]
    fn test_odd_map_literal() {
        assert!(matches!(read_str("{:a}"), Err(Error::SyntaxError { .. })));
    }

    #[test]
    fn test_multiple_forms() {
        let mut scanner = Scanner::new("(def! x 1) x");
        let tokens = scanner.scan_tokens().unwrap();
        let forms = Reader::new(tokens).parse_forms().unwrap();
        assert_eq!(forms.len(), 2);
    }
}
