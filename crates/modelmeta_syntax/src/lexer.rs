//! Lexer for Java-style model sources.
//!
//! Produces the small token vocabulary the field parser needs: identifiers,
//! structural punctuation, and opaque literals. Literal *values* are never
//! inspected downstream, so numbers, strings, and character literals all
//! collapse into [`TokenKind::Literal`]; what matters is that a `;` inside a
//! string never terminates an initializer skip.

use crate::error::{ParseError, Span};

/// Structural punctuation the parser dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    Dot,
    Semi,
    Comma,
    Lt,
    Gt,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Eq,
    At,
    Star,
    Question,
    /// Any other operator character; only ever skipped.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Punct(Punct),
    /// Number, string, or character literal. Payload is never needed.
    Literal,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_punct(&self, punct: Punct) -> bool {
        matches!(self.kind, TokenKind::Punct(p) if p == punct)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(i) if i == name)
    }
}

/// Tokenize a whole source file.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source).tokenize()
}

struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(c) = self.peek() {
            let start = self.current_pos;
            match c {
                c if c.is_whitespace() => {
                    self.advance();
                }
                '/' => self.slash_or_comment(start)?,
                '"' => self.string_literal(start)?,
                '\'' => self.char_literal(start)?,
                c if c.is_ascii_digit() => self.number_literal(),
                c if c.is_alphabetic() || c == '_' || c == '$' => self.identifier(start),
                _ => {
                    self.advance();
                    let punct = punct_for(c);
                    self.push(TokenKind::Punct(punct), start);
                }
            }
        }
        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));
        Ok(self.tokens)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens
            .push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                self.advance();
            } else {
                break;
            }
        }
        let text = self.source[start..self.current_pos].to_string();
        self.push(TokenKind::Ident(text), start);
    }

    fn number_literal(&mut self) {
        let start = self.current_pos;
        // Digits plus everything Java allows inside a numeric literal
        // (hex, underscores, exponents, suffixes). Precision is irrelevant:
        // the token is opaque.
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.advance();
            } else {
                break;
            }
        }
        self.push(TokenKind::Literal, start);
    }

    fn string_literal(&mut self, start: usize) -> Result<(), ParseError> {
        self.advance(); // opening quote
        while let Some(c) = self.advance() {
            match c {
                '\\' => {
                    self.advance();
                }
                '"' => {
                    self.push(TokenKind::Literal, start);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(ParseError::new(
            "unterminated string literal",
            Span::new(start, self.current_pos),
        ))
    }

    fn char_literal(&mut self, start: usize) -> Result<(), ParseError> {
        self.advance(); // opening quote
        while let Some(c) = self.advance() {
            match c {
                '\\' => {
                    self.advance();
                }
                '\'' => {
                    self.push(TokenKind::Literal, start);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(ParseError::new(
            "unterminated character literal",
            Span::new(start, self.current_pos),
        ))
    }

    fn slash_or_comment(&mut self, start: usize) -> Result<(), ParseError> {
        self.advance(); // '/'
        match self.peek() {
            Some('/') => {
                while let Some(c) = self.advance() {
                    if c == '\n' {
                        break;
                    }
                }
                Ok(())
            }
            Some('*') => {
                self.advance();
                let mut prev = '\0';
                while let Some(c) = self.advance() {
                    if prev == '*' && c == '/' {
                        return Ok(());
                    }
                    prev = c;
                }
                Err(ParseError::new(
                    "unterminated block comment",
                    Span::new(start, self.current_pos),
                ))
            }
            _ => {
                self.push(TokenKind::Punct(Punct::Other), start);
                Ok(())
            }
        }
    }
}

fn punct_for(c: char) -> Punct {
    match c {
        '.' => Punct::Dot,
        ';' => Punct::Semi,
        ',' => Punct::Comma,
        '<' => Punct::Lt,
        '>' => Punct::Gt,
        '{' => Punct::LBrace,
        '}' => Punct::RBrace,
        '(' => Punct::LParen,
        ')' => Punct::RParen,
        '[' => Punct::LBracket,
        ']' => Punct::RBracket,
        '=' => Punct::Eq,
        '@' => Punct::At,
        '*' => Punct::Star,
        '?' => Punct::Question,
        _ => Punct::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_field_declaration() {
        let got = kinds("private List<Person> members;");
        assert_eq!(
            got,
            vec![
                TokenKind::Ident("private".into()),
                TokenKind::Ident("List".into()),
                TokenKind::Punct(Punct::Lt),
                TokenKind::Ident("Person".into()),
                TokenKind::Punct(Punct::Gt),
                TokenKind::Ident("members".into()),
                TokenKind::Punct(Punct::Semi),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let got = kinds("a // line\n/* block\n;{} */ b");
        assert_eq!(
            got,
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn semicolon_inside_string_is_opaque() {
        let got = kinds(r#"String s = "a;b";"#);
        assert_eq!(
            got,
            vec![
                TokenKind::Ident("String".into()),
                TokenKind::Ident("s".into()),
                TokenKind::Punct(Punct::Eq),
                TokenKind::Literal,
                TokenKind::Punct(Punct::Semi),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(lex(r#"String s = "oops;"#).is_err());
    }

    #[test]
    fn escaped_quote_in_char_literal() {
        let got = kinds(r"char c = '\'';");
        assert_eq!(got.iter().filter(|k| **k == TokenKind::Literal).count(), 1);
    }
}
