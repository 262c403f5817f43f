//! WKT tokenizer.

use crate::error::LexicalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A run of ASCII letters (keywords, dimensionality markers, `EMPTY`).
    Text,
    Number,
    LeftParen,
    RightParen,
    Comma,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    /// Source text of the token (empty at end of input).
    pub literal: &'a str,
    /// Byte offset of the token in the full input.
    pub offset: usize,
    /// Parsed value of a `Number` token; `0.0` for every other kind.
    pub value: f64,
}

impl Token<'_> {
    /// Upper-cased text of a `Text` token.
    #[inline] pub fn text(&self) -> String { self.literal.to_ascii_uppercase() }

    /// Case-insensitive comparison against a keyword.
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Text && self.literal.eq_ignore_ascii_case(word)
    }

    /// Printable form used in error messages.
    #[inline]
    pub fn display(&self) -> String {
        if self.kind == TokenKind::Eof { "<EOF>".into() } else { self.literal.to_string() }
    }
}

/// Single-pass tokenizer over one input string. Each parse owns its own lexer.
#[derive(Debug, Clone)]
pub(crate) struct Lexer<'a> {
    input: &'a str,
    cursor: usize,
    /// Offset of `input` within the string reported in errors.
    base: usize,
}

impl<'a> Lexer<'a> {
    /// Lexer over a suffix of a larger string that starts at byte `base`.
    #[inline] pub fn with_base(input: &'a str, base: usize) -> Self { Self { input, cursor: 0, base } }

    #[inline]
    fn peek(&self) -> Option<u8> { self.input.as_bytes().get(self.cursor).copied() }

    fn error_at(&self, index: usize) -> LexicalError {
        LexicalError {
            character: self.input[index..].chars().next().unwrap_or('\0'),
            offset: self.base + index,
        }
    }

    fn token(&self, kind: TokenKind, start: usize, value: f64) -> Token<'a> {
        Token { kind, literal: &self.input[start..self.cursor], offset: self.base + start, value }
    }

    /// Read the next token, skipping whitespace.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexicalError> {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) { self.cursor += 1 }

        let start = self.cursor;
        let Some(byte) = self.peek() else { return Ok(self.token(TokenKind::Eof, start, 0.0)) };

        let kind = match byte {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b',' => TokenKind::Comma,
            b'a'..=b'z' | b'A'..=b'Z' => {
                while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) { self.cursor += 1 }
                return Ok(self.token(TokenKind::Text, start, 0.0));
            }
            b'-' | b'.' | b'0'..=b'9' => return self.number(),
            _ => return Err(self.error_at(start)),
        };
        self.cursor += 1;
        Ok(self.token(kind, start, 0.0))
    }

    /// Optional leading `-`, digits with at most one decimal point, then an
    /// optional exponent (`e`/`E`, optional sign, digits).
    fn number(&mut self) -> Result<Token<'a>, LexicalError> {
        let start = self.cursor;
        if self.peek() == Some(b'-') { self.cursor += 1 }

        let (mut seen_dot, mut seen_exp) = (false, false);
        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' => self.cursor += 1,
                b'.' if seen_dot || seen_exp => return Err(self.error_at(self.cursor)),
                b'.' => {
                    seen_dot = true;
                    self.cursor += 1;
                }
                b'e' | b'E' if seen_exp => return Err(self.error_at(self.cursor)),
                b'e' | b'E' => {
                    seen_exp = true;
                    self.cursor += 1;
                    if matches!(self.peek(), Some(b'+' | b'-')) { self.cursor += 1 }
                }
                _ => break,
            }
        }

        let literal = &self.input[start..self.cursor];
        match literal.parse::<f64>() {
            Ok(value) => Ok(self.token(TokenKind::Number, start, value)),
            Err(_) => Err(self.error_at(self.cursor.saturating_sub(1).max(start))),
        }
    }

    /// Tokenize the whole input, including the trailing `Eof`.
    #[cfg(test)]
    pub fn tokenize(input: &'a str) -> Result<Vec<Token<'a>>, LexicalError> {
        let mut lexer = Lexer::with_base(input, 0);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            tokens.push(token);
            if token.kind == TokenKind::Eof { return Ok(tokens) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuation_and_text() {
        use TokenKind::*;
        assert_eq!(kinds("POINT (1 2)"), vec![Text, LeftParen, Number, Number, RightParen, Eof]);
        assert_eq!(kinds(" a,b "), vec![Text, Comma, Text, Eof]);
    }

    #[test]
    fn text_is_upper_cased() {
        let tokens = Lexer::tokenize("multiPoint").unwrap();
        assert_eq!(tokens[0].text(), "MULTIPOINT");
        assert!(tokens[0].is_word("MULTIPOINT"));
    }

    #[test]
    fn numbers_in_all_notations() {
        let tokens = Lexer::tokenize("-12.5 3 .5 1e3 2.5E-2 7e+1").unwrap();
        let values: Vec<f64> = tokens.iter().filter(|t| t.kind == TokenKind::Number).map(|t| t.value).collect();
        assert_eq!(values, vec![-12.5, 3.0, 0.5, 1000.0, 0.025, 70.0]);
    }

    #[test]
    fn offsets_track_source_positions() {
        let tokens = Lexer::tokenize("POINT ( 30 10 )").unwrap();
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 6, 8, 11, 14, 15]);
    }

    #[test]
    fn base_offset_is_added() {
        let mut lexer = Lexer::with_base("(1", 10);
        assert_eq!(lexer.next_token().unwrap().offset, 10);
        assert_eq!(lexer.next_token().unwrap().offset, 11);
    }

    #[test]
    fn unknown_character_is_rejected() {
        assert_eq!(Lexer::tokenize("POINT(1 2);"), Err(LexicalError { character: ';', offset: 10 }));
        assert_eq!(Lexer::tokenize("é"), Err(LexicalError { character: 'é', offset: 0 }));
    }

    #[test]
    fn second_decimal_point_or_exponent_is_rejected() {
        assert_eq!(Lexer::tokenize("1.2.3"), Err(LexicalError { character: '.', offset: 3 }));
        assert_eq!(Lexer::tokenize("1e2e3"), Err(LexicalError { character: 'e', offset: 3 }));
        assert_eq!(Lexer::tokenize("1e2.5"), Err(LexicalError { character: '.', offset: 3 }));
    }

    #[test]
    fn dangling_sign_is_rejected() {
        assert_eq!(Lexer::tokenize("- 1"), Err(LexicalError { character: '-', offset: 0 }));
    }
}
