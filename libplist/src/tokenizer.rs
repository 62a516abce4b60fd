//! Phase 1: Tokenizer
//!
//! The tokenizer converts raw source text into a lazy stream of lexemes. It
//! performs:
//! - Whitespace skipping (whitespace only separates bare words)
//! - Quoted string extraction (`"..."` and `'...'`, no escapes)
//! - Bare word extraction
//! - Punctuation splitting (`: ; { } ( ) ,`)
//!
//! Positions are tracked as zero-based line and column for error reporting.

use crate::error::{ParseContext, ParseError, Result};
use crate::value::Token;

/// Kind of a lexeme, with its text where it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexemeKind {
    /// Unquoted run of non-delimiter characters.
    Word(String),
    /// Content of a quoted string, quotes stripped.
    Quoted(String),
    Colon,
    Semicolon,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    Comma,
}

impl LexemeKind {
    /// Human readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            LexemeKind::Word(text) => format!("word \"{}\"", text),
            LexemeKind::Quoted(text) => format!("string \"{}\"", text),
            LexemeKind::Colon => "\":\"".to_string(),
            LexemeKind::Semicolon => "\";\"".to_string(),
            LexemeKind::OpenBrace => "\"{\"".to_string(),
            LexemeKind::CloseBrace => "\"}\"".to_string(),
            LexemeKind::OpenParen => "\"(\"".to_string(),
            LexemeKind::CloseParen => "\")\"".to_string(),
            LexemeKind::Comma => "\",\"".to_string(),
        }
    }

    /// Convert into a value token, or `None` for structural delimiters that
    /// never appear inside a value list.
    pub fn into_token(self) -> Option<Token> {
        match self {
            LexemeKind::Word(text) => Some(Token::literal(text)),
            LexemeKind::Quoted(text) => Some(Token::quoted(text)),
            LexemeKind::OpenParen => Some(Token::literal("(")),
            LexemeKind::CloseParen => Some(Token::literal(")")),
            LexemeKind::Comma => Some(Token::literal(",")),
            LexemeKind::Colon
            | LexemeKind::Semicolon
            | LexemeKind::OpenBrace
            | LexemeKind::CloseBrace => None,
        }
    }
}

/// A single lexeme with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    /// Zero-based line of the first character.
    pub line: usize,
    /// Zero-based column (in characters) of the first character.
    pub col: usize,
}

/// Check whether a character ends a bare word.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ':' | ';' | '{' | '}' | '(' | ')' | ',' | '"' | '\'')
}

/// Forward-only lexeme stream over a borrowed buffer.
///
/// The only state is the scan position, so [`Tokenizer::restart`] yields
/// the same sequence again.
pub struct Tokenizer<'a> {
    source: &'a str,
    ctx: ParseContext,
    pos: usize,
    line: usize,
    col: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer with no filename for error messages.
    pub fn new(source: &'a str) -> Self {
        Self::with_context(source, ParseContext::default())
    }

    /// Create a tokenizer that reports errors against `ctx`.
    pub fn with_context(source: &'a str, ctx: ParseContext) -> Self {
        Self {
            source,
            ctx,
            pos: 0,
            line: 0,
            col: 0,
            failed: false,
        }
    }

    /// Rewind to the start of the buffer.
    pub fn restart(&mut self) {
        self.pos = 0;
        self.line = 0;
        self.col = 0;
        self.failed = false;
    }

    /// Current zero-based (line, column).
    pub fn location(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Scan a quoted string whose opening quote is the next character.
    fn scan_quoted(&mut self, quote: char, line: usize, col: usize) -> Result<LexemeKind> {
        self.bump();
        let start = self.pos;
        loop {
            match self.bump() {
                Some(c) if c == quote => {
                    let end = self.pos - quote.len_utf8();
                    return Ok(LexemeKind::Quoted(self.source[start..end].to_string()));
                }
                Some(_) => {}
                None => {
                    return Err(ParseError::UnterminatedString(String::new())
                        .with_location(&self.ctx, line, col));
                }
            }
        }
    }

    fn scan_word(&mut self) -> LexemeKind {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if !is_delimiter(c)) {
            self.bump();
        }
        LexemeKind::Word(self.source[start..self.pos].to_string())
    }

    /// Scan the next lexeme, or `None` at end of input.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>> {
        self.skip_whitespace();
        let (line, col) = self.location();
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(None),
        };

        let kind = match c {
            '"' | '\'' => self.scan_quoted(c, line, col)?,
            ':' | ';' | '{' | '}' | '(' | ')' | ',' => {
                self.bump();
                match c {
                    ':' => LexemeKind::Colon,
                    ';' => LexemeKind::Semicolon,
                    '{' => LexemeKind::OpenBrace,
                    '}' => LexemeKind::CloseBrace,
                    '(' => LexemeKind::OpenParen,
                    ')' => LexemeKind::CloseParen,
                    _ => LexemeKind::Comma,
                }
            }
            _ => self.scan_word(),
        };

        Ok(Some(Lexeme { kind, line, col }))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Lexeme>;

    /// Yields lexemes until end of input; stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_lexeme() {
            Ok(lexeme) => lexeme.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<LexemeKind> {
        Tokenizer::new(source)
            .map(|l| l.unwrap().kind)
            .collect()
    }

    fn word(s: &str) -> LexemeKind {
        LexemeKind::Word(s.to_string())
    }

    #[test]
    fn test_property_lexemes() {
        assert_eq!(
            kinds("prop: 1337;"),
            vec![word("prop"), LexemeKind::Colon, word("1337"), LexemeKind::Semicolon]
        );
    }

    #[test]
    fn test_whitespace_splits_words() {
        assert_eq!(kinds("  123\t456\n789 "), vec![word("123"), word("456"), word("789")]);
    }

    #[test]
    fn test_quoted_keeps_spaces() {
        assert_eq!(
            kinds("\"123 456\" 'a b'"),
            vec![
                LexemeKind::Quoted("123 456".to_string()),
                LexemeKind::Quoted("a b".to_string())
            ]
        );
    }

    #[test]
    fn test_quote_styles_nest_other_quote() {
        assert_eq!(
            kinds("'say \"hi\"' \"it's\""),
            vec![
                LexemeKind::Quoted("say \"hi\"".to_string()),
                LexemeKind::Quoted("it's".to_string())
            ]
        );
    }

    #[test]
    fn test_backslash_does_not_escape() {
        assert_eq!(
            kinds(r#""a\" b"#),
            vec![LexemeKind::Quoted("a\\".to_string()), word("b")]
        );
    }

    #[test]
    fn test_comma_spacing_variants() {
        let expected = vec![word("a"), LexemeKind::Comma, word("b")];
        for source in ["a,b", "a, b", "a ,b", "a , b", "a  ,  b"] {
            assert_eq!(kinds(source), expected, "source: {:?}", source);
        }
    }

    #[test]
    fn test_parens_split_words() {
        assert_eq!(
            kinds("blah(\"1337\")"),
            vec![
                word("blah"),
                LexemeKind::OpenParen,
                LexemeKind::Quoted("1337".to_string()),
                LexemeKind::CloseParen
            ]
        );
    }

    #[test]
    fn test_quote_ends_word() {
        assert_eq!(
            kinds("ab\"cd\"ef"),
            vec![word("ab"), LexemeKind::Quoted("cd".to_string()), word("ef")]
        );
    }

    #[test]
    fn test_positions() {
        let lexemes: Vec<Lexeme> = Tokenizer::new("a {\n  bé: 'x';\n}")
            .map(|l| l.unwrap())
            .collect();
        let positions: Vec<(usize, usize)> = lexemes.iter().map(|l| (l.line, l.col)).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 2), (1, 2), (1, 4), (1, 6), (1, 9), (2, 0)]
        );
    }

    #[test]
    fn test_multiline_quoted_advances_line() {
        let lexemes: Vec<Lexeme> = Tokenizer::new("'a\nb' c").map(|l| l.unwrap()).collect();
        assert_eq!(lexemes[0].kind, LexemeKind::Quoted("a\nb".to_string()));
        assert_eq!((lexemes[1].line, lexemes[1].col), (1, 3));
    }

    #[test]
    fn test_unterminated_string() {
        let mut tokenizer = Tokenizer::new("prop: 'oops;");
        assert!(tokenizer.next().unwrap().is_ok());
        assert!(tokenizer.next().unwrap().is_ok());
        let err = tokenizer.next().unwrap().unwrap_err();
        assert_eq!(err, ParseError::UnterminatedString(" at 1:7".to_string()));
        assert!(err.is_lexical());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_location_after_trailing_whitespace() {
        let mut tokenizer = Tokenizer::new("name\n  ");
        assert_eq!(tokenizer.location(), (0, 0));
        assert_eq!(tokenizer.next_lexeme().unwrap().unwrap().kind, word("name"));
        assert_eq!(tokenizer.location(), (0, 4));
        assert!(tokenizer.next_lexeme().unwrap().is_none());
        assert_eq!(tokenizer.location(), (1, 2));
    }

    #[test]
    fn test_restart() {
        let mut tokenizer = Tokenizer::new("a b");
        let first: Vec<Lexeme> = tokenizer.by_ref().map(|l| l.unwrap()).collect();
        tokenizer.restart();
        let second: Vec<Lexeme> = tokenizer.map(|l| l.unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert!(kinds("").is_empty());
        assert!(kinds(" \n\t ").is_empty());
    }

    #[test]
    fn test_into_token() {
        assert!(LexemeKind::Colon.into_token().is_none());
        assert!(LexemeKind::CloseBrace.into_token().is_none());
        let token = LexemeKind::Comma.into_token().unwrap();
        assert!(token.is_literal());
        assert_eq!(token.as_str(), ",");
        let token = LexemeKind::Quoted("x".to_string()).into_token().unwrap();
        assert!(!token.is_literal());
    }
}
