//! Error types for property list parsing.

use thiserror::Error;

/// Result type for property list parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    ///
    /// Lines and columns are zero-based internally and reported one-based.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => format!(" at {}:{}", line + 1, col + 1),
        }
    }
}

/// Error type for property list parsing.
///
/// The trailing `String` of every variant is the location suffix filled in
/// by [`ParseError::with_location`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A quote was opened and the input ended before the matching quote.
    #[error("Unterminated string{0}")]
    UnterminatedString(String),

    /// Something other than a bare word where a property name belongs.
    #[error("Expected property name but found {0}{1}")]
    ExpectedName(String, String),

    /// A property name not followed by `:` or `{`.
    #[error("Expected \":\" or \"{{\" after property name but found {0}{1}")]
    ExpectedColonOrBrace(String, String),

    /// `;` with no value tokens before it.
    #[error("Empty property value{0}")]
    EmptyValue(String),

    /// Structural punctuation inside a value list.
    #[error("Unexpected {0} in property value{1}")]
    UnexpectedInValue(String, String),

    /// Input ended before the `;` closing a value list.
    #[error("Unterminated property value, expected \";\"{0}")]
    UnterminatedValue(String),

    /// Input ended before the `}` closing a block.
    #[error("Unclosed block, expected \"}}\"{0}")]
    UnclosedBlock(String),

    /// A `}` with no open block.
    #[error("Unmatched brace{0}")]
    UnmatchedBrace(String),

    /// Block nesting exceeded the configured limit.
    #[error("Nesting deeper than {0} levels{1}")]
    NestingTooDeep(usize, String),
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let suffix = ctx.loc_suffix(line, col);
        match self {
            ParseError::UnterminatedString(_) => ParseError::UnterminatedString(suffix),
            ParseError::ExpectedName(found, _) => ParseError::ExpectedName(found, suffix),
            ParseError::ExpectedColonOrBrace(found, _) => {
                ParseError::ExpectedColonOrBrace(found, suffix)
            }
            ParseError::EmptyValue(_) => ParseError::EmptyValue(suffix),
            ParseError::UnexpectedInValue(found, _) => ParseError::UnexpectedInValue(found, suffix),
            ParseError::UnterminatedValue(_) => ParseError::UnterminatedValue(suffix),
            ParseError::UnclosedBlock(_) => ParseError::UnclosedBlock(suffix),
            ParseError::UnmatchedBrace(_) => ParseError::UnmatchedBrace(suffix),
            ParseError::NestingTooDeep(limit, _) => ParseError::NestingTooDeep(limit, suffix),
        }
    }

    /// Returns `true` for errors raised while scanning characters, as
    /// opposed to errors in the arrangement of tokens.
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::UnterminatedString(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_suffix_without_filename() {
        let ctx = ParseContext::new(None);
        assert_eq!(ctx.loc_suffix(0, 0), " at 1:1");
        assert_eq!(ctx.loc_suffix(4, 9), " at 5:10");
    }

    #[test]
    fn test_loc_suffix_with_filename() {
        let ctx = ParseContext::new(Some("style.plist"));
        assert_eq!(ctx.loc_suffix(2, 3), " at 3:4 of <style.plist>");
    }

    #[test]
    fn test_with_location_message() {
        let ctx = ParseContext::new(None);
        let err = ParseError::ExpectedName("\";\"".to_string(), String::new())
            .with_location(&ctx, 1, 4);
        assert_eq!(err.to_string(), "Expected property name but found \";\" at 2:5");
        assert!(!err.is_lexical());
    }

    #[test]
    fn test_brace_messages_escape() {
        let ctx = ParseContext::new(None);
        let err = ParseError::UnclosedBlock(String::new()).with_location(&ctx, 0, 6);
        assert_eq!(err.to_string(), "Unclosed block, expected \"}\" at 1:7");
        let err = ParseError::ExpectedColonOrBrace("end of input".to_string(), String::new())
            .with_location(&ctx, 0, 0);
        assert_eq!(
            err.to_string(),
            "Expected \":\" or \"{\" after property name but found end of input at 1:1"
        );
    }
}
