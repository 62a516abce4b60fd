//! Property list parser implementation.
//!
//! A property list is a small, human writable configuration language: named
//! properties holding one or more values, optionally grouped into nested
//! named blocks.
//!
//! ```text
//! axis {
//!   position: bottom;
//!   label: "Time (s)";
//!   ticks: range(0, 10);
//! }
//! ```
//!
//! # Parsing Pipeline
//!
//! The parser operates in two phases:
//!
//! 1. **Tokenizer**: Converts source text into a lazy stream of lexemes:
//!    bare words, quoted strings and punctuation.
//!
//! 2. **Property Parser**: Pulls lexemes and builds the [`PropertyList`]
//!    tree, with an explicit stack for nested blocks.
//!
//! Values are not interpreted. Each property keeps its tokens in source
//! order, marked as literal (bare) or quoted.

mod encode;
mod error;
mod parser;
mod tokenizer;
mod value;

pub use encode::encode;
pub use error::{ParseContext, ParseError, Result};
pub use parser::{ParserConfig, PropertyListParser};
pub use tokenizer::{Lexeme, LexemeKind, Tokenizer};
pub use value::{Property, PropertyKind, PropertyList, PropertyValue, Token};

/// Parse a property list from a string.
///
/// # Example
///
/// ```
/// use libplist::parse;
///
/// let plist = parse("prop: 1337;").unwrap();
/// assert_eq!(plist[0][0], "1337");
/// ```
pub fn parse(input: &str) -> Result<PropertyList> {
    PropertyListParser::new(input).parse()
}

/// Parse a property list from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<PropertyList> {
    PropertyListParser::with_context(input, ParseContext::new(filename)).parse()
}
