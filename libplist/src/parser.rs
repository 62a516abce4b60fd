//! Phase 2: Property Parser
//!
//! The parser pulls lexemes from the tokenizer and builds a property list
//! tree. At each nesting level it repeatedly reads:
//! - `name : value-list ;` as a leaf property
//! - `name { property-list }` as a block property
//!
//! Open blocks are kept on an explicit stack rather than the call stack, so
//! nesting depth is limited only by memory unless a limit is configured.

use crate::error::{ParseContext, ParseError, Result};
use crate::tokenizer::{Lexeme, LexemeKind, Tokenizer};
use crate::value::{Property, PropertyList, PropertyValue};
use log::{debug, trace};

/// Options controlling the parser.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Maximum block nesting depth; `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl ParserConfig {
    /// Creates a new parser configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// A block whose `}` has not been seen yet.
struct OpenBlock {
    name: String,
    /// The enclosing list, restored when the block closes.
    parent: PropertyList,
    line: usize,
    col: usize,
}

/// Parser for one input buffer.
///
/// # Example
///
/// ```
/// use libplist::PropertyListParser;
///
/// let mut parser = PropertyListParser::new("width: 10 px;");
/// let plist = parser.parse().unwrap();
/// assert_eq!(plist[0].len(), 2);
/// ```
pub struct PropertyListParser<'a> {
    tokenizer: Tokenizer<'a>,
    ctx: ParseContext,
    config: ParserConfig,
    input_len: usize,
    error: Option<ParseError>,
}

impl<'a> PropertyListParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_context(input, ParseContext::default())
    }

    /// Create a parser whose errors are reported against `ctx`.
    pub fn with_context(input: &'a str, ctx: ParseContext) -> Self {
        Self {
            tokenizer: Tokenizer::with_context(input, ctx.clone()),
            ctx,
            config: ParserConfig::default(),
            input_len: input.len(),
            error: None,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse the whole buffer.
    ///
    /// On failure the error is returned and also kept for [`Self::get_error`].
    /// Calling this again scans the buffer from the start.
    pub fn parse(&mut self) -> Result<PropertyList> {
        self.tokenizer.restart();
        self.error = None;
        debug!("parsing property list ({} bytes)", self.input_len);

        match self.parse_document() {
            Ok(plist) => {
                debug!("parsed {} top-level properties", plist.len());
                Ok(plist)
            }
            Err(e) => {
                let phase = if e.is_lexical() { "lexical" } else { "syntax" };
                debug!("parse failed with {} error: {}", phase, e);
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// The error of the last failed parse.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// The message of the last failed parse; `None` before parsing or
    /// after a successful parse.
    pub fn get_error(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    fn parse_document(&mut self) -> Result<PropertyList> {
        let mut stack: Vec<OpenBlock> = Vec::new();
        let mut current = PropertyList::new();

        while let Some(lexeme) = self.tokenizer.next_lexeme()? {
            let name = match lexeme.kind {
                LexemeKind::Word(name) => name,
                LexemeKind::CloseBrace => {
                    let open = stack.pop().ok_or_else(|| {
                        ParseError::UnmatchedBrace(String::new()).with_location(
                            &self.ctx,
                            lexeme.line,
                            lexeme.col,
                        )
                    })?;
                    trace!("closing block \"{}\" with {} properties", open.name, current.len());
                    let child = std::mem::replace(&mut current, open.parent);
                    current.push(Property::block(open.name, child));
                    continue;
                }
                other => {
                    return Err(ParseError::ExpectedName(other.describe(), String::new())
                        .with_location(&self.ctx, lexeme.line, lexeme.col));
                }
            };

            match self.tokenizer.next_lexeme()? {
                Some(Lexeme {
                    kind: LexemeKind::Colon,
                    line,
                    col,
                }) => {
                    let value = self.parse_value(line, col)?;
                    trace!("property \"{}\" with {} tokens", name, value.len());
                    current.push(Property::leaf(name, value));
                }
                Some(Lexeme {
                    kind: LexemeKind::OpenBrace,
                    line,
                    col,
                }) => {
                    if let Some(limit) = self.config.max_depth {
                        if stack.len() >= limit {
                            return Err(ParseError::NestingTooDeep(limit, String::new())
                                .with_location(&self.ctx, line, col));
                        }
                    }
                    trace!("opening block \"{}\" at depth {}", name, stack.len() + 1);
                    stack.push(OpenBlock {
                        name,
                        parent: std::mem::take(&mut current),
                        line,
                        col,
                    });
                }
                Some(other) => {
                    return Err(
                        ParseError::ExpectedColonOrBrace(other.kind.describe(), String::new())
                            .with_location(&self.ctx, other.line, other.col),
                    );
                }
                None => {
                    let (line, col) = self.tokenizer.location();
                    return Err(ParseError::ExpectedColonOrBrace(
                        "end of input".to_string(),
                        String::new(),
                    )
                    .with_location(&self.ctx, line, col));
                }
            }
        }

        // Report the innermost block still open.
        if let Some(open) = stack.pop() {
            return Err(ParseError::UnclosedBlock(String::new()).with_location(
                &self.ctx,
                open.line,
                open.col,
            ));
        }

        Ok(current)
    }

    /// Collect value tokens up to and including the closing `;`. The
    /// position is that of the `:` starting the value list.
    fn parse_value(&mut self, line: usize, col: usize) -> Result<PropertyValue> {
        let mut tokens = Vec::new();

        loop {
            let lexeme = match self.tokenizer.next_lexeme()? {
                Some(lexeme) => lexeme,
                None => {
                    return Err(ParseError::UnterminatedValue(String::new())
                        .with_location(&self.ctx, line, col));
                }
            };

            match lexeme.kind {
                LexemeKind::Semicolon => {
                    if tokens.is_empty() {
                        return Err(ParseError::EmptyValue(String::new()).with_location(
                            &self.ctx,
                            lexeme.line,
                            lexeme.col,
                        ));
                    }
                    return Ok(PropertyValue::new(tokens));
                }
                LexemeKind::Colon | LexemeKind::OpenBrace | LexemeKind::CloseBrace => {
                    return Err(
                        ParseError::UnexpectedInValue(lexeme.kind.describe(), String::new())
                            .with_location(&self.ctx, lexeme.line, lexeme.col),
                    );
                }
                kind => tokens.extend(kind.into_token()),
            }
        }
    }
}
