//! Canonical text encoding of a property list.
//!
//! One property per line, blocks indented by two spaces per level, tokens
//! separated by a single space. Parsing the output yields an equal tree.

use crate::value::{PropertyKind, PropertyList, Token};
use std::fmt::{self, Write};

/// Encode a property list as canonical text.
pub fn encode(plist: &PropertyList) -> String {
    plist.to_string()
}

/// Pick the quote character for a quoted token.
///
/// Content holding both quote characters cannot be written back faithfully
/// and falls back to `"`.
fn quote_for(text: &str) -> char {
    if text.contains('"') && !text.contains('\'') {
        '\''
    } else {
        '"'
    }
}

fn write_token<W: Write>(out: &mut W, token: &Token) -> fmt::Result {
    if token.is_literal() {
        out.write_str(token.as_str())
    } else {
        let quote = quote_for(token.as_str());
        write!(out, "{}{}{}", quote, token.as_str(), quote)
    }
}

/// Write a list and every nested block without recursing, so encoding
/// has the same depth tolerance as parsing.
fn write_list<W: Write>(out: &mut W, plist: &PropertyList) -> fmt::Result {
    let mut stack = vec![plist.iter()];

    while !stack.is_empty() {
        let depth = stack.len() - 1;
        let property = match stack.last_mut().and_then(Iterator::next) {
            Some(property) => property,
            None => {
                stack.pop();
                if !stack.is_empty() {
                    writeln!(out, "{}}}", "  ".repeat(depth - 1))?;
                }
                continue;
            }
        };

        let indent = "  ".repeat(depth);
        match property.kind() {
            PropertyKind::Leaf(value) => {
                write!(out, "{}{}:", indent, property.name())?;
                for token in value {
                    out.write_char(' ')?;
                    write_token(out, token)?;
                }
                out.write_str(";\n")?;
            }
            PropertyKind::Block(child) if child.is_empty() => {
                writeln!(out, "{}{} {{}}", indent, property.name())?;
            }
            PropertyKind::Block(child) => {
                writeln!(out, "{}{} {{", indent, property.name())?;
                stack.push(child.iter());
            }
        }
    }

    Ok(())
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_encode_leaf_tokens() {
        let plist = parse("test: blah(\"1337\") , 'x y';").unwrap();
        assert_eq!(encode(&plist), "test: blah ( \"1337\" ) , \"x y\";\n");
    }

    #[test]
    fn test_encode_blocks() {
        let plist = parse("a: 1; elem { inner { p: 'v'; } empty { } } b: 2;").unwrap();
        assert_eq!(
            encode(&plist),
            "a: 1;\nelem {\n  inner {\n    p: \"v\";\n  }\n  empty {}\n}\nb: 2;\n"
        );
    }

    #[test]
    fn test_encode_picks_single_quote() {
        let plist = parse("say: 'he said \"hi\"';").unwrap();
        assert_eq!(encode(&plist), "say: 'he said \"hi\"';\n");
        assert_eq!(parse(&encode(&plist)).unwrap(), plist);
    }

    #[test]
    fn test_encode_deep_nesting() {
        let depth = 2_000;
        let input = format!("{}leaf: 1;{}", "b {".repeat(depth), "}".repeat(depth));
        let plist = parse(&input).unwrap();
        let encoded = encode(&plist);
        assert_eq!(encoded.lines().count(), 2 * depth + 1);
        assert!(parse(&encoded).unwrap() == plist);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&PropertyList::new()), "");
    }
}
