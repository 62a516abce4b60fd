//! Property list tree representation.

use std::fmt;
use std::ops::Index;

/// A single value token.
///
/// Literal tokens come from bare words and the punctuation `(`, `)` and
/// `,`; non-literal tokens come from quoted strings, with the quotes
/// stripped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    is_literal: bool,
}

impl Token {
    pub(crate) fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_literal: true,
        }
    }

    pub(crate) fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_literal: false,
        }
    }

    /// Returns the token text without quotes.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the token was not quote-delimited in the source.
    pub fn is_literal(&self) -> bool {
        self.is_literal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// The tokens of one leaf property, in source order. Never empty once
/// produced by the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyValue {
    tokens: Vec<Token>,
}

impl PropertyValue {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl Index<usize> for PropertyValue {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a PropertyValue {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// What a property holds: a value list or a nested block, never both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    /// `name: tokens...;`
    Leaf(PropertyValue),
    /// `name { ... }`
    Block(PropertyList),
}

/// One named entry of a property list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    name: String,
    kind: PropertyKind,
}

impl Property {
    pub(crate) fn leaf(name: String, value: PropertyValue) -> Self {
        Self {
            name,
            kind: PropertyKind::Leaf(value),
        }
    }

    pub(crate) fn block(name: String, child: PropertyList) -> Self {
        Self {
            name,
            kind: PropertyKind::Block(child),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// Returns the value list if this is a leaf property.
    pub fn value(&self) -> Option<&PropertyValue> {
        match &self.kind {
            PropertyKind::Leaf(value) => Some(value),
            PropertyKind::Block(_) => None,
        }
    }

    /// Returns the nested list if this is a block property.
    pub fn child(&self) -> Option<&PropertyList> {
        match &self.kind {
            PropertyKind::Leaf(_) => None,
            PropertyKind::Block(child) => Some(child),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, PropertyKind::Block(_))
    }

    /// Number of value tokens; zero for a block.
    pub fn len(&self) -> usize {
        self.value().map_or(0, PropertyValue::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the token at `index` of a leaf property.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.value().and_then(|value| value.get(index))
    }
}

impl Index<usize> for Property {
    type Output = Token;

    /// Panics if the property is a block or `index` is out of range.
    fn index(&self, index: usize) -> &Token {
        match &self.kind {
            PropertyKind::Leaf(value) => &value[index],
            PropertyKind::Block(_) => panic!("property \"{}\" is a block", self.name),
        }
    }
}

/// An ordered list of properties at one nesting level.
///
/// Order is source order. Duplicate names are kept; lookups by name scan
/// the list.
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` walk nested blocks with an
/// explicit stack, so they work at any depth the parser accepts.
#[derive(Default)]
pub struct PropertyList {
    properties: Vec<Property>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Property> {
        self.properties.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    /// First property named `name`.
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Last property named `name`.
    pub fn find_last(&self, name: &str) -> Option<&Property> {
        self.properties.iter().rev().find(|p| p.name == name)
    }

    /// All properties named `name`, in source order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties.iter().filter(move |p| p.name == name)
    }
}

impl Index<usize> for PropertyList {
    type Output = Property;

    fn index(&self, index: usize) -> &Property {
        &self.properties[index]
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

impl Clone for PropertyList {
    fn clone(&self) -> Self {
        let mut stack: Vec<(std::slice::Iter<'_, Property>, String, PropertyList)> = Vec::new();
        let mut source = self.properties.iter();
        let mut current = PropertyList::new();

        loop {
            match source.next() {
                Some(property) => match &property.kind {
                    PropertyKind::Leaf(value) => {
                        current.push(Property::leaf(property.name.clone(), value.clone()));
                    }
                    PropertyKind::Block(child) => {
                        let parent_source =
                            std::mem::replace(&mut source, child.properties.iter());
                        let parent = std::mem::take(&mut current);
                        stack.push((parent_source, property.name.clone(), parent));
                    }
                },
                None => match stack.pop() {
                    Some((parent_source, name, parent)) => {
                        let child = std::mem::replace(&mut current, parent);
                        current.push(Property::block(name, child));
                        source = parent_source;
                    }
                    None => return current,
                },
            }
        }
    }
}

impl PartialEq for PropertyList {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut stack = vec![(self.properties.iter(), other.properties.iter())];

        while let Some((left, right)) = stack.last_mut() {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) => {
                    if a.name != b.name {
                        return false;
                    }
                    match (&a.kind, &b.kind) {
                        (PropertyKind::Leaf(x), PropertyKind::Leaf(y)) => {
                            if x != y {
                                return false;
                            }
                        }
                        (PropertyKind::Block(x), PropertyKind::Block(y)) => {
                            if x.len() != y.len() {
                                return false;
                            }
                            stack.push((x.properties.iter(), y.properties.iter()));
                        }
                        _ => return false,
                    }
                }
                (None, None) => {
                    stack.pop();
                }
                _ => return false,
            }
        }

        true
    }
}

impl Eq for PropertyList {}

impl fmt::Debug for PropertyList {
    // The canonical encoding is written without recursion.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyList").field(&self.to_string()).finish()
    }
}

impl Drop for PropertyList {
    // Flatten nested blocks so dropping a deep tree does not recurse.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.properties);
        while let Some(property) = pending.pop() {
            if let PropertyKind::Block(mut child) = property.kind {
                pending.append(&mut child.properties);
            }
        }
    }
}
