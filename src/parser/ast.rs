//! Syntax tree types for Nagios object configuration

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Root AST node - every `define` block found in one source
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Spanned<Block>>,
}

/// A single `define <kind> { ... }` block
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Type tag from the `define` line (e.g. `host`)
    pub kind: Spanned<String>,
    /// Property lines in declaration order
    pub properties: Vec<Spanned<PropertyDecl>>,
}

/// One `key value...` line inside a block
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub key: Spanned<String>,
    /// Raw value text; empty when the line only carries a key
    pub value: Spanned<String>,
}

impl Block {
    /// Look up the last declared value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|p| p.node.key.node == key)
            .map(|p| p.node.value.node.as_str())
    }
}
