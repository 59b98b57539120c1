//! Typed parse errors.

use dts_tree::InvalidName;

use crate::span::Span;

/// Parse error kinds.
///
/// Every parse error is fatal: a parse either fully succeeds or yields no
/// tree at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A node-start line without `{` was handed to the node-name extractor.
    MalformedNodeLine,
    /// A property line that does not match `NAME;` or `NAME = VALUE;`.
    MalformedPropertyLine,
    /// A node or property name violating the length or character rules.
    InvalidName(InvalidName),
    /// A node label violating the length or character rules.
    InvalidLabel(InvalidName),
    /// A line inside a node body matching neither node nor property grammar.
    InvalidLine,
    /// The document does not start with the `/dts-v1/;` version marker.
    UnsupportedVersion,
    /// End of input before a nested node's closing `};`.
    UnclosedNode,
    /// Nesting deeper than the supported bound.
    NestingTooDeep,
    /// The document ended without any root node.
    MissingRootNode,
    /// A significant line after the root node closed.
    TrailingContent,
}

/// A parse error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Source location.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::MalformedNodeLine => write!(f, "node line without `{{`"),
            ParseErrorKind::MalformedPropertyLine => write!(f, "malformed property line"),
            ParseErrorKind::InvalidName(err) => write!(f, "invalid name: {}", err),
            ParseErrorKind::InvalidLabel(err) => write!(f, "invalid label: {}", err),
            ParseErrorKind::InvalidLine => write!(f, "line is neither a node nor a property"),
            ParseErrorKind::UnsupportedVersion => {
                write!(f, "missing or unsupported version marker")
            }
            ParseErrorKind::UnclosedNode => write!(f, "unclosed node"),
            ParseErrorKind::NestingTooDeep => write!(f, "nesting too deep"),
            ParseErrorKind::MissingRootNode => write!(f, "document has no root node"),
            ParseErrorKind::TrailingContent => write!(f, "content after the root node"),
        }?;
        write!(f, " at offset {}", self.span.start)
    }
}

impl std::error::Error for ParseError {}
