#![doc = include_str!("../README.md")]

mod diagnostic;
mod error;
mod lexer;
mod parser;
mod span;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{
    NodeName, PropertyText, VERSION_MARKER, extract_node_name, extract_property_name,
    is_blank_line, is_node_end_line, is_node_start_line,
};
pub use parser::{MAX_DEPTH, parse};
pub use span::Span;
