//! Recursive-descent parser over a stream of source lines.
//!
//! Nesting is resolved by recursion: each call consumes lines until the
//! first node-end line it sees, which by construction belongs to the node
//! it is building. Every line is consumed exactly once; there is no
//! backtracking.

use dts_tree::{Document, InvalidName, Item, Node, Property, ROOT_NAME};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer;
use crate::span::Span;

/// Maximum node nesting depth accepted by [`parse`].
///
/// Parsing recursion depth equals source nesting depth, so pathological
/// input is rejected instead of growing the native stack without bound.
pub const MAX_DEPTH: u16 = 64;

/// Parse a device-tree source listing into a [`Document`].
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::new(source).parse()
}

/// One source line with its location.
#[derive(Debug, Clone, Copy)]
struct Line<'src> {
    span: Span,
    text: &'src str,
}

/// Iterator over source lines, tracking byte offsets.
struct Lines<'src> {
    source: &'src str,
    pos: u32,
}

impl<'src> Lines<'src> {
    fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }
}

impl<'src> Iterator for Lines<'src> {
    type Item = Line<'src>;

    fn next(&mut self) -> Option<Line<'src>> {
        let rest = &self.source[self.pos as usize..];
        if rest.is_empty() {
            return None;
        }
        let (text, consumed) = match rest.find('\n') {
            Some(idx) => (&rest[..idx], idx + 1),
            None => (rest, rest.len()),
        };
        let start = self.pos;
        self.pos += consumed as u32;

        // Tolerate CRLF line endings.
        let text = text.strip_suffix('\r').unwrap_or(text);
        Some(Line {
            span: Span::new(start, start + text.len() as u32),
            text,
        })
    }
}

/// Single-use parser; the version-confirmed flag is scoped to one parse
/// call, so concurrent or repeated parses never share state.
struct Parser<'src> {
    lines: Lines<'src>,
    version_confirmed: bool,
    source_len: u32,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            lines: Lines::new(source),
            version_confirmed: false,
            source_len: source.len() as u32,
        }
    }

    fn parse(mut self) -> Result<Document, ParseError> {
        let mut root: Option<Node> = None;

        while let Some(line) = self.lines.next() {
            if lexer::is_blank_line(line.text) {
                continue;
            }

            // The version marker must come before any node line and is
            // consumed exactly once.
            if !self.version_confirmed {
                if line.text.trim() == lexer::VERSION_MARKER {
                    trace!("version marker confirmed");
                    self.version_confirmed = true;
                    continue;
                }
                return Err(ParseError::new(ParseErrorKind::UnsupportedVersion, line.span));
            }

            if root.is_some() {
                return Err(ParseError::new(ParseErrorKind::TrailingContent, line.span));
            }

            if lexer::is_node_start_line(line.text) {
                root = Some(self.parse_node(line, 0)?);
                continue;
            }

            return Err(ParseError::new(ParseErrorKind::InvalidLine, line.span));
        }

        match root {
            Some(root) => Ok(Document::new(root)),
            None => Err(ParseError::new(
                ParseErrorKind::MissingRootNode,
                Span::empty(self.source_len),
            )),
        }
    }

    /// Build one node from its start line, consuming lines until its
    /// node-end line.
    fn parse_node(&mut self, start: Line<'src>, level: u16) -> Result<Node, ParseError> {
        if level >= MAX_DEPTH {
            return Err(ParseError::new(ParseErrorKind::NestingTooDeep, start.span));
        }

        let parts = lexer::extract_node_name(start.text)
            .map_err(|kind| ParseError::new(kind, start.span))?;
        trace!(level, name = parts.name, "node start");

        let mut node = if level == 0 {
            if parts.name != ROOT_NAME {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidName(InvalidName::NotRoot(parts.name.to_string())),
                    start.span,
                ));
            }
            Node::root()
        } else {
            let node = Node::new(level, parts.name)
                .map_err(|err| ParseError::new(ParseErrorKind::InvalidName(err), start.span))?;
            match parts.unit_address {
                Some(address) => node.with_unit_address(address),
                None => node,
            }
        };
        if let Some(label) = parts.label {
            node = node
                .with_label(label)
                .map_err(|err| ParseError::new(ParseErrorKind::InvalidLabel(err), start.span))?;
        }

        loop {
            let Some(line) = self.lines.next() else {
                // End of input closes the root; a nested node left open is
                // an error.
                if level == 0 {
                    break;
                }
                return Err(ParseError::new(ParseErrorKind::UnclosedNode, start.span));
            };
            if lexer::is_blank_line(line.text) {
                continue;
            }
            if lexer::is_node_start_line(line.text) {
                let child = self.parse_node(line, level + 1)?;
                node.push(Item::Node(child));
                continue;
            }
            if lexer::is_node_end_line(line.text) {
                trace!(level, name = node.name(), "node end");
                break;
            }

            let parts = lexer::extract_property_name(line.text)
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidLine, line.span))?;
            let property = match parts.value {
                Some(value) => Property::with_value(level + 1, parts.name, value),
                None => Property::new(level + 1, parts.name),
            }
            .map_err(|err| ParseError::new(ParseErrorKind::InvalidName(err), line.span))?;
            node.push(Item::Property(property));
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dts_tree::ItemKind;

    #[test]
    fn test_parse_simple_document() {
        let source = "/dts-v1/;\n\n/ {\n\tmodel = \"acme,board\";\n\n\tsoc {\n\t\tranges;\n\t};\n};\n";
        let doc = parse(source).unwrap();

        assert_eq!(doc.root.name(), "/");
        assert_eq!(doc.root.kind(), ItemKind::RootNode);
        assert_eq!(doc.root.children.len(), 2);

        let model = doc.get("/model").unwrap().as_property().unwrap();
        assert_eq!(model.value(), Some("\"acme,board\""));
        assert_eq!(model.level(), 1);

        let ranges = doc.get("/soc/ranges").unwrap();
        assert_eq!(ranges.kind(), ItemKind::PropertyNoValue);
        assert_eq!(ranges.level(), 2);
    }

    #[test]
    fn test_parse_unit_address_and_label() {
        let source = "/dts-v1/;\n/ {\n\tuart0: serial@12340000 {\n\t\tstatus = \"okay\";\n\t};\n};\n";
        let doc = parse(source).unwrap();

        let serial = doc.get("/serial").unwrap().as_node().unwrap();
        assert_eq!(serial.name(), "serial");
        assert_eq!(serial.unit_address(), Some("12340000"));
        assert_eq!(serial.label(), Some("uart0"));
    }

    #[test]
    fn test_version_gate() {
        let err = parse("/ {\n};\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedVersion);

        // Blank lines before the marker are fine.
        assert!(parse("\n\n/dts-v1/;\n/ {\n};\n").is_ok());
    }

    #[test]
    fn test_invalid_line_in_node_body() {
        let source = "/dts-v1/;\n/ {\n\tgarbage without semicolon\n};\n";
        let err = parse(source).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidLine);
        assert_eq!(err.span.slice(source), "\tgarbage without semicolon");
    }

    #[test]
    fn test_repeated_version_marker_rejected() {
        let source = "/dts-v1/;\n/ {\n/dts-v1/;\n};\n";
        let err = parse(source).unwrap_err();
        // `/` is outside the property charset, so the repeated marker fails
        // name validation once it is classified as a property line.
        assert!(matches!(err.kind, ParseErrorKind::InvalidName(_)));
    }

    #[test]
    fn test_unclosed_nested_node() {
        let source = "/dts-v1/;\n/ {\n\tsoc {\n\t\tranges;\n";
        let err = parse(source).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedNode);
        // The span points at the opening line of the unclosed node.
        assert_eq!(err.span.slice(source), "\tsoc {");
    }

    #[test]
    fn test_eof_closes_root() {
        // A missing final `};` ends the root at end of input.
        let doc = parse("/dts-v1/;\n/ {\n\tranges;\n").unwrap();
        assert!(doc.get("/ranges").is_some());
    }

    #[test]
    fn test_trailing_content() {
        let source = "/dts-v1/;\n/ {\n};\n/ {\n};\n";
        let err = parse(source).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingContent);
    }

    #[test]
    fn test_missing_root_node() {
        let err = parse("/dts-v1/;\n\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingRootNode);
    }

    #[test]
    fn test_root_must_be_slash() {
        let err = parse("/dts-v1/;\nsoc {\n};\n").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::InvalidName(InvalidName::NotRoot(_))
        ));
    }

    #[test]
    fn test_name_length_boundary() {
        let ok_name = "a".repeat(31);
        let source = format!("/dts-v1/;\n/ {{\n\t{} {{\n\t}};\n}};\n", ok_name);
        assert!(parse(&source).is_ok());

        let long_name = "a".repeat(32);
        let source = format!("/dts-v1/;\n/ {{\n\t{} {{\n\t}};\n}};\n", long_name);
        let err = parse(&source).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidName(_)));
    }

    #[test]
    fn test_invalid_label() {
        let source = "/dts-v1/;\n/ {\n\tbad-label: serial {\n\t};\n};\n";
        let err = parse(source).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidLabel(_)));
    }

    #[test]
    fn test_nesting_bound() {
        let mut source = String::from("/dts-v1/;\n/ {\n");
        for _ in 0..MAX_DEPTH {
            source.push_str("n {\n");
        }
        for _ in 0..MAX_DEPTH {
            source.push_str("};\n");
        }
        source.push_str("};\n");
        let err = parse(&source).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
    }

    #[test]
    fn test_crlf_input() {
        let source = "/dts-v1/;\r\n/ {\r\n\tranges;\r\n};\r\n";
        let doc = parse(source).unwrap();
        assert!(doc.get("/ranges").is_some());
    }

    #[test]
    fn test_parses_are_independent() {
        // The version flag lives in the parser value; an earlier failed
        // parse must not leak into a later one.
        assert!(parse("/ {\n};\n").is_err());
        assert!(parse("/dts-v1/;\n/ {\n};\n").is_ok());
        assert!(parse("/ {\n};\n").is_err());
    }
}
