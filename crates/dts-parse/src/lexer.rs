//! Stateless line lexer: classification and name extraction.
//!
//! The device-tree source grammar is line-oriented, so there is no token
//! stream; each significant line is classified whole and picked apart by
//! the pure functions in this module. Name validity itself is enforced by
//! `dts-tree` at construction time.

use tracing::trace;

use crate::error::ParseErrorKind;

/// The version marker required before the first node line.
pub const VERSION_MARKER: &str = "/dts-v1/;";

/// A node-start line, split into its parts.
///
/// For `uart0: serial@12340000 {` the label is `uart0`, the plain name
/// `serial`, and the unit address `12340000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeName<'src> {
    /// Optional label prefix (`label:`).
    pub label: Option<&'src str>,
    /// Plain node name, without unit address.
    pub name: &'src str,
    /// Optional unit address (`@address`), kept opaque.
    pub unit_address: Option<&'src str>,
}

/// A property line, split into name and optional value text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyText<'src> {
    /// Property name.
    pub name: &'src str,
    /// Opaque value text between ` = ` and the trailing `;`, if present.
    pub value: Option<&'src str>,
}

/// Whether the line opens a node (contains `{`).
pub fn is_node_start_line(line: &str) -> bool {
    line.contains('{')
}

/// Whether the line closes a node (contains `};`).
pub fn is_node_end_line(line: &str) -> bool {
    line.contains("};")
}

/// Whether the line is blank (empty or whitespace only).
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split a node-start line into label, plain name, and unit address.
///
/// Fails with [`ParseErrorKind::MalformedNodeLine`] when the line contains
/// no `{`. The extracted parts are not validated here.
pub fn extract_node_name(line: &str) -> Result<NodeName<'_>, ParseErrorKind> {
    if !is_node_start_line(line) {
        return Err(ParseErrorKind::MalformedNodeLine);
    }

    let mut rest = line.trim_start_matches([' ', '\t']);
    let first = rest.split(' ').next().unwrap_or(rest);

    // An initial token ending in `:` is a label.
    let label = match first.strip_suffix(':') {
        Some(label) => {
            rest = rest[first.len()..].trim_start_matches([' ', '\t']);
            Some(label)
        }
        None => None,
    };

    let token = rest.split(' ').next().unwrap_or(rest);
    let (name, unit_address) = match token.split_once('@') {
        Some((name, address)) => (name, Some(address)),
        None => (token, None),
    };

    trace!(?label, name, ?unit_address, "node line");
    Ok(NodeName {
        label,
        name,
        unit_address,
    })
}

/// Split a property line into name and optional value text.
///
/// After stripping the leading indentation the line must end with `;`;
/// otherwise this fails with [`ParseErrorKind::MalformedPropertyLine`].
/// The value is everything between the first ` = ` and the trailing `;`,
/// taken verbatim.
pub fn extract_property_name(line: &str) -> Result<PropertyText<'_>, ParseErrorKind> {
    let stripped = line.trim_start_matches([' ', '\t']).trim_end();
    let Some(body) = stripped.strip_suffix(';') else {
        return Err(ParseErrorKind::MalformedPropertyLine);
    };
    if body.is_empty() {
        return Err(ParseErrorKind::MalformedPropertyLine);
    }

    let (name, value) = match body.split_once(" = ") {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    trace!(name, ?value, "property line");
    Ok(PropertyText { name, value })
}
