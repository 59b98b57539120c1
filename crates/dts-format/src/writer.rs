//! Low-level output writer for canonical device-tree text.

use dts_tree::{Node, Property};

/// Accumulates canonical output line by line.
///
/// Indentation is one tab per nesting level; every statement line is
/// newline-terminated. Blank-line placement between siblings is decided by
/// the caller, which knows the neighbouring item categories.
pub struct DtsWriter {
    out: String,
}

impl DtsWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    /// Write a full line without indentation.
    pub fn write_line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write an empty separator line.
    pub fn blank_line(&mut self) {
        self.out.push('\n');
    }

    fn write_indent(&mut self, level: u16) {
        for _ in 0..level {
            self.out.push('\t');
        }
    }

    /// Write a node-start line: `<tabs>[label: ]name[@address] {`.
    pub fn node_start(&mut self, node: &Node) {
        self.write_indent(node.level());
        if let Some(label) = node.label() {
            self.out.push_str(label);
            self.out.push_str(": ");
        }
        self.out.push_str(node.name());
        if let Some(address) = node.unit_address() {
            self.out.push('@');
            self.out.push_str(address);
        }
        self.out.push_str(" {\n");
    }

    /// Write a node-end line: `<tabs>};`.
    pub fn node_end(&mut self, level: u16) {
        self.write_indent(level);
        self.out.push_str("};\n");
    }

    /// Write a property line: `<tabs>name;` or `<tabs>name = value;`.
    pub fn property(&mut self, property: &Property) {
        self.write_indent(property.level());
        self.out.push_str(property.name());
        if let Some(value) = property.value() {
            self.out.push_str(" = ");
            self.out.push_str(value);
        }
        self.out.push_str(";\n");
    }
}

impl Default for DtsWriter {
    fn default() -> Self {
        Self::new()
    }
}
