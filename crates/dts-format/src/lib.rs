#![doc = include_str!("../README.md")]

mod writer;

use dts_parse::VERSION_MARKER;
use dts_tree::{Document, Item, Node};

pub use writer::DtsWriter;

/// Render a document to canonical device-tree source text.
///
/// The output starts with the version marker and a blank line, ends with a
/// trailing newline, and indents with one tab per nesting level. Parsing
/// the result yields a tree compare-equal to the input.
pub fn render(doc: &Document) -> String {
    let mut writer = DtsWriter::new();
    writer.write_line(VERSION_MARKER);
    writer.blank_line();
    render_node(&doc.root, &mut writer);
    writer.finish()
}

fn render_node(node: &Node, writer: &mut DtsWriter) {
    writer.node_start(node);

    // Nodes are always visually separated from their neighbours; runs of
    // properties stay contiguous. The same rule applies before a first
    // child that is a node.
    let mut prev_is_node: Option<bool> = None;
    for child in &node.children {
        let is_node = child.kind().is_node();
        let separate = match prev_is_node {
            None => is_node,
            Some(prev) => prev != is_node || (prev && is_node),
        };
        if separate {
            writer.blank_line();
        }
        match child {
            Item::Node(child) => render_node(child, writer),
            Item::Property(property) => writer.property(property),
        }
        prev_is_node = Some(is_node);
    }

    writer.node_end(node.level());
}

#[cfg(test)]
mod tests {
    use super::*;
    use dts_tree::{Property, compare};

    fn prop(level: u16, name: &str) -> Item {
        Item::Property(Property::new(level, name).unwrap())
    }

    fn valued(level: u16, name: &str, value: &str) -> Item {
        Item::Property(Property::with_value(level, name, value).unwrap())
    }

    fn doc(children: Vec<Item>) -> Document {
        let mut root = Node::root();
        root.children = children;
        Document::new(root)
    }

    #[test]
    fn test_render_empty_root() {
        assert_eq!(render(&doc(vec![])), "/dts-v1/;\n\n/ {\n};\n");
    }

    #[test]
    fn test_render_properties_stay_contiguous() {
        let d = doc(vec![
            valued(1, "model", "\"acme,board\""),
            prop(1, "ranges"),
        ]);
        assert_eq!(
            render(&d),
            "/dts-v1/;\n\n/ {\n\tmodel = \"acme,board\";\n\tranges;\n};\n"
        );
    }

    #[test]
    fn test_render_blank_line_rules() {
        let mut soc = Node::new(1, "soc").unwrap();
        soc.push(prop(2, "ranges"));
        let cpu = Node::new(1, "cpu").unwrap();
        let d = doc(vec![
            valued(1, "model", "\"acme\""),
            Item::Node(soc),
            Item::Node(cpu),
            prop(1, "tail"),
        ]);
        // Property run, then a blank line before each node (nodes always
        // separate), then a blank line when switching back to properties.
        assert_eq!(
            render(&d),
            "/dts-v1/;\n\n/ {\n\tmodel = \"acme\";\n\n\tsoc {\n\t\tranges;\n\t};\n\n\tcpu {\n\t};\n\n\ttail;\n};\n"
        );
    }

    #[test]
    fn test_render_blank_line_before_leading_node() {
        let soc = Node::new(1, "soc").unwrap();
        let d = doc(vec![Item::Node(soc)]);
        assert_eq!(render(&d), "/dts-v1/;\n\n/ {\n\n\tsoc {\n\t};\n};\n");
    }

    #[test]
    fn test_property_variants_share_a_run() {
        // Value-less and valued properties are one category: no separator.
        let d = doc(vec![prop(1, "ranges"), valued(1, "status", "\"okay\"")]);
        assert_eq!(
            render(&d),
            "/dts-v1/;\n\n/ {\n\tranges;\n\tstatus = \"okay\";\n};\n"
        );
    }

    #[test]
    fn test_render_label_and_unit_address() {
        let serial = Node::new(1, "serial")
            .unwrap()
            .with_unit_address("12340000")
            .with_label("uart0")
            .unwrap();
        let d = doc(vec![Item::Node(serial)]);
        assert_eq!(
            render(&d),
            "/dts-v1/;\n\n/ {\n\n\tuart0: serial@12340000 {\n\t};\n};\n"
        );
    }

    #[test]
    fn test_round_trip_canonical_source() {
        let source = "/dts-v1/;\n\n/ {\n\tmodel = \"acme\";\n\n\tsoc {\n\t\tranges;\n\n\t\tuart0: serial@1000 {\n\t\t\tstatus = \"okay\";\n\t\t};\n\t};\n};\n";
        let parsed = dts_parse::parse(source).unwrap();
        // Canonical input renders back byte-for-byte.
        assert_eq!(render(&parsed), source);
    }

    #[test]
    fn test_round_trip_non_canonical_source() {
        // Sloppy spacing still parses; rendering canonicalizes it.
        let source = "/dts-v1/;\n/ {\n\tranges;\n\tsoc {\n\t\tstatus = \"okay\";\n\t};\n};\n";
        let parsed = dts_parse::parse(source).unwrap();
        let rendered = render(&parsed);
        let reparsed = dts_parse::parse(&rendered).unwrap();
        assert!(compare(&parsed, &reparsed));
        assert_eq!(parsed, reparsed);
    }
}
