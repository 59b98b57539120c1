//! Structural comparison of document trees.
//!
//! Equality is unordered: the children of two nodes are compared by
//! existence, not position. Unit addresses and labels never take part.

use crate::item::{Document, Item, Node, Property};

/// Structural equality of two documents.
pub fn compare(a: &Document, b: &Document) -> bool {
    nodes_eq(&a.root, &b.root)
}

impl Item {
    /// Structural equality, defined recursively.
    ///
    /// Two items are equal when they agree on kind, level, and plain name;
    /// valued properties must also agree on the value. Node children are
    /// matched by existence in both directions: each child only needs some
    /// compare-equal counterpart on the other side, checked independently
    /// per child. As a consequence a node with duplicate-equal children is
    /// equal to a node carrying a single copy. That multiset insensitivity
    /// is deliberate and kept for compatibility with existing tooling.
    pub fn structural_eq(&self, other: &Item) -> bool {
        match (self, other) {
            (Item::Node(a), Item::Node(b)) => nodes_eq(a, b),
            (Item::Property(a), Item::Property(b)) => properties_eq(a, b),
            _ => false,
        }
    }
}

fn nodes_eq(a: &Node, b: &Node) -> bool {
    if a.kind() != b.kind() || a.level() != b.level() || a.name() != b.name() {
        return false;
    }

    // Every child of `a` needs an equal counterpart in `b`, and vice versa.
    a.children
        .iter()
        .all(|item| b.children.iter().any(|other| item.structural_eq(other)))
        && b.children
            .iter()
            .all(|item| a.children.iter().any(|other| item.structural_eq(other)))
}

fn properties_eq(a: &Property, b: &Property) -> bool {
    a.kind() == b.kind() && a.level() == b.level() && a.name() == b.name() && a.value() == b.value()
}
