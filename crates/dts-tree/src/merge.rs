//! In-place merge of one document tree into another.
//!
//! The source tree is read-only; the target is rewritten to reflect it
//! under the chosen [`MergeOptions`]. Children are matched by plain name
//! only — unit addresses, labels, and property values never influence the
//! pairing.

use crate::item::{Document, Item, ItemKind, Node, Property};

/// Policy flags for [`merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Deep-copy source-only children into the target.
    pub add_from_other: bool,
    /// Remove target children that have no same-named source counterpart.
    pub purge_not_in_other: bool,
}

impl MergeOptions {
    /// Default options: matched subtrees are merged, nothing is added or
    /// removed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable adding source-only children to the target.
    pub fn add_from_other(mut self) -> Self {
        self.add_from_other = true;
        self
    }

    /// Enable purging target-only children.
    pub fn purge_not_in_other(mut self) -> Self {
        self.purge_not_in_other = true;
        self
    }
}

/// Error during merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The two items at some recursion step disagree on kind, name, or
    /// level. The merge stops at the first mismatch.
    UnrelatedMergeTarget {
        /// Description of the target item.
        target: String,
        /// Description of the source item.
        source: String,
    },
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeError::UnrelatedMergeTarget { target, source } => {
                write!(f, "cannot merge {} into unrelated {}", source, target)
            }
        }
    }
}

impl std::error::Error for MergeError {}

/// Merge `source` into `target` in place.
///
/// Re-applying the same merge with identical options is a no-op: once the
/// target reflects the source under the chosen policy, nothing further
/// changes.
pub fn merge(
    target: &mut Document,
    source: &Document,
    options: MergeOptions,
) -> Result<(), MergeError> {
    merge_nodes(&mut target.root, &source.root, options)
}

impl Item {
    /// Merge another item of the same kind, name, and level into this one.
    pub fn merge(&mut self, other: &Item, options: MergeOptions) -> Result<(), MergeError> {
        match (self, other) {
            (Item::Node(target), Item::Node(source)) => merge_nodes(target, source, options),
            (Item::Property(target), Item::Property(source)) => merge_properties(target, source),
            (target, source) => Err(MergeError::UnrelatedMergeTarget {
                target: describe(target.kind(), target.name()),
                source: describe(source.kind(), source.name()),
            }),
        }
    }
}

fn describe(kind: ItemKind, name: &str) -> String {
    let word = match kind {
        ItemKind::RootNode => "root node",
        ItemKind::Node => "node",
        ItemKind::PropertyNoValue => "property",
        ItemKind::PropertyWithValue => "valued property",
    };
    format!("{} `{}`", word, name)
}

fn check_related(
    target_kind: ItemKind,
    target_name: &str,
    target_level: u16,
    source_kind: ItemKind,
    source_name: &str,
    source_level: u16,
) -> Result<(), MergeError> {
    if target_kind != source_kind || target_name != source_name || target_level != source_level {
        return Err(MergeError::UnrelatedMergeTarget {
            target: describe(target_kind, target_name),
            source: describe(source_kind, source_name),
        });
    }
    Ok(())
}

fn merge_nodes(target: &mut Node, source: &Node, options: MergeOptions) -> Result<(), MergeError> {
    check_related(
        target.kind(),
        target.name(),
        target.level(),
        source.kind(),
        source.name(),
        source.level(),
    )?;

    // Merge or purge existing target children.
    let mut index = 0;
    while index < target.children.len() {
        let counterpart = source
            .children
            .iter()
            .find(|c| c.name() == target.children[index].name());
        match counterpart {
            Some(other) => {
                target.children[index].merge(other, options)?;
                index += 1;
            }
            None if options.purge_not_in_other => {
                target.children.remove(index);
            }
            None => index += 1,
        }
    }

    // Append source-only children, in source order, after the existing ones.
    if options.add_from_other {
        for item in &source.children {
            if target.child(item.name()).is_none() {
                target.children.push(item.clone());
            }
        }
    }

    Ok(())
}

fn merge_properties(target: &mut Property, source: &Property) -> Result<(), MergeError> {
    check_related(
        target.kind(),
        target.name(),
        target.level(),
        source.kind(),
        source.name(),
        source.level(),
    )?;

    // Equal kinds guarantee both sides agree on value presence.
    target.set_value(source.value().map(str::to_string));
    Ok(())
}
