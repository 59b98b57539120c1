#![doc = include_str!("../README.md")]

mod compare;
mod item;
mod merge;

pub use compare::compare;
pub use item::{
    Document, InvalidName, Item, ItemKind, MAX_NAME_LEN, Node, Property, ROOT_NAME,
    validate_label, validate_node_name, validate_property_name,
};
pub use merge::{MergeError, MergeOptions, merge};
