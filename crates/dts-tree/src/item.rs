//! Item types for device-tree source documents.
//!
//! Every element of a document is an [`Item`]:
//! - a [`Node`] owns an ordered list of child items,
//! - a [`Property`] is a leaf, optionally bound to an opaque string value.
//!
//! The root of a document is a `Node` at level 0 whose name is the literal
//! `/`; it is the only item exempt from the name validity rules.

/// Maximum length of a node, property, or label name.
pub const MAX_NAME_LEN: usize = 31;

/// Name of the root node.
pub const ROOT_NAME: &str = "/";

/// Characters allowed in node names beyond ASCII alphanumerics.
const NODE_NAME_EXTRA: &str = ",._+-";

/// Characters allowed in property names beyond ASCII alphanumerics.
const PROPERTY_NAME_EXTRA: &str = ",._+?#-";

/// The kind of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// The distinguished level-0 node named `/`.
    RootNode,
    /// A named container of child items.
    Node,
    /// A property without a value: `name;`
    PropertyNoValue,
    /// A property bound to an opaque string value: `name = value;`
    PropertyWithValue,
}

impl ItemKind {
    /// Whether this kind is a node (root or otherwise).
    ///
    /// The serializer separates siblings by coarse category (node vs
    /// property), not by the full four-way kind.
    pub fn is_node(&self) -> bool {
        matches!(self, ItemKind::RootNode | ItemKind::Node)
    }
}

/// A rejected name, label, or similar identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidName {
    /// Length outside `1..=MAX_NAME_LEN`.
    Length(String),
    /// Node names must start with an alphabetic character.
    FirstChar(String),
    /// A character outside the allowed set for the item kind.
    Charset(String, char),
    /// A level-0 node must be named `/`.
    NotRoot(String),
}

impl InvalidName {
    /// The offending name.
    pub fn name(&self) -> &str {
        match self {
            InvalidName::Length(name)
            | InvalidName::FirstChar(name)
            | InvalidName::Charset(name, _)
            | InvalidName::NotRoot(name) => name,
        }
    }
}

impl std::fmt::Display for InvalidName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidName::Length(name) => {
                write!(
                    f,
                    "name `{}` has {} characters, expected 1 to {}",
                    name,
                    name.len(),
                    MAX_NAME_LEN
                )
            }
            InvalidName::FirstChar(name) => {
                write!(f, "name `{}` does not start with a letter", name)
            }
            InvalidName::Charset(name, ch) => {
                write!(f, "name `{}` contains forbidden character `{}`", name, ch)
            }
            InvalidName::NotRoot(name) => {
                write!(f, "top-level node must be named `/`, found `{}`", name)
            }
        }
    }
}

impl std::error::Error for InvalidName {}

fn validate_charset(name: &str, extra: &str) -> Result<(), InvalidName> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(InvalidName::Length(name.to_string()));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !extra.contains(*c))
    {
        return Err(InvalidName::Charset(name.to_string(), ch));
    }
    Ok(())
}

/// Validate a node name (the plain name, without any unit address).
pub fn validate_node_name(name: &str) -> Result<(), InvalidName> {
    validate_charset(name, NODE_NAME_EXTRA)?;
    // Charset check above guarantees at least one character.
    if !name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(InvalidName::FirstChar(name.to_string()));
    }
    Ok(())
}

/// Validate a property name.
pub fn validate_property_name(name: &str) -> Result<(), InvalidName> {
    validate_charset(name, PROPERTY_NAME_EXTRA)
}

/// Validate a node label (the `label:` prefix on a node line).
pub fn validate_label(label: &str) -> Result<(), InvalidName> {
    validate_charset(label, "_")
}

/// An element of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A node with children.
    Node(Node),
    /// A leaf property.
    Property(Property),
}

impl Item {
    /// The kind of this item.
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Node(node) => node.kind(),
            Item::Property(property) => property.kind(),
        }
    }

    /// Nesting level (root = 0).
    pub fn level(&self) -> u16 {
        match self {
            Item::Node(node) => node.level(),
            Item::Property(property) => property.level(),
        }
    }

    /// Plain name (no unit address, no label).
    pub fn name(&self) -> &str {
        match self {
            Item::Node(node) => node.name(),
            Item::Property(property) => property.name(),
        }
    }

    /// Get as node.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Item::Node(node) => Some(node),
            Item::Property(_) => None,
        }
    }

    /// Get as property.
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Item::Property(property) => Some(property),
            Item::Node(_) => None,
        }
    }
}

/// A named container of child items at a given nesting level.
///
/// Children are owned exclusively and kept in insertion order; order is
/// preserved through parsing and merging but is not significant for
/// [`compare`](crate::compare).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    level: u16,
    name: String,
    unit_address: Option<String>,
    label: Option<String>,
    /// Child items, in source order.
    pub children: Vec<Item>,
}

impl Node {
    /// Create the root node (level 0, named `/`).
    pub fn root() -> Self {
        Self {
            level: 0,
            name: ROOT_NAME.to_string(),
            unit_address: None,
            label: None,
            children: Vec::new(),
        }
    }

    /// Create a non-root node. The name is validated; level 0 is reserved
    /// for the root, which is only constructed via [`Node::root`].
    pub fn new(level: u16, name: impl Into<String>) -> Result<Self, InvalidName> {
        let name = name.into();
        if level == 0 {
            return Err(InvalidName::NotRoot(name));
        }
        validate_node_name(&name)?;
        Ok(Self {
            level,
            name,
            unit_address: None,
            label: None,
            children: Vec::new(),
        })
    }

    /// Attach a unit address (`name@address`). The address is opaque.
    pub fn with_unit_address(mut self, address: impl Into<String>) -> Self {
        self.unit_address = Some(address.into());
        self
    }

    /// Attach a label (`label: name {`). The label is validated.
    pub fn with_label(mut self, label: impl Into<String>) -> Result<Self, InvalidName> {
        let label = label.into();
        validate_label(&label)?;
        self.label = Some(label);
        Ok(self)
    }

    /// Nesting level (root = 0).
    pub fn level(&self) -> u16 {
        self.level
    }

    /// Plain name, without unit address or label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit address, if the node was declared as `name@address`.
    pub fn unit_address(&self) -> Option<&str> {
        self.unit_address.as_deref()
    }

    /// Label, if the node was declared as `label: name`.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// [`ItemKind::RootNode`] at level 0, [`ItemKind::Node`] otherwise.
    pub fn kind(&self) -> ItemKind {
        if self.level == 0 {
            ItemKind::RootNode
        } else {
            ItemKind::Node
        }
    }

    /// Append a child item.
    pub fn push(&mut self, item: Item) {
        self.children.push(item);
    }

    /// First child with the given plain name, ignoring unit addresses.
    pub fn child(&self, name: &str) -> Option<&Item> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Resolve a `/`-separated device path (e.g. `soc/serial`) to an item.
    ///
    /// Segments match plain names only. An empty path resolves to nothing;
    /// use [`Document::get`] for absolute paths.
    pub fn get(&self, path: &str) -> Option<&Item> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut current = self.child(first)?;
        for segment in segments {
            current = current.as_node()?.child(segment)?;
        }
        Some(current)
    }
}

/// A leaf property, optionally bound to an opaque string value.
///
/// The value is the raw text between ` = ` and the trailing `;` of the
/// property line; it is never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    level: u16,
    name: String,
    value: Option<String>,
}

impl Property {
    /// Create a value-less property. The name is validated.
    pub fn new(level: u16, name: impl Into<String>) -> Result<Self, InvalidName> {
        let name = name.into();
        validate_property_name(&name)?;
        Ok(Self {
            level,
            name,
            value: None,
        })
    }

    /// Create a property with a value. The name is validated, the value is
    /// opaque.
    pub fn with_value(
        level: u16,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, InvalidName> {
        let mut property = Self::new(level, name)?;
        property.value = Some(value.into());
        Ok(property)
    }

    /// Nesting level.
    pub fn level(&self) -> u16 {
        self.level
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The opaque value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// [`ItemKind::PropertyWithValue`] when a value is present.
    pub fn kind(&self) -> ItemKind {
        if self.value.is_some() {
            ItemKind::PropertyWithValue
        } else {
            ItemKind::PropertyNoValue
        }
    }
}

/// A parsed device-tree source document.
///
/// The version marker (`/dts-v1/;`) is implied by the document and emitted
/// by the serializer; the tree itself starts at [`Document::root`].
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The root node (level 0, named `/`).
    pub root: Node,
}

impl Document {
    /// Wrap a root node into a document.
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Resolve an absolute device path (e.g. `/soc/serial`).
    ///
    /// The path `/` resolves to nothing (the root is not an item of
    /// itself); everything else walks child names from the root.
    pub fn get(&self, path: &str) -> Option<&Item> {
        self.root.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node() {
        let root = Node::root();
        assert_eq!(root.level(), 0);
        assert_eq!(root.name(), "/");
        assert_eq!(root.kind(), ItemKind::RootNode);
    }

    #[test]
    fn test_level_zero_reserved_for_root() {
        // The root is the only level-0 node; `Node::new` never mints one,
        // so a `RootNode` kind always carries the name `/`.
        assert_eq!(
            Node::new(0, "soc").unwrap_err(),
            InvalidName::NotRoot("soc".to_string())
        );
        assert_eq!(Node::new(0, "/").unwrap_err(), InvalidName::NotRoot("/".to_string()));
    }

    #[test]
    fn test_node_name_validation() {
        assert!(Node::new(1, "serial").is_ok());
        assert!(Node::new(1, "a").is_ok());
        assert!(Node::new(1, "flash,controller+x_y.z-0").is_ok());

        // Exactly 31 characters is fine, 32 is not.
        let longest = "a".repeat(MAX_NAME_LEN);
        assert!(Node::new(1, longest.as_str()).is_ok());
        let too_long = "a".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            Node::new(1, too_long.as_str()).unwrap_err(),
            InvalidName::Length(too_long)
        );

        assert_eq!(
            Node::new(1, "").unwrap_err(),
            InvalidName::Length(String::new())
        );
        assert_eq!(
            Node::new(1, "9pin").unwrap_err(),
            InvalidName::FirstChar("9pin".to_string())
        );
        assert_eq!(
            Node::new(1, "se rial").unwrap_err(),
            InvalidName::Charset("se rial".to_string(), ' ')
        );
        // `?` and `#` are property-only characters.
        assert!(Node::new(1, "what?").is_err());
    }

    #[test]
    fn test_property_name_validation() {
        assert!(Property::new(1, "status").is_ok());
        // Property names may start with non-letters.
        assert!(Property::new(1, "#address-cells").is_ok());
        assert!(Property::new(1, "0size").is_ok());
        assert!(Property::new(1, "interrupt?").is_ok());
        assert!(Property::new(1, "bad value").is_err());
    }

    #[test]
    fn test_label_validation() {
        assert!(validate_label("uart0").is_ok());
        assert!(validate_label("my_label").is_ok());
        assert!(validate_label("bad-label").is_err());
        assert!(validate_label("").is_err());
    }

    #[test]
    fn test_property_kinds() {
        let bare = Property::new(1, "ranges").unwrap();
        assert_eq!(bare.kind(), ItemKind::PropertyNoValue);
        assert_eq!(bare.value(), None);

        let valued = Property::with_value(1, "status", "\"okay\"").unwrap();
        assert_eq!(valued.kind(), ItemKind::PropertyWithValue);
        assert_eq!(valued.value(), Some("\"okay\""));
    }

    #[test]
    fn test_path_lookup() {
        let mut soc = Node::new(1, "soc").unwrap();
        let mut serial = Node::new(2, "serial")
            .unwrap()
            .with_unit_address("12340000");
        serial.push(Item::Property(
            Property::with_value(3, "status", "\"okay\"").unwrap(),
        ));
        soc.push(Item::Node(serial));

        let mut root = Node::root();
        root.push(Item::Node(soc));
        let doc = Document::new(root);

        assert_eq!(doc.get("/soc/serial").unwrap().name(), "serial");
        assert_eq!(doc.get("soc/serial/status").unwrap().name(), "status");
        assert!(doc.get("/soc/missing").is_none());
        assert!(doc.get("/soc/serial/status/deeper").is_none());
        assert!(doc.get("/").is_none());
    }

    #[test]
    fn test_labels_retained() {
        let node = Node::new(1, "serial")
            .unwrap()
            .with_unit_address("1000")
            .with_label("uart0")
            .unwrap();
        assert_eq!(node.label(), Some("uart0"));
        assert_eq!(node.unit_address(), Some("1000"));
        assert_eq!(node.name(), "serial");
    }
}
