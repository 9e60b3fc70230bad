//! YAML node representation with metadata tracking.
//!
//! This module provides the core data structures for representing YAML documents
//! in yays. Each YAML value is wrapped in a `YamlNode` that carries the node's
//! anchor, tag, attached comments and source metadata, so a sorted document can be
//! written back with its original styling.
//!
//! Mappings are stored as an ordered list of key/value pairs. Keys are not required
//! to be unique, and their order is exactly the order in which they appear (or have
//! been sorted into).
//!
//! # Example
//!
//! ```
//! use yays::document::node::{YamlNode, YamlValue};
//!
//! let node = YamlNode::mapping(vec![
//!     (YamlNode::plain("name"), YamlNode::plain("yays")),
//!     (YamlNode::plain("version"), YamlNode::plain("1")),
//! ]);
//!
//! assert!(node.value().is_mapping());
//! assert_eq!(node.len(), 2);
//! ```

use std::fmt;

/// The quoting or block style a scalar was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    #[default]
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// A leaf value, kept as its literal text.
///
/// Numbers, booleans and nulls are not interpreted: `030`, `true` and `~` are kept
/// exactly as written so that sorting never rewrites a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scalar {
    pub text: String,
    pub style: ScalarStyle,
}

impl Scalar {
    pub fn new(text: impl Into<String>, style: ScalarStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_block(&self) -> bool {
        matches!(self.style, ScalarStyle::Literal | ScalarStyle::Folded)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A YAML value without metadata.
///
/// Mappings and sequences contain `YamlNode` instances so that metadata is
/// preserved throughout the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    /// A leaf value rendered as literal text
    Scalar(Scalar),
    /// Ordered key/value pairs
    Mapping(Vec<(YamlNode, YamlNode)>),
    /// Ordered elements
    Sequence(Vec<YamlNode>),
    /// A reference to an anchored node (`*name`), kept opaque
    Alias(String),
}

/// Discriminant of a [`YamlValue`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Mapping,
    Sequence,
    Alias,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Alias => "alias",
        };
        f.write_str(name)
    }
}

impl YamlValue {
    /// Returns the kind of this value.
    ///
    /// # Example
    ///
    /// ```
    /// use yays::document::node::{NodeKind, YamlValue};
    ///
    /// assert_eq!(YamlValue::Sequence(vec![]).kind(), NodeKind::Sequence);
    /// ```
    pub fn kind(&self) -> NodeKind {
        match self {
            YamlValue::Scalar(_) => NodeKind::Scalar,
            YamlValue::Mapping(_) => NodeKind::Mapping,
            YamlValue::Sequence(_) => NodeKind::Sequence,
            YamlValue::Alias(_) => NodeKind::Alias,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, YamlValue::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, YamlValue::Sequence(_))
    }

    /// Returns true if this value is a mapping or a sequence.
    pub fn is_container(&self) -> bool {
        matches!(self, YamlValue::Mapping(_) | YamlValue::Sequence(_))
    }
}

/// Comments attached to a node.
///
/// `head` holds the full-line comments written directly above the node (above the
/// key for mapping entries, above the dash for sequence items). `line` is the
/// comment trailing the node on the same line. Comment text includes the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comments {
    pub head: Vec<String>,
    pub line: Option<String>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.line.is_none()
    }
}

/// Source information recorded when a node is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeMetadata {
    /// 1-based line the node starts on
    pub line: Option<usize>,
    /// 1-based line a flow collection is closed on
    pub end_line: Option<usize>,
    /// Whether a collection was written in flow style (`[a, b]`, `{k: v}`)
    pub flow: bool,
}

/// A YAML value wrapped with its properties and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub(crate) value: YamlValue,
    pub(crate) anchor: Option<String>,
    pub(crate) tag: Option<String>,
    pub(crate) comments: Comments,
    pub(crate) metadata: NodeMetadata,
}

impl YamlNode {
    /// Creates a new `YamlNode` with the given value and no properties.
    pub fn new(value: YamlValue) -> Self {
        Self {
            value,
            anchor: None,
            tag: None,
            comments: Comments::default(),
            metadata: NodeMetadata::default(),
        }
    }

    /// Creates a plain scalar node.
    ///
    /// # Example
    ///
    /// ```
    /// use yays::document::node::YamlNode;
    ///
    /// let node = YamlNode::plain("30");
    /// assert_eq!(node.scalar_text(), Some("30"));
    /// ```
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(YamlValue::Scalar(Scalar::new(text, ScalarStyle::Plain)))
    }

    pub fn mapping(entries: Vec<(YamlNode, YamlNode)>) -> Self {
        Self::new(YamlValue::Mapping(entries))
    }

    pub fn sequence(items: Vec<YamlNode>) -> Self {
        Self::new(YamlValue::Sequence(items))
    }

    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut YamlValue {
        &mut self.value
    }

    pub fn kind(&self) -> NodeKind {
        self.value.kind()
    }

    /// Returns the literal text if this node is a scalar.
    pub fn scalar_text(&self) -> Option<&str> {
        match &self.value {
            YamlValue::Scalar(scalar) => Some(scalar.as_str()),
            _ => None,
        }
    }

    /// Returns the number of direct children (pairs for mappings).
    pub fn len(&self) -> usize {
        match &self.value {
            YamlValue::Mapping(entries) => entries.len(),
            YamlValue::Sequence(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the value of the first entry whose key text equals `key`.
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        match &self.value {
            YamlValue::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.scalar_text() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the key texts of a mapping in their current order.
    ///
    /// Non-mapping nodes yield an empty list.
    pub fn keys(&self) -> Vec<&str> {
        match &self.value {
            YamlValue::Mapping(entries) => entries
                .iter()
                .map(|(k, _)| k.scalar_text().unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn set_anchor(&mut self, anchor: Option<String>) {
        self.anchor = anchor;
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub fn comments(&self) -> &Comments {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut Comments {
        &mut self.comments
    }

    pub fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    pub fn is_flow(&self) -> bool {
        self.metadata.flow
    }

    /// Returns the node's child at `index`: the value of the nth pair for
    /// mappings, the nth element for sequences.
    pub fn child(&self, index: usize) -> Option<&YamlNode> {
        match &self.value {
            YamlValue::Mapping(entries) => entries.get(index).map(|(_, v)| v),
            YamlValue::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut YamlNode> {
        match &mut self.value {
            YamlValue::Mapping(entries) => entries.get_mut(index).map(|(_, v)| v),
            YamlValue::Sequence(items) => items.get_mut(index),
            _ => None,
        }
    }
}
