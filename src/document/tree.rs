//! The document wrapper around a YAML node tree.
//!
//! This module provides the `YamlDocument` type, the entry point of a parsed YAML
//! file. It wraps exactly one root content node and supports index-path based
//! navigation, which is how resolved path targets are addressed when the tree is
//! mutated.
//!
//! # Example
//!
//! ```
//! use yays::document::tree::YamlDocument;
//! use yays::document::node::YamlNode;
//!
//! let doc = YamlDocument::new(YamlNode::mapping(vec![
//!     (YamlNode::plain("items"), YamlNode::sequence(vec![
//!         YamlNode::plain("a"),
//!         YamlNode::plain("b"),
//!     ])),
//! ]));
//!
//! // First mapping pair, second sequence element
//! let node = doc.get_node(&[0, 1]).unwrap();
//! assert_eq!(node.scalar_text(), Some("b"));
//! ```

use super::node::YamlNode;

/// A parsed YAML document.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlDocument {
    root: YamlNode,
    /// Comments after the last node of the document
    foot_comments: Vec<String>,
}

impl YamlDocument {
    /// Creates a new document with the given root content node.
    pub fn new(root: YamlNode) -> Self {
        Self {
            root,
            foot_comments: Vec::new(),
        }
    }

    pub fn with_foot_comments(root: YamlNode, foot_comments: Vec<String>) -> Self {
        Self {
            root,
            foot_comments,
        }
    }

    pub fn root(&self) -> &YamlNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut YamlNode {
        &mut self.root
    }

    pub fn foot_comments(&self) -> &[String] {
        &self.foot_comments
    }

    /// Gets a node by index path.
    ///
    /// Each index selects the value of the nth pair of a mapping, or the nth element
    /// of a sequence. An empty path addresses the root. Returns `None` when an index
    /// is out of bounds or the path runs through a scalar or alias.
    pub fn get_node(&self, path: &[usize]) -> Option<&YamlNode> {
        let mut current = &self.root;
        for &index in path {
            current = current.child(index)?;
        }
        Some(current)
    }

    /// Gets a mutable node by index path, following the rules of `get_node`.
    pub fn get_node_mut(&mut self, path: &[usize]) -> Option<&mut YamlNode> {
        let mut current = &mut self.root;
        for &index in path {
            current = current.child_mut(index)?;
        }
        Some(current)
    }
}
