//! yays - Yet Another YAML Sorter.
//!
//! Sorts mapping keys and sequence elements at addressed paths of a YAML
//! document while keeping scalar text, styles, anchors and comments intact.
//!
//! # Example
//!
//! ```
//! use yays::document::parser::parse_document;
//! use yays::file::saver::serialize_document;
//! use yays::sort::{apply_all, SortMode};
//!
//! let mut doc = parse_document("spec: {}\nkind: Pod\napiVersion: v1\n").unwrap();
//! apply_all(&mut doc, &[(".", SortMode::Human)]).unwrap();
//! assert_eq!(
//!     serialize_document(&doc, 2),
//!     "apiVersion: v1\nkind: Pod\nspec: {}\n"
//! );
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod sort;
pub mod yamlpath;
