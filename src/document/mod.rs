//! In-memory YAML document model.
//!
//! - [`node`]: node and value types
//! - [`tree`]: the document wrapper and index-path navigation
//! - [`parser`]: YAML text to document conversion
//! - [`comments`]: comment recovery from source text

pub mod comments;
pub mod node;
pub mod parser;
pub mod tree;
