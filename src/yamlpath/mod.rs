//! YAML path parsing and resolution.
//!
//! This module implements the small path language used to address the nodes to
//! sort inside a document.
//!
//! # Supported Syntax
//!
//! - `.` or an empty string - the document root
//! - `a.b.c` - nested mapping keys
//! - `items[0]` - sequence element by index
//! - `items[*]` - every element of a sequence, or every value of a mapping
//! - `[*]` / `.[2]` - selectors applied to the current node without a key
//! - `servers.0.roles` - a numeric key indexes a sequence
//!
//! Selectors may appear anywhere in the path, not only at the end.
//!
//! # Examples
//!
//! ```
//! use yays::yamlpath::{Parser, Step};
//!
//! let path = Parser::parse("items[*].meta").unwrap();
//! assert_eq!(path.steps[1], Step::Wildcard);
//! assert!(path.has_wildcard());
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{Step, YamlPath};
pub use error::{PathParseError, ResolveError};
pub use evaluator::{Evaluator, Target};
pub use parser::Parser;
