//! Applies sort requests to a document.
//!
//! Each path is parsed and resolved against the tree as it stands after the
//! previous paths were applied, so later paths see earlier reorderings.

use std::error::Error;
use std::fmt;

use log::debug;

use super::rank::SortMode;
use super::sorter::{sort_mapping, sort_sequence_by_first_field};
use crate::document::node::NodeKind;
use crate::document::tree::YamlDocument;
use crate::yamlpath::{Evaluator, Parser, PathParseError, ResolveError};

/// Failure to apply one path. Every variant names the path string as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    InvalidPath {
        path: String,
        source: PathParseError,
    },
    Navigation {
        path: String,
        source: ResolveError,
    },
    /// A path without `[*]` addressed something that is neither a mapping nor a sequence
    UnsortableTarget {
        path: String,
        location: String,
        kind: NodeKind,
    },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyError::InvalidPath { path, source } => {
                write!(f, "invalid path {:?}: {}", path, source)
            }
            ApplyError::Navigation { path, source } => {
                write!(f, "failed to navigate to path {:?}: {}", path, source)
            }
            ApplyError::UnsortableTarget {
                path,
                location,
                kind,
            } => write!(
                f,
                "target at path {:?} must be a mapping or sequence (found {} at {})",
                path, kind, location
            ),
        }
    }
}

impl Error for ApplyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApplyError::InvalidPath { source, .. } => Some(source),
            ApplyError::Navigation { source, .. } => Some(source),
            ApplyError::UnsortableTarget { .. } => None,
        }
    }
}

/// Applies every `(path, mode)` request in order, stopping at the first error.
///
/// Mutations made by earlier paths are kept when a later path fails.
///
/// # Example
///
/// ```
/// use yays::document::parser::parse_document;
/// use yays::sort::{apply_all, SortMode};
///
/// let mut doc = parse_document("b: 1\na: 2\n").unwrap();
/// apply_all(&mut doc, &[(".", SortMode::Alphanumeric)]).unwrap();
/// assert_eq!(doc.root().keys(), vec!["a", "b"]);
/// ```
pub fn apply_all<P: AsRef<str>>(
    doc: &mut YamlDocument,
    requests: &[(P, SortMode)],
) -> Result<(), ApplyError> {
    for (path, mode) in requests {
        apply_path(doc, path.as_ref(), *mode)?;
    }
    Ok(())
}

/// Sorts every node a single path addresses and returns how many were sorted.
///
/// Mappings get their keys ranked by `mode`; sequences are ordered by the first
/// field of each element. Scalars and aliases are skipped when the path contains
/// `[*]` and rejected otherwise.
pub fn apply_path(doc: &mut YamlDocument, path: &str, mode: SortMode) -> Result<usize, ApplyError> {
    let parsed = Parser::parse(path).map_err(|source| ApplyError::InvalidPath {
        path: path.to_string(),
        source,
    })?;
    debug!("path {:?} parsed as {} ({} steps)", path, parsed, parsed.steps.len());

    let targets = Evaluator::new(doc.root())
        .resolve(&parsed)
        .map_err(|source| ApplyError::Navigation {
            path: path.to_string(),
            source,
        })?;
    debug!("path {:?} resolved to {} target(s)", path, targets.len());

    let looping = parsed.has_wildcard();
    let mut sorted = 0;
    for target in targets {
        // Targets share one depth, so none contains another
        let Some(node) = doc.get_node_mut(&target.path) else {
            continue;
        };
        match node.kind() {
            NodeKind::Mapping => {
                sort_mapping(node, mode);
                sorted += 1;
            }
            NodeKind::Sequence => {
                sort_sequence_by_first_field(node);
                sorted += 1;
            }
            kind if looping => {
                debug!("skipping {} at {}", kind, target.location);
            }
            kind => {
                return Err(ApplyError::UnsortableTarget {
                    path: path.to_string(),
                    location: target.location,
                    kind,
                })
            }
        }
    }
    Ok(sorted)
}
