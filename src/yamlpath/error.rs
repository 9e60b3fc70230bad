//! Error types for path parsing and resolution.

use std::fmt;

use crate::document::node::NodeKind;

/// Errors that can occur while parsing a path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// A `[` without its `]`, or a stray `]`.
    UnmatchedBracket { token: String },
    /// Bracket content that is neither `*` nor a non-negative integer.
    InvalidSelector { selector: String },
    /// Text following a bracket selector inside one token (`a[0]b`).
    TrailingCharacters { token: String },
}

impl fmt::Display for PathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathParseError::UnmatchedBracket { token } => {
                write!(f, "unmatched bracket in {:?}", token)
            }
            PathParseError::InvalidSelector { selector } => {
                write!(f, "invalid bracket selection {:?}", selector)
            }
            PathParseError::TrailingCharacters { token } => {
                write!(f, "unexpected characters after bracket selection in {:?}", token)
            }
        }
    }
}

impl std::error::Error for PathParseError {}

/// Errors raised when a path does not fit the document's shape.
///
/// `location` is the rendered path of the node the failing step was applied to
/// (`.` for the document root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    NotAMapping {
        location: String,
        key: String,
        kind: NodeKind,
    },
    KeyNotFound {
        location: String,
        key: String,
    },
    NotASequence {
        location: String,
        index: usize,
        kind: NodeKind,
    },
    IndexOutOfRange {
        location: String,
        index: usize,
        len: usize,
    },
    NotIterable {
        location: String,
        kind: NodeKind,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotAMapping {
                location,
                key,
                kind,
            } => write!(
                f,
                "cannot descend into {} at {} with key {:?}: not a mapping",
                kind, location, key
            ),
            ResolveError::KeyNotFound { location, key } => {
                write!(f, "key {:?} not found in mapping at {}", key, location)
            }
            ResolveError::NotASequence {
                location,
                index,
                kind,
            } => write!(
                f,
                "expected a sequence at {} for index {}, found {}",
                location, index, kind
            ),
            ResolveError::IndexOutOfRange {
                location,
                index,
                len,
            } => write!(
                f,
                "index {} out of range [0,{}) at {}",
                index, len, location
            ),
            ResolveError::NotIterable { location, kind } => write!(
                f,
                "selection [*] requires a sequence or mapping at {}, found {}",
                location, kind
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_offending_text() {
        let err = PathParseError::InvalidSelector {
            selector: "x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid bracket selection \"x\"");
    }

    #[test]
    fn test_key_not_found_message() {
        let err = ResolveError::KeyNotFound {
            location: ".".to_string(),
            key: "servers".to_string(),
        };
        assert_eq!(err.to_string(), "key \"servers\" not found in mapping at .");
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = ResolveError::IndexOutOfRange {
            location: "items".to_string(),
            index: 3,
            len: 3,
        };
        assert_eq!(err.to_string(), "index 3 out of range [0,3) at items");
    }
}
