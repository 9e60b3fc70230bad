//! Key ranking for mapping sorts.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How mapping keys are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Plain lexicographic key order
    #[default]
    Alphanumeric,
    /// Well-known keys first (`apiVersion`, `kind`, `metadata`, ...), then the rest
    /// lexicographically
    Human,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Alphanumeric => f.write_str("alphanumeric"),
            SortMode::Human => f.write_str("human"),
        }
    }
}

/// Keys that `SortMode::Human` places first, in this order.
pub const HUMAN_KEY_ORDER: [&str; 9] = [
    "apiVersion",
    "kind",
    "metadata",
    "name",
    "namespace",
    "labels",
    "annotations",
    "id",
    "version",
];

/// Returns the ordering rank of a key; lower ranks sort first.
///
/// Keys of equal rank are ordered by their text, so ranks only need to be a
/// preorder.
///
/// # Example
///
/// ```
/// use yays::sort::rank::{rank, SortMode};
///
/// assert!(rank("kind", SortMode::Human) < rank("metadata", SortMode::Human));
/// assert_eq!(rank("kind", SortMode::Alphanumeric), rank("zeta", SortMode::Alphanumeric));
/// ```
pub fn rank(key: &str, mode: SortMode) -> usize {
    let unranked = HUMAN_KEY_ORDER.len();
    match mode {
        SortMode::Alphanumeric => unranked,
        SortMode::Human => HUMAN_KEY_ORDER
            .iter()
            .position(|known| *known == key)
            .unwrap_or(unranked),
    }
}
