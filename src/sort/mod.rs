//! Sorting of mapping keys and sequence elements at addressed paths.

pub mod apply;
pub mod rank;
pub mod sorter;

pub use apply::{apply_all, apply_path, ApplyError};
pub use rank::{rank, SortMode};
pub use sorter::{sort_mapping, sort_sequence_by_first_field};
