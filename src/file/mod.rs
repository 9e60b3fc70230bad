//! File I/O operations for YAML documents.
//!
//! This module loads YAML files from disk (plain or gzip-compressed), detects the
//! indentation they were written with, and saves documents back with atomic write
//! operations and optional backups.

pub mod indent;
pub mod loader;
pub mod saver;
