//! YAML file loading functionality.
//!
//! This module reads YAML documents from disk, transparently decompressing gzip
//! files, and parses them into a `YamlDocument` along with the indentation width
//! the file was written with.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::debug;

use super::indent::detect_indentation;
use crate::document::parser::parse_document;
use crate::document::tree::YamlDocument;

/// A parsed YAML file.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// The first document of the file
    pub document: YamlDocument,
    /// Indentation width detected from the source text
    pub indent: usize,
    /// The (decompressed) source text
    pub source: String,
}

/// Loads and parses a YAML file from the filesystem.
///
/// Files ending in `.gz` are decompressed before parsing. Only the first document
/// of a multi-document file is loaded.
///
/// # Examples
///
/// ```no_run
/// use yays::file::loader::load_yaml_file;
///
/// let loaded = load_yaml_file("deployment.yaml").unwrap();
/// println!("indented by {}", loaded.indent);
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read (missing, permissions, etc.)
/// - A `.gz` file is not valid gzip or does not decompress to UTF-8
/// - The contents are not valid YAML or contain no document
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<LoadedFile> {
    let path = path.as_ref();
    let source = read_source(path)?;

    let indent = detect_indentation(&source);
    debug!("detected indentation of {} in {}", indent, path.display());

    let document = parse_document(&source)?;
    Ok(LoadedFile {
        document,
        indent,
        source,
    })
}

/// Reads a file as text, decompressing it if the name ends in `.gz`.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if is_gzipped(path) {
        read_gzipped_file(path)
    } else {
        fs::read_to_string(path).context("Failed to read file")
    }
}

pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}
