//! YAML serialization and file saving.
//!
//! This module turns a `YamlDocument` back into YAML text and writes it to disk
//! with atomic write operations and optional backups.
//!
//! Serialization keeps what the parser recorded: scalar text and quoting style,
//! flow style of collections, anchors, tags, aliases and comments. Block layout is
//! normalized to the requested indentation width.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;

use super::loader::is_gzipped;
use crate::config::Config;
use crate::document::node::{Scalar, ScalarStyle, YamlNode, YamlValue};
use crate::document::parser::parse_document;
use crate::document::tree::YamlDocument;

/// Saves a YAML document to a file.
///
/// The document is serialized with `indent` spaces per level and the result is
/// parsed again before anything touches the disk. The write is atomic (temp file,
/// then rename) and keeps the permission bits of the file being replaced. Targets
/// ending in `.gz` are gzip-compressed. With `config.create_backup` the previous
/// file is first copied to `<name>.bak`.
///
/// # Examples
///
/// ```no_run
/// use yays::config::Config;
/// use yays::document::parser::parse_document;
/// use yays::file::saver::save_yaml_file;
///
/// let doc = parse_document("b: 1\na: 2\n").unwrap();
/// save_yaml_file("output.yaml", &doc, 2, &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The serialized text does not parse back, e.g. because sorting moved an alias
///   above its anchor
/// - Backup creation fails (if requested)
/// - Writing to the temp file fails
/// - Renaming the temp file to the target fails
pub fn save_yaml_file<P: AsRef<Path>>(
    path: P,
    document: &YamlDocument,
    indent: usize,
    config: &Config,
) -> Result<()> {
    let path = path.as_ref();
    let yaml = serialize_document(document, indent);

    // Validate the serialized YAML before writing to disk. Besides serializer
    // bugs this catches an alias sorted above its anchor.
    parse_document(&yaml).context("Sorted document is not valid YAML, refusing to write it")?;

    if config.create_backup && path.exists() {
        let backup = create_backup(path)?;
        info!("created backup {}", backup.display());
    }

    write_file_atomic(path, yaml.as_bytes(), is_gzipped(path))?;
    info!("wrote {}", path.display());

    Ok(())
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup(path: &Path) -> Result<PathBuf> {
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, &backup_path).context("Failed to create backup")?;
    Ok(backup_path)
}

/// Writes data to a file atomically, optionally compressing with gzip.
///
/// The data goes to `<name>.tmp` next to the target, which then replaces the
/// target by rename. If the target already exists its permissions are copied to
/// the temp file first.
fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    let temp_path = path.with_file_name(format!("{}.tmp", file_name));
    let permissions = fs::metadata(path).ok().map(|meta| meta.permissions());

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    if let Some(permissions) = permissions {
        fs::set_permissions(&temp_path, permissions)
            .context("Failed to copy file permissions")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}

/// Serializes a document to YAML text with `indent` spaces per nesting level.
///
/// Block mappings nest their collections `indent` columns deeper; a mapping inside
/// a sequence starts on the dash line with its other keys two columns right of the
/// dash. The output always ends with a newline.
///
/// # Example
///
/// ```
/// use yays::document::parser::parse_document;
/// use yays::file::saver::serialize_document;
///
/// let doc = parse_document("items:\n    - name: a\n      tags: [x, y]\n").unwrap();
/// assert_eq!(
///     serialize_document(&doc, 2),
///     "items:\n  - name: a\n    tags: [x, y]\n"
/// );
/// ```
pub fn serialize_document(document: &YamlDocument, indent: usize) -> String {
    let mut emitter = Emitter {
        out: String::new(),
        indent: indent.max(1),
    };
    emitter.document(document);
    emitter.out
}

struct Emitter {
    out: String,
    indent: usize,
}

impl Emitter {
    fn document(&mut self, document: &YamlDocument) {
        let root = document.root();
        self.comment_lines(&root.comments().head, 0);

        if is_block_collection(root) {
            // The blank line keeps the header from attaching to the first entry
            if !root.comments().head.is_empty() {
                self.out.push('\n');
            }
            let props = properties(root);
            if !props.is_empty() {
                self.out.push_str("--- ");
                self.out.push_str(&props);
                self.out.push('\n');
            }
            self.block(root, 0, None);
        } else {
            self.value(root, 0, "", None);
        }

        self.comment_lines(document.foot_comments(), 0);
    }

    /// Writes a non-empty block collection. `lead` replaces the indentation of
    /// the first line, e.g. `"- "` when the collection starts on a dash line.
    fn block(&mut self, node: &YamlNode, col: usize, lead: Option<String>) {
        match node.value() {
            YamlValue::Mapping(entries) => self.mapping(entries, col, lead),
            YamlValue::Sequence(items) => self.sequence(items, col, lead),
            _ => {}
        }
    }

    fn mapping(&mut self, entries: &[(YamlNode, YamlNode)], col: usize, mut lead: Option<String>) {
        for (key, value) in entries {
            self.comment_lines(&key.comments().head, lead_column(&lead, col));
            match lead.take() {
                Some(lead) => self.out.push_str(&lead),
                None => self.spaces(col),
            }
            self.out.push_str(&key_text(key));
            self.out.push(':');
            self.value(value, col, " ", key.comments().line.as_deref());
        }
    }

    fn sequence(&mut self, items: &[YamlNode], col: usize, mut lead: Option<String>) {
        for item in items {
            self.comment_lines(&item.comments().head, lead_column(&lead, col));
            let mut prefix = lead.take().unwrap_or_else(|| " ".repeat(col));
            prefix.push_str("- ");

            if is_block_collection(item) && properties(item).is_empty() {
                self.block(item, col + 2, Some(prefix));
            } else {
                self.out.push_str(prefix.trim_end());
                self.value(item, col, " ", None);
            }
        }
    }

    /// Writes a node that follows an indicator (`key:` or `-`) on the current line.
    fn value(&mut self, node: &YamlNode, parent_col: usize, sep: &str, key_comment: Option<&str>) {
        let props = properties(node);
        let comments = [key_comment, node.comments().line.as_deref()];

        if is_block_collection(node) {
            if !props.is_empty() {
                self.out.push_str(sep);
                self.out.push_str(&props);
            }
            self.end_line(&comments);
            self.block(node, parent_col + self.indent, None);
            return;
        }

        if let YamlValue::Scalar(scalar) = node.value() {
            if scalar.is_block() {
                self.block_scalar(scalar, &props, parent_col, sep, &comments);
                return;
            }
        }

        let text = inline(node);
        if !text.is_empty() {
            self.out.push_str(sep);
            self.out.push_str(&text);
        }
        self.end_line(&comments);
    }

    fn block_scalar(
        &mut self,
        scalar: &Scalar,
        props: &str,
        parent_col: usize,
        sep: &str,
        comments: &[Option<&str>],
    ) {
        let text = scalar.as_str();
        let body = text.trim_end_matches('\n');
        let newlines = text.len() - body.len();
        let chomp = match (body.is_empty(), newlines) {
            (_, 0) => "-",
            (false, 1) => "",
            _ => "+",
        };
        let folded = scalar.style == ScalarStyle::Folded && folds_cleanly(body);
        let needs_indicator = body
            .split('\n')
            .find(|line| !line.is_empty())
            .is_some_and(|line| line.starts_with(' '));
        let step = if needs_indicator {
            self.indent.min(9)
        } else {
            self.indent
        };

        let mut header = String::from(if folded { ">" } else { "|" });
        if needs_indicator {
            header.push_str(&step.to_string());
        }
        header.push_str(chomp);

        self.out.push_str(sep);
        self.out.push_str(&with_properties(props, header));
        self.end_line(comments);

        let lines: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else if folded {
            fold_lines(body)
        } else {
            body.split('\n').collect()
        };
        for line in lines {
            if !line.is_empty() {
                self.spaces(parent_col + step);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
        // Keep chomping: every newline past the one ending the last line
        let extra = if body.is_empty() {
            newlines
        } else {
            newlines.saturating_sub(1)
        };
        for _ in 0..extra {
            self.out.push('\n');
        }
    }

    fn comment_lines(&mut self, comments: &[String], col: usize) {
        for comment in comments {
            self.spaces(col);
            self.out.push_str(comment);
            self.out.push('\n');
        }
    }

    fn end_line(&mut self, comments: &[Option<&str>]) {
        for comment in comments.iter().flatten() {
            self.out.push(' ');
            self.out.push_str(comment);
        }
        self.out.push('\n');
    }

    fn spaces(&mut self, count: usize) {
        self.out.extend(std::iter::repeat(' ').take(count));
    }
}

fn is_block_collection(node: &YamlNode) -> bool {
    node.value().is_container() && !node.is_flow() && !node.is_empty()
}

fn lead_column(lead: &Option<String>, col: usize) -> usize {
    lead.as_ref()
        .map_or(col, |lead| lead.len() - lead.trim_start().len())
}

/// Anchor and tag of a node, e.g. `&base !!map`.
fn properties(node: &YamlNode) -> String {
    let mut props = String::new();
    if let Some(anchor) = node.anchor() {
        props.push('&');
        props.push_str(anchor);
    }
    if let Some(tag) = node.tag() {
        if !props.is_empty() {
            props.push(' ');
        }
        props.push_str(tag);
    }
    props
}

fn with_properties(props: &str, body: String) -> String {
    match (props.is_empty(), body.is_empty()) {
        (true, _) => body,
        (false, true) => props.to_string(),
        (false, false) => format!("{} {}", props, body),
    }
}

fn key_text(key: &YamlNode) -> String {
    let body = match key.value() {
        YamlValue::Scalar(scalar) => scalar_inline(scalar, true),
        // `*name:` would read the colon as part of the alias name
        YamlValue::Alias(name) => format!("*{} ", name),
        _ => return inline(key),
    };
    with_properties(&properties(key), body)
}

/// Single-line rendering of a node, in flow style for collections.
fn inline(node: &YamlNode) -> String {
    let body = match node.value() {
        YamlValue::Scalar(scalar) => scalar_inline(scalar, false),
        YamlValue::Alias(name) => format!("*{}", name),
        YamlValue::Mapping(entries) => {
            let pairs: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}: {}", key_text(key), inline(value)))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
        YamlValue::Sequence(items) => {
            let items: Vec<String> = items.iter().map(inline).collect();
            format!("[{}]", items.join(", "))
        }
    };
    with_properties(&properties(node), body)
}

fn scalar_inline(scalar: &Scalar, is_key: bool) -> String {
    let text = scalar.as_str();
    match scalar.style {
        ScalarStyle::Plain if is_key && text.is_empty() => "~".to_string(),
        ScalarStyle::Plain if !text.contains('\n') => text.to_string(),
        ScalarStyle::SingleQuoted if !text.contains('\n') => {
            format!("'{}'", text.replace('\'', "''"))
        }
        _ => double_quoted(text),
    }
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() || c == '\u{feff}' => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{:04X}", code));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether folded style can reproduce the text: no leading line break and no
/// line starting with whitespace.
fn folds_cleanly(body: &str) -> bool {
    !body.starts_with('\n')
        && body
            .split('\n')
            .all(|line| !line.starts_with(' ') && !line.starts_with('\t'))
}

/// Lays text out for folded style, where a single line break folds into a
/// space and each empty line stands for one newline.
fn fold_lines(body: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut previous: Option<&str> = None;
    for line in body.split('\n') {
        if previous.is_some_and(|prev| !prev.is_empty()) {
            lines.push("");
        }
        lines.push(line);
        previous = Some(line);
    }
    lines
}
