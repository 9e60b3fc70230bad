//! YAML parsing with style and comment preservation.
//!
//! This module turns YAML text into a [`YamlDocument`]. It drives the `yaml-rust2`
//! event parser directly instead of loading into `yaml_rust2::Yaml`, because the
//! loaded representation resolves scalars (`0x1F` becomes `31`), expands aliases and
//! forgets quoting styles. Building the tree from events keeps every scalar's text and
//! style, keeps anchors and aliases by name, and records source lines so comments can
//! be attached to the nodes they describe.
//!
//! Only the first document of a multi-document stream is loaded.
//!
//! # Example
//!
//! ```
//! use yays::document::parser::parse_document;
//!
//! let doc = parse_document("name: Alice\nage: 30\n").unwrap();
//! assert_eq!(doc.root().keys(), vec!["name", "age"]);
//! ```

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use super::comments::CommentIndex;
use super::node::{Scalar, ScalarStyle, YamlNode, YamlValue};
use super::tree::YamlDocument;

/// Parses a YAML string into a `YamlDocument`.
///
/// # Errors
///
/// Returns an error if the text is not valid YAML or contains no document.
pub fn parse_document(source: &str) -> Result<YamlDocument> {
    let mut builder = TreeBuilder::new(source);
    let mut parser = Parser::new_from_str(source);
    parser
        .load(&mut builder, false)
        .context("Failed to parse YAML")?;
    builder.finish()
}

/// A collection under construction.
struct Frame {
    node: YamlNode,
    pending_key: Option<YamlNode>,
}

/// Receives parser events and assembles the node tree.
struct TreeBuilder {
    chars: Vec<char>,
    comments: CommentIndex,
    anchors: HashMap<usize, String>,
    stack: Vec<Frame>,
    root: Option<YamlNode>,
    flow_depth: usize,
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        match ev {
            Event::Scalar(text, style, anchor_id, tag) => {
                let tag = tag.as_ref().map(|t| format_tag(&t.handle, &t.suffix));
                let style = scalar_style(style);
                // Empty values are reported as a plain `~` with no `~` in the source
                let text = if style == ScalarStyle::Plain
                    && text == "~"
                    && self.chars.get(mark.index()) != Some(&'~')
                {
                    String::new()
                } else {
                    text
                };
                let scalar = Scalar::new(text, style);
                let mut node = YamlNode::new(YamlValue::Scalar(scalar));
                self.decorate(&mut node, anchor_id, tag, &mark, false);
                self.push_node(node);
            }
            Event::SequenceStart(anchor_id, tag) => {
                let tag = tag.as_ref().map(|t| format_tag(&t.handle, &t.suffix));
                self.open(YamlValue::Sequence(Vec::new()), '[', anchor_id, tag, &mark);
            }
            Event::MappingStart(anchor_id, tag) => {
                let tag = tag.as_ref().map(|t| format_tag(&t.handle, &t.suffix));
                self.open(YamlValue::Mapping(Vec::new()), '{', anchor_id, tag, &mark);
            }
            Event::SequenceEnd | Event::MappingEnd => self.close(&mark),
            Event::Alias(anchor_id) => {
                let name = self
                    .anchors
                    .get(&anchor_id)
                    .cloned()
                    .unwrap_or_else(|| generated_anchor(anchor_id));
                let mut node = YamlNode::new(YamlValue::Alias(name));
                self.decorate(&mut node, 0, None, &mark, false);
                self.push_node(node);
            }
            _ => {}
        }
    }
}

impl TreeBuilder {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            comments: CommentIndex::scan(source),
            anchors: HashMap::new(),
            stack: Vec::new(),
            root: None,
            flow_depth: 0,
        }
    }

    /// Whether the next node starts a new entry: the root, a mapping key or a
    /// sequence item. Only those claim the comments written above them.
    fn starts_entry(&self) -> bool {
        if self.flow_depth > 0 {
            return false;
        }
        match self.stack.last() {
            None => self.root.is_none(),
            Some(frame) => frame.node.value.is_sequence() || frame.pending_key.is_none(),
        }
    }

    /// Records the node's line, head comments, anchor and tag. `block` marks a
    /// block collection, whose start event sits inside its first key or item.
    fn decorate(
        &mut self,
        node: &mut YamlNode,
        anchor_id: usize,
        tag: Option<String>,
        mark: &Marker,
        block: bool,
    ) {
        node.metadata.line = Some(mark.line());
        if self.starts_entry() {
            // A block root only keeps a header split off by a blank line; the
            // comments right above the first entry belong to that entry.
            node.comments.head = if block && self.stack.is_empty() {
                self.comments.take_header(mark.line())
            } else {
                self.comments.take_before(mark.line())
            };
        }
        if anchor_id > 0 {
            let index = if block {
                self.token_start(mark.index())
            } else {
                mark.index()
            };
            let name = self
                .recover_anchor(index)
                .unwrap_or_else(|| generated_anchor(anchor_id));
            self.anchors.insert(anchor_id, name.clone());
            node.anchor = Some(name);
        }
        node.tag = tag;
    }

    fn open(
        &mut self,
        value: YamlValue,
        flow_open: char,
        anchor_id: usize,
        tag: Option<String>,
        mark: &Marker,
    ) {
        let flow = self.chars.get(mark.index()) == Some(&flow_open) || self.flow_depth > 0;
        let mut node = YamlNode::new(value);
        self.decorate(&mut node, anchor_id, tag, mark, !flow);
        if flow {
            node.metadata.flow = true;
            self.flow_depth += 1;
        }
        self.stack.push(Frame {
            node,
            pending_key: None,
        });
    }

    fn close(&mut self, mark: &Marker) {
        if let Some(Frame { mut node, .. }) = self.stack.pop() {
            if node.metadata.flow {
                node.metadata.end_line = Some(mark.line());
                self.flow_depth = self.flow_depth.saturating_sub(1);
            }
            self.push_node(node);
        }
    }

    fn push_node(&mut self, node: YamlNode) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(frame) => match &mut frame.node.value {
                YamlValue::Sequence(items) => items.push(node),
                YamlValue::Mapping(entries) => match frame.pending_key.take() {
                    Some(key) => entries.push((key, node)),
                    None => frame.pending_key = Some(node),
                },
                _ => {}
            },
        }
    }

    /// Start of the source token that contains the character before `index`.
    fn token_start(&self, index: usize) -> usize {
        let mut start = index.min(self.chars.len());
        while start > 0 && !self.chars[start - 1].is_whitespace() {
            start -= 1;
        }
        start
    }

    /// Recovers an anchor's name from the source.
    ///
    /// The parser reports anchors by number only. The `&name` token sits either at
    /// the node's position or before it, possibly followed by a tag.
    fn recover_anchor(&self, index: usize) -> Option<String> {
        if self.chars.get(index) == Some(&'&') {
            let name: String = self.chars[index + 1..]
                .iter()
                .take_while(|c| !c.is_whitespace() && !matches!(**c, ',' | '[' | ']' | '{' | '}'))
                .collect();
            return (!name.is_empty()).then_some(name);
        }

        let mut end = index.min(self.chars.len());
        // The token right before the node may be a tag; the anchor precedes it.
        for _ in 0..2 {
            while end > 0 && self.chars[end - 1].is_whitespace() {
                end -= 1;
            }
            let mut start = end;
            while start > 0
                && !self.chars[start - 1].is_whitespace()
                && !matches!(self.chars[start - 1], '[' | '{' | ',')
            {
                start -= 1;
            }
            let token: String = self.chars[start..end].iter().collect();
            if let Some(name) = token.strip_prefix('&') {
                return (!name.is_empty()).then(|| name.to_string());
            }
            if !token.starts_with('!') {
                return None;
            }
            end = start;
        }
        None
    }

    fn finish(mut self) -> Result<YamlDocument> {
        let Some(mut root) = self.root.take() else {
            bail!("document is empty");
        };
        attach_trailing_comments(&mut root, &mut self.comments);
        let foot = self.comments.take_rest();
        Ok(YamlDocument::with_foot_comments(root, foot))
    }
}

fn generated_anchor(anchor_id: usize) -> String {
    format!("anchor{}", anchor_id)
}

fn scalar_style(style: TScalarStyle) -> ScalarStyle {
    match style {
        TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        TScalarStyle::Literal => ScalarStyle::Literal,
        TScalarStyle::Folded => ScalarStyle::Folded,
        _ => ScalarStyle::Plain,
    }
}

/// Renders a resolved tag back into its shorthand form.
fn format_tag(handle: &str, suffix: &str) -> String {
    match handle {
        "tag:yaml.org,2002:" => format!("!!{}", suffix),
        "" if suffix.starts_with('!') => suffix.to_string(),
        "" => format!("!<{}>", suffix),
        _ if handle.starts_with('!') => format!("{}{}", handle, suffix),
        _ => format!("!<{}{}>", handle, suffix),
    }
}

/// Line a trailing comment would be attached by: flow collections are treated as
/// one unit ending on their closing bracket, everything else as a leaf.
fn trailing_line(node: &YamlNode) -> Option<usize> {
    if node.metadata.flow {
        node.metadata.end_line
    } else {
        node.metadata.line
    }
}

fn is_comment_leaf(node: &YamlNode) -> bool {
    node.metadata.flow || !node.value.is_container()
}

fn collect_leaf_lines(node: &YamlNode, lines: &mut Vec<Option<usize>>) {
    if is_comment_leaf(node) {
        lines.push(trailing_line(node));
        return;
    }
    match &node.value {
        YamlValue::Mapping(entries) => {
            for (key, value) in entries {
                collect_leaf_lines(key, lines);
                collect_leaf_lines(value, lines);
            }
        }
        YamlValue::Sequence(items) => {
            for item in items {
                collect_leaf_lines(item, lines);
            }
        }
        _ => {}
    }
}

/// Gives each trailing comment to the last leaf that starts on its line.
fn attach_trailing_comments(root: &mut YamlNode, comments: &mut CommentIndex) {
    let mut lines = Vec::new();
    collect_leaf_lines(root, &mut lines);

    let mut last_on_line = HashMap::new();
    for (ordinal, line) in lines.iter().enumerate() {
        if let Some(line) = line {
            last_on_line.insert(*line, ordinal);
        }
    }

    let mut ordinal = 0;
    assign_trailing(root, &mut ordinal, &last_on_line, comments);
}

fn assign_trailing(
    node: &mut YamlNode,
    ordinal: &mut usize,
    last_on_line: &HashMap<usize, usize>,
    comments: &mut CommentIndex,
) {
    if is_comment_leaf(node) {
        if let Some(line) = trailing_line(node) {
            if last_on_line.get(&line) == Some(&*ordinal) {
                node.comments.line = comments.take_trailing(line);
            }
        }
        *ordinal += 1;
        return;
    }
    match &mut node.value {
        YamlValue::Mapping(entries) => {
            for (key, value) in entries {
                assign_trailing(key, ordinal, last_on_line, comments);
                assign_trailing(value, ordinal, last_on_line, comments);
            }
        }
        YamlValue::Sequence(items) => {
            for item in items {
                assign_trailing(item, ordinal, last_on_line, comments);
            }
        }
        _ => {}
    }
}
