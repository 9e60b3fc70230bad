//! Comment recovery from YAML source text.
//!
//! The event parser discards comments, so they are recovered with a line scanner.
//! Full-line comments are queued in source order and handed out to the next node that
//! claims them; trailing comments are indexed by line number. Blank lines are
//! remembered so a comment block split off from the first node can be told apart
//! as the document header.

use std::collections::{HashMap, VecDeque};

/// Comments found in a YAML source, keyed by 1-based line number.
#[derive(Debug, Default)]
pub struct CommentIndex {
    standalone: VecDeque<(usize, String)>,
    trailing: HashMap<usize, String>,
    blank: Vec<usize>,
}

impl CommentIndex {
    /// Scans `source` for comments, skipping quoted scalars and block scalar bodies.
    pub fn scan(source: &str) -> Self {
        let mut index = CommentIndex::default();
        // Indentation of the line that opened a block scalar still being read
        let mut block_parent: Option<usize> = None;

        for (i, raw) in source.lines().enumerate() {
            let line_no = i + 1;
            let indent = raw.len() - raw.trim_start_matches(' ').len();
            let trimmed = raw.trim();

            if let Some(parent) = block_parent {
                if trimmed.is_empty() || indent > parent {
                    continue;
                }
                block_parent = None;
            }

            if trimmed.is_empty() {
                index.blank.push(line_no);
                continue;
            }
            if trimmed.starts_with('#') {
                index.standalone.push_back((line_no, trimmed.to_string()));
                continue;
            }

            let (content, comment) = split_trailing_comment(raw);
            if let Some(comment) = comment {
                index.trailing.insert(line_no, comment.trim_end().to_string());
            }
            if opens_block_scalar(content) {
                block_parent = Some(indent);
            }
        }

        index
    }

    /// Takes every unclaimed full-line comment that appears before `line`.
    pub fn take_before(&mut self, line: usize) -> Vec<String> {
        let mut taken = Vec::new();
        while self.standalone.front().is_some_and(|(l, _)| *l < line) {
            if let Some((_, text)) = self.standalone.pop_front() {
                taken.push(text);
            }
        }
        taken
    }

    /// Takes the document header: the comments above the last blank line that
    /// precedes `line`. Nothing is taken when no blank line comes before `line`.
    pub fn take_header(&mut self, line: usize) -> Vec<String> {
        match self.blank.iter().rev().find(|blank| **blank < line) {
            Some(&blank) => self.take_before(blank),
            None => Vec::new(),
        }
    }

    /// Takes the trailing comment written on `line`, if any.
    pub fn take_trailing(&mut self, line: usize) -> Option<String> {
        self.trailing.remove(&line)
    }

    /// Takes all remaining full-line comments.
    pub fn take_rest(&mut self) -> Vec<String> {
        self.standalone.drain(..).map(|(_, text)| text).collect()
    }
}

/// Splits a line into its content and a trailing `# comment`.
///
/// A `#` only starts a comment outside quotes and after whitespace.
fn split_trailing_comment(line: &str) -> (&str, Option<&str>) {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match quote {
            Some('"') => {
                if ch == '\\' {
                    chars.next();
                } else if ch == '"' {
                    quote = None;
                }
            }
            Some(_) => {
                if ch == '\'' {
                    if matches!(chars.peek(), Some((_, '\''))) {
                        chars.next();
                    } else {
                        quote = None;
                    }
                }
            }
            None => {
                let token_start =
                    prev.map_or(true, |p| p.is_whitespace() || matches!(p, '[' | '{' | ','));
                if ch == '#' && prev.map_or(true, char::is_whitespace) {
                    return (&line[..i], Some(&line[i..]));
                }
                if (ch == '"' || ch == '\'') && token_start {
                    quote = Some(ch);
                }
            }
        }
        prev = Some(ch);
    }

    (line, None)
}

/// Returns true if the content ends in a block scalar header (`|`, `>-`, `|2+`).
fn opens_block_scalar(content: &str) -> bool {
    let token = content
        .trim_end()
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default();
    let mut chars = token.chars();
    matches!(chars.next(), Some('|') | Some('>'))
        && chars.all(|c| matches!(c, '+' | '-' | '1'..='9'))
}
