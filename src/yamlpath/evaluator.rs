use super::ast::{Step, YamlPath};
use super::error::ResolveError;
use super::parser::parse_index;
use crate::document::node::{YamlNode, YamlValue};

/// A node addressed by a resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Index path from the root (pair index for mappings, element index for sequences)
    pub path: Vec<usize>,
    /// Human-readable location, e.g. `servers[0].roles`
    pub location: String,
}

impl Target {
    fn root() -> Self {
        Target {
            path: Vec::new(),
            location: ".".to_string(),
        }
    }

    fn key(&self, index: usize, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(index);
        let location = if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.location, name)
        };
        Target { path, location }
    }

    fn element(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(index);
        let location = if self.path.is_empty() {
            format!(".[{}]", index)
        } else {
            format!("{}[{}]", self.location, index)
        };
        Target { path, location }
    }
}

/// Resolves paths against a node tree.
pub struct Evaluator<'a> {
    root: &'a YamlNode,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a YamlNode) -> Self {
        Evaluator { root }
    }

    /// Resolves a path into the ordered set of targets it addresses.
    ///
    /// The working set starts with the root. Each step transforms every node of the
    /// working set independently and the results are concatenated, so targets come
    /// out in (outer node, inner expansion) order. The first node a step does not fit
    /// fails the whole resolution.
    pub fn resolve(&self, path: &YamlPath) -> Result<Vec<Target>, ResolveError> {
        Ok(self
            .resolve_with_nodes(path)?
            .into_iter()
            .map(|(target, _)| target)
            .collect())
    }

    /// Resolves a path and returns the addressed nodes.
    pub fn resolve_nodes(&self, path: &YamlPath) -> Result<Vec<&'a YamlNode>, ResolveError> {
        Ok(self
            .resolve_with_nodes(path)?
            .into_iter()
            .map(|(_, node)| node)
            .collect())
    }

    fn resolve_with_nodes(
        &self,
        path: &YamlPath,
    ) -> Result<Vec<(Target, &'a YamlNode)>, ResolveError> {
        let mut current = vec![(Target::root(), self.root)];

        for step in &path.steps {
            let mut next = Vec::new();
            for (target, node) in &current {
                self.apply_step(target, *node, step, &mut next)?;
            }
            current = next;
        }

        Ok(current)
    }

    fn apply_step(
        &self,
        target: &Target,
        node: &'a YamlNode,
        step: &Step,
        out: &mut Vec<(Target, &'a YamlNode)>,
    ) -> Result<(), ResolveError> {
        match step {
            Step::Key(name) => out.push(self.find_child(target, node, name)?),
            Step::Index(index) => match node.value() {
                YamlValue::Sequence(items) => out.push(element(target, items, *index)?),
                _ => {
                    return Err(ResolveError::NotASequence {
                        location: target.location.clone(),
                        index: *index,
                        kind: node.kind(),
                    })
                }
            },
            Step::Wildcard => match node.value() {
                YamlValue::Sequence(items) => out.extend(
                    items
                        .iter()
                        .enumerate()
                        .map(|(idx, item)| (target.element(idx), item)),
                ),
                YamlValue::Mapping(entries) => {
                    out.extend(entries.iter().enumerate().map(|(idx, (key, value))| {
                        (target.key(idx, &key_label(key)), value)
                    }))
                }
                _ => {
                    return Err(ResolveError::NotIterable {
                        location: target.location.clone(),
                        kind: node.kind(),
                    })
                }
            },
        }
        Ok(())
    }

    /// Looks up a key step.
    ///
    /// Mappings are searched by key text, first match in insertion order. A sequence
    /// accepts the key when it reads as a non-negative integer and treats it as an
    /// element index, so `servers.0.roles` and `servers[0].roles` address the same node.
    fn find_child(
        &self,
        target: &Target,
        node: &'a YamlNode,
        name: &str,
    ) -> Result<(Target, &'a YamlNode), ResolveError> {
        match node.value() {
            YamlValue::Mapping(entries) => entries
                .iter()
                .enumerate()
                .find(|(_, (key, _))| key.scalar_text() == Some(name))
                .map(|(idx, (_, value))| (target.key(idx, name), value))
                .ok_or_else(|| ResolveError::KeyNotFound {
                    location: target.location.clone(),
                    key: name.to_string(),
                }),
            YamlValue::Sequence(items) => match parse_index(name) {
                Some(index) => element(target, items, index),
                None => Err(ResolveError::NotAMapping {
                    location: target.location.clone(),
                    key: name.to_string(),
                    kind: node.kind(),
                }),
            },
            _ => Err(ResolveError::NotAMapping {
                location: target.location.clone(),
                key: name.to_string(),
                kind: node.kind(),
            }),
        }
    }
}

fn element<'a>(
    target: &Target,
    items: &'a [YamlNode],
    index: usize,
) -> Result<(Target, &'a YamlNode), ResolveError> {
    items
        .get(index)
        .map(|item| (target.element(index), item))
        .ok_or_else(|| ResolveError::IndexOutOfRange {
            location: target.location.clone(),
            index,
            len: items.len(),
        })
}

fn key_label(key: &YamlNode) -> String {
    match key.value() {
        YamlValue::Scalar(scalar) => scalar.text.clone(),
        YamlValue::Alias(name) => format!("*{}", name),
        _ => "?".to_string(),
    }
}
