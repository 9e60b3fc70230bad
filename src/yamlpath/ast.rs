//! Step types for parsed YAML paths.

use std::fmt;

/// One unit of path navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Named child of a mapping (`.name`). Against a sequence, a numeric name is
    /// used as an element index.
    Key(String),
    /// Sequence element (`[0]`)
    Index(usize),
    /// All elements of a sequence or all values of a mapping (`[*]`)
    Wildcard,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(name) => write!(f, "{}", name),
            Step::Index(index) => write!(f, "[{}]", index),
            Step::Wildcard => write!(f, "[*]"),
        }
    }
}

/// A parsed path: the ordered steps from the document root to the targets.
///
/// An empty step list addresses the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YamlPath {
    pub steps: Vec<Step>,
}

impl YamlPath {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Returns true if the path addresses the document root.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns true if any step fans out over several nodes.
    pub fn has_wildcard(&self) -> bool {
        self.steps.iter().any(|step| matches!(step, Step::Wildcard))
    }
}

impl fmt::Display for YamlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str(".");
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Key(_) if i > 0 => write!(f, ".{}", step)?,
                Step::Index(_) | Step::Wildcard if i == 0 => write!(f, ".{}", step)?,
                _ => write!(f, "{}", step)?,
            }
        }
        Ok(())
    }
}
