//! Type definitions for field paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validate::{validate_field_path, validate_steps, PathError, SEPARATOR};

/// A single key of a field path.
pub type PathStep = String;

/// A validated dotted path addressing one field of a document tree.
///
/// A path always has at least one key; the last key is the leaf and the
/// preceding keys name the mapping containers walked to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    parents: Vec<PathStep>,
    leaf: PathStep,
}

impl FieldPath {
    /// Parse a dotted path such as `fees.management_fee`.
    ///
    /// Empty paths and empty keys are rejected rather than read as a literal
    /// `""` key.
    ///
    /// # Example
    ///
    /// ```
    /// use fundlens_path::FieldPath;
    ///
    /// let path = FieldPath::parse("fees.management_fee").unwrap();
    /// assert_eq!(path.leaf(), "management_fee");
    /// assert_eq!(path.parents(), ["fees".to_string()]);
    /// assert!(FieldPath::parse("fees.").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self, PathError> {
        validate_field_path(path)?;
        let mut steps: Vec<PathStep> = path.split(SEPARATOR).map(str::to_owned).collect();
        let leaf = steps.pop().ok_or(PathError::Empty)?;
        Ok(Self {
            parents: steps,
            leaf,
        })
    }

    /// Build a path from individual keys.
    pub fn from_steps<I, S>(steps: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<PathStep>,
    {
        let mut steps: Vec<PathStep> = steps.into_iter().map(Into::into).collect();
        validate_steps(steps.iter().map(String::as_str))?;
        let leaf = steps.pop().ok_or(PathError::Empty)?;
        Ok(Self {
            parents: steps,
            leaf,
        })
    }

    /// Keys of the containers above the leaf, outermost first.
    pub fn parents(&self) -> &[PathStep] {
        &self.parents
    }

    /// The last key.
    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    /// All keys, outermost first.
    pub fn steps(&self) -> impl Iterator<Item = &str> + '_ {
        self.parents
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.leaf.as_str()))
    }

    /// Number of keys.
    pub fn depth(&self) -> usize {
        self.parents.len() + 1
    }

    /// The path of the enclosing container, `None` for a top-level key.
    pub fn parent(&self) -> Option<FieldPath> {
        let mut parents = self.parents.clone();
        let leaf = parents.pop()?;
        Some(Self { parents, leaf })
    }

    /// The first `depth` keys of this path.
    pub fn prefix(&self, depth: usize) -> Option<FieldPath> {
        if depth == 0 || depth > self.depth() {
            return None;
        }
        Self::from_steps(self.steps().take(depth)).ok()
    }

    /// Append a key below the current leaf.
    pub fn join(&self, key: &str) -> Result<FieldPath, PathError> {
        let mut steps: Vec<PathStep> = self.steps().map(str::to_owned).collect();
        steps.push(key.to_owned());
        Self::from_steps(steps)
    }

    /// Check if this path lies strictly below `parent`.
    pub fn is_child_of(&self, parent: &FieldPath) -> bool {
        if parent.depth() >= self.depth() {
            return false;
        }
        parent.steps().zip(self.steps()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parent in &self.parents {
            f.write_str(parent)?;
            write!(f, "{SEPARATOR}")?;
        }
        f.write_str(&self.leaf)
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}
