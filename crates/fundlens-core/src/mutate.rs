//! Path mutator.
//!
//! Applies an operator's edit to one field of a document tree. The input tree
//! is never touched: the result shares every subtree off the edited path with
//! the input and rebuilds only the containers on it.

use std::sync::Arc;

use fundlens_path::FieldPath;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::field::{resolve_location, Field, VALUE_KEY};
use crate::node::{Mapping, Node, Scalar};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutateError {
    #[error("document root is not a mapping")]
    RootNotMapping,
    #[error("`{path}` is a table; rows cannot be addressed by a field path")]
    SequenceInPath { path: String },
    #[error("`{path}` holds a table and cannot be replaced by a value")]
    SequenceTarget { path: String },
}

/// One operator edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edit {
    pub path: FieldPath,
    pub value: Scalar,
}

impl Edit {
    pub fn new(path: FieldPath, value: impl Into<Scalar>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

/// Read the node at `path`, walking mappings only.
pub fn get_at<'a>(tree: &'a Node, path: &FieldPath) -> Option<&'a Node> {
    let mut current = tree;
    for step in path.steps() {
        current = current.as_mapping()?.get(step)?;
    }
    Some(current)
}

/// Return a copy of `tree` with the field at `path` set to `value`.
///
/// Missing or scalar containers along the path are replaced by empty mappings.
/// A `{value, page, bbox}` wrapper at the leaf keeps its location and only its
/// `value` changes. A located mapping without `value` gains one and keeps its
/// location. Anything else at the leaf becomes the bare value.
///
/// # Errors
///
/// Fails without producing a tree when the root is not a mapping, or when a
/// table lies on or at the end of the path.
///
/// # Example
///
/// ```
/// use fundlens_core::{set_value, Node};
/// use fundlens_path::FieldPath;
/// use serde_json::{json, Value};
///
/// let tree = Node::from(json!({
///     "fund_name": {"value": "ABC", "page": 1, "bbox": [0, 0, 10, 10]}
/// }));
/// let path = FieldPath::parse("fund_name").unwrap();
///
/// let next = set_value(&tree, &path, "XYZ").unwrap();
/// assert_eq!(
///     Value::from(&next),
///     json!({"fund_name": {"value": "XYZ", "page": 1, "bbox": [0, 0, 10, 10]}})
/// );
/// ```
pub fn set_value(
    tree: &Node,
    path: &FieldPath,
    value: impl Into<Scalar>,
) -> Result<Node, MutateError> {
    let mut root = tree.clone();
    let Node::Mapping(map) = &mut root else {
        return Err(MutateError::RootNotMapping);
    };
    let mut current = Arc::make_mut(map);
    for (depth, key) in path.parents().iter().enumerate() {
        let slot = current.entry(key.clone()).or_insert_with(Node::mapping);
        current = container_mut(slot, path, depth + 1)?;
    }
    set_leaf(current, path, value.into())?;
    Ok(root)
}

/// Apply edits in order. On error no tree is produced.
pub fn apply_edits(tree: &Node, edits: &[Edit]) -> Result<Node, MutateError> {
    let mut doc = tree.clone();
    for edit in edits {
        doc = set_value(&doc, &edit.path, edit.value.clone())?;
    }
    Ok(doc)
}

fn container_mut<'a>(
    slot: &'a mut Node,
    path: &FieldPath,
    depth: usize,
) -> Result<&'a mut Mapping, MutateError> {
    match slot {
        Node::Mapping(map) => Ok(Arc::make_mut(map)),
        Node::Sequence(_) => Err(MutateError::SequenceInPath {
            path: prefix(path, depth),
        }),
        Node::Scalar(_) => {
            debug!(path = %prefix(path, depth), "creating missing container");
            *slot = Node::mapping();
            container_mut(slot, path, depth)
        }
    }
}

fn set_leaf(parent: &mut Mapping, path: &FieldPath, value: Scalar) -> Result<(), MutateError> {
    let key = path.leaf();
    let shape = parent.get(key).map(Field::of);
    match shape {
        Some(Field::Wrapped(_)) => {
            if let Some(Node::Mapping(field)) = parent.get_mut(key) {
                Arc::make_mut(field).insert(VALUE_KEY.to_owned(), value.into());
            }
        }
        Some(Field::Container(_)) if parent.get(key).and_then(resolve_location).is_some() => {
            if let Some(Node::Mapping(field)) = parent.get_mut(key) {
                Arc::make_mut(field).insert(VALUE_KEY.to_owned(), value.into());
            }
        }
        Some(Field::Sequence(_)) => {
            return Err(MutateError::SequenceTarget {
                path: path.to_string(),
            });
        }
        Some(Field::Container(map)) => {
            debug!(path = %path, keys = map.len(), "replacing section with a value");
            parent.insert(key.to_owned(), value.into());
        }
        Some(Field::Scalar(_)) | None => {
            parent.insert(key.to_owned(), value.into());
        }
    }
    Ok(())
}

fn prefix(path: &FieldPath, depth: usize) -> String {
    path.prefix(depth)
        .map_or_else(|| path.to_string(), |p| p.to_string())
}
