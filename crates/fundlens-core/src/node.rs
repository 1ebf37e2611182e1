//! Schema-free document tree.
//!
//! Extraction engines emit nested JSON whose shape depends on the document
//! type, so the tree is a recursive sum type instead of a fixed struct.
//! Containers sit behind [`Arc`] so that cloning a tree is shallow and an
//! edit only rebuilds the nodes on its path.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Keyed level of a document tree, in source key order.
pub type Mapping = IndexMap<String, Node>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// A node of a document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Plain value (also the shape of a legacy field)
    Scalar(Scalar),
    /// Nested section or `{value, page, bbox}` wrapper
    Mapping(Arc<Mapping>),
    /// Tabular rows
    Sequence(Arc<Vec<Node>>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Scalar(Scalar::Null)
    }
}

impl Node {
    /// An empty mapping.
    pub fn mapping() -> Self {
        Node::Mapping(Arc::default())
    }

    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(rows) => Some(rows),
            _ => None,
        }
    }

    /// Child under `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Whether two nodes share the same container allocation.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Mapping(a), Node::Mapping(b)) => Arc::ptr_eq(a, b),
            (Node::Sequence(a), Node::Sequence(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Array(arr) => {
                Node::Sequence(Arc::new(arr.into_iter().map(Node::from).collect()))
            }
            Value::Object(obj) => Node::Mapping(Arc::new(
                obj.into_iter().map(|(k, v)| (k, Node::from(v))).collect(),
            )),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Scalar(s) => Value::from(s.clone()),
            Node::Sequence(rows) => Value::Array(rows.iter().map(Value::from).collect()),
            Node::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::from(&node)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
            Scalar::String(s) => Value::String(s),
        }
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Node::Scalar(s)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(Arc::new(map))
    }
}

impl From<Vec<Node>> for Node {
    fn from(rows: Vec<Node>) -> Self {
        Node::Sequence(Arc::new(rows))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Number(i.into())
    }
}

impl From<u64> for Scalar {
    fn from(u: u64) -> Self {
        Scalar::Number(u.into())
    }
}

impl From<f64> for Scalar {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Scalar::Null, Scalar::Number)
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(s) => s.serialize(serializer),
            Node::Sequence(rows) => {
                let mut seq = serializer.serialize_seq(Some(rows.len()))?;
                for row in rows.iter() {
                    seq.serialize_element(row)?;
                }
                seq.end()
            }
            Node::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Scalar::Null),
            Value::Bool(b) => Ok(Scalar::Bool(b)),
            Value::Number(n) => Ok(Scalar::Number(n)),
            Value::String(s) => Ok(Scalar::String(s)),
            other => Err(serde::de::Error::custom(format!(
                "expected a scalar field value, found {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_shapes() {
        let node = Node::from(json!({"a": 1, "b": [true, null], "c": {"d": "x"}}));
        let map = node.as_mapping().unwrap();
        assert_eq!(map.get("a"), Some(&Node::Scalar(Scalar::from(1i64))));
        assert_eq!(node.get("b").and_then(Node::as_sequence).map(<[Node]>::len), Some(2));
        assert_eq!(
            node.get("c").and_then(|c| c.get("d")),
            Some(&Node::Scalar(Scalar::from("x")))
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let node = Node::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let keys: Vec<&str> = node.as_mapping().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }

    #[test]
    fn test_back_to_value() {
        let original = json!({
            "fees": {"management_fee": {"value": "2%", "page": 3, "bbox": [1, 2, 3, 4]}}
        });
        let node = Node::from(original.clone());
        assert_eq!(Value::from(&node), original);
    }

    #[test]
    fn test_deserialize() {
        let node: Node = serde_json::from_str(r#"{"fund_name": "ABC Fund"}"#).unwrap();
        assert_eq!(node.get("fund_name"), Some(&Node::Scalar(Scalar::from("ABC Fund"))));
    }

    #[test]
    fn test_scalar_rejects_containers() {
        assert!(serde_json::from_str::<Scalar>("[1]").is_err());
        assert_eq!(serde_json::from_str::<Scalar>("1.5").unwrap(), Scalar::from(1.5));
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Null.to_string(), "");
        assert_eq!(Scalar::from("2%").to_string(), "2%");
        assert_eq!(Scalar::from(15i64).to_string(), "15");
        assert_eq!(Scalar::from(true).to_string(), "true");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(Scalar::from(f64::NAN), Scalar::Null);
    }

    #[test]
    fn test_clone_shares_containers() {
        let node = Node::from(json!({"a": {"b": 1}}));
        let copy = node.clone();
        assert!(node.ptr_eq(&copy));
    }
}
