//! Page highlight locator.
//!
//! Walks a whole document tree and collects every located field on one page,
//! ready for an overlay renderer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::{debug, trace};

use crate::field::{is_reserved_key, resolve_location, VALUE_KEY};
use crate::node::Node;

/// Bounding box `[ymin, xmin, ymax, xmax]` on the 0–1000 normalized grid.
///
/// Coordinates are kept exactly as extracted; scaling to a concrete image is
/// the overlay's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BBox(pub [Number; 4]);

impl BBox {
    pub fn new(ymin: u32, xmin: u32, ymax: u32, xmax: u32) -> Self {
        BBox([ymin.into(), xmin.into(), ymax.into(), xmax.into()])
    }

    pub fn ymin(&self) -> f64 {
        coord(&self.0[0])
    }

    pub fn xmin(&self) -> f64 {
        coord(&self.0[1])
    }

    pub fn ymax(&self) -> f64 {
        coord(&self.0[2])
    }

    pub fn xmax(&self) -> f64 {
        coord(&self.0[3])
    }
}

fn coord(n: &Number) -> f64 {
    n.as_f64().unwrap_or_default()
}

/// Display-list key of a highlight, unique within one [`locate`] call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HighlightId {
    pub label: String,
    pub ordinal: usize,
}

impl fmt::Display for HighlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label, self.ordinal)
    }
}

impl From<HighlightId> for String {
    fn from(id: HighlightId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for HighlightId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (label, ordinal) = value
            .rsplit_once('#')
            .ok_or_else(|| format!("highlight id without ordinal: {value}"))?;
        let ordinal = ordinal
            .parse()
            .map_err(|_| format!("highlight id with invalid ordinal: {value}"))?;
        Ok(HighlightId {
            label: label.to_owned(),
            ordinal,
        })
    }
}

/// A located field resolved for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: HighlightId,
    pub bbox: BBox,
    /// Key that reached the field, e.g. `fund_name`
    pub label: String,
    /// The field's `value`; null when the wrapper has none
    pub value: Node,
}

/// Collect every located field of `tree` that sits on `page`.
///
/// A node qualifies when it is a mapping whose `page` equals `page` and whose
/// `bbox` is exactly four numbers. Traversal descends into every key except
/// `value`, `page` and `bbox`, and into every row of a sequence. Rows are not
/// labels: a field inside a row is labelled by its own key, and a row that is
/// itself a located field takes the key of its sequence.
///
/// Callers must not rely on the order of the result.
///
/// # Example
///
/// ```
/// use fundlens_core::{locate, Node};
/// use serde_json::json;
///
/// let tree = Node::from(json!({
///     "fees": {"management_fee": {"value": "2%", "page": 3, "bbox": [100, 100, 150, 400]}}
/// }));
///
/// let highlights = locate(&tree, 3);
/// assert_eq!(highlights.len(), 1);
/// assert_eq!(highlights[0].label, "management_fee");
/// assert!(locate(&tree, 1).is_empty());
/// ```
pub fn locate(tree: &Node, page: u64) -> Vec<Highlight> {
    let mut locator = HighlightLocator::new(page);
    locator.visit(tree, "");
    debug!(page, count = locator.out.len(), "located highlights");
    locator.out
}

struct HighlightLocator {
    page: u64,
    out: Vec<Highlight>,
}

impl HighlightLocator {
    fn new(page: u64) -> Self {
        Self {
            page,
            out: Vec::new(),
        }
    }

    fn visit(&mut self, node: &Node, label: &str) {
        match node {
            Node::Scalar(_) => {}
            Node::Sequence(rows) => {
                for row in rows.iter() {
                    self.visit(row, label);
                }
            }
            Node::Mapping(map) => {
                self.check(node, label);
                for (key, child) in map.iter() {
                    if !is_reserved_key(key) {
                        self.visit(child, key);
                    }
                }
            }
        }
    }

    fn check(&mut self, node: &Node, label: &str) {
        let Some(location) = resolve_location(node) else {
            return;
        };
        if !location.is_on_page(self.page) {
            return;
        }
        let Some(bbox) = location.bbox() else {
            trace!(label, page = self.page, "skipping field with malformed bbox");
            return;
        };
        let value = node.get(VALUE_KEY).cloned().unwrap_or_else(Node::null);
        self.out.push(Highlight {
            id: HighlightId {
                label: label.to_owned(),
                ordinal: self.out.len(),
            },
            bbox: BBox(bbox.map(Number::clone)),
            label: label.to_owned(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn tree(v: serde_json::Value) -> Node {
        Node::from(v)
    }

    #[test]
    fn test_single_field() {
        let t = tree(json!({"fund_name": {"value": "ABC", "page": 1, "bbox": [0, 0, 10, 10]}}));
        let hs = locate(&t, 1);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].label, "fund_name");
        assert_eq!(hs[0].value, tree(json!("ABC")));
        assert_eq!(hs[0].bbox, BBox::new(0, 0, 10, 10));
    }

    #[test]
    fn test_other_page_is_empty() {
        let t = tree(json!({"fund_name": {"value": "ABC", "page": 1, "bbox": [0, 0, 10, 10]}}));
        assert!(locate(&t, 2).is_empty());
    }

    #[test]
    fn test_legacy_scalars_ignored() {
        let t = tree(json!({"fund_name": "ABC", "fund_code": 12, "notes": null}));
        assert!(locate(&t, 1).is_empty());
    }

    #[test]
    fn test_malformed_bbox_skipped() {
        let t = tree(json!({
            "short": {"value": 1, "page": 1, "bbox": [0, 0, 10]},
            "long": {"value": 2, "page": 1, "bbox": [0, 0, 10, 10, 10]},
            "text": {"value": 3, "page": 1, "bbox": "0,0,10,10"},
            "good": {"value": 4, "page": 1, "bbox": [5, 5, 6, 6]}
        }));
        let hs = locate(&t, 1);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].label, "good");
    }

    #[test]
    fn test_missing_value_is_null() {
        let t = tree(json!({"stamp": {"page": 2, "bbox": [0, 0, 1, 1]}}));
        let hs = locate(&t, 2);
        assert_eq!(hs.len(), 1);
        assert!(hs[0].value.is_null());
    }

    #[test]
    fn test_zero_area_bbox_kept() {
        let t = tree(json!({"x": {"value": "", "page": 1, "bbox": [10, 10, 10, 10]}}));
        assert_eq!(locate(&t, 1).len(), 1);
    }

    #[test]
    fn test_nested_value_object_not_double_reported() {
        let t = tree(json!({
            "address": {
                "value": {"street": "1 Main", "page": 1, "bbox": [9, 9, 9, 9]},
                "page": 1,
                "bbox": [1, 2, 3, 4]
            }
        }));
        let hs = locate(&t, 1);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].label, "address");
        assert_eq!(hs[0].bbox, BBox::new(1, 2, 3, 4));
    }

    #[test]
    fn test_descends_into_non_reserved_keys_of_wrapper() {
        let t = tree(json!({
            "fee": {
                "value": "1%",
                "page": 1,
                "bbox": [1, 1, 2, 2],
                "note": {"value": "annual", "page": 1, "bbox": [3, 3, 4, 4]}
            }
        }));
        let labels: HashSet<String> = locate(&t, 1).into_iter().map(|h| h.label).collect();
        assert_eq!(labels, HashSet::from(["fee".to_string(), "note".to_string()]));
    }

    #[test]
    fn test_sequence_rows() {
        let t = tree(json!({
            "portfolio": [
                {
                    "ma_ck": {"value": "VNM", "page": 4, "bbox": [1, 1, 2, 2]},
                    "so_luong": {"value": 100, "page": 4, "bbox": [1, 3, 2, 4]}
                },
                {
                    "ma_ck": {"value": "FPT", "page": 4, "bbox": [3, 1, 4, 2]},
                    "so_luong": {"value": 250, "page": 5, "bbox": [3, 3, 4, 4]}
                }
            ]
        }));
        let hs = locate(&t, 4);
        assert_eq!(hs.len(), 3);
        assert!(hs.iter().all(|h| h.label == "ma_ck" || h.label == "so_luong"));
        assert_eq!(locate(&t, 5).len(), 1);
    }

    #[test]
    fn test_row_that_is_itself_a_field() {
        let t = tree(json!({
            "signatories": [{"value": "A. Nguyen", "page": 9, "bbox": [0, 0, 5, 5]}]
        }));
        let hs = locate(&t, 9);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].label, "signatories");
    }

    #[test]
    fn test_ids_unique() {
        let t = tree(json!({
            "a": {"x": {"value": 1, "page": 1, "bbox": [0, 0, 1, 1]}},
            "b": {"x": {"value": 2, "page": 1, "bbox": [0, 0, 1, 1]}}
        }));
        let hs = locate(&t, 1);
        let ids: HashSet<String> = hs.iter().map(|h| h.id.to_string()).collect();
        assert_eq!(ids.len(), hs.len());
    }

    #[test]
    fn test_page_as_float() {
        let t = tree(json!({"x": {"value": 1, "page": 3.0, "bbox": [0, 0, 1, 1]}}));
        assert_eq!(locate(&t, 3).len(), 1);
    }

    #[test]
    fn test_scalar_root() {
        assert!(locate(&tree(json!("just text")), 1).is_empty());
        assert!(locate(&tree(json!(null)), 1).is_empty());
    }

    #[test]
    fn test_highlight_id_roundtrip() {
        let id = HighlightId {
            label: "fees#1".to_string(),
            ordinal: 4,
        };
        let encoded = serde_json::to_string(&id).unwrap();
        assert_eq!(encoded, "\"fees#1#4\"");
        let decoded: HighlightId = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, id);
    }

    #[test]
    fn test_highlight_serializes_bbox_as_array() {
        let t = tree(json!({"fund_name": {"value": "ABC", "page": 1, "bbox": [0, 0, 10, 10]}}));
        let encoded = serde_json::to_value(&locate(&t, 1)[0]).unwrap();
        assert_eq!(encoded["bbox"], json!([0, 0, 10, 10]));
        assert_eq!(encoded["id"], json!("fund_name#0"));
        assert_eq!(encoded["value"], json!("ABC"));
    }
}
