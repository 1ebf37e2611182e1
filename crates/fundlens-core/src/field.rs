//! Field accessor.
//!
//! Upstream extraction engines disagree on field shape: newer ones wrap every
//! value as `{value, page, bbox}`, older ones emit the bare scalar. Both may
//! appear in one tree. Everything here is infallible: a missing shape is a
//! normal case.

use serde_json::Number;

use crate::node::{Mapping, Node, Scalar};

/// Key holding the extracted value inside a wrapper.
pub const VALUE_KEY: &str = "value";
/// Key holding the 1-indexed page number inside a wrapper.
pub const PAGE_KEY: &str = "page";
/// Key holding `[ymin, xmin, ymax, xmax]` inside a wrapper.
pub const BBOX_KEY: &str = "bbox";

/// Wrapper keys that are metadata of the enclosing field, never fields themselves.
pub const RESERVED_KEYS: [&str; 3] = [VALUE_KEY, PAGE_KEY, BBOX_KEY];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Shape of a node when read as a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// Bare scalar, as produced by legacy engines
    Scalar(&'a Scalar),
    /// Mapping with a `value` key
    Wrapped(WrappedField<'a>),
    /// Mapping without a `value` key: a nested section
    Container(&'a Mapping),
    /// Tabular rows
    Sequence(&'a [Node]),
}

/// A `{value, ...}` wrapper, usually carrying `page` and `bbox` too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappedField<'a> {
    pub value: &'a Node,
    pub location: Option<Location<'a>>,
}

/// Raw location metadata of a field.
///
/// Nothing is validated here; a malformed bbox must only suppress its own
/// highlight, so validation is left to [`Location::page_number`] and
/// [`Location::bbox`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location<'a> {
    pub page: &'a Node,
    pub bbox: &'a Node,
}

impl<'a> Field<'a> {
    pub fn of(node: &'a Node) -> Self {
        match node {
            Node::Scalar(s) => Field::Scalar(s),
            Node::Sequence(rows) => Field::Sequence(rows),
            Node::Mapping(map) => match map.get(VALUE_KEY) {
                Some(value) => Field::Wrapped(WrappedField {
                    value,
                    location: location_in(map),
                }),
                None => Field::Container(map),
            },
        }
    }
}

/// Normalize a field to its value regardless of shape.
///
/// # Example
///
/// ```
/// use fundlens_core::{resolve_value, Node};
/// use serde_json::json;
///
/// let wrapped = Node::from(json!({"value": "2%", "page": 3, "bbox": [100, 100, 150, 400]}));
/// assert_eq!(resolve_value(&wrapped), &Node::from(json!("2%")));
///
/// let legacy = Node::from(json!("2%"));
/// assert_eq!(resolve_value(&legacy), &legacy);
/// ```
pub fn resolve_value(field: &Node) -> &Node {
    match Field::of(field) {
        Field::Wrapped(wrapped) => wrapped.value,
        Field::Scalar(_) | Field::Container(_) | Field::Sequence(_) => field,
    }
}

/// Location metadata of a field, when it has both `page` and `bbox`.
pub fn resolve_location(field: &Node) -> Option<Location<'_>> {
    field.as_mapping().and_then(location_in)
}

fn location_in(map: &Mapping) -> Option<Location<'_>> {
    Some(Location {
        page: map.get(PAGE_KEY)?,
        bbox: map.get(BBOX_KEY)?,
    })
}

impl<'a> Location<'a> {
    /// The page as a non-negative whole number.
    ///
    /// `3` and `3.0` are the same page; `"3"` is not a page.
    pub fn page_number(&self) -> Option<u64> {
        let Node::Scalar(Scalar::Number(n)) = self.page else {
            return None;
        };
        if let Some(page) = n.as_u64() {
            return Some(page);
        }
        let f = n.as_f64()?;
        (f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64).then_some(f as u64)
    }

    /// Whether this location is on `page`.
    pub fn is_on_page(&self, page: u64) -> bool {
        self.page_number() == Some(page)
    }

    /// The bbox as exactly four numbers, in source order.
    pub fn bbox(&self) -> Option<[&'a Number; 4]> {
        let rows = self.bbox.as_sequence()?;
        let [a, b, c, d] = rows else {
            return None;
        };
        Some([number(a)?, number(b)?, number(c)?, number(d)?])
    }
}

fn number(node: &Node) -> Option<&Number> {
    match node {
        Node::Scalar(Scalar::Number(n)) => Some(n),
        _ => None,
    }
}
