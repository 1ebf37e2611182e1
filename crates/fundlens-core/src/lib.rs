//! Structured-field core for reviewing extracted fund documents.
//!
//! Extraction engines turn a fund disclosure document into a nested tree of
//! fields. Some engines wrap each value with the page and bounding box it was
//! read from (`{value, page, bbox}`); older ones emit the bare value. This
//! crate reads both shapes, finds every located field on a page so it can be
//! drawn over the page image, and applies operator corrections without losing
//! location metadata.
//!
//! # Example
//!
//! ```
//! use fundlens_core::{locate, resolve_value, set_value, get_at, Node};
//! use fundlens_path::FieldPath;
//! use serde_json::json;
//!
//! let tree = Node::from(json!({
//!     "fund_name": "ABC Fund",
//!     "fees": {"management_fee": {"value": "2%", "page": 3, "bbox": [100, 100, 150, 400]}}
//! }));
//!
//! let highlights = locate(&tree, 3);
//! assert_eq!(highlights.len(), 1);
//! assert_eq!(highlights[0].label, "management_fee");
//!
//! let path = FieldPath::parse("fees.management_fee").unwrap();
//! let next = set_value(&tree, &path, "1.5%").unwrap();
//! assert_eq!(resolve_value(get_at(&next, &path).unwrap()), &Node::from(json!("1.5%")));
//! assert_eq!(locate(&next, 3)[0].bbox, highlights[0].bbox);
//! ```

pub mod field;
pub mod highlight;
pub mod mutate;
pub mod node;
pub mod overlay;
pub mod summary;

pub use field::{
    is_reserved_key, resolve_location, resolve_value, Field, Location, WrappedField, BBOX_KEY,
    PAGE_KEY, RESERVED_KEYS, VALUE_KEY,
};
pub use highlight::{locate, BBox, Highlight, HighlightId};
pub use mutate::{apply_edits, get_at, set_value, Edit, MutateError};
pub use node::{Mapping, Node, Scalar};
pub use overlay::{
    Focus, OverlayBox, OverlayOptions, OverlayRect, PageOverlay, PixelRect, DEFAULT_GRID_EXTENT,
};
pub use summary::{FundSummary, FEE_KEYS};

pub use fundlens_path::{FieldPath, PathError};
