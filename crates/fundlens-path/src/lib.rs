//! Dotted field paths.
//!
//! A field path such as `fees.management_fee` addresses one field of an
//! extracted document by walking nested mapping levels. Paths never index
//! into sequences.
//!
//! # Example
//!
//! ```
//! use fundlens_path::{FieldPath, PathError};
//!
//! let path: FieldPath = "fees.management_fee".parse().unwrap();
//! assert_eq!(path.leaf(), "management_fee");
//! assert_eq!(path.to_string(), "fees.management_fee");
//!
//! assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
//! assert_eq!(FieldPath::parse("fees."), Err(PathError::EmptySegment { index: 1 }));
//! ```

pub mod types;
pub use types::{FieldPath, PathStep};

pub mod validate;
pub use validate::{
    validate_field_path, validate_steps, PathError, MAX_PATH_DEPTH, MAX_PATH_LENGTH, SEPARATOR,
};

mod util;
pub use util::{format_field_path, is_child, parse_field_path};
