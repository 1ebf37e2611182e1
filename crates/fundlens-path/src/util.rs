use crate::types::PathStep;
use crate::validate::{validate_field_path, PathError, SEPARATOR};

/// Split a dotted field path into its keys.
///
/// # Example
///
/// ```
/// use fundlens_path::parse_field_path;
///
/// assert_eq!(parse_field_path("fees.management_fee").unwrap(), vec!["fees", "management_fee"]);
/// assert!(parse_field_path("fees..management_fee").is_err());
/// ```
pub fn parse_field_path(path: &str) -> Result<Vec<PathStep>, PathError> {
    validate_field_path(path)?;
    Ok(path.split(SEPARATOR).map(str::to_owned).collect())
}

/// Join keys back into dotted form.
///
/// Returns an empty string for no keys.
///
/// # Example
///
/// ```
/// use fundlens_path::format_field_path;
///
/// let steps = ["fees".to_string(), "management_fee".to_string()];
/// assert_eq!(format_field_path(&steps), "fees.management_fee");
/// ```
pub fn format_field_path(path: &[PathStep]) -> String {
    let mut out = String::new();
    for (i, step) in path.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(step);
    }
    out
}

/// Check if `parent` keys are a strict prefix of `child` keys.
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    parent.len() < child.len() && child[..parent.len()] == *parent
}
