//! Relevance label interpretation

use crate::error::FormatError;

/// Decide whether a ground-truth label marks a relevant item.
///
/// A missing label means "no judgment" and is not relevant. A present label
/// must be a base-10 integer; anything else is a [`FormatError`].
pub fn is_relevant(label: Option<&str>, min_rel_level: i32) -> Result<bool, FormatError> {
    let Some(label) = label else {
        return Ok(false);
    };
    Ok(parse_label(label)? >= min_rel_level)
}

/// Parse a relevance grade
pub fn parse_label(label: &str) -> Result<i32, FormatError> {
    label.parse().map_err(|_| FormatError {
        label: label.to_string(),
    })
}
