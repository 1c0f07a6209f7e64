//! Identifier derivation for new data sources.

/// Returns true when `c` may appear in a data source identifier.
pub fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Derive an identifier from a display name.
///
/// Every character outside `[-_a-zA-Z0-9]` is replaced by a single `_`, so
/// the identifier has exactly as many characters as the name.
///
/// # Examples
/// ```
/// use datasources::utils::ident::sanitize_id;
///
/// assert_eq!(sanitize_id("My Source!"), "My_Source_");
/// assert_eq!(sanitize_id(""), "");
/// ```
pub fn sanitize_id(name: &str) -> String {
    name.chars().map(|c| if is_id_char(c) { c } else { '_' }).collect()
}

/// Check whether `id` is already a valid, non-empty identifier.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(is_id_char)
}
