//! Default table and column naming.
//!
//! Identifiers are scanned character by character: an uppercase ASCII letter
//! past index 0 gets an underscore inserted before it, and every character is
//! lowercased. The transformation is pure, deterministic, and
//! locale-insensitive, and is idempotent on input that is already
//! snake_case. Explicit overrides on an entity or binding bypass it entirely.

const TABLE_NAME_HEADER: &str = "t_";

/// Default table name for a type name: `t_` + snake_case.
///
/// `generate_table_name("UserProfile")` is `"t_user_profile"`.
pub fn generate_table_name(class_name: &str) -> String {
    format!("{TABLE_NAME_HEADER}{}", snake_case(class_name))
}

/// Default column name for a field name.
///
/// `generate_column_name("userName")` is `"user_name"`.
pub fn generate_column_name(field_name: &str) -> String {
    snake_case(field_name)
}

fn snake_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for (i, ch) in identifier.chars().enumerate() {
        if ch.is_ascii_uppercase() && i != 0 {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}
