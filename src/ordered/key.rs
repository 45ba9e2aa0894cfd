//! Node keys.

use uuid::Uuid;

/// Generates a fresh node key.
///
/// The key is an uppercase UUID v4 string. This is the default key generator
/// of [`Tree`][`crate::ordered::Tree`], used when a node is created without
/// an explicit key.
///
/// # Examples
///
/// ```
/// use prioritree::ordered::generate_key;
///
/// let key = generate_key();
/// assert_eq!(key.len(), 36);
/// assert_eq!(key, key.to_uppercase());
/// ```
#[must_use]
pub fn generate_key() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}
