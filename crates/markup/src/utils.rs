//! Utility functions for markup output

use crate::types::HTML_VOID_ELEMENTS;

/// Replace the five markup-sensitive characters with entities
///
/// `&` goes first so later entities are never re-escaped.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Check tag against the built-in html void list
///
/// Serializers with a custom `void_elements` set ignore this list.
pub fn is_void_element(tag: &str) -> bool {
    HTML_VOID_ELEMENTS.contains(&tag)
}
