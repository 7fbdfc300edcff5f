//! Canonical form of a track title, used only for comparisons.

/// Collapse every whitespace run to a single space, trim, lower-case.
///
/// Total for any input and idempotent.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when `title` matches the configured commercial-break keyword.
/// With no keyword configured, nothing is a commercial break.
pub fn is_commercial_break(title: &str, keyword: Option<&str>) -> bool {
    match keyword {
        Some(k) => normalize_title(title) == normalize_title(k),
        None => false,
    }
}
