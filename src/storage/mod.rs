//! Location persistence: SQLite for the running service, in-memory for tests
//! and the `--memory` serve mode.

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryLocationRepository;
pub use sqlite::SqliteLocationRepository;

use crate::domain::Location;

/// Search rank of a location for `keyword`, or `None` if it does not match.
/// `1` name prefix, `2` name contains, `3` address only. `keyword` must
/// already be ASCII-lowercased.
pub(crate) fn keyword_rank(location: &Location, keyword: &str) -> Option<u8> {
    let name = location.name.as_str().to_ascii_lowercase();
    if name.starts_with(keyword) {
        Some(1)
    } else if name.contains(keyword) {
        Some(2)
    } else if location.address.as_str().to_ascii_lowercase().contains(keyword) {
        Some(3)
    } else {
        None
    }
}

/// Escapes `LIKE` wildcards so the keyword matches literally under `ESCAPE '\'`.
pub(crate) fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
        assert_eq!(escape_like("경로당"), "경로당");
    }
}
