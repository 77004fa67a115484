//! SQL text helpers

/// Escape character used in every generated `LIKE ... ESCAPE` clause
pub const LIKE_ESCAPE: char = '\\';

/// Build a case-insensitive substring pattern for `LOWER(col) LIKE ?`
///
/// The needle is lowercased and its LIKE metacharacters are escaped, so
/// user text such as `50%` only matches literally. Only ASCII letters are
/// folded, matching SQLite's built-in `LOWER()`; `Đức` matches itself but
/// not `đức`.
///
/// ```
/// use roster_server::utils::sql::contains_pattern;
///
/// assert_eq!(contains_pattern("Ann_B"), "%ann\\_b%");
/// ```
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_ascii_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
