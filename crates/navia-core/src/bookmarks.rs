//! Bookmark list rules
//!
//! Bookmarks are plain URLs kept in insertion order, each stored once.

/// Append `url` unless it is blank or already present.
/// Returns `true` when the list changed.
pub fn add_bookmark(bookmarks: &mut Vec<String>, url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || bookmarks.iter().any(|b| b == url) {
        return false;
    }

    bookmarks.push(url.to_string());
    true
}

/// Remove `url`. Returns `true` when it was bookmarked.
pub fn remove_bookmark(bookmarks: &mut Vec<String>, url: &str) -> bool {
    let before = bookmarks.len();
    bookmarks.retain(|b| b != url.trim());
    bookmarks.len() != before
}
