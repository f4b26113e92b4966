//! Short tab labels derived from page title or URL

use url::Url;

/// Longest label shown on a tab, ellipsis included
pub const MAX_LABEL_CHARS: usize = 18;

pub const NEW_TAB_LABEL: &str = "New Tab";

const ELLIPSIS: &str = "...";

/// Trim, then cut anything longer than [`MAX_LABEL_CHARS`] down to
/// its first 15 characters plus `...`.
pub fn truncate_label(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= MAX_LABEL_CHARS {
        return text.to_string();
    }

    let keep = MAX_LABEL_CHARS - ELLIPSIS.len();
    let mut label: String = text.chars().take(keep).collect();
    label.push_str(ELLIPSIS);
    label
}

/// Label for a tab: the page title, else the URL's host, else the raw URL.
///
/// Returns `None` when the engine has reported neither title nor URI.
pub fn tab_label(title: Option<&str>, uri: Option<&str>) -> Option<String> {
    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        return Some(truncate_label(title));
    }

    let uri = uri.filter(|u| !u.is_empty())?;
    Some(truncate_label(&host_or_raw(uri)))
}

fn host_or_raw(uri: &str) -> String {
    let Ok(parsed) = Url::parse(uri) else {
        return uri.to_string();
    };

    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) if !host.is_empty() => format!("{host}:{port}"),
        (Some(host), None) if !host.is_empty() => host.to_string(),
        _ => uri.to_string(),
    }
}
