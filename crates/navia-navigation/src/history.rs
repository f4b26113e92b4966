//! History rules
//!
//! History is a plain list of URLs, most recent last. A visit is recorded
//! only when it differs from the last entry, and the list keeps the most
//! recent [`HISTORY_LIMIT`] entries.

pub const HISTORY_LIMIT: usize = 100;

/// Record a visit. Returns `true` when the list changed.
pub fn record_visit(history: &mut Vec<String>, url: &str) -> bool {
    if url.is_empty() || history.last().map(String::as_str) == Some(url) {
        return false;
    }

    history.push(url.to_string());
    if history.len() > HISTORY_LIMIT {
        let overflow = history.len() - HISTORY_LIMIT;
        history.drain(0..overflow);
    }

    true
}

/// Newest entries first
pub fn recent(history: &[String], limit: usize) -> Vec<String> {
    history.iter().rev().take(limit).cloned().collect()
}

/// Case-insensitive substring search, newest first, without repeats
pub fn search(history: &[String], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    let mut results: Vec<String> = Vec::new();

    for url in history.iter().rev() {
        if results.len() >= limit {
            break;
        }
        if url.to_lowercase().contains(&needle) && !results.contains(url) {
            results.push(url.clone());
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_against_last_only() {
        let mut history = Vec::new();

        assert!(record_visit(&mut history, "https://a.example"));
        assert!(!record_visit(&mut history, "https://a.example"));
        assert!(record_visit(&mut history, "https://b.example"));
        assert!(record_visit(&mut history, "https://a.example"));

        assert_eq!(
            history,
            vec!["https://a.example", "https://b.example", "https://a.example"]
        );
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = Vec::new();
        for i in 0..250 {
            record_visit(&mut history, &format!("https://site{i}.example"));
            assert!(history.len() <= HISTORY_LIMIT);
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.first().unwrap(), "https://site150.example");
        assert_eq!(history.last().unwrap(), "https://site249.example");
        assert!(history.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn test_oversized_loaded_history_is_trimmed_on_next_visit() {
        let mut history: Vec<String> = (0..120).map(|i| format!("https://{i}.example")).collect();
        record_visit(&mut history, "https://new.example");

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.last().unwrap(), "https://new.example");
    }

    #[test]
    fn test_empty_url_ignored() {
        let mut history = Vec::new();
        assert!(!record_visit(&mut history, ""));
        assert!(history.is_empty());
    }

    #[test]
    fn test_recent_and_search() {
        let history: Vec<String> = vec![
            "https://example.com".into(),
            "https://rust-lang.org".into(),
            "https://Example.com/docs".into(),
            "https://example.com".into(),
        ];

        assert_eq!(
            recent(&history, 2),
            vec!["https://example.com", "https://Example.com/docs"]
        );
        assert_eq!(
            search(&history, "EXAMPLE", 10),
            vec!["https://example.com", "https://Example.com/docs"]
        );
        assert_eq!(search(&history, "example", 1).len(), 1);
    }
}
