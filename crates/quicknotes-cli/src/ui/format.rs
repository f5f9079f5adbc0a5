//! String formatting utilities for UI rendering.

use chrono::DateTime;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a short ID (first 8 characters).
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Format an epoch-millisecond timestamp for display.
pub fn format_millis(millis: i64, pretty: bool) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) if pretty => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        Some(dt) => dt.to_rfc3339(),
        None => millis.to_string(),
    }
}

/// Format bytes as human-readable size.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Undo the entity escaping applied to stored note content.
///
/// Storage does not escape `&`, so this is not an exact inverse: content
/// typed as a literal entity such as `&lt;` is shown as `<`.
pub fn display_text(stored: &str) -> String {
    stored
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_very_short_max() {
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("7a2e3c0b-1234-5678-9abc-def012345678"), "7a2e3c0b");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(0, true), "1970-01-01 00:00 UTC");
        assert_eq!(format_millis(0, false), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }

    #[test]
    fn test_display_text_reverses_escaping() {
        let stored = quicknotes_core::validation::sanitize("<a href='x/y'>\"q\"</a>");
        assert_eq!(display_text(&stored), "<a href='x/y'>\"q\"</a>");
    }

    #[test]
    fn test_display_text_literal_entity_is_ambiguous() {
        let stored = quicknotes_core::validation::sanitize("write &lt; to get <");
        assert_eq!(display_text(&stored), "write < to get <");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("hello\nworld"), "hello world");
    }
}
