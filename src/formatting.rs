//! Shared formatting utilities used by both CLI and TUI

use crate::listing::PageControl;

/// Layout constants used across CLI and TUI
pub mod layout {
    pub const BOX_WIDTH: usize = 78;
}

/// Truncate a string to a maximum length (in characters), adding "..." at the end if truncated.
///
/// Unicode-safe: counts characters, not bytes.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        // Too short for an ellipsis
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Relative post date for a job card ("posted today", "posted 3 days ago")
///
/// Negative ages (clock skew, future-dated posts) count as today.
#[must_use]
pub fn format_age_days(days: i64) -> String {
    match days {
        i64::MIN..=0 => "posted today".to_string(),
        1 => "posted 1 day ago".to_string(),
        n => format!("posted {} days ago", n),
    }
}

/// Plain-text pagination bar: `‹ Prev 1 [2] 3 Next ›`
///
/// Disabled arrows are rendered as blanks so the bar keeps its width.
#[must_use]
pub fn format_page_controls(controls: &[PageControl]) -> String {
    let parts: Vec<String> = controls
        .iter()
        .map(|control| match *control {
            PageControl::Previous { enabled: true } => "‹ Prev".to_string(),
            PageControl::Previous { enabled: false } => "      ".to_string(),
            PageControl::Page { number, active: true } => format!("[{}]", number),
            PageControl::Page { number, active: false } => number.to_string(),
            PageControl::Next { enabled: true } => "Next ›".to_string(),
            PageControl::Next { enabled: false } => "      ".to_string(),
        })
        .collect();
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("ab", 2), "ab");
        assert_eq!(truncate_string("abcdef", 3), "abc");
    }

    #[test]
    fn test_truncate_string_unicode() {
        assert_eq!(truncate_string("Bengaluru के लिए", 20), "Bengaluru के लिए");
        assert_eq!(truncate_string("日本語のテキスト", 5), "日本...");
    }

    #[test]
    fn test_format_age_days() {
        assert_eq!(format_age_days(0), "posted today");
        assert_eq!(format_age_days(-2), "posted today");
        assert_eq!(format_age_days(1), "posted 1 day ago");
        assert_eq!(format_age_days(12), "posted 12 days ago");
    }

    #[test]
    fn test_format_page_controls() {
        let controls = vec![
            PageControl::Previous { enabled: true },
            PageControl::Page { number: 1, active: false },
            PageControl::Page { number: 2, active: true },
            PageControl::Page { number: 3, active: false },
            PageControl::Next { enabled: true },
        ];
        assert_eq!(format_page_controls(&controls), "‹ Prev 1 [2] 3 Next ›");

        assert_eq!(format_page_controls(&[]), "");
    }
}
