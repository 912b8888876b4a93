// Output formatting: terminal tables and JSON reports.

pub mod report;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries; GO term names are ASCII today but
/// association-derived labels need not be.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Render an optional score. Undefined scores (empty namespace, different
/// namespaces) print as `NaN`, which is what downstream spreadsheets expect.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{s:.3}"),
        None => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("mitochondrion", 4), "mito...");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(0.12345)), "0.123");
        assert_eq!(format_score(None), "NaN");
    }
}
