//! Shared utility functions.

/// Shorten text for log lines without splitting a UTF-8 character.
///
/// Appends `…` when anything was cut.
pub fn preview(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_cuts_ascii() {
        assert_eq!(preview("hello world", 5), "hello…");
    }

    #[test]
    fn preview_respects_char_boundary() {
        // "é" is two bytes; cutting at 1 must back off to 0
        assert_eq!(preview("é", 1), "…");
    }
}
