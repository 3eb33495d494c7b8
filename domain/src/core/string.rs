//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries. Intended for log previews.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Keep at most the first `max_bytes` bytes of a string without splitting
/// a UTF-8 character boundary.
///
/// Returns a sub-slice of the original string, with no ellipsis marker.
pub fn truncate_head(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Keep at most the last `max_bytes` bytes of a string without splitting a
/// UTF-8 character boundary.
///
/// Returns a sub-slice of the original string. The tail is kept rather
/// than the head: when a prompt overflows its budget, the query at the end
/// must survive, not the start of the context.
pub fn truncate_tail(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut start = s.len() - max_bytes;
    while start < s.len() && !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("日本語テスト", 30), "日本語テスト");
        // 15 bytes -> target 12 -> boundary at 12 (4 chars of 3 bytes)
        assert_eq!(truncate("日本語テスト文字列", 15), "日本語テ...");
    }

    #[test]
    fn test_truncate_head_ascii() {
        assert_eq!(truncate_head("hello world", 5), "hello");
        assert_eq!(truncate_head("hi", 10), "hi");
    }

    #[test]
    fn test_truncate_head_multibyte_boundary() {
        // Cutting at byte 4 would land inside 'の', so back up to 3
        let s = "あのね"; // 9 bytes: 3+3+3
        assert_eq!(truncate_head(s, 4), "あ");
        assert_eq!(truncate_head(s, 6), "あの");
    }

    #[test]
    fn test_truncate_tail_ascii() {
        assert_eq!(truncate_tail("hello world", 5), "world");
        assert_eq!(truncate_tail("hi", 10), "hi");
        assert_eq!(truncate_tail("", 10), "");
    }

    #[test]
    fn test_truncate_tail_multibyte_boundary() {
        // 'の' is 3 bytes; keeping 4 bytes from the end of a 9-byte string
        // would land inside 'の', so only the final character survives
        let s = "あのね"; // 9 bytes: 3+3+3
        assert_eq!(truncate_tail(s, 4), "ね");
        assert_eq!(truncate_tail(s, 6), "のね");
        assert_eq!(truncate_tail(s, 9), "あのね");
    }

    #[test]
    fn test_truncate_tail_zero_budget() {
        assert_eq!(truncate_tail("abc", 0), "");
    }
}
