//! Unicode-aware width helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual width of a string in terminal cells.
///
/// Wide characters (CJK, most emoji) take 2 cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Right-pad `s` with spaces up to `width` cells.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut padded = s.to_string();
    let current = visual_width(s);
    if current < width {
        padded.push_str(&" ".repeat(width - current));
    }
    padded
}

/// Truncate a string to fit within `max_width` cells, ending with "..."
/// when anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if visual_width(s) <= max_width {
        return s.to_string();
    }

    let target_width = max_width.saturating_sub(3);
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_width_wide_chars() {
        assert_eq!(visual_width("hello"), 5);
        assert_eq!(visual_width("你好"), 4);
        assert_eq!(visual_width(""), 0);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("你", 3), "你 ");
        assert_eq!(pad_to_width("long", 2), "long");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_to_width("photo.png", 20), "photo.png");
        assert_eq!(truncate_to_width("a-very-long-file-name.png", 10), "a-very-...");
        assert_eq!(truncate_to_width("abc", 2), "...");
    }

    #[test]
    fn test_truncate_does_not_split_wide_chars() {
        let result = truncate_to_width("你好世界你好", 8);
        assert_eq!(result, "你好...");
    }
}
