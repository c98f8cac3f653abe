//! Monospace display width of characters.
//!
//! East Asian wide and fullwidth characters occupy two columns on a
//! monospace grid, combining marks and zero-width format characters occupy
//! none, everything else occupies one.

/// Whether `c` occupies two monospace columns.
pub fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1F64F
        | 0x1F900..=0x1F9FF
        | 0x20000..=0x2FFFD
        | 0x30000..=0x3FFFD)
}

fn is_zero_width(c: char) -> bool {
    matches!(c as u32,
        0x0300..=0x036F | 0x200B..=0x200F | 0x2060..=0x2064 | 0xFE00..=0xFE0F | 0xFEFF)
}

/// Number of monospace columns `c` occupies (0, 1 or 2).
pub fn char_width(c: char) -> usize {
    if is_zero_width(c) {
        0
    } else if is_wide(c) {
        2
    } else {
        1
    }
}

/// Number of monospace columns `s` occupies.
///
/// ```
/// use folio_content::display_width;
///
/// assert_eq!(display_width("abc"), 3);
/// assert_eq!(display_width("名前"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_narrow() {
        assert!(!is_wide('a'));
        assert_eq!(char_width('a'), 1);
    }

    #[test]
    fn test_cjk_is_wide() {
        for c in ['中', '文', 'あ', 'カ', '한', '，'] {
            assert!(is_wide(c), "{c} should be wide");
            assert_eq!(char_width(c), 2);
        }
    }

    #[test]
    fn test_combining_mark_is_zero_width() {
        assert_eq!(display_width("e\u{0301}"), 1);
        assert_eq!(char_width('\u{200b}'), 0);
    }

    #[test]
    fn test_mixed_width() {
        assert_eq!(display_width("A中B"), 4);
        assert_eq!(display_width(""), 0);
    }
}
