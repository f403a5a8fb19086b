use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns.
///
/// ```
/// use instacats::util::display_width;
///
/// assert_eq!(display_width("Felix"), 5);
/// assert_eq!(display_width("猫"), 2);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, appending "..." when cut.
///
/// Widths of 3 or less leave no room for the ellipsis, so as many whole
/// characters as fit are returned instead. Returns `Cow::Borrowed` when the
/// string already fits.
///
/// ```
/// use instacats::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Felix", 10), "Felix");
/// assert_eq!(truncate_to_width("Professor Whiskers", 10), "Profess...");
/// assert_eq!(truncate_to_width("Felix", 2), "Fe");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut width = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        end = idx + c.len_utf8();
    }

    if max_width <= ELLIPSIS_WIDTH {
        Cow::Owned(s[..end].to_string())
    } else {
        Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
    }
}

/// SEC: Strip terminal control characters and ANSI escape sequences.
///
/// Record text comes from a data file and is drawn straight into the
/// terminal, so escape sequences (CSI `\x1b[..`, OSC `\x1b]..` ending in BEL
/// or ST) and C0 controls other than tab/newline/CR are removed.
///
/// Returns `Cow::Borrowed` for clean input.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameters and intermediates up to and including the final byte
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Cow::Owned(out)
}

fn is_stripped(c: char) -> bool {
    c == '\x7f' || (c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_is_borrowed() {
        assert!(matches!(truncate_to_width("Felix", 5), Cow::Borrowed("Felix")));
    }

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Testing", 4), "T...");
    }

    #[test]
    fn test_wide_chars_truncation() {
        // each char is 2 columns
        assert_eq!(truncate_to_width("猫猫猫猫", 7), "猫猫...");
        assert_eq!(truncate_to_width("猫猫猫猫", 5), "猫...");
    }

    #[test]
    fn test_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
        assert_eq!(truncate_to_width("猫猫", 1), "");
        assert_eq!(truncate_to_width("猫猫", 3), "猫");
    }

    #[test]
    fn test_strip_clean_is_borrowed() {
        let input = "Felix\tthe cat\n";
        assert!(matches!(strip_control_chars(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_controls_and_del() {
        assert_eq!(strip_control_chars("Fe\x00li\x07x\x7f"), "Felix");
    }

    #[test]
    fn test_strip_csi() {
        assert_eq!(strip_control_chars("\x1b[31mFelix\x1b[0m"), "Felix");
        assert_eq!(strip_control_chars("a\x1b[2Ab"), "ab");
    }

    #[test]
    fn test_strip_osc() {
        assert_eq!(strip_control_chars("\x1b]0;title\x07Felix"), "Felix");
        assert_eq!(strip_control_chars("\x1b]0;title\x1b\\Felix"), "Felix");
    }

    #[test]
    fn test_strip_bare_esc() {
        assert_eq!(strip_control_chars("Fe\x1blix"), "Felix");
    }

    #[test]
    fn test_strip_keeps_unicode() {
        assert_eq!(strip_control_chars("猫 \x1b[1mねこ\x1b[0m"), "猫 ねこ");
    }
}
