//! Formatting utilities used for CLI and export outputs.

use textwrap::Options;
use unicode_width::UnicodeWidthStr;

/// Pad to a display width (not a byte length), so accents and emoji line up.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Wrap a message so that continuation lines start under the first one.
pub fn wrap_with_indent(text: &str, width: usize, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let opts = Options::new(width.max(indent + 10)).subsequent_indent(&pad);
    textwrap::fill(text, opts)
}

pub fn print_separator(ch: &str, width: usize) {
    println!("{}", ch.repeat(width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_lines_are_indented() {
        let wrapped = wrap_with_indent("aaaa bbbb cccc dddd", 10, 2);
        assert!(wrapped.lines().skip(1).all(|l| l.starts_with("  ")));
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("é", 3), "é  ");
    }
}
