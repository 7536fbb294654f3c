//! The two renderings shown for every inspected line.

use std::fmt::Write;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Quoted, escaped form of `line`. Terminators, tabs and other invisible
/// characters are spelled out instead of rendered.
pub fn raw(line: &str) -> String {
    let quote = if line.contains('\'') && !line.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(line.len() + 2);
    out.push(quote);
    for c in line.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_printable(c) => out.push(c),
            c => {
                let code = c as u32;
                // writing to a String cannot fail
                let _ = if code < 0x100 {
                    write!(out, "\\x{:02x}", code)
                } else if code < 0x10000 {
                    write!(out, "\\u{:04x}", code)
                } else {
                    write!(out, "\\U{:08x}", code)
                };
            }
        }
    }
    out.push(quote);
    out
}

/// `line` without trailing whitespace or line terminator.
pub fn visible(line: &str) -> &str {
    line.trim_end_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Everything except control, format, private-use, unassigned and
/// separator characters. The ASCII space is the one printable separator.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}
