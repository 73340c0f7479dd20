//! The three MarkdownV2 escaping grammars.
//!
//! Each context of the target dialect reserves a different set of
//! characters, so the grammars must never be mixed: plain text goes
//! through [`escape_text`], anything inside a code span or fence through
//! [`escape_code`], and link destinations through [`escape_url`].

/// Characters with syntactic meaning in MarkdownV2 plain text.
pub const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

fn escape_with(s: &str, reserved: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if reserved(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape plain text.
pub fn escape_text(s: &str) -> String {
    escape_with(s, |ch| RESERVED.contains(&ch))
}

/// Escape the body of a code span or code fence.
pub fn escape_code(s: &str) -> String {
    escape_with(s, |ch| matches!(ch, '`' | '\\'))
}

/// Escape a link destination (the part inside `(...)`).
pub fn escape_url(s: &str) -> String {
    escape_with(s, |ch| matches!(ch, '(' | ')' | '\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes_punctuation() {
        assert_eq!(escape_text("Hello. World"), "Hello\\. World");
        assert_eq!(escape_text("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_text("1 + 1 = 2!"), "1 \\+ 1 \\= 2\\!");
        assert_eq!(escape_text("C:\\dir"), "C:\\\\dir");
    }

    #[test]
    fn text_leaves_plain_chars() {
        assert_eq!(escape_text("plain words, 42 ✏️"), "plain words, 42 ✏️");
    }

    #[test]
    fn code_only_touches_backtick_and_backslash() {
        assert_eq!(escape_code("a.b_c*(d)"), "a.b_c*(d)");
        assert_eq!(escape_code("`x` \\n"), "\\`x\\` \\\\n");
    }

    #[test]
    fn url_only_touches_parens_and_backslash() {
        assert_eq!(
            escape_url("https://en.wikipedia.org/wiki/Rust_(language)"),
            "https://en.wikipedia.org/wiki/Rust_\\(language\\)"
        );
        assert_eq!(escape_url("a\\b.c"), "a\\\\b.c");
    }
}
