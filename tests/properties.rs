use proptest::prelude::*;
use pulldown_cmark_mdv2::escape::RESERVED;
use pulldown_cmark_mdv2::text::text_len;
use pulldown_cmark_mdv2::{Converter, escape_code, escape_text};

/// Undo backslash escaping, checking that every backslash in `escaped`
/// precedes a character from `reserved`.
fn unescape(escaped: &str, reserved: impl Fn(char) -> bool) -> Option<String> {
    let mut out = String::new();
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            let next = chars.next()?;
            if !reserved(next) {
                return None;
            }
            out.push(next);
        } else if reserved(ch) {
            // reserved character without its backslash
            return None;
        } else {
            out.push(ch);
        }
    }
    Some(out)
}

proptest! {
    #[test]
    fn escape_text_escapes_every_reserved_char(s in "\\PC{0,64}") {
        let escaped = escape_text(&s);
        let reserved_count = s.chars().filter(|c| RESERVED.contains(c)).count();
        prop_assert_eq!(escaped.chars().count(), s.chars().count() + reserved_count);
        prop_assert_eq!(unescape(&escaped, |c| RESERVED.contains(&c)), Some(s));
    }

    #[test]
    fn escape_code_only_touches_backtick_and_backslash(s in "\\PC{0,64}") {
        let escaped = escape_code(&s);
        prop_assert_eq!(unescape(&escaped, |c| c == '`' || c == '\\'), Some(s.clone()));
        if !s.contains(['`', '\\']) {
            prop_assert_eq!(escaped, s);
        }
    }

    #[test]
    fn rendering_is_deterministic(s in "[a-z .*_#>`\\-\n]{0,120}") {
        let converter = Converter::new();
        prop_assert_eq!(converter.render(&s), converter.render(&s));
    }

    #[test]
    fn split_reassembles_paragraphs(
        paragraphs in prop::collection::vec("[a-z]{1,8}( [a-z.!]{1,8}){0,6}", 1..12),
        limit in 16usize..160,
    ) {
        let source = paragraphs.join("\n\n");
        let converter = Converter::new();
        let full = converter.render(&source);
        let chunks = converter.split(&source, limit);

        prop_assert!(chunks.iter().all(|c| !c.is_empty()));
        prop_assert_eq!(chunks.join("\n\n"), full);
        for chunk in &chunks {
            // only a single paragraph may run over
            prop_assert!(text_len(chunk) <= limit || !chunk.contains("\n\n"));
        }
    }

    #[test]
    fn split_code_keeps_every_char(body in "[a-z0-9 ]{1,400}", limit in 12usize..80) {
        let source = format!("```\n{body}\n```");
        let chunks = Converter::new().split(&source, limit);
        let mut rebuilt = String::new();
        for chunk in &chunks {
            prop_assert!(text_len(chunk) <= limit);
            for piece in chunk.split("\n\n") {
                let inner = piece
                    .strip_prefix("```\n")
                    .and_then(|p| p.strip_suffix("\n```"));
                prop_assert!(inner.is_some(), "not a fence: {:?}", piece);
                rebuilt.push_str(inner.unwrap_or_default());
            }
        }
        prop_assert_eq!(rebuilt, body);
    }
}
