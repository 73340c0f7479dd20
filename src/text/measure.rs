//! Length accounting for chunks.
//!
//! Transport limits are counted in UTF-16 code units, so that is the unit
//! used everywhere a chunk is compared with a limit. Grapheme clusters are
//! not taken into account: a flag emoji counts as four units.

/// Length of `s` in UTF-16 code units.
pub fn text_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Cut `s` into consecutive slices of at most `size` code units each.
///
/// Slices end on character boundaries. A character wider than `size`
/// (a surrogate pair with `size == 1`) still gets its own slice so the
/// loop always makes progress. An empty input yields no slices.
pub fn slice_units(s: &str, size: usize) -> Vec<&str> {
    let mut out = Vec::new();
    if size == 0 {
        return out;
    }
    let mut start = 0usize;
    let mut units = 0usize;
    for (idx, ch) in s.char_indices() {
        let w = ch.len_utf16();
        if units + w > size && idx > start {
            out.push(&s[start..idx]);
            start = idx;
            units = 0;
        }
        units += w;
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}
