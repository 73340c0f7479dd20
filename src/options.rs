//! Formatting options.
//!
//! Every field has a default, and a TOML file only needs to name the
//! fields it changes:
//!
//! ```toml
//! unordered_list_marker = "-"
//!
//! [heading_glyphs]
//! h1 = "#"
//! h2 = ""   # no glyph for level 2
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Output markers used by the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Text after the number of an ordered list item.
    pub ordered_list_separator: String,
    pub unordered_list_marker: String,
    /// Shown in place of image syntax, which MarkdownV2 lacks.
    pub image_marker: String,
    pub thematic_break_text: String,
    pub heading_glyphs: HeadingGlyphs,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            ordered_list_separator: ".".to_owned(),
            unordered_list_marker: "•".to_owned(),
            image_marker: "🖼".to_owned(),
            thematic_break_text: "▬▬▬▬▬▬▬▬▬▬▬▬▬▬".to_owned(),
            heading_glyphs: HeadingGlyphs::default(),
        }
    }
}

impl Options {
    /// Read options from TOML text. Unknown keys are ignored.
    pub fn from_toml_str(s: &str) -> Result<Options> {
        Ok(toml::from_str(s)?)
    }

    /// Read options from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Options> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Options::from_toml_str(&text)
    }
}

/// Decorative glyph per heading level. An empty string means no glyph.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeadingGlyphs {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
    pub h5: String,
    pub h6: String,
}

impl Default for HeadingGlyphs {
    fn default() -> Self {
        HeadingGlyphs {
            h1: "📌".to_owned(),
            h2: "✏️".to_owned(),
            h3: "📚".to_owned(),
            h4: "🔖".to_owned(),
            h5: "🔹".to_owned(),
            h6: "🔸".to_owned(),
        }
    }
}

impl HeadingGlyphs {
    /// Glyph for a heading level, `None` when unset or out of range.
    pub fn get(&self, level: u8) -> Option<&str> {
        let glyph = match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            5 => &self.h5,
            6 => &self.h6,
            _ => return None,
        };
        (!glyph.is_empty()).then_some(glyph.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let opts = Options::from_toml_str(
            "unordered_list_marker = \"-\"\n[heading_glyphs]\nh2 = \"\"\n",
        )
        .unwrap();
        assert_eq!(opts.unordered_list_marker, "-");
        assert_eq!(opts.ordered_list_separator, ".");
        assert_eq!(opts.heading_glyphs.get(1), Some("📌"));
        assert_eq!(opts.heading_glyphs.get(2), None);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Options::from_toml_str("").unwrap(), Options::default());
    }

    #[test]
    fn bad_toml_is_an_error() {
        let err = Options::from_toml_str("image_marker = [").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Options::from_path("/nonexistent/options.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn thematic_break_text_key() {
        let opts = Options::from_toml_str("thematic_break_text = \"---\"").unwrap();
        assert_eq!(opts.thematic_break_text, "---");
    }

    #[test]
    fn deep_levels_have_default_glyphs() {
        let glyphs = HeadingGlyphs::default();
        assert_eq!(glyphs.get(4), Some("🔖"));
        assert_eq!(glyphs.get(5), Some("🔹"));
        assert_eq!(glyphs.get(6), Some("🔸"));
    }

    #[test]
    fn out_of_range_level_has_no_glyph() {
        assert_eq!(HeadingGlyphs::default().get(0), None);
        assert_eq!(HeadingGlyphs::default().get(7), None);
    }
}
