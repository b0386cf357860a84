//! Font libraries, catalog entries and renderer data shapes.
//!
//! A [`CatalogEntry`] is what the card list shows. It names one font inside one
//! [`Library`], and the library decides which renderer draws it. The glyph-table
//! and bitmap renderers consume [`FontDefinition`] and [`StyleDefinition`].

use crate::domain::error::{GlyphdeckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The three font sources shown in the catalog.
///
/// Declaration order is the grouping order used when every library is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Library {
    /// FIGlet `.flf` fonts typeset by the external FIGlet engine.
    Figlet,
    /// cfonts-style glyph tables compiled into the plugin.
    Cfonts,
    /// Styles applied to the shared 8×8 pixel font.
    Bitmap,
}

impl Library {
    /// All libraries in grouping order.
    pub const ALL: [Self; 3] = [Self::Figlet, Self::Cfonts, Self::Bitmap];

    /// Short lowercase tag used in routing keys and search matching.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Figlet => "figlet",
            Self::Cfonts => "cfonts",
            Self::Bitmap => "bitmap",
        }
    }

    /// Human-readable label for tabs and card titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Figlet => "FIGlet",
            Self::Cfonts => "cfonts",
            Self::Bitmap => "Bitmap",
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One selectable font in the catalog.
///
/// `key` is `"<library tag>:<name>"` and is unique across the catalog. Cards,
/// render caches and the viewport observer all work in terms of this key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Font name as understood by the owning renderer.
    pub name: String,
    /// Routing key, unique across libraries.
    pub key: String,
    /// Source library.
    pub library: Library,
    /// Curated fonts sort ahead of everything else.
    pub featured: bool,
    /// Name shown on the card.
    pub display_name: String,
}

impl CatalogEntry {
    /// Creates an entry, deriving the routing key from library and name.
    ///
    /// ```
    /// use glyphdeck::{CatalogEntry, Library};
    ///
    /// let entry = CatalogEntry::new(Library::Figlet, "ANSI Shadow", "ANSI Shadow", true);
    /// assert_eq!(entry.key, "figlet:ANSI Shadow");
    /// ```
    #[must_use]
    pub fn new(library: Library, name: &str, display_name: &str, featured: bool) -> Self {
        Self {
            name: name.to_string(),
            key: format!("{}:{name}", library.tag()),
            library,
            featured,
            display_name: display_name.to_string(),
        }
    }
}

/// Turns a font file stem into a card title.
///
/// Words split on spaces, `_` and `-`; each word gets an upper-case first
/// letter, the rest is kept as written so `ANSI Shadow` stays intact.
///
/// ```
/// use glyphdeck::domain::font::display_name_for;
///
/// assert_eq!(display_name_for("big_money-ne"), "Big Money Ne");
/// assert_eq!(display_name_for("ANSI Shadow"), "ANSI Shadow");
/// ```
#[must_use]
pub fn display_name_for(stem: &str) -> String {
    stem.split(|c: char| c == ' ' || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A glyph-table font: multi-row fragments per character plus a spacing template.
///
/// Rows may contain color markup (`<c1>`, `</c1>`) which the renderer strips.
/// Every glyph has exactly `lines` rows; [`FontDefinition::from_json`] rejects
/// tables that break this.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFontDefinition")]
pub struct FontDefinition {
    /// Font name.
    pub name: String,
    /// Number of rows every glyph spans.
    pub lines: usize,
    /// Upper-case character → row fragments.
    pub chars: HashMap<char, Vec<String>>,
    /// Inter-character spacing rows, one per line, if the font defines them.
    pub letterspace: Option<Vec<String>>,
    /// Visible width of the spacing template.
    pub letterspace_size: usize,
}

/// On-disk shape of a cfonts-style font table.
#[derive(Debug, Deserialize)]
struct RawFontDefinition {
    name: String,
    lines: usize,
    chars: HashMap<String, Vec<String>>,
    #[serde(default)]
    letterspace: Option<Vec<String>>,
    #[serde(default)]
    letterspace_size: Option<usize>,
}

impl TryFrom<RawFontDefinition> for FontDefinition {
    type Error = GlyphdeckError;

    fn try_from(raw: RawFontDefinition) -> Result<Self> {
        let invalid = |reason: String| GlyphdeckError::FontParse {
            name: raw.name.clone(),
            reason,
        };

        let mut chars = HashMap::with_capacity(raw.chars.len());
        for (key, rows) in &raw.chars {
            let mut key_chars = key.chars();
            let (Some(ch), None) = (key_chars.next(), key_chars.next()) else {
                return Err(invalid(format!("glyph key `{key}` is not a single character")));
            };
            if rows.len() != raw.lines {
                return Err(invalid(format!(
                    "glyph `{key}` has {} rows, expected {}",
                    rows.len(),
                    raw.lines
                )));
            }
            chars.insert(ch, rows.clone());
        }

        let letterspace = raw.letterspace.clone().filter(|rows| !rows.is_empty());

        Ok(Self {
            letterspace_size: raw.letterspace_size.unwrap_or(0),
            name: raw.name,
            lines: raw.lines,
            chars,
            letterspace,
        })
    }
}

impl FontDefinition {
    /// Parses a cfonts-style JSON font table.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphdeckError::Json`] for malformed JSON and
    /// [`GlyphdeckError::FontParse`] when a glyph breaks the row-count rule.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<RawFontDefinition>(json)
            .map_err(GlyphdeckError::from)
            .and_then(Self::try_from)
    }
}

/// A pair of display characters applied to the shared pixel font.
///
/// Styles never touch geometry; two styles rendering the same text produce
/// outputs of identical shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDefinition {
    /// Lookup name.
    pub name: &'static str,
    /// Card title.
    pub display_name: &'static str,
    /// Character drawn for set pixels.
    pub on_char: char,
    /// Character drawn for clear pixels.
    pub off_char: char,
    /// Whether the style is featured.
    pub featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_table_with_letterspace() {
        let font = FontDefinition::from_json(
            r#"{"name":"t","lines":2,"chars":{"A":["/\\","/  \\"]},"letterspace":["  ","  "],"letterspace_size":2}"#,
        )
        .unwrap();

        assert_eq!(font.lines, 2);
        assert_eq!(font.chars[&'A'], vec!["/\\".to_string(), "/  \\".to_string()]);
        assert_eq!(font.letterspace_size, 2);
    }

    #[test]
    fn empty_letterspace_counts_as_absent() {
        let font =
            FontDefinition::from_json(r#"{"name":"t","lines":1,"chars":{},"letterspace":[]}"#).unwrap();
        assert!(font.letterspace.is_none());
    }

    #[test]
    fn rejects_glyph_with_wrong_row_count() {
        let err = FontDefinition::from_json(r#"{"name":"t","lines":2,"chars":{"A":["x"]}}"#).unwrap_err();
        assert!(matches!(err, GlyphdeckError::FontParse { .. }));
    }

    #[test]
    fn rejects_multi_character_keys() {
        let err =
            FontDefinition::from_json(r#"{"name":"t","lines":1,"chars":{"AB":["x"]}}"#).unwrap_err();
        assert!(err.to_string().contains("single character"));
    }

    #[test]
    fn library_order_puts_figlet_first() {
        let mut libs = vec![Library::Bitmap, Library::Figlet, Library::Cfonts];
        libs.sort();
        assert_eq!(libs, Library::ALL.to_vec());
    }
}
