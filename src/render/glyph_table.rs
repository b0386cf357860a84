//! Glyph-table renderer for cfonts-style fonts.
//!
//! A glyph table maps upper-case characters to a fixed number of row
//! fragments. Rendering keeps one accumulator per output row and walks the
//! input once:
//!
//! ```text
//! "AB"  →  row0: A₀ + space₀ + B₀
//!          row1: A₁ + space₁ + B₁
//! ```
//!
//! Unmapped characters (space included) contribute the spacing template
//! instead of a glyph. The spacing template is also inserted between every
//! pair of consecutive characters, so two unmapped characters in a row turn
//! into three spacing fragments back to back.

use crate::domain::FontDefinition;
use crate::render::markup::strip_markup;
use crate::render::TextRenderer;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Fragment used for unmapped characters when a font has no spacing template.
pub const DEFAULT_SPACING: &str = "  ";

/// Font tables compiled into the plugin.
const BUNDLED_FONTS: [&str; 5] = [
    include_str!("../../fonts/cfonts/block.json"),
    include_str!("../../fonts/cfonts/shade.json"),
    include_str!("../../fonts/cfonts/half.json"),
    include_str!("../../fonts/cfonts/simple.json"),
    include_str!("../../fonts/cfonts/console.json"),
];

/// Bundled fonts flagged for priority display.
pub const FEATURED: [&str; 2] = ["block", "half"];

static BUNDLED: Lazy<Arc<GlyphTableLibrary>> = Lazy::new(|| {
    let fonts = BUNDLED_FONTS
        .iter()
        .filter_map(|json| match FontDefinition::from_json(json) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::warn!(error = %e, "skipping bundled glyph-table font");
                None
            }
        })
        .collect();
    Arc::new(GlyphTableLibrary::from_fonts(fonts))
});

/// Renders `text` with a glyph table.
///
/// Returns `None` when the composed block has no visible characters, which
/// covers empty input and input made only of unmapped characters in fonts
/// whose spacing is blank.
///
/// ```
/// use glyphdeck::domain::FontDefinition;
/// use glyphdeck::render::glyph_table::render;
///
/// let font = FontDefinition::from_json(
///     r#"{"name":"t","lines":2,"chars":{"A":["/\\","/  \\"]},"letterspace":["  ","  "]}"#,
/// )?;
/// assert_eq!(render("a", &font).as_deref(), Some("/\\\n/  \\"));
/// assert_eq!(render("", &font), None);
/// # Ok::<(), glyphdeck::GlyphdeckError>(())
/// ```
#[must_use]
pub fn render(text: &str, font: &FontDefinition) -> Option<String> {
    let input: Vec<char> = text.to_uppercase().chars().collect();
    let letterspace = font.letterspace.as_deref();
    let mut rows = vec![String::new(); font.lines];

    for (index, ch) in input.iter().enumerate() {
        match font.chars.get(ch) {
            Some(glyph) => append_fragments(&mut rows, glyph),
            None => match letterspace {
                Some(spacing) => append_fragments(&mut rows, spacing),
                None => rows.iter_mut().for_each(|row| row.push_str(DEFAULT_SPACING)),
            },
        }

        if index + 1 < input.len() {
            if let Some(spacing) = letterspace {
                append_fragments(&mut rows, spacing);
            }
        }
    }

    let output = rows
        .iter()
        .map(|row| row.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    if output.trim().is_empty() {
        None
    } else {
        Some(output)
    }
}

/// Appends one fragment per row; rows without a fragment get nothing.
fn append_fragments(rows: &mut [String], fragments: &[String]) {
    for (row, fragment) in rows.iter_mut().zip(fragments) {
        row.push_str(&strip_markup(fragment));
    }
}

/// A named set of glyph-table fonts.
#[derive(Debug, Default)]
pub struct GlyphTableLibrary {
    fonts: BTreeMap<String, FontDefinition>,
}

impl GlyphTableLibrary {
    /// Builds a library from already parsed fonts, keyed by font name.
    #[must_use]
    pub fn from_fonts(fonts: Vec<FontDefinition>) -> Self {
        Self {
            fonts: fonts.into_iter().map(|font| (font.name.clone(), font)).collect(),
        }
    }

    /// The fonts shipped with the plugin, parsed once per process.
    #[must_use]
    pub fn bundled() -> Arc<Self> {
        Arc::clone(&BUNDLED)
    }

    /// Looks up a font by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FontDefinition> {
        self.fonts.get(name)
    }
}

impl TextRenderer for GlyphTableLibrary {
    fn font_names(&self) -> Vec<String> {
        self.fonts.keys().cloned().collect()
    }

    fn render(&self, text: &str, font: &str) -> Option<String> {
        self.get(font).and_then(|definition| render(text, definition))
    }
}
