//! Adapter over the FIGlet typesetting engine.
//!
//! Font data and layout belong to `figlet-rs`; this module only keeps the
//! parsed fonts by name and normalizes the engine's output. The engine's
//! built-in `standard` font is available before any file has been loaded.

use crate::domain::error::{GlyphdeckError, Result};
use crate::render::TextRenderer;
use figlet_rs::FIGfont;
use std::collections::BTreeMap;
use std::fmt;

/// Name under which the engine's built-in font is registered.
pub const BUILTIN_FONT: &str = "standard";

/// Parsed FIGlet fonts keyed by name.
#[derive(Default)]
pub struct FigletLibrary {
    fonts: BTreeMap<String, FIGfont>,
}

impl fmt::Debug for FigletLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigletLibrary")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FigletLibrary {
    /// Creates a library holding only the built-in font.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut library = Self::default();
        match FIGfont::standard() {
            Ok(font) => {
                library.fonts.insert(BUILTIN_FONT.to_string(), font);
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "built-in FIGlet font failed to parse");
            }
        }
        library
    }

    /// Parses `data` as a FIGlet font and registers it under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphdeckError::FontParse`] when the header, line count or
    /// end marks are malformed, or the engine rejects the data. The library
    /// is left unchanged in that case.
    pub fn parse_font(&mut self, name: &str, data: &str) -> Result<()> {
        let font = check_layout(data)
            .and_then(|()| FIGfont::from_content(data))
            .map_err(|reason| GlyphdeckError::FontParse {
                name: name.to_string(),
                reason,
            })?;
        self.fonts.insert(name.to_string(), font);
        Ok(())
    }

    /// Whether a font is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Number of registered fonts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether no font is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Typesets `text` with the named font.
    ///
    /// Trailing whitespace is removed from every line and blank trailing
    /// lines are dropped. Returns `None` for unknown fonts, empty input and
    /// output without visible characters.
    #[must_use]
    pub fn text_sync(&self, text: &str, name: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        let figure = self.fonts.get(name)?.convert(text)?;
        let raw = figure.to_string();

        let mut lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let output = lines.join("\n");

        if output.trim().is_empty() {
            None
        } else {
            Some(output)
        }
    }
}

/// Glyphs every font defines before any code-tagged ones: ASCII 32 to 126
/// and seven German characters.
const REQUIRED_GLYPHS: usize = 102;

/// Rejects files whose layout `FIGfont::from_content` would index past.
///
/// The engine slices every glyph line in front of its end marks and sizes
/// the code-tagged section as `lines - (1 + comments + 102 * height)`.
/// Everything it indexes that way is checked here first.
fn check_layout(data: &str) -> std::result::Result<(), String> {
    let lines: Vec<&str> = data.lines().collect();
    let header = lines.first().ok_or("font file is empty")?;

    let fields: Vec<&str> = header.trim().split(' ').collect();
    if fields.len() < 6 {
        return Err("header has fewer than six fields".to_string());
    }
    let signature = fields[0];
    if signature.len() < 6 || !signature.is_char_boundary(signature.len() - 1) {
        return Err(format!("malformed signature `{signature}`"));
    }
    let height: usize = fields[1]
        .parse()
        .map_err(|_| format!("invalid height `{}`", fields[1]))?;
    let comments: usize = fields[5]
        .parse()
        .map_err(|_| format!("invalid comment line count `{}`", fields[5]))?;
    if height == 0 {
        return Err("height must be at least 1".to_string());
    }

    let glyph_start = comments.checked_add(1).ok_or("header numbers overflow")?;
    let required_end = height
        .checked_mul(REQUIRED_GLYPHS)
        .and_then(|rows| rows.checked_add(glyph_start))
        .ok_or("header numbers overflow")?;
    if lines.len() < required_end {
        return Err(format!("expected at least {required_end} lines, found {}", lines.len()));
    }

    for (offset, line) in lines[glyph_start..required_end].iter().enumerate() {
        let last_row = offset % height == height - 1;
        check_glyph_line(line, glyph_start + offset + 1, end_marks(height, last_row))?;
    }

    // The engine refuses a code-tagged section that is not whole on its own.
    let tagged = &lines[required_end..];
    if tagged.len() % (height + 1) == 0 {
        for (chunk_index, chunk) in tagged.chunks(height + 1).enumerate() {
            let chunk_start = required_end + chunk_index * (height + 1);
            for (row, line) in chunk[1..].iter().enumerate() {
                check_glyph_line(line, chunk_start + row + 2, end_marks(height, row == height - 1))?;
            }
        }
    }
    Ok(())
}

/// End mark bytes the engine strips from a glyph line.
const fn end_marks(height: usize, last_row: bool) -> usize {
    if last_row && height != 1 {
        2
    } else {
        1
    }
}

fn check_glyph_line(line: &str, number: usize, marks: usize) -> std::result::Result<(), String> {
    let bytes = line.as_bytes();
    if bytes.len() < marks || !bytes[bytes.len() - marks..].is_ascii() {
        return Err(format!("line {number} does not end in an ASCII end mark"));
    }
    Ok(())
}

/// A complete font whose glyphs are all `#`, `height` rows tall.
#[cfg(test)]
pub(crate) fn sample_font(height: usize) -> String {
    let mut font = format!("flf2a$ {height} {height} 8 -1 0\n");
    for _ in 0..REQUIRED_GLYPHS {
        for row in 0..height {
            font.push_str(if height > 1 && row == height - 1 { "#@@\n" } else { "#@\n" });
        }
    }
    font
}

impl TextRenderer for FigletLibrary {
    fn font_names(&self) -> Vec<String> {
        self.fonts.keys().cloned().collect()
    }

    fn render(&self, text: &str, font: &str) -> Option<String> {
        self.text_sync(text, font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_font_is_ready() {
        let library = FigletLibrary::with_builtin();
        assert!(library.contains(BUILTIN_FONT));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn renders_multi_line_output_without_trailing_blanks() {
        let library = FigletLibrary::with_builtin();
        let art = library.text_sync("Hi", BUILTIN_FONT).unwrap();

        assert!(art.lines().count() > 1);
        assert!(art.lines().all(|line| line == line.trim_end()));
        assert!(!art.ends_with('\n'));
    }

    #[test]
    fn empty_text_and_unknown_fonts_render_nothing() {
        let library = FigletLibrary::with_builtin();
        assert_eq!(library.text_sync("", BUILTIN_FONT), None);
        assert_eq!(library.text_sync("Hi", "missing"), None);
    }

    #[test]
    fn rendering_is_idempotent() {
        let library = FigletLibrary::with_builtin();
        assert_eq!(library.text_sync("Glyph", BUILTIN_FONT), library.text_sync("Glyph", BUILTIN_FONT));
    }

    fn assert_rejected(data: &str) {
        let mut library = FigletLibrary::default();
        let err = library.parse_font("bad", data).unwrap_err();
        assert!(matches!(err, GlyphdeckError::FontParse { .. }), "{err}");
        assert!(library.is_empty());
    }

    /// `sample_font(height)` with line `index` (0 is the header) replaced.
    fn with_line(height: usize, index: usize, line: &str) -> String {
        let mut lines: Vec<String> = sample_font(height).lines().map(String::from).collect();
        lines[index] = line.to_string();
        lines.join("\n")
    }

    #[test]
    fn parses_a_complete_minimal_font() {
        for height in [1, 3] {
            let mut library = FigletLibrary::default();
            library.parse_font("mini", &sample_font(height)).unwrap();
            let art = library.text_sync("Hi", "mini").unwrap();
            assert_eq!(art, vec!["##"; height].join("\n"));
        }
    }

    #[test]
    fn zero_height_is_rejected() {
        assert_rejected("flf2a$ 0 0 8 -1 0\n@@\n");
    }

    #[test]
    fn negative_comment_count_is_rejected() {
        assert_rejected(&sample_font(1).replacen(" 0\n", " -1\n", 1));
    }

    #[test]
    fn truncated_fonts_are_rejected() {
        assert_rejected("flf2a$ 2 1 8 -1 0\n\n\n");
        let full = sample_font(2);
        let truncated: Vec<&str> = full.lines().take(150).collect();
        assert_rejected(&truncated.join("\n"));
    }

    #[test]
    fn empty_glyph_lines_are_rejected() {
        assert_rejected(&with_line(1, 40, ""));
        // Last rows of taller glyphs carry two end marks.
        assert_rejected(&with_line(2, 2, "@"));
    }

    #[test]
    fn multibyte_end_marks_are_rejected() {
        let lossy = String::from_utf8_lossy(b" \xe9").into_owned();
        assert_rejected(&with_line(1, 10, &lossy));
        assert_rejected(&with_line(2, 4, "#\u{e9}@"));
        assert_rejected(&sample_font(1).replacen("flf2a$", "flf2a\u{e9}", 1));
    }

    #[test]
    fn malformed_code_tagged_glyphs_are_rejected() {
        let mut font = sample_font(1);
        font.push_str("196 LATIN CAPITAL LETTER A WITH DIAERESIS\n#@\n");
        FigletLibrary::default().parse_font("tagged", &font).unwrap();

        font.push_str("0x2603 SNOWMAN\n\n");
        assert_rejected(&font);
    }

    #[test]
    fn rejects_garbage_font_data() {
        let mut library = FigletLibrary::with_builtin();
        let err = library.parse_font("junk", "this is not a font").unwrap_err();
        assert!(matches!(err, GlyphdeckError::FontParse { ref name, .. } if name == "junk"));
        assert!(!library.contains("junk"));
    }
}
