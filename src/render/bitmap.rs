//! Bitmap rasterizer over the shared 8×8 pixel font.
//!
//! One [`BitmapEngine`] exists per glyph geometry. It is built on first use by
//! registering every printable pattern of the `font8x8` basic set and is never
//! mutated afterwards. Styles only choose the two characters used when the
//! matrix is turned into text, so every style of the same text has the same
//! shape.

use crate::domain::error::{GlyphdeckError, Result};
use crate::domain::StyleDefinition;
use crate::render::TextRenderer;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// Rows of on/off cells, top to bottom.
pub type PixelMatrix = Vec<Vec<bool>>;

/// Blank columns inserted between two characters.
pub const CHAR_SPACING: usize = 1;

/// Width and height of the shared pixel font.
pub const GLYPH_SIZE: usize = 8;

/// Styles available in the bitmap library.
pub const STYLES: [StyleDefinition; 8] = [
    StyleDefinition { name: "blocks", display_name: "Blocks", on_char: '█', off_char: ' ', featured: true },
    StyleDefinition { name: "hash", display_name: "Hash", on_char: '#', off_char: ' ', featured: true },
    StyleDefinition { name: "binary", display_name: "Binary", on_char: '1', off_char: '0', featured: false },
    StyleDefinition { name: "shade", display_name: "Shade", on_char: '▓', off_char: '░', featured: false },
    StyleDefinition { name: "dots", display_name: "Dots", on_char: '•', off_char: ' ', featured: false },
    StyleDefinition { name: "stars", display_name: "Stars", on_char: '*', off_char: ' ', featured: false },
    StyleDefinition { name: "at", display_name: "At Sign", on_char: '@', off_char: '.', featured: false },
    StyleDefinition { name: "plus", display_name: "Plus Minus", on_char: '+', off_char: '-', featured: false },
];

static ENGINE_8X8: OnceCell<BitmapEngine> = OnceCell::new();

/// Character patterns of one geometry plus horizontal layout.
#[derive(Debug, Clone)]
pub struct BitmapEngine {
    width: usize,
    height: usize,
    glyphs: HashMap<char, PixelMatrix>,
}

impl BitmapEngine {
    /// Creates an engine with no registered characters.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            glyphs: HashMap::new(),
        }
    }

    /// The shared 8×8 engine, built on first call.
    pub fn shared() -> &'static Self {
        ENGINE_8X8.get_or_init(|| {
            let mut engine = Self::new(GLYPH_SIZE, GLYPH_SIZE);
            for ch in (0x20_u8..0x7f).map(char::from) {
                if let Some(rows) = BASIC_FONTS.get(ch) {
                    if let Err(e) = engine.register_char(ch, decode_rows(rows)) {
                        tracing::warn!(ch = %ch, error = %e, "skipping pixel pattern");
                    }
                }
            }
            tracing::debug!(glyphs = engine.glyphs.len(), "bitmap engine built");
            engine
        })
    }

    /// Registers the pattern for `ch`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphdeckError::Raster`] when the pattern does not match the
    /// engine's geometry.
    pub fn register_char(&mut self, ch: char, pattern: PixelMatrix) -> Result<()> {
        if pattern.len() != self.height || pattern.iter().any(|row| row.len() != self.width) {
            return Err(GlyphdeckError::Raster(format!(
                "pattern for `{ch}` is not {}x{}",
                self.width, self.height
            )));
        }
        self.glyphs.insert(ch, pattern);
        Ok(())
    }

    /// Lays out the patterns of `text` left to right.
    ///
    /// Characters without a pattern are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphdeckError::Raster`] when no character of `text` has a
    /// pattern, including empty input.
    pub fn generate_text(&self, text: &str) -> Result<PixelMatrix> {
        let glyphs: Vec<&PixelMatrix> = text.chars().filter_map(|ch| self.glyphs.get(&ch)).collect();
        if glyphs.is_empty() {
            return Err(GlyphdeckError::Raster(format!(
                "no pixel pattern for any character of {text:?}"
            )));
        }

        let width = glyphs.len() * self.width + (glyphs.len() - 1) * CHAR_SPACING;
        let mut matrix = vec![Vec::with_capacity(width); self.height];
        for (index, glyph) in glyphs.iter().enumerate() {
            for (row, pixels) in matrix.iter_mut().zip(glyph.iter()) {
                if index > 0 {
                    row.extend(std::iter::repeat(false).take(CHAR_SPACING));
                }
                row.extend_from_slice(pixels);
            }
        }
        Ok(matrix)
    }

    /// Turns a matrix into text, one line per row.
    ///
    /// ```
    /// use glyphdeck::render::BitmapEngine;
    ///
    /// let matrix = vec![vec![true, false], vec![false, true]];
    /// assert_eq!(BitmapEngine::to_ascii(&matrix, '#', '.'), "#.\n.#");
    /// ```
    #[must_use]
    pub fn to_ascii(matrix: &[Vec<bool>], on_char: char, off_char: char) -> String {
        matrix
            .iter()
            .map(|row| row.iter().map(|&on| if on { on_char } else { off_char }).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Expands `font8x8` rows; bit 0 of each byte is the leftmost pixel.
fn decode_rows(rows: [u8; 8]) -> PixelMatrix {
    rows.iter()
        .map(|byte| (0..GLYPH_SIZE).map(|bit| byte & (1 << bit) != 0).collect())
        .collect()
}

/// Looks up a bitmap style by name.
#[must_use]
pub fn style(name: &str) -> Option<&'static StyleDefinition> {
    STYLES.iter().find(|style| style.name == name)
}

/// Renderer for the bitmap library.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapRasterizer;

impl TextRenderer for BitmapRasterizer {
    fn font_names(&self) -> Vec<String> {
        STYLES.iter().map(|style| style.name.to_string()).collect()
    }

    fn render(&self, text: &str, font: &str) -> Option<String> {
        let style = style(font)?;
        match BitmapEngine::shared().generate_text(text) {
            Ok(matrix) => {
                let ascii = BitmapEngine::to_ascii(&matrix, style.on_char, style.off_char);
                (!ascii.is_empty()).then_some(ascii)
            }
            Err(e) => {
                tracing::debug!(style = %style.name, error = %e, "bitmap render produced nothing");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(art: &str) -> Vec<usize> {
        art.lines().map(|line| line.chars().count()).collect()
    }

    #[test]
    fn styles_share_geometry() {
        let hash = BitmapRasterizer.render("HI", "hash").unwrap();
        let binary = BitmapRasterizer.render("HI", "binary").unwrap();

        let swapped: String = hash
            .chars()
            .map(|c| match c {
                '#' => '1',
                ' ' => '0',
                other => other,
            })
            .collect();
        assert_eq!(swapped, binary);
        assert_eq!(shape(&hash), shape(&binary));
    }

    #[test]
    fn every_style_has_identical_shape() {
        let reference = shape(&BitmapRasterizer.render("Glyph 42", "blocks").unwrap());
        for style in STYLES {
            assert_eq!(shape(&BitmapRasterizer.render("Glyph 42", style.name).unwrap()), reference, "{}", style.name);
        }
    }

    #[test]
    fn lays_characters_out_with_one_blank_column() {
        let art = BitmapRasterizer.render("HI", "binary").unwrap();
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), GLYPH_SIZE);
        assert!(lines.iter().all(|line| line.len() == 2 * GLYPH_SIZE + CHAR_SPACING));
        assert!(lines.iter().all(|line| line.as_bytes()[GLYPH_SIZE] == b'0'));
    }

    #[test]
    fn empty_or_unmapped_text_renders_nothing() {
        assert_eq!(BitmapRasterizer.render("", "hash"), None);
        assert_eq!(BitmapRasterizer.render("λ→", "hash"), None);
    }

    #[test]
    fn unmapped_characters_are_skipped() {
        assert_eq!(BitmapRasterizer.render("HλI", "hash"), BitmapRasterizer.render("HI", "hash"));
    }

    #[test]
    fn unknown_style_renders_nothing() {
        assert_eq!(BitmapRasterizer.render("HI", "neon"), None);
    }

    #[test]
    fn register_rejects_wrong_geometry() {
        let mut engine = BitmapEngine::new(2, 2);
        assert!(engine.register_char('x', vec![vec![true]]).is_err());
        assert!(engine.register_char('x', vec![vec![true, false], vec![false, true]]).is_ok());
        assert_eq!(BitmapEngine::to_ascii(&engine.generate_text("xx").unwrap(), '#', '.'), "#..#.\n.#..#");
    }

    #[test]
    fn shared_engine_covers_printable_ascii() {
        let engine = BitmapEngine::shared();
        for ch in ('A'..='Z').chain('a'..='z').chain('0'..='9') {
            assert!(engine.glyphs.contains_key(&ch), "{ch}");
        }
    }

    #[test]
    fn decodes_low_bit_as_leftmost_pixel() {
        let matrix = decode_rows([0b0000_0001, 0, 0, 0, 0, 0, 0, 0b1000_0000]);
        assert!(matrix[0][0] && !matrix[0][7]);
        assert!(matrix[7][7] && !matrix[7][0]);
    }
}
