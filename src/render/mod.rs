//! Text renderers for the three font libraries.
//!
//! Every renderer is a pure function of `(text, font name)` and answers with
//! `Option<String>`: `None` means "nothing to show" (unknown font, empty
//! input, no drawable characters). Errors never escape a renderer.
//!
//! - [`glyph_table`]: cfonts-style glyph composition
//! - [`bitmap`]: 8×8 pixel rasterizer with on/off character styles
//! - [`figlet`]: adapter over the FIGlet typesetting engine
//! - [`markup`]: color markup stripping for glyph rows

pub mod bitmap;
pub mod figlet;
pub mod glyph_table;
pub mod markup;

pub use bitmap::{BitmapEngine, BitmapRasterizer, PixelMatrix, STYLES};
pub use figlet::FigletLibrary;
pub use glyph_table::GlyphTableLibrary;

use crate::domain::{CatalogEntry, Library};
use std::sync::Arc;

/// Common contract of the three font libraries.
pub trait TextRenderer {
    /// Names of every font the renderer can draw right now.
    fn font_names(&self) -> Vec<String>;

    /// Renders `text` with the named font.
    fn render(&self, text: &str, font: &str) -> Option<String>;
}

/// All renderers, routed by [`Library`].
#[derive(Debug)]
pub struct Renderers {
    /// FIGlet fonts; grows while the loader runs.
    pub figlet: FigletLibrary,
    /// Bundled glyph-table fonts.
    pub cfonts: Arc<GlyphTableLibrary>,
    /// Pixel font styles.
    pub bitmap: BitmapRasterizer,
}

impl Default for Renderers {
    fn default() -> Self {
        Self {
            figlet: FigletLibrary::with_builtin(),
            cfonts: GlyphTableLibrary::bundled(),
            bitmap: BitmapRasterizer,
        }
    }
}

impl Renderers {
    /// Returns the renderer responsible for `library`.
    #[must_use]
    pub fn for_library(&self, library: Library) -> &dyn TextRenderer {
        match library {
            Library::Figlet => &self.figlet,
            Library::Cfonts => self.cfonts.as_ref(),
            Library::Bitmap => &self.bitmap,
        }
    }

    /// Renders one catalog entry.
    #[must_use]
    pub fn render(&self, entry: &CatalogEntry, text: &str) -> Option<String> {
        let _span = tracing::trace_span!("render_entry", key = %entry.key).entered();
        self.for_library(entry.library).render(text, &entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_renders_nothing_in_every_library() {
        let renderers = Renderers::default();
        for library in Library::ALL {
            let renderer = renderers.for_library(library);
            for name in renderer.font_names() {
                assert_eq!(renderer.render("", &name), None, "{library}:{name}");
            }
        }
    }

    #[test]
    fn unknown_fonts_render_nothing() {
        let renderers = Renderers::default();
        for library in Library::ALL {
            assert_eq!(renderers.for_library(library).render("HI", "no-such-font"), None);
        }
    }

    #[test]
    fn routes_entries_to_their_library() {
        let renderers = Renderers::default();
        let entry = CatalogEntry::new(Library::Bitmap, "binary", "Binary", false);
        let art = renderers.render(&entry, "I").unwrap();
        assert!(art.chars().all(|c| matches!(c, '0' | '1' | '\n')));
    }
}
