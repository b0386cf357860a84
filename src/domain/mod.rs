//! Domain layer: font catalog types and errors.
//!
//! Nothing in here knows about Zellij. The types describe the three font
//! libraries, the entries shown in the catalog and the data shapes the
//! renderers consume.
//!
//! - [`error`]: Error types and result aliases
//! - [`font`]: Libraries, catalog entries, glyph tables and bitmap styles

pub mod error;
pub mod font;

pub use error::{GlyphdeckError, Result};
pub use font::{CatalogEntry, FontDefinition, Library, StyleDefinition};
