//! Color markup stripping.
//!
//! cfonts-style glyph rows wrap colored runs in `<c1>…</c1>` tags. The
//! catalog renders monochrome, so the tags are removed verbatim and only the
//! visible characters remain.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static COLOR_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?c\d+>").expect("color tag pattern is valid"));

/// Removes `<cN>` and `</cN>` tags from a glyph row.
///
/// Borrows the input unchanged when it contains no tags.
///
/// ```
/// use glyphdeck::render::markup::strip_markup;
///
/// assert_eq!(strip_markup("<c1>██</c1><c2>╗</c2>"), "██╗");
/// assert_eq!(strip_markup("/\\"), "/\\");
/// ```
#[must_use]
pub fn strip_markup(row: &str) -> Cow<'_, str> {
    COLOR_TAG.replace_all(row, "")
}
