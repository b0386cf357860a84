//! Font catalog: entry aggregation, filtering and ordering.
//!
//! The catalog is the union of three sources. cfonts and bitmap entries are
//! static; FIGlet entries come from the ready set published by the
//! [`loader::FontLoader`] after each batch, so the catalog only ever grows
//! while loading runs.
//!
//! - [`loader`]: Batched, cancellable FIGlet font loading

pub mod loader;

pub use loader::{Batch, FontLoader, LoadProgress, DEFAULT_BATCH_SIZE};

use crate::domain::font::display_name_for;
use crate::domain::{CatalogEntry, Library};
use crate::render::{bitmap, glyph_table, GlyphTableLibrary, TextRenderer};
use std::cmp::Ordering;
use std::collections::HashSet;

/// FIGlet fonts shown ahead of the rest, compared case-insensitively.
pub const FEATURED_FIGLET: [&str; 10] = [
    "standard",
    "big",
    "slant",
    "small",
    "banner",
    "block",
    "shadow",
    "doom",
    "ansi shadow",
    "3-d",
];

/// Whether a FIGlet font name is on the featured list.
#[must_use]
pub fn is_featured_figlet(name: &str) -> bool {
    let lower = name.to_lowercase();
    FEATURED_FIGLET.iter().any(|featured| *featured == lower)
}

/// The full, unfiltered set of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds the catalog from the ready FIGlet fonts and the static libraries.
    pub fn build<'a>(figlet_ready: impl IntoIterator<Item = &'a str>, cfonts: &GlyphTableLibrary) -> Self {
        let figlet = figlet_ready
            .into_iter()
            .map(|name| CatalogEntry::new(Library::Figlet, name, &display_name_for(name), is_featured_figlet(name)));

        let cfonts_entries = cfonts.font_names().into_iter().map(|name| {
            let featured = glyph_table::FEATURED.contains(&name.as_str());
            CatalogEntry::new(Library::Cfonts, &name, &display_name_for(&name), featured)
        });

        let bitmap_entries = bitmap::STYLES
            .iter()
            .map(|style| CatalogEntry::new(Library::Bitmap, style.name, style.display_name, style.featured));

        let mut seen = HashSet::new();
        let entries: Vec<CatalogEntry> = figlet
            .chain(cfonts_entries)
            .chain(bitmap_entries)
            .filter(|entry| seen.insert(entry.key.clone()))
            .collect();

        Self { entries }
    }

    /// Every entry, in source order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries from one library.
    #[must_use]
    pub fn count(&self, library: Library) -> usize {
        self.entries.iter().filter(|entry| entry.library == library).count()
    }

    /// Entries matching the library filter and search query, in display order.
    ///
    /// `library == None` means every library. The query matches
    /// case-insensitively as a substring of the display name or the library
    /// tag; an empty query matches everything.
    #[must_use]
    pub fn filter(&self, library: Option<Library>, query: &str) -> Vec<CatalogEntry> {
        let query = query.trim().to_lowercase();

        let mut visible: Vec<CatalogEntry> = self
            .entries
            .iter()
            .filter(|entry| library.map_or(true, |only| entry.library == only))
            .filter(|entry| query.is_empty() || matches_query(entry, &query))
            .cloned()
            .collect();

        visible.sort_by(|a, b| display_order(a, b, library.is_none()));
        visible
    }
}

/// Why a filtered list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// FIGlet fonts are still arriving and could fill the list.
    Loading,
    /// Nothing matches and nothing more will arrive for this filter.
    NoMatches,
}

impl CatalogStatus {
    /// Classifies an empty result for the given library filter.
    #[must_use]
    pub fn for_empty(library: Option<Library>, figlet_loading: bool) -> Self {
        let may_grow = matches!(library, None | Some(Library::Figlet));
        if figlet_loading && may_grow {
            Self::Loading
        } else {
            Self::NoMatches
        }
    }
}

fn matches_query(entry: &CatalogEntry, query: &str) -> bool {
    entry.display_name.to_lowercase().contains(query) || entry.library.tag().contains(query)
}

/// Featured first, then library groups (all-libraries view only), then name.
fn display_order(a: &CatalogEntry, b: &CatalogEntry, group_by_library: bool) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| {
            if group_by_library {
                a.library.cmp(&b.library)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()))
        .then_with(|| a.key.cmp(&b.key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::build(["standard", "doom", "alligator", "Wavy"], &GlyphTableLibrary::bundled())
    }

    #[test]
    fn includes_every_library() {
        let catalog = catalog();
        assert_eq!(catalog.count(Library::Figlet), 4);
        assert_eq!(catalog.count(Library::Cfonts), GlyphTableLibrary::bundled().font_names().len());
        assert_eq!(catalog.count(Library::Bitmap), bitmap::STYLES.len());
    }

    #[test]
    fn featured_first_then_grouped_by_library() {
        let keys: Vec<String> = catalog().filter(None, "").into_iter().map(|e| e.key).collect();

        let first_plain = keys.iter().position(|k| k == "figlet:alligator").unwrap();
        for featured in ["figlet:doom", "figlet:standard", "cfonts:block", "cfonts:half", "bitmap:blocks", "bitmap:hash"] {
            assert!(keys.iter().position(|k| k == featured).unwrap() < first_plain, "{featured}");
        }

        // featured group is itself ordered by library
        assert!(keys.iter().position(|k| k == "figlet:standard") < keys.iter().position(|k| k == "cfonts:block"));
        assert!(keys.iter().position(|k| k == "cfonts:half") < keys.iter().position(|k| k == "bitmap:blocks"));

        // non-featured: FIGlet before cfonts before bitmap
        assert!(keys.iter().position(|k| k == "figlet:Wavy") < keys.iter().position(|k| k == "cfonts:console"));
        assert!(keys.iter().position(|k| k == "cfonts:shade") < keys.iter().position(|k| k == "bitmap:binary"));
    }

    #[test]
    fn single_library_sorts_alphabetically_after_featured() {
        let names: Vec<String> = catalog()
            .filter(Some(Library::Figlet), "")
            .into_iter()
            .map(|e| e.display_name)
            .collect();
        assert_eq!(names, ["Doom", "Standard", "Alligator", "Wavy"]);
    }

    #[test]
    fn search_is_case_insensitive_on_name_or_tag() {
        let catalog = catalog();
        let hits: Vec<String> = catalog.filter(None, "DOO").into_iter().map(|e| e.key).collect();
        assert_eq!(hits, ["figlet:doom"]);

        assert_eq!(catalog.filter(None, "bitmap").len(), bitmap::STYLES.len());
        assert_eq!(catalog.filter(None, "  cfonts ").len(), catalog.count(Library::Cfonts));
    }

    #[test]
    fn duplicate_figlet_names_appear_once() {
        let catalog = Catalog::build(["standard", "big", "standard"], &GlyphTableLibrary::bundled());
        assert_eq!(catalog.count(Library::Figlet), 2);
    }

    #[test]
    fn no_match_in_single_library_is_empty() {
        assert!(catalog().filter(Some(Library::Cfonts), "doom").is_empty());
    }

    #[test]
    fn empty_static_library_is_never_loading() {
        assert_eq!(CatalogStatus::for_empty(Some(Library::Cfonts), true), CatalogStatus::NoMatches);
        assert_eq!(CatalogStatus::for_empty(Some(Library::Figlet), true), CatalogStatus::Loading);
        assert_eq!(CatalogStatus::for_empty(None, true), CatalogStatus::Loading);
        assert_eq!(CatalogStatus::for_empty(None, false), CatalogStatus::NoMatches);
    }

    #[test]
    fn featured_figlet_match_ignores_case() {
        assert!(is_featured_figlet("ANSI Shadow"));
        assert!(is_featured_figlet("Standard"));
        assert!(!is_featured_figlet("wavy"));
    }
}
