//! Per-entry render cache.
//!
//! A card stays inert until the viewport observer reports it visible. From
//! then on it re-renders whenever it is drawn with a preview text different
//! from the one it last rendered.

use crate::domain::CatalogEntry;
use crate::render::Renderers;

/// What a card body shows for the current preview text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    Art(String),
    /// Not visible yet, or visible but not rendered for this text.
    Pending,
    /// The renderer produced nothing.
    Unavailable,
}

#[derive(Debug, Clone, Default)]
pub struct Card {
    activated: bool,
    cache: Option<(String, Option<String>)>,
    renders: usize,
}

impl Card {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.activated = true;
    }

    /// Renders `entry` if the card is active and `text` differs from the
    /// cached input. Returns whether a render happened.
    pub fn refresh(&mut self, entry: &CatalogEntry, text: &str, renderers: &Renderers) -> bool {
        if !self.activated {
            return false;
        }
        if self.cache.as_ref().is_some_and(|(cached, _)| cached == text) {
            return false;
        }
        let output = renderers.render(entry, text);
        self.cache = Some((text.to_string(), output));
        self.renders += 1;
        true
    }

    /// The body for `text`; stale cache entries count as pending.
    #[must_use]
    pub fn body(&self, text: &str) -> CardBody {
        match &self.cache {
            Some((cached, Some(art))) if cached == text => CardBody::Art(art.clone()),
            Some((cached, None)) if cached == text => CardBody::Unavailable,
            _ => CardBody::Pending,
        }
    }

    /// Rendered art for `text`, if any.
    #[must_use]
    pub fn art(&self, text: &str) -> Option<&str> {
        match &self.cache {
            Some((cached, Some(art))) if cached == text => Some(art),
            _ => None,
        }
    }

    /// How many times the renderer was invoked for this card.
    #[must_use]
    pub const fn renders(&self) -> usize {
        self.renders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Library;

    fn block() -> CatalogEntry {
        CatalogEntry::new(Library::Cfonts, "block", "Block", true)
    }

    #[test]
    fn inactive_card_never_renders() {
        let renderers = Renderers::default();
        let mut card = Card::new();
        assert!(!card.refresh(&block(), "Hi", &renderers));
        assert_eq!(card.body("Hi"), CardBody::Pending);
        assert_eq!(card.renders(), 0);
    }

    #[test]
    fn same_text_renders_once() {
        let renderers = Renderers::default();
        let mut card = Card::new();
        card.activate();
        assert!(card.refresh(&block(), "Hi", &renderers));
        assert!(!card.refresh(&block(), "Hi", &renderers));
        assert_eq!(card.renders(), 1);
        assert!(matches!(card.body("Hi"), CardBody::Art(_)));
        assert_eq!(card.body("Ho"), CardBody::Pending);
    }

    #[test]
    fn unknown_font_is_unavailable() {
        let renderers = Renderers::default();
        let mut card = Card::new();
        card.activate();
        let missing = CatalogEntry::new(Library::Cfonts, "nope", "Nope", false);
        card.refresh(&missing, "Hi", &renderers);
        assert_eq!(card.body("Hi"), CardBody::Unavailable);
        assert_eq!(card.art("Hi"), None);
    }
}
