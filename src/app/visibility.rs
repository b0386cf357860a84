//! Explicit viewport observer for lazy card rendering.
//!
//! Cards register their key when they join the list. Each frame the state
//! reports which keys are on screen; a registered key that shows up is
//! returned once and unregistered, so a card is activated at most once.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct ViewportObserver {
    observed: HashSet<String>,
}

impl ViewportObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts observing `key`. Returns `false` if it was already observed.
    pub fn observe(&mut self, key: &str) -> bool {
        self.observed.insert(key.to_string())
    }

    #[must_use]
    pub fn is_observed(&self, key: &str) -> bool {
        self.observed.contains(key)
    }

    /// Number of keys still waiting for their first intersection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Reports the keys currently in the viewport.
    ///
    /// Returns the observed keys among them, in the given order, and releases
    /// their observation.
    pub fn report_visible<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        visible
            .into_iter()
            .filter(|key| self.observed.remove(*key))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_once_then_releases() {
        let mut observer = ViewportObserver::new();
        observer.observe("figlet:standard");
        observer.observe("bitmap:hash");

        assert_eq!(observer.report_visible(["figlet:standard"]), ["figlet:standard"]);
        assert!(observer.report_visible(["figlet:standard"]).is_empty());
        assert!(observer.is_observed("bitmap:hash"));
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn unobserved_keys_are_not_reported() {
        let mut observer = ViewportObserver::new();
        assert!(observer.report_visible(["cfonts:block"]).is_empty());

        observer.observe("cfonts:block");
        assert_eq!(observer.report_visible(["bitmap:hash", "cfonts:block"]), ["cfonts:block"]);
        assert!(observer.is_empty());
    }

    #[test]
    fn duplicate_registration_is_reported() {
        let mut observer = ViewportObserver::new();
        assert!(observer.observe("a"));
        assert!(!observer.observe("a"));
    }

    #[test]
    fn duplicate_keys_in_one_report_trigger_once() {
        let mut observer = ViewportObserver::new();
        observer.observe("a");
        assert_eq!(observer.report_visible(["a", "a"]), ["a"]);
    }
}
