//! Application state and view model computation.
//!
//! [`AppState`] owns everything the pane shows: the catalog and its filtered
//! view, the FIGlet loader, the per-card render caches, the input modes and
//! the pending preview-text debounce. The handler mutates it; the renderer
//! reads a [`UIViewModel`] computed from it.
//!
//! # Rendering cycle
//!
//! Before every draw the plugin calls [`AppState::prepare_frame`], which
//! settles the card window for the pane height, reports the window to the
//! viewport observer and renders cards that just became visible or whose
//! cached text is stale. [`AppState::compute_viewmodel`] is then a pure read.

use super::card::{Card, CardBody};
use super::debounce::Debouncer;
use super::modes::{InputMode, SearchFocus, Tab};
use super::visibility::ViewportObserver;
use super::Action;
use crate::catalog::{Catalog, CatalogStatus, FontLoader};
use crate::domain::{CatalogEntry, Library};
use crate::infrastructure::strip_host_prefix;
use crate::render::figlet::BUILTIN_FONT;
use crate::render::Renderers;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, CardLine, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, StatusInfo, TabItem, TextBarInfo,
    UIViewModel,
};
use crate::Config;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashMap;
use std::time::Duration;

/// Rows taken by header, tab bar, preview text bar and the borders, status
/// and footer lines around the card list.
pub const CHROME_ROWS: usize = 7;

/// Extra rows taken by the search box.
pub const SEARCH_BAR_ROWS: usize = 3;

/// A transient message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug)]
pub struct AppState {
    pub renderers: Renderers,
    pub catalog: Catalog,
    pub loader: FontLoader,

    /// Catalog entries matching the active tab and query, in display order.
    pub visible: Vec<CatalogEntry>,

    /// Index into `visible`. Follows the selected entry across filter and
    /// catalog changes.
    pub selected_index: usize,

    /// First card of the window drawn last.
    pub scroll_offset: usize,

    /// Cards in the most recent window, used as the page size.
    pub page_size: usize,

    pub tab: Tab,
    pub input_mode: InputMode,
    pub search_query: String,

    /// Preview text the cards render.
    pub text: String,

    /// Preview text as typed; reaches `text` through the debouncer.
    pub text_input: String,

    pub debouncer: Debouncer<String>,
    pub observer: ViewportObserver,
    pub cards: HashMap<String, Card>,
    pub status: Option<StatusMessage>,
    pub theme: Theme,

    /// FIGlet font directory as seen from the plugin sandbox.
    pub figlet_dir: String,
    pub batch_size: usize,
}

impl AppState {
    /// Creates the state with the static libraries and the built-in FIGlet
    /// font in the catalog. FIGlet files are loaded once permissions arrive.
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        let mut state = Self {
            renderers: Renderers::default(),
            catalog: Catalog::default(),
            loader: FontLoader::new(),
            visible: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            page_size: 1,
            tab: Tab::All,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            text: config.text.clone(),
            text_input: config.text.clone(),
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            observer: ViewportObserver::new(),
            cards: HashMap::new(),
            status: None,
            theme,
            figlet_dir: config.figlet_dir.clone(),
            batch_size: config.batch_size,
        };
        state.publish_ready(&[]);
        state
    }

    /// Rebuilds the catalog from the built-in font plus a loader snapshot.
    ///
    /// New entries get an inert card and are registered with the viewport
    /// observer; existing cards keep their caches.
    pub fn publish_ready(&mut self, ready: &[String]) {
        let figlet = std::iter::once(BUILTIN_FONT).chain(ready.iter().map(String::as_str));
        self.catalog = Catalog::build(figlet, &self.renderers.cfonts);

        for entry in self.catalog.entries() {
            if !self.cards.contains_key(&entry.key) {
                self.cards.insert(entry.key.clone(), Card::new());
                self.observer.observe(&entry.key);
            }
        }

        tracing::debug!(
            entries = self.catalog.entries().len(),
            observed = self.observer.len(),
            "catalog rebuilt"
        );
        self.apply_filter();
    }

    /// Recomputes `visible` for the active tab and query.
    pub fn apply_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filter",
            tab = self.tab.label(),
            query_len = self.search_query.len()
        )
        .entered();

        let selected_key = self.selected_entry().map(|entry| entry.key.clone());
        self.visible = self.catalog.filter(self.tab.library(), &self.search_query);

        self.selected_index = selected_key
            .and_then(|key| self.visible.iter().position(|entry| entry.key == key))
            .unwrap_or_else(|| self.selected_index.min(self.visible.len().saturating_sub(1)));
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }

        tracing::debug!(visible = self.visible.len(), "filter applied");
    }

    /// Switches tab and starts at the top of the new list.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.apply_filter();
        self.selected_index = 0;
        self.status = None;
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.visible.get(self.selected_index)
    }

    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
        self.status = None;
    }

    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = self.selected_index.checked_sub(1).unwrap_or(self.visible.len() - 1);
        self.status = None;
    }

    /// Moves down by one window without wrapping.
    pub fn page_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + self.page_size.max(1)).min(self.visible.len() - 1);
        self.status = None;
    }

    /// Moves up by one window without wrapping.
    pub fn page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(self.page_size.max(1));
        self.status = None;
    }

    /// Arms the debounce timer for the current draft.
    pub fn schedule_text_commit(&mut self) -> Action {
        let seconds = self.debouncer.schedule(self.text_input.clone());
        Action::ScheduleTimer { seconds }
    }

    pub fn commit_text(&mut self, text: String) {
        if text != self.text {
            tracing::debug!(len = text.len(), "preview text committed");
            self.text = text;
        }
    }

    /// Art for `entry` with the committed text, rendering on demand when the
    /// card has not been drawn yet.
    #[must_use]
    pub fn art_for(&self, entry: &CatalogEntry) -> Option<String> {
        self.cards
            .get(&entry.key)
            .and_then(|card| card.art(&self.text))
            .map(ToString::to_string)
            .or_else(|| self.renderers.render(entry, &self.text))
    }

    pub fn set_info(&mut self, text: String) {
        self.status = Some(StatusMessage { text, is_error: false });
    }

    pub fn set_error(&mut self, text: String) {
        self.status = Some(StatusMessage { text, is_error: true });
    }

    /// Rows left for cards on a pane of `rows` rows.
    #[must_use]
    pub const fn list_rows(&self, rows: usize) -> usize {
        let chrome = match self.input_mode {
            InputMode::Search(_) => CHROME_ROWS + SEARCH_BAR_ROWS,
            InputMode::Normal | InputMode::EditText => CHROME_ROWS,
        };
        rows.saturating_sub(chrome)
    }

    /// Settles the card window and renders what became visible.
    ///
    /// Rendering can change card heights, so the window is computed again
    /// once after a pass that rendered anything.
    pub fn prepare_frame(&mut self, rows: usize) {
        let list_rows = self.list_rows(rows);

        for _ in 0..2 {
            let (start, end) = self.window(list_rows);
            self.scroll_offset = start;

            let keys: Vec<&str> = self.visible[start..end].iter().map(|entry| entry.key.as_str()).collect();
            for key in self.observer.report_visible(keys) {
                if let Some(card) = self.cards.get_mut(&key) {
                    card.activate();
                }
            }

            let mut rendered = 0;
            for entry in &self.visible[start..end] {
                if let Some(card) = self.cards.get_mut(&entry.key) {
                    if card.refresh(entry, &self.text, &self.renderers) {
                        rendered += 1;
                    }
                }
            }

            if rendered == 0 {
                break;
            }
            tracing::debug!(rendered, start, end, "cards rendered");
        }

        let (start, end) = self.window(list_rows);
        self.scroll_offset = start;
        self.page_size = (end - start).max(1);
    }

    /// Rows a card occupies: title, body and a blank separator.
    fn card_height(&self, entry: &CatalogEntry) -> usize {
        let body = match self.cards.get(&entry.key).map(|card| card.body(&self.text)) {
            Some(CardBody::Art(art)) => art.lines().count().max(1),
            _ => 1,
        };
        body + 2
    }

    /// `[start, end)` of the cards that fit in `list_rows`, keeping the
    /// selection on screen. At least one card is always included.
    fn window(&self, list_rows: usize) -> (usize, usize) {
        if self.visible.is_empty() {
            return (0, 0);
        }
        let selected = self.selected_index.min(self.visible.len() - 1);
        let mut start = self.scroll_offset.min(selected);

        let height_between = |from: usize, to: usize| -> usize {
            self.visible[from..=to].iter().map(|entry| self.card_height(entry)).sum()
        };
        while start < selected && height_between(start, selected) > list_rows {
            start += 1;
        }

        let mut end = start + 1;
        let mut used = self.card_height(&self.visible[start]);
        while end < self.visible.len() {
            let next = self.card_height(&self.visible[end]);
            if used + next > list_rows {
                break;
            }
            used += next;
            end += 1;
        }
        (start, end)
    }

    /// Computes the view model for a pane of `rows` × `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let (start, end) = self.window(self.list_rows(rows));

        let matcher = (!self.search_query.trim().is_empty()).then(SkimMatcherV2::default);
        let cards: Vec<CardItem> = self.visible[start..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| self.compute_card(entry, start + offset == self.selected_index, cols, matcher.as_ref()))
            .collect();

        let empty_state = self.visible.is_empty().then(|| self.compute_empty_state());

        UIViewModel {
            header: self.compute_header(),
            tabs: self.compute_tabs(),
            text_bar: TextBarInfo {
                text: if self.input_mode == InputMode::EditText {
                    self.text_input.clone()
                } else {
                    self.text.clone()
                },
                is_editing: self.input_mode == InputMode::EditText,
                is_pending: self.debouncer.is_pending(),
            },
            search_bar: self.compute_search_bar(),
            cards,
            empty_state,
            status: self.compute_status(),
            footer: self.compute_footer(),
        }
    }

    fn compute_card(
        &self,
        entry: &CatalogEntry,
        is_selected: bool,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> CardItem {
        let width = cols.saturating_sub(2);
        let body = match self.cards.get(&entry.key).map(|card| card.body(&self.text)) {
            Some(CardBody::Art(art)) => art.lines().map(|line| CardLine::Art(clip(line, width))).collect(),
            Some(CardBody::Unavailable) if self.text.is_empty() => vec![CardLine::Placeholder("type some preview text".to_string())],
            Some(CardBody::Unavailable) => vec![CardLine::Placeholder("cannot render this text".to_string())],
            Some(CardBody::Pending) | None => vec![CardLine::Placeholder("rendering…".to_string())],
        };

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| highlight_ranges(&entry.display_name, &self.search_query, m));

        CardItem {
            title: entry.display_name.clone(),
            tag: entry.library.tag().to_string(),
            featured: entry.featured,
            is_selected,
            highlight_ranges,
            body,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let total = self.catalog.entries().len();
        let title = if self.visible.len() == total {
            format!(" Glyphdeck ({total} fonts) ")
        } else {
            format!(" Glyphdeck ({} of {total} fonts) ", self.visible.len())
        };
        HeaderInfo { title }
    }

    fn compute_tabs(&self) -> Vec<TabItem> {
        Tab::ALL
            .iter()
            .enumerate()
            .map(|(position, tab)| TabItem {
                label: format!("{} {}", position + 1, tab.label()),
                count: tab
                    .library()
                    .map_or_else(|| self.catalog.entries().len(), |library| self.catalog.count(library)),
                is_active: *tab == self.tab,
            })
            .collect()
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            InputMode::Normal | InputMode::EditText => None,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        match CatalogStatus::for_empty(self.tab.library(), self.loader.is_loading()) {
            CatalogStatus::Loading => EmptyState {
                message: "Loading fonts…".to_string(),
                subtitle: "FIGlet fonts are still arriving".to_string(),
            },
            CatalogStatus::NoMatches => EmptyState {
                message: "No fonts match".to_string(),
                subtitle: if self.search_query.is_empty() {
                    format!("The {} library is empty", self.tab.label())
                } else {
                    format!("Nothing in {} matches \"{}\"", self.tab.label(), self.search_query)
                },
            },
        }
    }

    fn compute_status(&self) -> StatusInfo {
        if let Some(status) = &self.status {
            return StatusInfo {
                message: status.text.clone(),
                is_error: status.is_error,
            };
        }
        let (loaded, total) = self.loader.counts();
        if self.loader.is_loading() {
            return StatusInfo {
                message: format!("Loading FIGlet fonts {loaded}/{total}"),
                is_error: false,
            };
        }
        let failed = self.loader.failed().len();
        let figlet = self.catalog.count(Library::Figlet);
        let message = if self.loader.is_finished() && total == 0 {
            format!("No FIGlet files in {}", strip_host_prefix(&self.figlet_dir))
        } else if failed == 0 {
            format!("{figlet} FIGlet fonts ready")
        } else {
            format!("{figlet} FIGlet fonts ready, {failed} failed")
        };
        StatusInfo { message, is_error: false }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => "j/k: move  Tab/1-4: library  /: search  e: edit text  Enter/y: copy  q: quit",
            InputMode::EditText => "Type preview text  Enter: apply  Esc: done  Ctrl+n/p: move",
            InputMode::Search(SearchFocus::Typing) => "Type to filter  Enter: results  Esc: exit search  Ctrl+n/p: move",
            InputMode::Search(SearchFocus::Navigating) => "j/k: move  /: edit query  Enter/y: copy  Esc: exit search",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// First `width` characters of `line`.
fn clip(line: &str, width: usize) -> String {
    line.chars().take(width).collect()
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query.trim()) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(&Config::default(), Theme::default())
    }

    #[test]
    fn starts_with_static_libraries_and_builtin_figlet() {
        let state = state();
        assert_eq!(state.catalog.count(Library::Figlet), 1);
        assert!(state.catalog.count(Library::Cfonts) > 0);
        assert_eq!(state.visible.len(), state.catalog.entries().len());
        assert_eq!(state.observer.len(), state.catalog.entries().len());
    }

    #[test]
    fn only_visible_cards_render() {
        let mut state = state();
        state.prepare_frame(20);

        let (start, end) = state.window(state.list_rows(20));
        for entry in &state.visible[start..end] {
            assert_eq!(state.cards[&entry.key].renders(), 1, "{}", entry.key);
        }
        let rendered = state.cards.values().filter(|card| card.renders() > 0).count();
        assert!(rendered < state.visible.len());
        let last = state.visible.last().unwrap();
        assert_eq!(state.cards[&last.key].renders(), 0);
        assert!(state.observer.is_observed(&last.key));
    }

    #[test]
    fn visibility_fires_once_per_card() {
        let mut state = state();
        state.prepare_frame(20);
        let observed = state.observer.len();
        state.prepare_frame(20);
        assert_eq!(state.observer.len(), observed);
        let first = &state.visible[0].key;
        assert!(!state.observer.is_observed(first));
        assert_eq!(state.cards[first].renders(), 1);
    }

    #[test]
    fn committed_text_re_renders_active_cards() {
        let mut state = state();
        state.prepare_frame(20);
        let first = state.visible[0].key.clone();
        state.commit_text("Yo".to_string());
        state.prepare_frame(20);
        assert_eq!(state.cards[&first].renders(), 2);
    }

    #[test]
    fn selection_stays_in_window() {
        let mut state = state();
        state.selected_index = state.visible.len() - 1;
        state.prepare_frame(20);
        let (start, end) = state.window(state.list_rows(20));
        assert!((start..end).contains(&state.selected_index));
        assert_eq!(state.scroll_offset, start);
    }

    #[test]
    fn tiny_pane_still_shows_one_card() {
        let mut state = state();
        state.prepare_frame(3);
        let vm = state.compute_viewmodel(3, 40);
        assert_eq!(vm.cards.len(), 1);
    }

    #[test]
    fn selection_follows_entry_across_filters() {
        let mut state = state();
        let target = state
            .visible
            .iter()
            .position(|entry| entry.key == "bitmap:hash")
            .unwrap();
        state.selected_index = target;
        state.search_query = "ha".to_string();
        state.apply_filter();
        assert_eq!(state.selected_entry().unwrap().key, "bitmap:hash");
    }

    #[test]
    fn selection_wraps() {
        let mut state = state();
        state.move_selection_up();
        assert_eq!(state.selected_index, state.visible.len() - 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn empty_static_tab_reports_no_match_while_loading() {
        let mut state = state();
        assert!(state.loader.start_listing());
        state.select_tab(Tab::Cfonts);
        state.search_query = "zzzz".to_string();
        state.apply_filter();

        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No fonts match");

        state.select_tab(Tab::Figlet);
        state.search_query = "zzzz".to_string();
        state.apply_filter();
        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.empty_state.unwrap().message, "Loading fonts…");
    }

    #[test]
    fn status_shows_loading_progress() {
        let mut state = state();
        state.loader.start_listing();
        state.loader.plan(vec!["a".to_string(), "b".to_string()], 20);
        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.status.message, "Loading FIGlet fonts 0/2");
    }

    #[test]
    fn art_lines_are_clipped_to_pane_width() {
        let mut state = state();
        state.commit_text("WIDE TEXT HERE".to_string());
        state.prepare_frame(40);
        let vm = state.compute_viewmodel(40, 12);
        for card in &vm.cards {
            for line in &card.body {
                if let CardLine::Art(art) = line {
                    assert!(art.chars().count() <= 10);
                }
            }
        }
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges("Standard", "stan", &matcher), vec![(0, 4)]);
        assert!(highlight_ranges("Doom", "xyz", &matcher).is_empty());
    }
}
