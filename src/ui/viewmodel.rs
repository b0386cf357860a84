//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: art is already clipped
//! to the pane width and highlight ranges are already computed.
//!
//! # Example
//!
//! ```rust
//! use glyphdeck::ui::viewmodel::{CardItem, CardLine};
//!
//! let card = CardItem {
//!     title: "Doom".to_string(),
//!     tag: "figlet".to_string(),
//!     featured: true,
//!     is_selected: true,
//!     highlight_ranges: vec![(0, 2)],
//!     body: vec![CardLine::Placeholder("rendering…".to_string())],
//! };
//! assert!(card.featured);
//! ```

/// Everything one frame shows.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub tabs: Vec<TabItem>,
    pub text_bar: TextBarInfo,

    /// Present in search mode.
    pub search_bar: Option<SearchBarInfo>,

    /// Cards in the current window, top to bottom.
    pub cards: Vec<CardItem>,

    /// Present when the filtered list is empty.
    pub empty_state: Option<EmptyState>,

    pub status: StatusInfo,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// One library tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    /// Shortcut digit and library label, e.g. `2 FIGlet`.
    pub label: String,
    /// Catalog entries in this library.
    pub count: usize,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct TextBarInfo {
    /// Draft while editing, committed text otherwise.
    pub text: String,
    pub is_editing: bool,
    /// A draft is waiting for the debounce timer.
    pub is_pending: bool,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    /// Keys go to the query rather than the results.
    pub is_typing: bool,
}

/// One rendered catalog entry.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub title: String,
    /// Library tag shown after the title.
    pub tag: String,
    pub featured: bool,
    pub is_selected: bool,

    /// `(start, end)` character ranges of `title` matching the query.
    pub highlight_ranges: Vec<(usize, usize)>,

    pub body: Vec<CardLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardLine {
    /// A line of rendered art, clipped to the pane.
    Art(String),
    /// Shown while the card waits for a render, or when nothing rendered.
    Placeholder(String),
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub message: String,
    pub is_error: bool,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding hints for the current mode.
    pub keybindings: String,
}
