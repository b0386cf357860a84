//! Input modes and library tabs.
//!
//! The input mode decides how keys are interpreted:
//! - **Normal**: navigation and commands
//! - **EditText**: typing into the preview text field
//! - **Search**: typing a query, or navigating its results
//!
//! The tab decides which library the card list shows.

use crate::domain::Library;

/// Focus inside search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the query.
    Typing,
    /// Keys move through the filtered cards; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Characters go to the preview text; changes reach the cards debounced.
    EditText,
    Search(SearchFocus),
}

/// Library filter shown as a tab above the cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Figlet,
    Cfonts,
    Bitmap,
}

impl Tab {
    /// Tabs in display order; the `1`–`4` shortcuts follow it.
    pub const ALL: [Self; 4] = [Self::All, Self::Figlet, Self::Cfonts, Self::Bitmap];

    /// The library this tab restricts to, `None` for all of them.
    #[must_use]
    pub const fn library(self) -> Option<Library> {
        match self {
            Self::All => None,
            Self::Figlet => Some(Library::Figlet),
            Self::Cfonts => Some(Library::Cfonts),
            Self::Bitmap => Some(Library::Bitmap),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.library() {
            None => "All",
            Some(library) => library.label(),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Figlet => 1,
            Self::Cfonts => 2,
            Self::Bitmap => 3,
        }
    }

    /// The tab to the right, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The tab to the left, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Maps the `1`–`4` shortcuts.
    ///
    /// ```
    /// use glyphdeck::app::Tab;
    ///
    /// assert_eq!(Tab::from_digit('3'), Some(Tab::Cfonts));
    /// assert_eq!(Tab::from_digit('5'), None);
    /// ```
    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        let position = digit.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(usize::try_from(position).ok()?).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle_in_both_directions() {
        let mut tab = Tab::All;
        for _ in 0..Tab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::All);
        assert_eq!(Tab::All.prev(), Tab::Bitmap);
        assert_eq!(Tab::Bitmap.next(), Tab::All);
    }

    #[test]
    fn digit_zero_is_not_a_tab() {
        assert_eq!(Tab::from_digit('0'), None);
        assert_eq!(Tab::from_digit('1'), Some(Tab::All));
        assert_eq!(Tab::from_digit('x'), None);
    }

    #[test]
    fn labels_follow_library_labels() {
        assert_eq!(Tab::Figlet.label(), "FIGlet");
        assert_eq!(Tab::All.label(), "All");
    }
}
