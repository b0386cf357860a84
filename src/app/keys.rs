//! Key bindings.
//!
//! Global (all modes):
//! - `Ctrl+n` / `Ctrl+p`: move down / up
//! - `Tab` / `Shift+Tab`: next / previous library tab
//! - `Down` / `Up`, `PageDown` / `PageUp`: move
//!
//! Normal mode:
//! - `j` / `k`: move
//! - `1`–`4`: select tab
//! - `/`: search
//! - `e` or `i`: edit preview text
//! - `Enter`, `c` or `y`: copy selected card
//! - `q`: hide the plugin
//!
//! Edit mode types into the preview text; `Enter` commits, `Esc` leaves.
//! Search mode types into the query; `Enter` moves to the results, where the
//! normal-mode navigation and copy keys apply and `/` returns to the query.

use super::handler::Event;
use super::modes::{InputMode, SearchFocus, Tab};
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Translates a key press into an application event for the given mode.
///
/// Returns `None` for keys with no binding in that mode.
#[must_use]
pub fn map_key(mode: InputMode, key: &KeyWithModifier) -> Option<Event> {
    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::KeyDown),
            BareKey::Char('p') => Some(Event::KeyUp),
            _ => None,
        };
    }

    match key.bare_key {
        BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => return Some(Event::PrevTab),
        BareKey::Tab => return Some(Event::NextTab),
        BareKey::Down => return Some(Event::KeyDown),
        BareKey::Up => return Some(Event::KeyUp),
        BareKey::PageDown => return Some(Event::PageDown),
        BareKey::PageUp => return Some(Event::PageUp),
        _ => {}
    }

    match mode {
        InputMode::Normal => map_navigation(key, Event::SearchMode, None),
        InputMode::Search(SearchFocus::Navigating) => {
            map_navigation(key, Event::FocusSearchBar, Some(Event::ExitSearch))
        }
        InputMode::Search(SearchFocus::Typing) => map_typing(key, Event::FocusResults, Event::ExitSearch),
        InputMode::EditText => map_typing(key, Event::Submit, Event::Escape),
    }
}

fn map_navigation(key: &KeyWithModifier, slash: Event, esc: Option<Event>) -> Option<Event> {
    Some(match key.bare_key {
        BareKey::Char('j') => Event::KeyDown,
        BareKey::Char('k') => Event::KeyUp,
        BareKey::Char('/') => slash,
        BareKey::Char('e' | 'i') => Event::EditText,
        BareKey::Enter | BareKey::Char('c' | 'y') => Event::Copy,
        BareKey::Char('q') => Event::CloseFocus,
        BareKey::Char(digit @ '1'..='4') => Event::SelectTab(Tab::from_digit(digit)?),
        BareKey::Esc => return esc,
        _ => return None,
    })
}

fn map_typing(key: &KeyWithModifier, enter: Event, esc: Event) -> Option<Event> {
    Some(match key.bare_key {
        BareKey::Enter => enter,
        BareKey::Esc => esc,
        BareKey::Backspace => Event::Backspace,
        BareKey::Char(c) => Event::Char(c),
        _ => return None,
    })
}
