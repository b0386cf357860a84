//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place application state changes in response
//! to the outside world. It returns whether the pane should re-render and the
//! side effects to perform, in order.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `PageDown`, `PageUp`, tab switching
//! - **Input**: `Char`, `Backspace`, `Submit`, `Escape`
//! - **Modes**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `EditText`
//! - **System**: `Timer`, `PermissionsResult`, `BeforeClose`, `ClipboardResult`
//! - **Worker**: `WorkerResponse` carrying font listings and batches
//!
//! # Example
//!
//! ```rust
//! use glyphdeck::app::{handle_event, AppState, Event};
//! use glyphdeck::Config;
//!
//! let mut state = AppState::new(&Config::default(), Default::default());
//! let (render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), glyphdeck::GlyphdeckError>(())
//! ```

use super::modes::{InputMode, SearchFocus, Tab};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events from key input, the Zellij runtime or the font worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down by one card (wraps to top).
    KeyDown,
    /// Moves the selection up by one card (wraps to bottom).
    KeyUp,
    /// Moves the selection down by the number of cards on screen.
    PageDown,
    /// Moves the selection up by the number of cards on screen.
    PageUp,
    NextTab,
    PrevTab,
    SelectTab(Tab),

    /// Enters search mode with typing focus and an empty query.
    SearchMode,
    /// Returns from result navigation to the query.
    FocusSearchBar,
    /// Moves focus from the query to the results.
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Starts editing the preview text.
    EditText,

    Char(char),
    Backspace,
    /// Commits the preview text immediately and leaves edit mode.
    Submit,
    /// Leaves edit mode; the draft still reaches the cards once debounced.
    Escape,

    /// Copies the selected card's art.
    Copy,
    /// Hides the plugin pane.
    CloseFocus,

    /// A timer armed by `Action::ScheduleTimer` fired.
    Timer,
    PermissionsResult {
        granted: bool,
    },
    /// The plugin is about to be unloaded.
    BeforeClose,
    WorkerResponse(WorkerResponse),
    /// The clipboard command finished.
    ClipboardResult {
        success: bool,
        label: String,
        error: String,
    },
}

/// Processes one event and returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps room for handlers that can fail
/// without changing the plugin shim.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::PageDown => {
            state.page_down();
            Ok((true, vec![]))
        }
        Event::PageUp => {
            state.page_up();
            Ok((true, vec![]))
        }
        Event::NextTab => {
            state.select_tab(state.tab.next());
            Ok((true, vec![]))
        }
        Event::PrevTab => {
            state.select_tab(state.tab.prev());
            Ok((true, vec![]))
        }
        Event::SelectTab(tab) => {
            if *tab == state.tab {
                return Ok((false, vec![]));
            }
            state.select_tab(*tab);
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.search_query.clear();
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::EditText => {
            state.input_mode = InputMode::EditText;
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search(_) => {
                state.input_mode = InputMode::Search(SearchFocus::Typing);
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, "search query updated");
                state.apply_filter();
                Ok((true, vec![]))
            }
            InputMode::EditText => {
                state.text_input.push(*c);
                Ok((true, vec![state.schedule_text_commit()]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search(_) => {
                state.search_query.pop();
                state.apply_filter();
                Ok((true, vec![]))
            }
            InputMode::EditText => {
                if state.text_input.pop().is_none() {
                    return Ok((false, vec![]));
                }
                Ok((true, vec![state.schedule_text_commit()]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Submit => {
            if state.input_mode != InputMode::EditText {
                return Ok((false, vec![]));
            }
            state.debouncer.cancel();
            state.commit_text(state.text_input.clone());
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.input_mode == InputMode::Normal {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Copy => {
            let Some(entry) = state.selected_entry().cloned() else {
                tracing::debug!("no card selected");
                return Ok((false, vec![]));
            };
            match state.art_for(&entry) {
                Some(text) => {
                    tracing::debug!(key = %entry.key, bytes = text.len(), "copying card");
                    Ok((
                        false,
                        vec![Action::CopyToClipboard {
                            label: entry.display_name,
                            text,
                        }],
                    ))
                }
                None => {
                    state.set_error(format!("Nothing to copy for {}", entry.display_name));
                    Ok((true, vec![]))
                }
            }
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Timer => match state.debouncer.fire() {
            Some(text) => {
                state.commit_text(text);
                Ok((true, vec![]))
            }
            None => Ok((false, vec![])),
        },
        Event::PermissionsResult { granted } => {
            if !*granted {
                tracing::warn!("permissions denied, FIGlet fonts from disk unavailable");
                state.loader.cancel();
                state.set_error("Permissions denied: only built-in fonts available".to_string());
                return Ok((true, vec![]));
            }
            if !state.loader.start_listing() {
                return Ok((false, vec![]));
            }
            tracing::info!(dir = %state.figlet_dir, "listing FIGlet fonts");
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::list_fonts(state.figlet_dir.clone()))],
            ))
        }
        Event::BeforeClose => {
            state.loader.cancel();
            Ok((false, vec![]))
        }
        Event::ClipboardResult { success, label, error } => {
            if *success {
                state.set_info(format!("Copied {label}"));
            } else {
                tracing::warn!(font = %label, error = %error, "clipboard command failed");
                let reason = error.lines().next().unwrap_or("clipboard command failed");
                state.set_error(format!("Copy failed: {reason}"));
            }
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::FontsListed { names } => {
            let fresh: Vec<String> = names
                .iter()
                .filter(|name| !state.renderers.figlet.contains(name))
                .cloned()
                .collect();
            tracing::debug!(listed = names.len(), fresh = fresh.len(), "FIGlet fonts listed");
            state.loader.plan(fresh, state.batch_size);
            Ok((true, next_batch(state)))
        }
        WorkerResponse::FontBatchLoaded { batch, fonts, failed } => {
            if !state.loader.expects(*batch) {
                tracing::debug!(batch, cancelled = state.loader.is_cancelled(), "ignoring batch reply");
                return Ok((false, vec![]));
            }

            let mut loaded = Vec::with_capacity(fonts.len());
            let mut rejected: Vec<String> = failed.iter().map(|font| font.name.clone()).collect();
            for font in fonts {
                match state.renderers.figlet.parse_font(&font.name, &font.data) {
                    Ok(()) => loaded.push(font.name.clone()),
                    Err(e) => {
                        tracing::warn!(font = %font.name, error = %e, "skipping unparsable FIGlet font");
                        rejected.push(font.name.clone());
                    }
                }
            }

            if let Some(progress) = state.loader.complete_batch(*batch, loaded, rejected) {
                tracing::debug!(
                    batch = progress.batch,
                    batches = progress.batches,
                    loaded = progress.loaded,
                    "FIGlet batch ready"
                );
                state.publish_ready(&progress.ready);
            }
            Ok((true, next_batch(state)))
        }
        WorkerResponse::Error { message } => {
            tracing::error!(error = %message, "font worker error");
            state.loader.cancel();
            state.set_error(format!("Font loading failed: {message}"));
            Ok((true, vec![]))
        }
    }
}

fn next_batch(state: &mut AppState) -> Vec<Action> {
    state.loader.next_batch().map_or_else(Vec::new, |batch| {
        vec![Action::PostToWorker(WorkerMessage::load_font_batch(
            state.figlet_dir.clone(),
            batch.index,
            batch.names,
        ))]
    })
}

/// Short event name for span fields; worker payloads can be large.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::PageDown => "PageDown",
        Event::PageUp => "PageUp",
        Event::NextTab => "NextTab",
        Event::PrevTab => "PrevTab",
        Event::SelectTab(_) => "SelectTab",
        Event::SearchMode => "SearchMode",
        Event::FocusSearchBar => "FocusSearchBar",
        Event::FocusResults => "FocusResults",
        Event::ExitSearch => "ExitSearch",
        Event::EditText => "EditText",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::Submit => "Submit",
        Event::Escape => "Escape",
        Event::Copy => "Copy",
        Event::CloseFocus => "CloseFocus",
        Event::Timer => "Timer",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::BeforeClose => "BeforeClose",
        Event::WorkerResponse(WorkerResponse::FontsListed { .. }) => "FontsListed",
        Event::WorkerResponse(WorkerResponse::FontBatchLoaded { .. }) => "FontBatchLoaded",
        Event::WorkerResponse(WorkerResponse::Error { .. }) => "WorkerError",
        Event::ClipboardResult { .. } => "ClipboardResult",
    }
}
