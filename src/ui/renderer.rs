//! Top-level rendering coordinator.
//!
//! Computes the view model and lays the components out top to bottom:
//!
//! ```text
//! [Header]
//! [Tabs]
//! [Preview text]
//! [Border]
//! [Search box - 3 lines, search mode only]
//! [Cards, or the empty state]
//! [Border]
//! [Status]
//! [Footer]
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Call `AppState::prepare_frame` with the same `rows` first so the visible
/// cards have been rendered.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut row = 1;
    row = components::render_header(row, &vm.header, theme, cols);
    row = components::render_tabs(row, &vm.tabs, theme, cols);
    row = components::render_text_bar(row, &vm.text_bar, theme, cols);
    row = components::render_border(row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        row = components::render_search_bar(row, search, theme, cols);
    }

    let status_row = rows.saturating_sub(1);
    let bottom_border = status_row.saturating_sub(1);
    let last_card_row = bottom_border.saturating_sub(1);

    if let Some(empty) = &vm.empty_state {
        components::render_empty_state(row, empty, theme, cols);
    } else {
        components::render_cards(row, last_card_row, &vm.cards, theme, cols);
    }

    components::render_border(bottom_border, &theme.colors.border, cols);
    components::render_status(status_row, &vm.status, theme, cols);
    components::render_footer(rows, &vm.footer, theme, cols);
}
