//! Component renderers.
//!
//! Each component prints one section of the frame at a given row and
//! returns the next free row.
//!
//! - [`header`]: Title bar with catalog counts
//! - [`tabs`]: Library tab bar
//! - [`textbar`]: Preview text field
//! - [`search`]: Search input box
//! - [`cards`]: Card list with titles, tags and art
//! - [`empty`]: Empty state message
//! - [`footer`]: Status line and keybinding hints

mod cards;
mod empty;
mod footer;
mod header;
mod search;
mod tabs;
mod textbar;

pub use cards::render_cards;
pub use empty::render_empty_state;
pub use footer::{render_footer, render_status};
pub use header::render_header;
pub use search::render_search_bar;
pub use tabs::render_tabs;
pub use textbar::render_text_bar;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Prints a full-width horizontal rule at `row`.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}
