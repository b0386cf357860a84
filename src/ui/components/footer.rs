//! Status line and footer help bar.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, StatusInfo};

/// Renders the status message left-aligned, in the error color for errors.
pub fn render_status(row: usize, status: &StatusInfo, theme: &Theme, cols: usize) -> usize {
    let message = truncate(&format!(" {}", status.message), cols);
    let color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.status_fg
    };

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{message}");
    print!("{}", padding(message.chars().count(), cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders keybinding hints centered and dimmed, truncated to fit.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let left = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(left));
    print!("{help_text}");
    print!("{}", padding(left + text_len, cols));
    print!("{}", Theme::reset());
    row + 1
}
