//! Preview text field.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TextBarInfo;

/// Renders ` Text: Hello` with a cursor while editing and a `…` marker while
/// a draft waits for the debounce.
pub fn render_text_bar(row: usize, bar: &TextBarInfo, theme: &Theme, cols: usize) -> usize {
    let label = " Text: ";
    let cursor = if bar.is_editing { "▏" } else { "" };
    let pending = if bar.is_pending { " …" } else { "" };
    let room = cols.saturating_sub(label.len() + cursor.chars().count() + pending.chars().count());
    let text = truncate(&bar.text, room);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{label}");
    if bar.is_editing {
        print!("{}", Theme::bold());
    }
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{text}{cursor}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{pending}");

    let used = label.len() + text.chars().count() + cursor.chars().count() + pending.chars().count();
    print!("{}", padding(used, cols));
    print!("{}", Theme::reset());
    row + 1
}
