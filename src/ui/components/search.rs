//! Framed search query box.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Columns left blank on each side of the frame.
const INSET: usize = 2;

/// Draws the query inside a rounded frame three rows tall.
///
/// ```text
///   ╭ find ──────────────╮
///   │ ans▏               │
///   ╰────────────────────╯
/// ```
///
/// The frame is dimmed while focus is on the results.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(INSET * 2 + 2);
    let frame = Theme::fg(if search.is_typing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.text_dim
    });
    let inset = " ".repeat(INSET);

    let label = " find ";
    position_cursor(row, 1);
    print!("{inset}{frame}╭");
    print!("{}", truncate(label, inner));
    print!("{}╮{}", "─".repeat(inner.saturating_sub(label.len())), Theme::reset());

    let query = if search.is_typing {
        format!(" {}▏", search.query)
    } else {
        format!(" {}", search.query)
    };
    let query = truncate(&query, inner);
    position_cursor(row + 1, 1);
    print!("{inset}{frame}│{}", Theme::fg(&theme.colors.text_normal));
    print!("{query}{}", padding(query.chars().count(), inner));
    print!("{frame}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{inset}{frame}╰{}╯{}", "─".repeat(inner), Theme::reset());

    row + 3
}
