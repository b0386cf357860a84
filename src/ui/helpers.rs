//! Shared rendering utilities.
//!
//! Widths are counted in characters. Every glyph the renderers emit
//! (box-drawing, blocks, shades, ASCII) occupies a single terminal cell.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// First `width` characters of `text`, with `…` as the last one when cut.
///
/// ```rust
/// use glyphdeck::ui::helpers::truncate;
///
/// assert_eq!(truncate("Glyphdeck", 5), "Glyp…");
/// assert_eq!(truncate("Glyph", 5), "Glyph");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Spaces needed to pad `used` characters out to `cols`.
#[must_use]
pub fn padding(used: usize, cols: usize) -> String {
    " ".repeat(cols.saturating_sub(used))
}

/// Prints `text` with the fuzzy-matched character ranges highlighted.
///
/// `restore` is the escape sequence to re-apply after each highlighted
/// section, so the surrounding style (selection colors, for example)
/// continues.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
