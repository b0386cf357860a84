//! Card list renderer.
//!
//! Each card is a title line followed by its art (or a placeholder) and a
//! blank separator:
//!
//! ```text
//! ▌ Doom  figlet ★
//!   ______
//!   |  _  \
//!
//! ```

use crate::ui::helpers::{self, padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, CardLine};

/// Renders cards from `row` down to `last_row` inclusive.
///
/// A card taller than the remaining space is cut at `last_row`. Rows left
/// below the last card are cleared.
pub fn render_cards(row: usize, last_row: usize, cards: &[CardItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    'cards: for card in cards {
        if current_row > last_row {
            break;
        }
        current_row = render_title(current_row, card, theme, cols);

        for line in &card.body {
            if current_row > last_row {
                break 'cards;
            }
            current_row = render_body_line(current_row, line, card.is_selected, theme, cols);
        }

        if current_row <= last_row {
            position_cursor(current_row, 1);
            print!("{}", " ".repeat(cols));
            current_row += 1;
        }
    }

    while current_row <= last_row {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(cols));
        current_row += 1;
    }
    current_row
}

fn render_title(row: usize, card: &CardItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let restore = if card.is_selected {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    let marker = if card.is_selected { "▌ " } else { "  " };
    let star = if card.featured { " ★" } else { "" };
    let suffix_len = 2 + card.tag.len() + star.chars().count();
    let title = truncate(&card.title, cols.saturating_sub(marker.chars().count() + suffix_len));

    print!("{}", Theme::fg(&theme.colors.card_border));
    print!("{marker}");
    print!("{}", Theme::bold());
    print!("{restore}");
    if title.chars().count() == card.title.chars().count() {
        helpers::render_highlighted_text(&title, &card.highlight_ranges, theme, &format!("{}{restore}", Theme::bold()));
    } else {
        print!("{title}");
    }
    print!("{}", Theme::reset());

    print!("  ");
    print!("{}", Theme::fg(&theme.colors.tag_fg));
    print!("{}", card.tag);
    if card.featured {
        print!("{}", Theme::fg(&theme.colors.featured_fg));
        print!("{star}");
    }
    print!("{}", Theme::reset());

    let used = marker.chars().count() + title.chars().count() + suffix_len;
    print!("{}", padding(used, cols));
    row + 1
}

fn render_body_line(row: usize, line: &CardLine, is_selected: bool, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    print!("{}", Theme::fg(&theme.colors.card_border));
    print!("{}", if is_selected { "▌ " } else { "  " });

    let used = match line {
        CardLine::Art(art) => {
            print!("{}", Theme::fg(&theme.colors.art_fg));
            print!("{art}");
            art.chars().count()
        }
        CardLine::Placeholder(text) => {
            let text = truncate(text, cols.saturating_sub(2));
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.placeholder_fg));
            print!("{text}");
            text.chars().count()
        }
    };

    print!("{}", Theme::reset());
    print!("{}", padding(used + 2, cols));
    row + 1
}
