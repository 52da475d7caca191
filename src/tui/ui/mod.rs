mod layout;
mod menu;
mod table;

use crate::cards::{Card, Suit};
use crate::tui::app::{AppState, Scene};
use ratatui::prelude::*;

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Menu => menu::draw_menu(f, app),
        Scene::Table => table::draw_table(f, app),
    }
}

fn suit_style(suit: Suit) -> Style {
    match suit {
        Suit::Hearts | Suit::Diamonds => Style::default().fg(Color::Red),
        Suit::Spades | Suit::Clubs => Style::default().fg(Color::White),
    }
}

/// "10♥", "A♠": rank then suit symbol, colored by suit.
fn card_span(card: Card) -> Span<'static> {
    let rank = match card.rank().to_char() {
        'T' => "10".to_string(),
        c => c.to_string(),
    };
    Span::styled(format!("{rank}{}", card.suit().symbol()), suit_style(card.suit()))
}
