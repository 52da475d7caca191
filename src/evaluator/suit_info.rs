use crate::cards::{Card, Suit};

/// Whether all five cards share a suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
    pub flush_suit: Option<Suit>,
}

impl SuitInfo {
    pub fn detect(cards: &[Card; 5]) -> Self {
        let first_suit = cards[0].suit();
        if cards.iter().all(|c| c.suit() == first_suit) {
            SuitInfo { is_flush: true, flush_suit: Some(first_suit) }
        } else {
            SuitInfo { is_flush: false, flush_suit: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn flush() {
        let info = SuitInfo::detect(&five("As Ks Qs Js 9s"));
        assert!(info.is_flush);
        assert_eq!(info.flush_suit, Some(Suit::Spades));
    }

    #[test]
    fn not_flush() {
        let info = SuitInfo::detect(&five("As Kh Qs Js 9s"));
        assert!(!info.is_flush);
        assert_eq!(info.flush_suit, None);
    }
}
