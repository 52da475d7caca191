use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: wanted {wanted} card(s), {left} left")]
    Exhausted { wanted: usize, left: usize },
}

/// A deck of distinct cards. Cards are drawn from the top (the end of the
/// backing vector) without replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use headsup_holdem::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// The standard deck minus every card in `known`.
    pub fn without(known: &[Card]) -> Self {
        let mut deck = Self::standard();
        deck.cards.retain(|c| !known.contains(c));
        deck
    }

    /// A deck that deals `top_first[0]` first, then `top_first[1]`, and so on.
    ///
    /// ```
    /// use headsup_holdem::cards::parse_cards;
    /// use headsup_holdem::deck::Deck;
    ///
    /// let mut deck = Deck::stacked(parse_cards("As Kd").unwrap());
    /// assert_eq!(deck.draw().unwrap().to_string(), "As");
    /// assert_eq!(deck.draw().unwrap().to_string(), "Kd");
    /// ```
    pub fn stacked(top_first: Vec<Card>) -> Self {
        let mut cards = top_first;
        cards.reverse();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        debug_assert!(!self.cards.is_empty(), "drew from an empty deck");
        self.cards.pop().ok_or(DeckError::Exhausted { wanted: 1, left: 0 })
    }

    /// Draw `n` cards from the top of the deck. Nothing is removed when fewer
    /// than `n` remain.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        let left = self.cards.len();
        if left < n {
            return Err(DeckError::Exhausted { wanted: n, left });
        }
        let mut drawn = self.cards.split_off(left - n);
        drawn.reverse();
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_distinct_cards() {
        let d = Deck::standard();
        assert_eq!(d.len(), 52);
        let set: HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_with(&mut ChaCha8Rng::seed_from_u64(42));
        d2.shuffle_with(&mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(d1.cards, d2.cards);
    }

    #[test]
    fn draw_reduces_length_and_returns_cards() {
        let mut d = Deck::standard();
        d.shuffle_with(&mut ChaCha8Rng::seed_from_u64(7));
        let c1 = d.draw().unwrap();
        let c2 = d.draw().unwrap();
        assert_ne!(c1, c2);
        assert_eq!(d.len(), 50);
        let hand = d.draw_n(5).unwrap();
        assert_eq!(hand.len(), 5);
        assert_eq!(d.len(), 45);
    }

    #[test]
    fn draw_n_matches_repeated_draw_order() {
        let mut a = Deck::standard();
        let mut b = Deck::standard();
        let batch = a.draw_n(3).unwrap();
        let single: Vec<Card> = (0..3).map(|_| b.draw().unwrap()).collect();
        assert_eq!(batch, single);
    }

    #[test]
    fn over_draw_is_an_error_and_keeps_cards() {
        let mut d = Deck::stacked(vec![Card::new(Rank::Ace, Suit::Spades)]);
        let err = d.draw_n(2).unwrap_err();
        assert_eq!(err, DeckError::Exhausted { wanted: 2, left: 1 });
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn without_removes_known_cards() {
        let known = [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Two, Suit::Hearts)];
        let d = Deck::without(&known);
        assert_eq!(d.len(), 50);
        assert!(!d.contains(known[0]));
        assert!(!d.contains(known[1]));
    }
}
