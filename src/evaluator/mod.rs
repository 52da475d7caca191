pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, HandError, HoleCards};
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A five-card hand's category together with exactly the ranks needed to
/// break ties inside that category, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum HandClassification {
    HighCard { ranks: [Rank; 5] },
    OnePair { pair: Rank, kickers: [Rank; 3] },
    TwoPair { high: Rank, low: Rank, kicker: Rank },
    ThreeOfAKind { trips: Rank, kickers: [Rank; 2] },
    Straight { high: Rank },
    Flush { ranks: [Rank; 5] },
    FullHouse { trips: Rank, pair: Rank },
    FourOfAKind { quad: Rank, kicker: Rank },
    StraightFlush { high: Rank },
    RoyalFlush,
}

impl HandClassification {
    pub const fn category(&self) -> Category {
        match self {
            HandClassification::HighCard { .. } => Category::HighCard,
            HandClassification::OnePair { .. } => Category::OnePair,
            HandClassification::TwoPair { .. } => Category::TwoPair,
            HandClassification::ThreeOfAKind { .. } => Category::ThreeOfAKind,
            HandClassification::Straight { .. } => Category::Straight,
            HandClassification::Flush { .. } => Category::Flush,
            HandClassification::FullHouse { .. } => Category::FullHouse,
            HandClassification::FourOfAKind { .. } => Category::FourOfAKind,
            HandClassification::StraightFlush { .. } => Category::StraightFlush,
            HandClassification::RoyalFlush => Category::RoyalFlush,
        }
    }

    /// Tie-break ranks in priority order, padded with Two (value 0).
    pub fn tiebreak(&self) -> [Rank; 5] {
        use Rank::Two as Z;
        match *self {
            HandClassification::HighCard { ranks } | HandClassification::Flush { ranks } => ranks,
            HandClassification::OnePair { pair, kickers: [a, b, c] } => [pair, a, b, c, Z],
            HandClassification::TwoPair { high, low, kicker } => [high, low, kicker, Z, Z],
            HandClassification::ThreeOfAKind { trips, kickers: [a, b] } => [trips, a, b, Z, Z],
            HandClassification::Straight { high } | HandClassification::StraightFlush { high } => {
                [high, Z, Z, Z, Z]
            }
            HandClassification::FullHouse { trips, pair } => [trips, pair, Z, Z, Z],
            HandClassification::FourOfAKind { quad, kicker } => [quad, kicker, Z, Z, Z],
            HandClassification::RoyalFlush => [Z; 5],
        }
    }

    /// Scalar score reproducing the total order of classifications.
    pub fn value(&self) -> HandValue {
        HandValue::from_parts(self.category(), &self.tiebreak())
    }
}

impl Ord for HandClassification {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl PartialOrd for HandClassification {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandClassification::HighCard { ranks } => write!(f, "{} high", ranks[0].name()),
            HandClassification::OnePair { pair, kickers } => {
                write!(f, "Pair of {}, {} kicker", pair.plural(), kickers[0].name())
            }
            HandClassification::TwoPair { high, low, kicker } => write!(
                f,
                "Two Pair, {} and {}, {} kicker",
                high.plural(),
                low.plural(),
                kicker.name()
            ),
            HandClassification::ThreeOfAKind { trips, .. } => {
                write!(f, "Three of a Kind, {}", trips.plural())
            }
            HandClassification::Straight { high } => write!(f, "Straight, {} high", high.name()),
            HandClassification::Flush { ranks } => write!(f, "Flush, {} high", ranks[0].name()),
            HandClassification::FullHouse { trips, pair } => {
                write!(f, "Full House, {} full of {}", trips.plural(), pair.plural())
            }
            HandClassification::FourOfAKind { quad, .. } => {
                write!(f, "Four of a Kind, {}", quad.plural())
            }
            HandClassification::StraightFlush { high } => {
                write!(f, "Straight Flush, {} high", high.name())
            }
            HandClassification::RoyalFlush => f.write_str("Royal Flush"),
        }
    }
}

/// A classified five-card hand. Ordering follows the classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Evaluation {
    pub classification: HandClassification,
    /// The five cards, sorted by rank then suit, highest first.
    pub best_five: [Card; 5],
}

/// Result of best-hand selection: the chosen five cards and their class.
pub type BestHand = Evaluation;

impl Evaluation {
    pub const fn category(&self) -> Category {
        self.classification.category()
    }

    /// Return the packed comparable value for ordering/caching.
    pub fn value(&self) -> HandValue {
        self.classification.value()
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.classification.cmp(&other.classification)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.classification == other.classification
    }
}

impl Eq for Evaluation {}

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and five rank tiebreakers into a comparable value.
    pub fn from_parts(category: Category, ranks_desc: &[Rank; 5]) -> Self {
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 10 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in ranks_desc.iter().enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (r.value() as u64) << offset;
        }
        HandValue(v)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("best hand needs 5 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate cards in hand")]
    DuplicateCards,
}

/// Total order over classifications: `Less`, `Equal` (a true tie) or `Greater`.
///
/// ```
/// use headsup_holdem::cards::Rank;
/// use headsup_holdem::evaluator::{compare, HandClassification};
/// use std::cmp::Ordering;
///
/// let straight = HandClassification::Straight { high: Rank::Six };
/// let trips = HandClassification::ThreeOfAKind { trips: Rank::Ace, kickers: [Rank::King, Rank::Queen] };
/// assert_eq!(compare(&straight, &trips), Ordering::Greater);
/// ```
pub fn compare(a: &HandClassification, b: &HandClassification) -> Ordering {
    a.cmp(b)
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);
    let classification = DETECTORS
        .iter()
        .find_map(|detector| detector.detect(&analysis))
        .unwrap_or(HandClassification::HighCard { ranks: analysis.ranks });
    analysis.build_evaluation(classification)
}

/// Pick the strongest five-card hand out of 5, 6 or 7 distinct cards.
/// Subsets are tried in lexicographic index order and the first maximal one wins.
///
/// ```
/// use headsup_holdem::cards::parse_cards;
/// use headsup_holdem::evaluator::{best_hand, Category};
///
/// let cards = parse_cards("Ah Kh 2c 7d 9s Jh 4c").unwrap();
/// let best = best_hand(&cards).unwrap();
/// assert_eq!(best.category(), Category::HighCard);
/// assert_eq!(best.classification.to_string(), "Ace high");
/// ```
pub fn best_hand(cards: &[Card]) -> Result<BestHand, EvalError> {
    use combinations::FiveCardCombinations;

    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    let set: HashSet<Card> = cards.iter().copied().collect();
    if set.len() != cards.len() {
        return Err(EvalError::DuplicateCards);
    }

    let mut best: Option<Evaluation> = None;
    for idx in FiveCardCombinations::new(cards.len()) {
        let hand = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let eval = evaluate_five(&hand);
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    best.ok_or(EvalError::CardCount(cards.len()))
}

/// Best hand for a seat from its hole cards and 3 to 5 community cards.
pub fn evaluate_holdem(hole: &HoleCards, community: &[Card]) -> Result<BestHand, EvalError> {
    validate_holdem(hole, community)?;
    best_hand(&hole.with_community(community))
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
    fn evaluate_five_categories() {
        let cases = [
            ("As Ks Qs Js Ts", Category::RoyalFlush),
            ("9h 8h 7h 6h 5h", Category::StraightFlush),
            ("Kc Kd Kh Ks 2s", Category::FourOfAKind),
            ("Tc Td Th 2s 2h", Category::FullHouse),
            ("Ah 9h 7h 3h 2h", Category::Flush),
            ("9c 8d 7h 6s 5c", Category::Straight),
            ("Qc Qd Qh 9s 2c", Category::ThreeOfAKind),
            ("Jc Jd 9c 9h 2s", Category::TwoPair),
            ("Ah Ad Ts 9c 2d", Category::OnePair),
            ("Ah Kd 7s 5c 2d", Category::HighCard),
        ];
        for (cards, want) in cases {
            assert_eq!(evaluate_five(&five(cards)).category(), want, "{cards}");
        }
    }

    #[test]
    fn ace_low_run_is_not_a_straight() {
        let e = evaluate_five(&five("Ac 2d 3h 4s 5c"));
        assert_eq!(e.category(), Category::HighCard);
        let e = evaluate_five(&five("Ah 2h 3h 4h 5h"));
        assert_eq!(e.category(), Category::Flush);
    }

    #[test]
    fn classification_carries_tiebreak_fields() {
        let e = evaluate_five(&five("Ah 4c Ad Ks 9c"));
        assert_eq!(
            e.classification,
            HandClassification::OnePair {
                pair: Rank::Ace,
                kickers: [Rank::King, Rank::Nine, Rank::Four]
            }
        );
        let e = evaluate_five(&five("3c 3d 3h Js Jh"));
        assert_eq!(e.classification, HandClassification::FullHouse { trips: Rank::Three, pair: Rank::Jack });
    }

    #[test]
    fn descriptions_read_naturally() {
        let pair = evaluate_five(&five("Ah Kh 9s Jh 7d")).classification;
        assert_eq!(pair.to_string(), "Ace high");
        let pair = evaluate_five(&five("Ah As Kh Jh 9s")).classification;
        assert_eq!(pair.to_string(), "Pair of Aces, King kicker");
        let boat = evaluate_five(&five("Kc Kd Kh 2s 2h")).classification;
        assert_eq!(boat.to_string(), "Full House, Kings full of Twos");
    }

    #[test]
    fn best_hand_rejects_bad_sizes_and_duplicates() {
        let four = parse_cards("As Ks Qs Js").unwrap();
        assert_eq!(best_hand(&four).unwrap_err(), EvalError::CardCount(4));
        let eight = parse_cards("As Ks Qs Js Ts 9s 8s 7s").unwrap();
        assert_eq!(best_hand(&eight).unwrap_err(), EvalError::CardCount(8));
        let dup = parse_cards("As As Qs Js Ts").unwrap();
        assert_eq!(best_hand(&dup).unwrap_err(), EvalError::DuplicateCards);
    }

    #[test]
    fn best_hand_finds_flush_among_seven() {
        let cards = parse_cards("2h 9h Kc Jh 4h 7h Ks").unwrap();
        let best = best_hand(&cards).unwrap();
        assert_eq!(best.category(), Category::Flush);
        assert!(best.best_five.iter().all(|c| c.suit() == crate::cards::Suit::Hearts));
    }

    #[test]
    fn evaluate_holdem_rejects_overlap() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let community = parse_cards("As 2c 3d").unwrap();
        assert!(matches!(evaluate_holdem(&hole, &community), Err(EvalError::InvalidHand(_))));
    }

    #[test]
    fn value_orders_categories_before_kickers() {
        let weak_two_pair = evaluate_five(&five("3c 3d 2c 2h 4s"));
        let strong_pair = evaluate_five(&five("Ac Ad Kc Qh Js"));
        assert!(weak_two_pair > strong_pair);
        assert!(weak_two_pair.value().raw() > strong_pair.value().raw());
    }
}
