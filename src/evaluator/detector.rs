use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::HandClassification;

/// Strategy pattern: each detector recognises one category and extracts its tie-break fields.
pub trait CategoryDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification>;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Royal Flush: Ten to Ace, all same suit
pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        let high = analysis.straight_info.top_rank?;
        (analysis.suit_info.is_flush && high == Rank::Ace).then_some(HandClassification::RoyalFlush)
    }
}

/// Straight Flush: Five consecutive ranks, all same suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        let high = analysis.straight_info.top_rank?;
        analysis.suit_info.is_flush.then_some(HandClassification::StraightFlush { high })
    }
}

/// Four of a Kind: Four cards of the same rank
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        let quad = analysis.rank_groups.quad()?;
        match analysis.rank_groups.kickers().as_slice() {
            [kicker] => Some(HandClassification::FourOfAKind { quad, kicker: *kicker }),
            _ => None,
        }
    }
}

/// Full House: Three of a kind plus a pair
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        let trips = analysis.rank_groups.trips()?;
        match analysis.rank_groups.pairs().as_slice() {
            [pair] => Some(HandClassification::FullHouse { trips, pair: *pair }),
            _ => None,
        }
    }
}

/// Flush: All five cards of the same suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        analysis.suit_info.is_flush.then_some(HandClassification::Flush { ranks: analysis.ranks })
    }
}

/// Straight: Five consecutive ranks, Ace high only
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        let high = analysis.straight_info.top_rank?;
        Some(HandClassification::Straight { high })
    }
}

/// Three of a Kind: Three cards of the same rank, two unmatched kickers
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        let trips = analysis.rank_groups.trips()?;
        match analysis.rank_groups.kickers().as_slice() {
            [a, b] => Some(HandClassification::ThreeOfAKind { trips, kickers: [*a, *b] }),
            _ => None,
        }
    }
}

/// Two Pair: Two pairs of cards
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        let pairs = analysis.rank_groups.pairs();
        let kickers = analysis.rank_groups.kickers();
        match (pairs.as_slice(), kickers.as_slice()) {
            ([high, low], [kicker]) => {
                Some(HandClassification::TwoPair { high: *high, low: *low, kicker: *kicker })
            }
            _ => None,
        }
    }
}

/// One Pair: Two cards of the same rank
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        let pairs = analysis.rank_groups.pairs();
        let kickers = analysis.rank_groups.kickers();
        match (pairs.as_slice(), kickers.as_slice()) {
            ([pair], [a, b, c]) => {
                Some(HandClassification::OnePair { pair: *pair, kickers: [*a, *b, *c] })
            }
            _ => None,
        }
    }
}

/// High Card: No matching ranks or sequences
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandClassification> {
        Some(HandClassification::HighCard { ranks: analysis.ranks })
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
