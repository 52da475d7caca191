//! Monte Carlo estimate of how often a hand beats one random opponent hand.
//!
//! Each trial deals the missing community cards and two opponent hole cards
//! from the unseen pool, then compares best hands. Only strict wins count.
//! Every trial draws from its own ChaCha8 stream derived from one base seed,
//! so a run gives the same answer sequentially or with the `parallel` feature.

use crate::cards::Card;
use crate::deck::{Deck, DeckError};
use crate::evaluator::{best_hand, EvalError};
use crate::hand::{validate_holdem, HandError, HoleCards};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EquityError {
    #[error("at least one trial is required")]
    NoTrials,
    #[error("invalid cards: {0}")]
    InvalidCards(#[from] HandError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Win-probability estimator with a fixed trial count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquityEstimator {
    trials: u32,
}

impl EquityEstimator {
    pub const fn new(trials: u32) -> Self {
        Self { trials }
    }

    pub const fn trials(&self) -> u32 {
        self.trials
    }

    /// Integer win percentage (0..=100) for `hole` given the known community cards.
    ///
    /// ```
    /// use headsup_holdem::cards::parse_cards;
    /// use headsup_holdem::equity::EquityEstimator;
    /// use headsup_holdem::hand::HoleCards;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let hole: HoleCards = "As Ks".parse().unwrap();
    /// let board = parse_cards("Qs Js Ts").unwrap();
    /// let mut rng = ChaCha8Rng::seed_from_u64(1);
    /// // A made royal flush cannot lose or tie.
    /// assert_eq!(EquityEstimator::new(50).win_percentage(&hole, &board, &mut rng).unwrap(), 100);
    /// ```
    pub fn win_percentage<R: Rng + ?Sized>(
        &self,
        hole: &HoleCards,
        community: &[Card],
        rng: &mut R,
    ) -> Result<u8, EquityError> {
        if self.trials == 0 {
            return Err(EquityError::NoTrials);
        }
        validate_holdem(hole, community)?;

        let known = hole.with_community(community);
        let pool = Deck::without(&known);
        let base_seed: u64 = rng.random();

        let wins = self.count_wins(hole, community, &pool, base_seed)?;
        let pct = u64::from(wins) * 100 / u64::from(self.trials);
        Ok(pct as u8)
    }

    #[cfg(not(feature = "parallel"))]
    fn count_wins(
        &self,
        hole: &HoleCards,
        community: &[Card],
        pool: &Deck,
        base_seed: u64,
    ) -> Result<u32, EquityError> {
        let mut wins = 0;
        for trial in 0..self.trials {
            if run_trial(hole, community, pool, base_seed, trial)? {
                wins += 1;
            }
        }
        Ok(wins)
    }

    #[cfg(feature = "parallel")]
    fn count_wins(
        &self,
        hole: &HoleCards,
        community: &[Card],
        pool: &Deck,
        base_seed: u64,
    ) -> Result<u32, EquityError> {
        use rayon::prelude::*;
        (0..self.trials)
            .into_par_iter()
            .map(|trial| run_trial(hole, community, pool, base_seed, trial).map(u32::from))
            .try_reduce(|| 0, |a, b| Ok(a + b))
    }
}

fn run_trial(
    hole: &HoleCards,
    community: &[Card],
    pool: &Deck,
    base_seed: u64,
    trial: u32,
) -> Result<bool, EquityError> {
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
    rng.set_stream(u64::from(trial));

    let mut deck = pool.clone();
    deck.shuffle_with(&mut rng);

    let mut board = community.to_vec();
    board.extend(deck.draw_n(5 - community.len())?);
    let villain = deck.draw_n(2)?;

    let mine = best_hand(&hole.with_community(&board))?;
    board.extend(villain);
    let theirs = best_hand(&board)?;
    Ok(mine > theirs)
}
