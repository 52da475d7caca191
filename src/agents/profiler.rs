use crate::player::ActionCounters;
use serde::{Deserialize, Serialize};

/// How an opponent has played so far, from lifetime action counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayStyle {
    TightPassive,
    TightAggressive,
    LoosePassive,
    LooseAggressive,
}

impl PlayStyle {
    pub const ALL: [PlayStyle; 4] = [
        PlayStyle::TightPassive,
        PlayStyle::TightAggressive,
        PlayStyle::LoosePassive,
        PlayStyle::LooseAggressive,
    ];

    pub const fn is_tight(self) -> bool {
        matches!(self, PlayStyle::TightPassive | PlayStyle::TightAggressive)
    }

    pub const fn is_aggressive(self) -> bool {
        matches!(self, PlayStyle::TightAggressive | PlayStyle::LooseAggressive)
    }
}

/// Classify a player's action mix.
///
/// Aggressive when bets, raises, re-raises and all-ins outnumber checks and
/// calls; tight when folds are at least every other action combined.
///
/// ```
/// use headsup_holdem::agents::{profile, PlayStyle};
/// use headsup_holdem::player::ActionCounters;
///
/// let counters = ActionCounters { fold: 10, call: 2, raise: 5, ..Default::default() };
/// assert_eq!(profile(&counters), PlayStyle::TightAggressive);
/// ```
pub fn profile(counters: &ActionCounters) -> PlayStyle {
    let passive = counters.check + counters.call;
    let aggressive = counters.bet + counters.raise + counters.reraise + counters.allin;
    let is_aggressive = passive < aggressive;
    let is_tight = counters.fold >= passive + aggressive;
    match (is_tight, is_aggressive) {
        (true, false) => PlayStyle::TightPassive,
        (true, true) => PlayStyle::TightAggressive,
        (false, false) => PlayStyle::LoosePassive,
        (false, true) => PlayStyle::LooseAggressive,
    }
}
