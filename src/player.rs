use crate::agents::{legal_actions, AgentKind, LegalActions};
use crate::config::Chips;
use crate::hand::HoleCards;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// What a seat did last on the current street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Reraise,
    AllIn,
    /// Skipped because the seat has no chips left.
    Pass,
}

impl SeatAction {
    pub const fn label(self) -> &'static str {
        match self {
            SeatAction::Fold => "Fold",
            SeatAction::Check => "Check",
            SeatAction::Call => "Call",
            SeatAction::Bet => "Bet",
            SeatAction::Raise => "Raise",
            SeatAction::Reraise => "Re-raise",
            SeatAction::AllIn => "All-In",
            SeatAction::Pass => "Pass",
        }
    }
}

/// Per-action tallies, used both for a player's lifetime and for a single hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounters {
    pub fold: u32,
    pub check: u32,
    pub call: u32,
    pub bet: u32,
    pub raise: u32,
    pub reraise: u32,
    #[serde(default)]
    pub allin: u32,
}

impl ActionCounters {
    pub fn record(&mut self, action: SeatAction) {
        match action {
            SeatAction::Fold => self.fold += 1,
            SeatAction::Check => self.check += 1,
            SeatAction::Call => self.call += 1,
            SeatAction::Bet => self.bet += 1,
            SeatAction::Raise => self.raise += 1,
            SeatAction::Reraise => self.reraise += 1,
            SeatAction::AllIn => self.allin += 1,
            SeatAction::Pass => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.fold + self.check + self.call + self.bet + self.raise + self.reraise + self.allin
    }
}

impl AddAssign for ActionCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.fold += rhs.fold;
        self.check += rhs.check;
        self.call += rhs.call;
        self.bet += rhs.bet;
        self.raise += rhs.raise;
        self.reraise += rhs.reraise;
        self.allin += rhs.allin;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) kind: AgentKind,
    pub(crate) funds: Chips,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) bet: Chips,
    pub(crate) action: Option<SeatAction>,
    pub(crate) counters: ActionCounters,
    pub(crate) hand_counters: ActionCounters,
}

impl Player {
    pub(crate) fn new(name: impl Into<String>, kind: AgentKind, funds: Chips) -> Self {
        Self {
            name: name.into(),
            kind,
            funds,
            hole: None,
            bet: 0,
            action: None,
            counters: ActionCounters::default(),
            hand_counters: ActionCounters::default(),
        }
    }

    /// Returns the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns who controls this seat
    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn is_npc(&self) -> bool {
        self.kind == AgentKind::Npc
    }

    /// Returns chips behind, not counting the current street's bet
    pub fn funds(&self) -> Chips {
        self.funds
    }

    /// Returns the player's hole cards
    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Returns chips committed on the current street
    pub fn bet(&self) -> Chips {
        self.bet
    }

    /// Returns the last action taken on the current street
    pub fn action(&self) -> Option<SeatAction> {
        self.action
    }

    pub fn has_folded(&self) -> bool {
        self.action == Some(SeatAction::Fold)
    }

    /// Returns lifetime action counters
    pub fn counters(&self) -> &ActionCounters {
        &self.counters
    }

    /// Returns action counters for the hand in progress
    pub fn hand_counters(&self) -> &ActionCounters {
        &self.hand_counters
    }

    pub fn legal_actions(&self, current_bet: Chips, big_blind: Chips, raise_rate: Chips) -> LegalActions {
        legal_actions(self.funds, self.bet, current_bet, big_blind, raise_rate)
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole = None;
        self.bet = 0;
        self.action = None;
        self.hand_counters = ActionCounters::default();
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.bet = 0;
        if !self.has_folded() {
            self.action = None;
        }
    }

    /// Move chips from funds to the current bet. Funds may go negative only
    /// through blind posting.
    fn commit(&mut self, amount: Chips) {
        self.funds -= amount;
        self.bet += amount;
    }

    pub(crate) fn post_blind(&mut self, amount: Chips) {
        self.commit(amount);
    }

    pub(crate) fn receive(&mut self, amount: Chips) {
        self.funds += amount;
    }

    /// Take back chips from the current bet (uncalled excess, refunds).
    pub(crate) fn return_bet(&mut self, amount: Chips) {
        self.bet -= amount;
        self.funds += amount;
    }

    fn mark(&mut self, action: SeatAction) {
        self.action = Some(action);
        self.counters.record(action);
        self.hand_counters.record(action);
    }

    pub(crate) fn fold(&mut self) {
        self.mark(SeatAction::Fold);
    }

    pub(crate) fn check(&mut self) {
        self.mark(SeatAction::Check);
    }

    pub(crate) fn call(&mut self, amount: Chips) {
        self.commit(amount);
        self.mark(SeatAction::Call);
    }

    pub(crate) fn open_bet(&mut self, amount: Chips) {
        self.commit(amount);
        self.mark(SeatAction::Bet);
    }

    /// Pay the call-up to `current_bet` plus `increment`.
    pub(crate) fn raise(&mut self, current_bet: Chips, increment: Chips, reraise: bool) {
        self.commit(current_bet - self.bet + increment);
        self.mark(if reraise { SeatAction::Reraise } else { SeatAction::Raise });
    }

    pub(crate) fn all_in(&mut self) {
        self.commit(self.funds.max(0));
        self.mark(SeatAction::AllIn);
    }

    pub(crate) fn pass(&mut self) {
        self.action = Some(SeatAction::Pass);
    }
}
