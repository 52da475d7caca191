//! Agents: who decides what a seat does.
//!
//! Human seats answer through the state machine's `act` entry point; the
//! computer seat runs `NpcAgent`, which combines the equity estimate, the
//! opponent profile and the betting policy. Everything here reads the table
//! through the `GameEngine` view and never mutates it.

use crate::config::{Chips, TableConfig};
use crate::engine::GameEngine;
use crate::equity::{EquityError, EquityEstimator};
use core::fmt;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

mod policy;
mod profiler;

pub use policy::{decide, BetContext};
pub use profiler::{profile, PlayStyle};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Npc,
}

/// A betting decision a seat can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl Action {
    pub const ALL: [Action; 6] =
        [Action::Fold, Action::Check, Action::Call, Action::Bet, Action::Raise, Action::AllIn];

    /// Label shown to players and accepted back as input.
    pub const fn label(self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::Check => "Check",
            Action::Call => "Call",
            Action::Bet => "Bet",
            Action::Raise => "Raise",
            Action::AllIn => "All-In",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("unknown action: '{0}'")]
    Unknown(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Case-insensitive; anything after the first word ("Call $10") is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.split_whitespace().next().unwrap_or_default().to_ascii_lowercase();
        match word.as_str() {
            "fold" => Ok(Action::Fold),
            "check" => Ok(Action::Check),
            "call" => Ok(Action::Call),
            "bet" => Ok(Action::Bet),
            "raise" => Ok(Action::Raise),
            "all-in" | "allin" | "all_in" => Ok(Action::AllIn),
            _ => Err(ActionParseError::Unknown(s.to_string())),
        }
    }
}

/// The ordered set of actions a seat may take right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions(Vec<Action>);

impl LegalActions {
    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Action>> for LegalActions {
    fn from(actions: Vec<Action>) -> Self {
        Self(actions)
    }
}

impl fmt::Display for LegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(action.label())?;
        }
        Ok(())
    }
}

/// Legal actions for a seat holding `funds` with `own_bet` already in front of
/// it this street, facing `current_bet`. A seat that cannot afford the call is
/// offered All-In instead of Call.
///
/// ```
/// use headsup_holdem::agents::{legal_actions, Action};
///
/// let legal = legal_actions(5, 0, 10, 10, 1);
/// assert_eq!(legal.as_slice(), &[Action::Fold, Action::AllIn]);
/// ```
pub fn legal_actions(
    funds: Chips,
    own_bet: Chips,
    current_bet: Chips,
    big_blind: Chips,
    raise_rate: Chips,
) -> LegalActions {
    let mut actions = vec![Action::Fold];
    let to_call = current_bet - own_bet;
    if to_call > 0 {
        actions.push(if funds < to_call { Action::AllIn } else { Action::Call });
    } else if to_call == 0 {
        actions.push(Action::Check);
    }
    if current_bet == 0 {
        if funds >= big_blind {
            actions.push(Action::Bet);
        }
    } else if funds >= to_call.max(0) + current_bet * raise_rate {
        actions.push(Action::Raise);
    }
    if !actions.contains(&Action::AllIn) {
        actions.push(Action::AllIn);
    }
    LegalActions(actions)
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentError {
    #[error("seat {0} has no hole cards")]
    MissingHoleCards(usize),
    #[error("equity estimate failed: {0}")]
    Equity(#[from] EquityError),
}

/// A seat controller that picks an action when it is that seat's turn.
pub trait PlayerAgent {
    fn decide(
        &self,
        engine: &dyn GameEngine,
        seat: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Action, AgentError>;
}

/// The computer opponent: equity estimate + opponent profile + betting policy.
#[derive(Debug, Clone, Copy)]
pub struct NpcAgent {
    config: TableConfig,
}

impl NpcAgent {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }
}

impl PlayerAgent for NpcAgent {
    fn decide(
        &self,
        engine: &dyn GameEngine,
        seat: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Action, AgentError> {
        let legal = engine.legal_actions(seat);
        let hole = engine.hole_cards(seat).ok_or(AgentError::MissingHoleCards(seat))?;
        let estimator = EquityEstimator::new(self.config.monte_carlo_trials);
        let win = estimator.win_percentage(&hole, engine.board().as_slice(), rng)?;

        let opponent = (seat + 1) % engine.num_players();
        let style = profile(&engine.counters(opponent));

        let current_bet = engine.current_bet();
        let raise_increment =
            if current_bet == 0 { self.config.big_blind } else { current_bet * self.config.raise_rate };
        let ctx = BetContext {
            current_bet,
            own_bet: engine.bet(seat),
            round_buy_in: self.config.round_buy_in,
            raise_increment,
        };
        let action = decide(&legal, win, style, &ctx, &self.config.policy);
        log::debug!(
            "npc seat {seat}: win {win}% vs {style:?}, legal [{legal}] -> {action}",
        );
        Ok(action)
    }
}
