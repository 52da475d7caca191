// Read-only table view. Agents and front-ends query the game through this
// trait so they never depend on the state machine's internals. It is
// implemented for the core `Game` type.

use crate::agents::LegalActions;
use crate::config::{Chips, TableConfig};
use crate::game::{Game, GameState, Street};
use crate::hand::{Board, HoleCards};
use crate::player::ActionCounters;

pub trait GameEngine {
    // Rules
    fn config(&self) -> &TableConfig;
    fn legal_actions(&self, seat: usize) -> LegalActions;

    // Table
    fn state(&self) -> GameState;
    fn street(&self) -> Street;
    fn board(&self) -> &Board;
    fn pot(&self) -> Chips;
    fn current_bet(&self) -> Chips;
    fn current(&self) -> usize;
    fn dealer(&self) -> usize;
    fn num_players(&self) -> usize;

    // Seats
    fn hole_cards(&self, seat: usize) -> Option<HoleCards>;
    fn funds(&self, seat: usize) -> Chips;
    fn bet(&self, seat: usize) -> Chips;
    fn counters(&self, seat: usize) -> ActionCounters;
}

impl GameEngine for Game {
    fn config(&self) -> &TableConfig {
        &self.config
    }
    fn legal_actions(&self, seat: usize) -> LegalActions {
        self.players
            .get(seat)
            .map(|p| p.legal_actions(self.current_bet, self.config.big_blind, self.config.raise_rate))
            .unwrap_or_default()
    }

    fn state(&self) -> GameState {
        self.state
    }
    fn street(&self) -> Street {
        self.street
    }
    fn board(&self) -> &Board {
        &self.board
    }
    fn pot(&self) -> Chips {
        self.pot
    }
    fn current_bet(&self) -> Chips {
        self.current_bet
    }
    fn current(&self) -> usize {
        self.current
    }
    fn dealer(&self) -> usize {
        self.dealer
    }
    fn num_players(&self) -> usize {
        self.players.len()
    }

    fn hole_cards(&self, seat: usize) -> Option<HoleCards> {
        self.players.get(seat).and_then(|p| p.hole)
    }
    fn funds(&self, seat: usize) -> Chips {
        self.players.get(seat).map_or(0, |p| p.funds)
    }
    fn bet(&self, seat: usize) -> Chips {
        self.players.get(seat).map_or(0, |p| p.bet)
    }
    fn counters(&self, seat: usize) -> ActionCounters {
        self.players.get(seat).map(|p| p.counters).unwrap_or_default()
    }
}
