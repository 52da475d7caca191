//! Render-ready view of a table from one seat's point of view.

use crate::agents::LegalActions;
use crate::cards::Card;
use crate::config::Chips;
use crate::game::{Game, GameState, HandSummary, Street};
use crate::hand::HoleCards;
use crate::player::SeatAction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub name: String,
    pub funds: Chips,
    pub bet: Chips,
    pub action: Option<SeatAction>,
    /// `None` when the cards are hidden from the viewer.
    pub hole: Option<HoleCards>,
    pub is_dealer: bool,
    pub is_current: bool,
    pub folded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub hand_no: u64,
    pub state: GameState,
    pub street: Street,
    pub board: Vec<Card>,
    /// Settled pot plus bets on the current street.
    pub pot: Chips,
    pub current_bet: Chips,
    pub seats: Vec<SeatView>,
    /// Actions open to the viewer; empty unless the viewer is awaited.
    pub legal: LegalActions,
    pub summary: Option<HandSummary>,
}

impl TableSnapshot {
    /// Capture `game` as `viewer` sees it. Other seats' hole cards stay hidden
    /// unless the hand was resolved at showdown.
    ///
    /// ```
    /// use headsup_holdem::config::TableConfig;
    /// use headsup_holdem::game::{Game, HUMAN_SEAT, NPC_SEAT};
    /// use headsup_holdem::snapshot::TableSnapshot;
    ///
    /// let mut game = Game::new(TableConfig::default(), 11).unwrap();
    /// game.resume().unwrap();
    /// let snap = TableSnapshot::capture(&game, HUMAN_SEAT);
    /// assert!(snap.seats[HUMAN_SEAT].hole.is_some());
    /// if snap.summary.is_none() {
    ///     assert!(snap.seats[NPC_SEAT].hole.is_none());
    /// }
    /// ```
    pub fn capture(game: &Game, viewer: usize) -> Self {
        let revealed = game.summary().map(|s| s.revealed.as_slice()).unwrap_or(&[]);
        let awaiting_viewer = game.awaiting() == Some(viewer);
        let seats = game
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| {
                let hole = if seat == viewer {
                    p.hole()
                } else {
                    revealed.get(seat).copied().flatten()
                };
                SeatView {
                    name: p.name().to_string(),
                    funds: p.funds(),
                    bet: p.bet(),
                    action: p.action(),
                    hole,
                    is_dealer: seat == game.dealer(),
                    is_current: game.state() == GameState::PlayersInput && seat == game.current(),
                    folded: p.has_folded(),
                }
            })
            .collect();

        Self {
            hand_no: game.hand_no(),
            state: game.state(),
            street: game.street(),
            board: game.board().as_slice().to_vec(),
            pot: game.pot_total(),
            current_bet: game.current_bet(),
            seats,
            legal: if awaiting_viewer { game.legal_actions(viewer) } else { LegalActions::default() },
            summary: game.summary().cloned(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::game::{Prompt, HUMAN_SEAT, NPC_SEAT};

    #[test]
    fn npc_cards_hidden_while_betting() {
        let mut game = Game::new(TableConfig::default(), 5).unwrap();
        let mut prompt = game.resume().unwrap();
        // play until the human is asked or the hand ends without showdown
        while let Prompt::HandOver(_) = prompt {
            prompt = game.proceed(crate::game::Continue::NewMatch).unwrap();
        }
        let snap = TableSnapshot::capture(&game, HUMAN_SEAT);
        assert!(snap.seats[HUMAN_SEAT].hole.is_some());
        assert!(snap.seats[NPC_SEAT].hole.is_none());
        assert!(!snap.legal.is_empty());
        assert_eq!(snap.pot + snap.seats.iter().map(|s| s.funds).sum::<Chips>(), game.total_chips());

        let npc_view = TableSnapshot::capture(&game, NPC_SEAT);
        assert!(npc_view.seats[HUMAN_SEAT].hole.is_none());
        assert!(npc_view.legal.is_empty());
    }

    #[test]
    fn snapshot_serializes() {
        let mut game = Game::new(TableConfig::default(), 9).unwrap();
        game.resume().unwrap();
        let json = TableSnapshot::capture(&game, HUMAN_SEAT).to_json().unwrap();
        let back: TableSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hand_no, 1);
    }
}
