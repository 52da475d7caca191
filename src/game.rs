//! The resumable heads-up betting-round state machine.
//!
//! `Game::resume` runs INIT → BOARD → PLAYERS_INPUT → … until it needs the
//! human (`Prompt::AwaitAction`) or a hand has been resolved
//! (`Prompt::HandOver`). `act` and `proceed` feed the next event in. The
//! whole struct is serde-serializable, so a suspended game can be stored
//! between events and picked up again exactly where it stopped.

use crate::agents::{Action, AgentError, AgentKind, LegalActions, NpcAgent, PlayerAgent};
use crate::config::{Chips, ConfigError, TableConfig};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate_holdem, BestHand, EvalError};
use crate::hand::{Board, HandError, HoleCards};
use crate::player::{ActionCounters, Player, SeatAction};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seat index of the human player.
pub const HUMAN_SEAT: usize = 0;
/// Seat index of the computer opponent.
pub const NPC_SEAT: usize = 1;
const SEATS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Init,
    Board,
    PlayersInput,
    Result,
    NewRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub const fn next(self) -> Street {
        match self {
            Street::PreFlop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Street::PreFlop => "Pre-Flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
        }
    }
}

/// What to do once a hand has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continue {
    NextRound,
    NewMatch,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("'{action}' is not available; choose one of: {legal}")]
    InvalidAction { action: String, legal: LegalActions },
    #[error("no player action is awaited right now")]
    NotAwaiting,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("deck invariant violated: {0}")]
    DeckExhausted(#[from] DeckError),
    #[error("card invariant violated: {0}")]
    Cards(#[from] HandError),
    #[error("showdown evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
    #[error("npc decision failed: {0}")]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("seat {0} reached showdown without hole cards")]
    MissingHoleCards(usize),
    #[error("the match is over; start a new match")]
    MatchOver,
    #[error("no finished hand is waiting to be continued")]
    NotAwaitingContinue,
}

/// End of a match: one seat ran out of chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub human_won: bool,
    /// Human's final funds minus the buy-in; added to the persisted bankroll.
    pub funds_delta: Chips,
}

/// Everything the outside world needs to know about a resolved hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSummary {
    pub hand_no: u64,
    pub winners: Vec<usize>,
    /// Chips paid to each seat from the pot.
    pub payouts: Vec<Chips>,
    /// Best hand per seat when the hand reached showdown.
    pub showdown: Vec<Option<BestHand>>,
    /// Hole cards per seat, revealed only at showdown.
    pub revealed: Vec<Option<HoleCards>>,
    /// Seat that could not cover its blind, if that ended the hand.
    pub blind_shortfall: Option<usize>,
    pub human_won: bool,
    /// The human's actions during this hand only.
    pub human_counters: ActionCounters,
    pub match_result: Option<MatchResult>,
}

impl HandSummary {
    pub fn is_match_over(&self) -> bool {
        self.match_result.is_some()
    }
}

/// Where the state machine stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    /// The human seat must pick one of `legal`.
    AwaitAction { seat: usize, legal: LegalActions },
    /// The hand is over; call `proceed`.
    HandOver(HandSummary),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Game {
    pub(crate) config: TableConfig,
    pub(crate) state: GameState,

    pub(crate) deck: Deck,
    pub(crate) board: Board,
    pub(crate) players: Vec<Player>,
    /// Settled chips from finished streets; excludes bets on the current street.
    pub(crate) pot: Chips,
    pub(crate) current_bet: Chips,
    pub(crate) street: Street,
    pub(crate) dealer: usize,
    pub(crate) current: usize,
    pub(crate) previous: Option<usize>,
    pub(crate) winners: Vec<usize>,
    pub(crate) showdown: Vec<Option<BestHand>>,
    pub(crate) blind_shortfall: Option<usize>,
    pub(crate) awaiting: Option<usize>,
    pub(crate) summary: Option<HandSummary>,
    pub(crate) hand_no: u64,

    seed: u64,
    stream: u64,
    stacked: Option<Deck>,
    human_name: String,
    human_history: ActionCounters,
}

impl Game {
    /// A game waiting in INIT. Nothing is dealt until the first `resume`.
    ///
    /// ```
    /// use headsup_holdem::config::TableConfig;
    /// use headsup_holdem::game::{Game, Prompt, Street};
    ///
    /// let mut game = Game::new(TableConfig::default(), 7).unwrap();
    /// let prompt = game.resume().unwrap();
    /// assert!(matches!(prompt, Prompt::AwaitAction { .. } | Prompt::HandOver(_)));
    /// assert_eq!(game.total_chips(), 2 * game.config().round_buy_in);
    /// ```
    pub fn new(config: TableConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            state: GameState::Init,
            deck: Deck::standard(),
            board: Board::default(),
            players: Vec::new(),
            pot: 0,
            current_bet: 0,
            street: Street::PreFlop,
            dealer: 0,
            current: 0,
            previous: None,
            winners: Vec::new(),
            showdown: Vec::new(),
            blind_shortfall: None,
            awaiting: None,
            summary: None,
            hand_no: 0,
            seed,
            stream: 0,
            stacked: None,
            human_name: String::from("Player"),
            human_history: ActionCounters::default(),
        })
    }

    /// Name the human seat and give it an action history for the opponent to read.
    pub fn with_human(mut self, name: impl Into<String>, history: ActionCounters) -> Self {
        self.human_name = name.into();
        self.human_history = history;
        self
    }

    /// Use `deck` (unshuffled) for the next hand dealt. Hole cards come off
    /// first, seat by seat, then flop, turn and river.
    pub fn stack_next_deck(&mut self, deck: Deck) {
        self.stacked = Some(deck);
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns settled chips from finished streets
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// Returns the pot including bets on the current street
    pub fn pot_total(&self) -> Chips {
        self.pot + self.players.iter().map(|p| p.bet).sum::<Chips>()
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Winners of the hand being resolved (seat indices in table order)
    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    /// Best hand per seat once the hand reached showdown
    pub fn showdown(&self) -> &[Option<BestHand>] {
        &self.showdown
    }

    /// Seat waiting for `act`, if any
    pub fn awaiting(&self) -> Option<usize> {
        self.awaiting
    }

    pub fn summary(&self) -> Option<&HandSummary> {
        self.summary.as_ref()
    }

    pub fn hand_no(&self) -> u64 {
        self.hand_no
    }

    /// Pot + bets + funds; constant for the whole match.
    pub fn total_chips(&self) -> Chips {
        self.pot_total() + self.players.iter().map(|p| p.funds).sum::<Chips>()
    }

    pub fn legal_actions(&self, seat: usize) -> LegalActions {
        crate::engine::GameEngine::legal_actions(self, seat)
    }

    /// Run the machine until it needs outside input.
    pub fn resume(&mut self) -> Result<Prompt, GameError> {
        loop {
            match self.state {
                GameState::Init => self.state_init()?,
                GameState::NewRound => self.state_new_round()?,
                GameState::Board => self.state_board()?,
                GameState::PlayersInput => {
                    if let Some(prompt) = self.state_players_input()? {
                        return Ok(prompt);
                    }
                }
                GameState::Result => return Ok(self.state_result()),
            }
        }
    }

    /// Submit the human's action. A rejected action leaves the game untouched
    /// and `resume` offers the same choices again.
    pub fn act(&mut self, action: Action) -> Result<Prompt, GameError> {
        let seat = self.awaiting.ok_or(ActionError::NotAwaiting)?;
        let legal = self.legal_actions(seat);
        if !legal.contains(action) {
            log::warn!("seat {seat} tried {action}; legal: [{legal}]");
            return Err(ActionError::InvalidAction { action: action.label().to_string(), legal }.into());
        }
        self.awaiting = None;
        self.apply(seat, action);
        self.advance_turn();
        self.resume()
    }

    /// Like `act`, from a label such as "All-In" or "call".
    pub fn act_str(&mut self, input: &str) -> Result<Prompt, GameError> {
        let seat = self.awaiting.ok_or(ActionError::NotAwaiting)?;
        match input.parse::<Action>() {
            Ok(action) => self.act(action),
            Err(_) => {
                let legal = self.legal_actions(seat);
                log::warn!("seat {seat} sent unknown action '{input}'");
                Err(ActionError::InvalidAction { action: input.to_string(), legal }.into())
            }
        }
    }

    /// Leave RESULT: deal the next hand of this match or start a new match.
    pub fn proceed(&mut self, choice: Continue) -> Result<Prompt, GameError> {
        let summary = match (&self.state, &self.summary) {
            (GameState::Result, Some(summary)) => summary,
            _ => return Err(GameError::NotAwaitingContinue),
        };
        match choice {
            Continue::NextRound if summary.is_match_over() => return Err(GameError::MatchOver),
            Continue::NextRound => self.state = GameState::NewRound,
            Continue::NewMatch => self.state = GameState::Init,
        }
        self.resume()
    }

    /// Reset to INIT so the next `resume` seats a fresh match.
    pub fn restart(&mut self) {
        self.state = GameState::Init;
        self.awaiting = None;
        self.summary = None;
    }

    fn next_rng(&mut self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(self.stream);
        self.stream += 1;
        rng
    }

    fn other(seat: usize) -> usize {
        (seat + 1) % SEATS
    }

    fn state_init(&mut self) -> Result<(), GameError> {
        let (name, history) = match self.players.get(HUMAN_SEAT) {
            Some(p) => (p.name.clone(), p.counters),
            None => (self.human_name.clone(), self.human_history),
        };
        let buy_in = self.config.round_buy_in;
        let mut human = Player::new(name, AgentKind::Human, buy_in);
        human.counters = history;
        let npc = Player::new("Dealer Bot", AgentKind::Npc, buy_in);
        self.players = vec![human, npc];
        self.dealer = self.next_rng().random_range(0..SEATS);
        log::info!("new match: buy-in {buy_in}, dealer seat {}", self.dealer);
        self.begin_hand()
    }

    fn state_new_round(&mut self) -> Result<(), GameError> {
        self.dealer = Self::other(self.dealer);
        self.begin_hand()
    }

    fn begin_hand(&mut self) -> Result<(), GameError> {
        self.deck = match self.stacked.take() {
            Some(deck) => deck,
            None => {
                let mut deck = Deck::standard();
                deck.shuffle_with(&mut self.next_rng());
                deck
            }
        };
        self.board.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.street = Street::PreFlop;
        self.winners.clear();
        self.showdown = vec![None; self.players.len()];
        self.blind_shortfall = None;
        self.awaiting = None;
        self.summary = None;
        self.previous = None;
        self.hand_no += 1;
        for p in self.players.iter_mut() {
            p.reset_for_hand();
        }
        for seat in 0..self.players.len() {
            let cards = self.deck.draw_n(2)?;
            self.players[seat].hole = Some(HoleCards::from_slice(&cards)?);
        }
        log::debug!("hand {} dealt, dealer seat {}", self.hand_no, self.dealer);
        self.state = GameState::Board;
        Ok(())
    }

    fn state_board(&mut self) -> Result<(), GameError> {
        match self.street {
            Street::PreFlop => {
                let (sb, bb) = (self.config.small_blind, self.config.big_blind);
                self.players[self.dealer].post_blind(sb);
                self.players[Self::other(self.dealer)].post_blind(bb);
                if let Some(short) = self.players.iter().position(|p| p.funds < 0) {
                    log::info!("seat {short} cannot cover its blind");
                    self.blind_shortfall = Some(short);
                    self.state = GameState::Result;
                    return Ok(());
                }
                self.current_bet = bb;
                self.current = self.dealer;
            }
            Street::Flop | Street::Turn | Street::River => {
                let n = if self.street == Street::Flop { 3 } else { 1 };
                let cards = self.deck.draw_n(n)?;
                self.board.extend(cards);
                self.current = Self::other(self.dealer);
            }
            Street::Showdown => {
                self.resolve_showdown()?;
                self.state = GameState::Result;
                return Ok(());
            }
        }
        self.previous = None;
        self.state = GameState::PlayersInput;
        Ok(())
    }

    fn resolve_showdown(&mut self) -> Result<(), GameError> {
        let mut best: Option<BestHand> = None;
        for (seat, p) in self.players.iter().enumerate() {
            if p.has_folded() {
                continue;
            }
            let hole = p.hole.ok_or(GameError::MissingHoleCards(seat))?;
            let eval = evaluate_holdem(&hole, self.board.as_slice())?;
            if best.as_ref().map_or(true, |b| eval > *b) {
                best = Some(eval);
            }
            self.showdown[seat] = Some(eval);
        }
        self.winners = self
            .showdown
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some() && e.as_ref() == best.as_ref())
            .map(|(seat, _)| seat)
            .collect();
        log::debug!("showdown on {:?}: winners {:?}", self.board.as_slice(), self.winners);
        Ok(())
    }

    fn state_players_input(&mut self) -> Result<Option<Prompt>, GameError> {
        let live: Vec<usize> = (0..self.players.len()).filter(|&i| !self.players[i].has_folded()).collect();
        if live.len() == 1 {
            self.winners = live;
            self.state = GameState::Result;
            return Ok(None);
        }

        if self.betting_settled() {
            self.settle_street();
            self.state = GameState::Board;
            return Ok(None);
        }

        let seat = self.current;
        if self.players[seat].funds <= 0 {
            self.players[seat].pass();
            self.advance_turn();
            return Ok(None);
        }

        if !self.players[seat].is_npc() {
            self.awaiting = Some(seat);
            return Ok(Some(Prompt::AwaitAction { seat, legal: self.legal_actions(seat) }));
        }

        let mut rng = self.next_rng();
        let action = NpcAgent::new(self.config).decide(&*self, seat, &mut rng)?;
        debug_assert!(self.legal_actions(seat).contains(action));
        self.apply(seat, action);
        self.advance_turn();
        Ok(None)
    }

    /// Every seat that still has chips has acted and matched the current bet.
    fn betting_settled(&self) -> bool {
        self.players.iter().all(|p| {
            p.funds <= 0 || p.has_folded() || (p.action.is_some() && p.bet == self.current_bet)
        })
    }

    fn settle_street(&mut self) {
        let before = self.total_chips();
        // A bet the other seat could not match is handed back before the pot is built.
        let mut by_bet: Vec<usize> = (0..self.players.len()).collect();
        by_bet.sort_by(|&a, &b| self.players[b].bet.cmp(&self.players[a].bet));
        if let [top, second, ..] = by_bet[..] {
            let excess = self.players[top].bet - self.players[second].bet;
            if excess > 0 {
                log::debug!("returning {excess} uncalled chips to seat {top}");
                self.players[top].return_bet(excess);
            }
        }

        for p in self.players.iter_mut() {
            self.pot += p.bet;
            p.reset_for_street();
        }
        self.current_bet = 0;
        self.street = self.street.next();
        debug_assert_eq!(self.total_chips(), before, "chips changed while settling the street");
        log::debug!("street settled, pot {} -> {:?}", self.pot, self.street);
    }

    fn apply(&mut self, seat: usize, action: Action) {
        let current_bet = self.current_bet;
        match action {
            Action::Fold => self.players[seat].fold(),
            Action::Check => self.players[seat].check(),
            Action::Call => {
                let to_call = current_bet - self.players[seat].bet;
                self.players[seat].call(to_call);
            }
            Action::Bet => {
                self.players[seat].open_bet(self.config.big_blind);
                self.current_bet = self.players[seat].bet;
            }
            Action::Raise => {
                let increment = current_bet * self.config.raise_rate;
                let reraise = self
                    .players
                    .iter()
                    .any(|p| matches!(p.action, Some(SeatAction::Raise | SeatAction::Reraise)));
                self.players[seat].raise(current_bet, increment, reraise);
                self.current_bet = current_bet + increment;
            }
            Action::AllIn => {
                self.players[seat].all_in();
                self.current_bet = current_bet.max(self.players[seat].bet);
            }
        }
        log::debug!(
            "seat {seat} {action}: bet {}, funds {}, current bet {}",
            self.players[seat].bet,
            self.players[seat].funds,
            self.current_bet
        );
    }

    fn advance_turn(&mut self) {
        self.previous = Some(self.current);
        self.current = Self::other(self.current);
    }

    fn state_result(&mut self) -> Prompt {
        if let Some(summary) = &self.summary {
            return Prompt::HandOver(summary.clone());
        }

        let payouts = self.distribute();
        let buy_in = self.config.round_buy_in;
        let human = &self.players[HUMAN_SEAT];
        let match_over =
            self.blind_shortfall.is_some() || self.players.iter().any(|p| p.funds <= 0);
        let match_result = match_over.then(|| {
            let funds_delta = human.funds - buy_in;
            MatchResult { human_won: funds_delta > 0, funds_delta }
        });
        let reached_showdown = self.showdown.iter().any(Option::is_some);
        let summary = HandSummary {
            hand_no: self.hand_no,
            winners: self.winners.clone(),
            payouts,
            showdown: self.showdown.clone(),
            revealed: self
                .players
                .iter()
                .map(|p| if reached_showdown && !p.has_folded() { p.hole } else { None })
                .collect(),
            blind_shortfall: self.blind_shortfall,
            human_won: self.winners.contains(&HUMAN_SEAT),
            human_counters: human.hand_counters,
            match_result,
        };
        log::info!(
            "hand {} over: winners {:?}, payouts {:?}{}",
            summary.hand_no,
            summary.winners,
            summary.payouts,
            if match_over { ", match over" } else { "" }
        );
        self.summary = Some(summary.clone());
        Prompt::HandOver(summary)
    }

    /// Pay pot + outstanding bets to the winners. Remainder chips go one at a
    /// time to winners in seat order starting left of the dealer. With no
    /// winners (blind shortfall) every bet goes back to its owner.
    fn distribute(&mut self) -> Vec<Chips> {
        let mut payouts = vec![0; self.players.len()];
        if self.winners.is_empty() {
            for p in self.players.iter_mut() {
                let bet = p.bet;
                p.return_bet(bet);
            }
            debug_assert_eq!(self.pot, 0, "pot left without winners");
            return payouts;
        }

        let mut total = self.pot;
        for p in self.players.iter_mut() {
            total += p.bet;
            p.bet = 0;
        }
        self.pot = 0;

        let n = self.players.len();
        let dealer = self.dealer;
        let mut order = self.winners.clone();
        order.sort_by_key(|&seat| (seat + n - dealer - 1) % n);

        let share = total / order.len() as Chips;
        let mut remainder = total % order.len() as Chips;
        for seat in order {
            let mut amount = share;
            if remainder > 0 {
                amount += 1;
                remainder -= 1;
            }
            self.players[seat].receive(amount);
            payouts[seat] = amount;
        }
        payouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn game(seed: u64) -> Game {
        Game::new(TableConfig::default(), seed).unwrap()
    }

    /// Put the game on the flop with the human to act first and nobody having bet.
    fn flop_with_human_to_act() -> Game {
        let mut g = game(3);
        g.stack_next_deck(Deck::stacked(parse_cards("2c 3d 4h 5s 9c Td Jh Qs Ks").unwrap()));
        g.state_init().unwrap();
        g.dealer = NPC_SEAT;
        g.state_board().unwrap();
        // both seats complete preflop by hand
        g.apply(NPC_SEAT, Action::Call);
        g.apply(HUMAN_SEAT, Action::Check);
        g.settle_street();
        g.state = GameState::Board;
        g.state_board().unwrap();
        g
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let mut g = flop_with_human_to_act();
        let prompt = g.resume().unwrap();
        let legal = match prompt {
            Prompt::AwaitAction { seat, legal } => {
                assert_eq!(seat, HUMAN_SEAT);
                legal
            }
            other => panic!("unexpected prompt {other:?}"),
        };
        assert_eq!(legal.as_slice(), &[Action::Fold, Action::Check, Action::Bet, Action::AllIn]);

        let before = serde_json::to_string(&g).unwrap();
        let err = g.act(Action::Raise).unwrap_err();
        assert!(matches!(err, GameError::Action(ActionError::InvalidAction { .. })));
        let err = g.act_str("Raise").unwrap_err();
        assert!(matches!(err, GameError::Action(ActionError::InvalidAction { .. })));
        assert_eq!(serde_json::to_string(&g).unwrap(), before);

        let again = g.resume().unwrap();
        assert_eq!(again, Prompt::AwaitAction { seat: HUMAN_SEAT, legal });
    }

    #[test]
    fn odd_chip_goes_left_of_dealer_first() {
        let mut g = game(1);
        g.state_init().unwrap();
        g.dealer = HUMAN_SEAT;
        for p in g.players.iter_mut() {
            p.funds = 500;
            p.bet = 0;
        }
        g.pot = 1001;
        g.winners = vec![HUMAN_SEAT, NPC_SEAT];
        let payouts = g.distribute();
        assert_eq!(payouts, vec![500, 501]);

        g.dealer = NPC_SEAT;
        g.pot = 1001;
        let payouts = g.distribute();
        assert_eq!(payouts, vec![501, 500]);
    }

    #[test]
    fn uncalled_excess_returns_to_bettor() {
        let mut g = game(2);
        g.state_init().unwrap();
        g.state_board().unwrap();
        let short = NPC_SEAT;
        let deep = HUMAN_SEAT;
        g.players[short].funds = 0;
        g.players[short].bet = 40;
        g.players[short].action = Some(SeatAction::AllIn);
        g.players[deep].funds = 900;
        g.players[deep].bet = 100;
        g.players[deep].action = Some(SeatAction::Raise);
        g.current_bet = 100;
        assert!(g.betting_settled());
        g.settle_street();
        assert_eq!(g.pot, 80);
        assert_eq!(g.players[deep].funds, 960);
        assert_eq!(g.street, Street::Flop);
    }

    #[test]
    fn zero_funds_seat_passes() {
        let mut g = flop_with_human_to_act();
        g.players[HUMAN_SEAT].funds = 0;
        g.players[NPC_SEAT].action = Some(SeatAction::Check);
        assert!(g.betting_settled());
        g.players[NPC_SEAT].action = None;
        assert!(g.state_players_input().unwrap().is_none());
        assert_eq!(g.players[HUMAN_SEAT].action, Some(SeatAction::Pass));
        assert_eq!(g.current, NPC_SEAT);
        assert_eq!(g.previous, Some(HUMAN_SEAT));
    }

    #[test]
    fn raise_after_raise_is_counted_as_reraise() {
        let mut g = flop_with_human_to_act();
        g.apply(HUMAN_SEAT, Action::Bet);
        assert_eq!(g.current_bet, 10);
        g.apply(NPC_SEAT, Action::Raise);
        assert_eq!(g.current_bet, 20);
        assert_eq!(g.players[NPC_SEAT].action, Some(SeatAction::Raise));
        g.apply(HUMAN_SEAT, Action::Raise);
        assert_eq!(g.current_bet, 40);
        assert_eq!(g.players[HUMAN_SEAT].action, Some(SeatAction::Reraise));
        assert_eq!(g.players[HUMAN_SEAT].counters.reraise, 1);
    }

    #[test]
    fn blind_shortfall_refunds_and_ends_match() {
        let mut g = game(6);
        g.state_init().unwrap();
        g.dealer = NPC_SEAT;
        g.players[HUMAN_SEAT].funds = 7;
        g.players[NPC_SEAT].funds = 1993;
        g.state_board().unwrap();
        assert_eq!(g.state, GameState::Result);
        assert_eq!(g.blind_shortfall, Some(HUMAN_SEAT));

        let summary = match g.resume().unwrap() {
            Prompt::HandOver(summary) => summary,
            other => panic!("unexpected prompt {other:?}"),
        };
        assert!(summary.winners.is_empty());
        assert_eq!(summary.payouts, vec![0, 0]);
        assert_eq!(g.players[HUMAN_SEAT].funds, 7);
        assert_eq!(g.players[NPC_SEAT].funds, 1993);
        assert_eq!(summary.match_result, Some(MatchResult { human_won: false, funds_delta: -993 }));
        assert_eq!(g.proceed(Continue::NextRound).unwrap_err(), GameError::MatchOver);
        assert!(g.proceed(Continue::NewMatch).is_ok());
        assert_eq!(g.total_chips(), 2000);
    }

    #[test]
    fn chips_are_conserved_at_every_transition() {
        use rand::seq::IndexedRandom;

        let mut g = game(13);
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let total = g.config.round_buy_in * SEATS as Chips;
        let mut streets_settled = 0;
        let mut hands = 0;
        while hands < 40 {
            let street = g.street;
            match g.state {
                GameState::Init => g.state_init().unwrap(),
                GameState::NewRound => g.state_new_round().unwrap(),
                GameState::Board => g.state_board().unwrap(),
                GameState::PlayersInput => {
                    if let Some(Prompt::AwaitAction { seat, legal }) = g.state_players_input().unwrap() {
                        let action = *legal.as_slice().choose(&mut rng).unwrap();
                        g.awaiting = None;
                        g.apply(seat, action);
                        g.advance_turn();
                    }
                    if g.state == GameState::Board && g.street != street {
                        streets_settled += 1;
                        assert_eq!(g.pot_total(), g.pot);
                    }
                }
                GameState::Result => {
                    let summary = match g.state_result() {
                        Prompt::HandOver(summary) => summary,
                        other => panic!("unexpected prompt {other:?}"),
                    };
                    hands += 1;
                    g.state = if summary.is_match_over() { GameState::Init } else { GameState::NewRound };
                }
            }
            assert_eq!(g.total_chips(), total, "state {:?} on {:?}", g.state, g.street);
        }
        assert!(streets_settled > 0);
    }

    #[test]
    fn proceed_outside_result_is_rejected() {
        let mut g = flop_with_human_to_act();
        assert_eq!(g.proceed(Continue::NextRound).unwrap_err(), GameError::NotAwaitingContinue);
    }
}
