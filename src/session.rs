//! Persisted player records and the per-user session around a `Game`.
//!
//! A `GameSession` owns one user's game and their `PlayerRecord`. Every
//! resolved hand is folded into the record exactly once and saved through a
//! `RecordStore`. `SessionRegistry` keeps the sessions of many users side by
//! side, sharing one store.

mod record;
mod store;

pub use record::{PlayerRecord, RecordStats};
pub use store::{leaderboard, JsonFileStore, MemoryStore, RecordStore, StoreError};

use crate::agents::Action;
use crate::config::{Chips, TableConfig};
use crate::game::{Continue, Game, GameError, GameState, Prompt, HUMAN_SEAT};
use crate::snapshot::TableSnapshot;
use std::collections::HashMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("a match needs {buy_in} chips but the bankroll holds {funds}")]
    InsufficientBankroll { funds: Chips, buy_in: Chips },
    #[error("no open session for '{0}'")]
    UnknownSession(String),
}

/// Load `user`'s record, falling back to a fresh one when it is missing or unreadable.
fn load_or_fresh(store: &dyn RecordStore, user: &str, config: &TableConfig) -> Result<PlayerRecord, SessionError> {
    match store.load(user) {
        Ok(Some(record)) => Ok(record),
        Ok(None) => {
            log::info!("no record for {user}, starting with {}", config.initial_funds);
            Ok(PlayerRecord::fresh(user, config.initial_funds))
        }
        Err(StoreError::Corrupted { reason, .. }) => {
            log::warn!("record for {user} is corrupted ({reason}); using a fresh one");
            Ok(PlayerRecord::fresh(user, config.initial_funds))
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    user: String,
    record: PlayerRecord,
    game: Game,
    config: TableConfig,
    seed: u64,
    last_applied: u64,
    dirty: bool,
}

impl GameSession {
    /// Open a session for `user`. `name` renames the record when given.
    /// A bankroll below the buy-in still opens; `resume` refuses to seat a
    /// match until `reset_record` is called.
    ///
    /// ```
    /// use headsup_holdem::config::TableConfig;
    /// use headsup_holdem::game::Prompt;
    /// use headsup_holdem::session::{GameSession, MemoryStore};
    ///
    /// let mut store = MemoryStore::new();
    /// let mut session = GameSession::open("u1", Some("Ann"), &store, TableConfig::default(), 42).unwrap();
    /// let prompt = session.resume(&mut store).unwrap();
    /// assert!(matches!(prompt, Prompt::AwaitAction { .. } | Prompt::HandOver(_)));
    /// assert_eq!(session.record().name, "Ann");
    /// ```
    pub fn open(
        user: &str,
        name: Option<&str>,
        store: &dyn RecordStore,
        config: TableConfig,
        seed: u64,
    ) -> Result<Self, SessionError> {
        let mut record = load_or_fresh(store, user, &config)?;
        let mut dirty = false;
        if let Some(name) = name {
            if record.name != name {
                record.name = name.to_string();
                dirty = true;
            }
        }
        let game = Game::new(config, seed)?.with_human(record.name.clone(), record.counters());
        let session = Self { user: user.to_string(), record, game, config, seed, last_applied: 0, dirty };
        log::info!("session opened for {user} with bankroll {}", session.record.funds);
        Ok(session)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn record(&self) -> &PlayerRecord {
        &self.record
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access to the game, e.g. to stack the next deck.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(&self.game, HUMAN_SEAT)
    }

    /// Whether the bankroll covers one more buy-in.
    pub fn can_buy_in(&self) -> bool {
        self.record.funds >= self.config.round_buy_in
    }

    fn ensure_bankroll(&self) -> Result<(), SessionError> {
        let buy_in = self.config.round_buy_in;
        if !self.can_buy_in() {
            return Err(SessionError::InsufficientBankroll { funds: self.record.funds, buy_in });
        }
        Ok(())
    }

    /// Run the game to its next prompt. A store failure is reported after the
    /// game has moved on; calling `resume` again returns the same prompt and
    /// retries the save.
    pub fn resume(&mut self, store: &mut dyn RecordStore) -> Result<Prompt, SessionError> {
        if self.game.state() == GameState::Init {
            self.ensure_bankroll()?;
        }
        let prompt = self.game.resume()?;
        self.absorb(store, &prompt)?;
        Ok(prompt)
    }

    pub fn act(&mut self, store: &mut dyn RecordStore, action: Action) -> Result<Prompt, SessionError> {
        let prompt = self.game.act(action)?;
        self.absorb(store, &prompt)?;
        Ok(prompt)
    }

    pub fn act_str(&mut self, store: &mut dyn RecordStore, input: &str) -> Result<Prompt, SessionError> {
        let prompt = self.game.act_str(input)?;
        self.absorb(store, &prompt)?;
        Ok(prompt)
    }

    /// Continue after a resolved hand. Starting a new match before the
    /// current one is decided settles it the same way as `leave`.
    pub fn proceed(&mut self, store: &mut dyn RecordStore, choice: Continue) -> Result<Prompt, SessionError> {
        if choice == Continue::NewMatch {
            if self.game.summary().is_none() {
                return Err(GameError::NotAwaitingContinue.into());
            }
            self.abandon_match();
            self.flush(store)?;
            return self.resume(store);
        }
        let prompt = self.game.proceed(choice)?;
        self.absorb(store, &prompt)?;
        Ok(prompt)
    }

    /// Quit the match in progress. Chips behind come back to the bankroll;
    /// chips already bet this hand are lost. Returns the bankroll change.
    pub fn leave(&mut self, store: &mut dyn RecordStore) -> Result<Chips, SessionError> {
        let delta = self.abandon_match();
        log::info!("{} left the table, bankroll change {delta}", self.user);
        self.flush(store)?;
        Ok(delta)
    }

    /// Credit an undecided match to the bankroll and put the game back in INIT.
    fn abandon_match(&mut self) -> Chips {
        let mut delta = 0;
        let decided = self.game.summary().is_some_and(|s| s.is_match_over());
        if self.game.state() != GameState::Init && !decided {
            if let Some(human) = self.game.players().get(HUMAN_SEAT) {
                delta = human.funds() - self.config.round_buy_in;
                if self.game.summary().is_none() {
                    self.record.add_counters(human.hand_counters());
                }
            }
            self.record.funds += delta;
            self.dirty = true;
        }
        self.game.restart();
        delta
    }

    /// Start over with a fresh record holding the initial funds.
    pub fn reset_record(&mut self, store: &mut dyn RecordStore) -> Result<(), SessionError> {
        self.record = PlayerRecord::fresh(self.record.name.clone(), self.config.initial_funds);
        self.game = Game::new(self.config, self.seed)?.with_human(self.record.name.clone(), self.record.counters());
        self.last_applied = 0;
        self.dirty = true;
        log::info!("record for {} reset to {}", self.user, self.record.funds);
        self.flush(store)
    }

    fn absorb(&mut self, store: &mut dyn RecordStore, prompt: &Prompt) -> Result<(), SessionError> {
        if let Prompt::HandOver(summary) = prompt {
            if summary.hand_no > self.last_applied {
                self.record.add_counters(&summary.human_counters);
                if !summary.winners.is_empty() {
                    if summary.human_won {
                        self.record.win += 1;
                    } else {
                        self.record.lose += 1;
                    }
                }
                if let Some(result) = summary.match_result {
                    self.record.funds += result.funds_delta;
                    log::info!(
                        "match over for {}: {} ({:+}), bankroll {}",
                        self.user,
                        if result.human_won { "won" } else { "lost" },
                        result.funds_delta,
                        self.record.funds
                    );
                }
                self.last_applied = summary.hand_no;
                self.dirty = true;
            }
        }
        self.flush(store)
    }

    fn flush(&mut self, store: &mut dyn RecordStore) -> Result<(), SessionError> {
        if self.dirty {
            store.save(&self.user, &self.record)?;
            self.dirty = false;
        }
        Ok(())
    }
}

/// Sessions of many users over one shared record store.
#[derive(Debug)]
pub struct SessionRegistry<S: RecordStore> {
    store: S,
    config: TableConfig,
    sessions: HashMap<String, GameSession>,
}

impl<S: RecordStore> SessionRegistry<S> {
    pub fn new(store: S, config: TableConfig) -> Self {
        Self { store, config, sessions: HashMap::new() }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open (or reopen) the session keyed by `user`.
    pub fn open(&mut self, user: &str, name: Option<&str>, seed: u64) -> Result<&GameSession, SessionError> {
        if !self.sessions.contains_key(user) {
            let session = GameSession::open(user, name, &self.store, self.config, seed)?;
            self.sessions.insert(user.to_string(), session);
        }
        self.get(user)
    }

    pub fn get(&self, user: &str) -> Result<&GameSession, SessionError> {
        self.sessions.get(user).ok_or_else(|| SessionError::UnknownSession(user.to_string()))
    }

    fn parts(&mut self, user: &str) -> Result<(&mut GameSession, &mut S), SessionError> {
        let session = self
            .sessions
            .get_mut(user)
            .ok_or_else(|| SessionError::UnknownSession(user.to_string()))?;
        Ok((session, &mut self.store))
    }

    pub fn resume(&mut self, user: &str) -> Result<Prompt, SessionError> {
        let (session, store) = self.parts(user)?;
        session.resume(store)
    }

    pub fn act(&mut self, user: &str, action: Action) -> Result<Prompt, SessionError> {
        let (session, store) = self.parts(user)?;
        session.act(store, action)
    }

    pub fn proceed(&mut self, user: &str, choice: Continue) -> Result<Prompt, SessionError> {
        let (session, store) = self.parts(user)?;
        session.proceed(store, choice)
    }

    /// Leave the table and drop the session.
    pub fn close(&mut self, user: &str) -> Result<Chips, SessionError> {
        let (session, store) = self.parts(user)?;
        let delta = session.leave(store)?;
        self.sessions.remove(user);
        Ok(delta)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
