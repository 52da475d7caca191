use crate::agents::Action;
use crate::game::{Continue, GameState, Prompt};
use crate::session::{GameSession, RecordStore, SessionError};
use crate::snapshot::TableSnapshot;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuApply,
    ToggleMenu,
    ToggleHelp,
    SelectNext,
    SelectPrev,
    Submit,
    /// Submit a specific action directly (hotkeys).
    Act(Action),
    NextRound,
    NewMatch,
}

pub struct AppState {
    pub scene: Scene,
    pub menu_index: usize,
    pub(crate) session: GameSession,
    pub(crate) store: Box<dyn RecordStore>,
    pub(crate) prompt: Option<Prompt>,
    selected: usize,
    /// Lines shown under the menu (statistics, leaderboard, notices).
    pub(crate) info: Vec<String>,
    help_open: bool,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("scene", &self.scene)
            .field("menu_index", &self.menu_index)
            .field("user", &self.session.user())
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

impl AppState {
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub fn new(session: GameSession, store: Box<dyn RecordStore>) -> Self {
        let info = if session.can_buy_in() { Vec::new() } else { Self::broke_notice(&session) };
        Self {
            scene: Scene::Menu,
            menu_index: 0,
            session,
            store,
            prompt: None,
            selected: 0,
            info,
            help_open: false,
            action_error: None,
            action_error_at: None,
        }
    }

    pub(crate) fn broke_notice(session: &GameSession) -> Vec<String> {
        vec![
            format!(
                "Your bankroll (${}) is below the ${} buy-in.",
                session.record().funds,
                session.config().round_buy_in
            ),
            format!("Choose Reset Record to start over with ${}.", session.config().initial_funds),
        ]
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot(&self) -> TableSnapshot {
        self.session.snapshot()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Index into the offered legal actions.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_action(&self) -> Option<Action> {
        match &self.prompt {
            Some(Prompt::AwaitAction { legal, .. }) => legal.as_slice().get(self.selected).copied(),
            _ => None,
        }
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_error(&mut self, err: impl ToString) {
        self.action_error = Some(err.to_string());
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    /// Expire stale error messages.
    pub fn on_tick(&mut self) {
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
    }

    fn settle(&mut self, result: Result<Prompt, SessionError>) -> bool {
        match result {
            Ok(prompt) => {
                self.clear_action_error();
                self.selected = 0;
                self.prompt = Some(prompt);
                true
            }
            Err(err) => {
                log::warn!("table input rejected: {err}");
                self.set_error(err);
                false
            }
        }
    }

    /// Resume the session's game, starting a match if none is running.
    pub fn play(&mut self) -> bool {
        let result = self.session.resume(self.store.as_mut());
        let ok = self.settle(result);
        if ok {
            self.scene = Scene::Table;
        }
        ok
    }

    fn submit(&mut self, action: Action) -> bool {
        if !matches!(self.prompt, Some(Prompt::AwaitAction { .. })) {
            return false;
        }
        let result = self.session.act(self.store.as_mut(), action);
        self.settle(result)
    }

    fn proceed(&mut self, choice: Continue) -> bool {
        if !matches!(self.prompt, Some(Prompt::HandOver(_))) {
            return false;
        }
        let result = self.session.proceed(self.store.as_mut(), choice);
        self.settle(result)
    }

    /// Settle any match in progress and save the record.
    pub fn leave(&mut self) -> Result<(), SessionError> {
        if self.session.game().state() == GameState::Init {
            return Ok(());
        }
        let delta = self.session.leave(self.store.as_mut())?;
        self.prompt = None;
        self.info = vec![format!("Left the table ({delta:+}). Bankroll: ${}", self.session.record().funds)];
        Ok(())
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    return self.apply_menu();
                }
                false
            }
            InputAction::SelectNext | InputAction::SelectPrev => {
                if let Some(Prompt::AwaitAction { legal, .. }) = &self.prompt {
                    let n = legal.len().max(1);
                    self.selected = if action == InputAction::SelectNext {
                        (self.selected + 1) % n
                    } else {
                        (self.selected + n - 1) % n
                    };
                }
                false
            }
            InputAction::Submit => match self.selected_action() {
                Some(a) if self.scene == Scene::Table => self.submit(a),
                _ => false,
            },
            InputAction::Act(a) => self.scene == Scene::Table && self.submit(a),
            InputAction::NextRound => self.scene == Scene::Table && self.proceed(Continue::NextRound),
            InputAction::NewMatch => self.scene == Scene::Table && self.proceed(Continue::NewMatch),
        }
    }

    fn toggle_menu(&mut self) {
        self.help_open = false;
        self.scene = match self.scene {
            Scene::Menu if self.prompt.is_some() => Scene::Table,
            Scene::Menu => Scene::Menu,
            Scene::Table => Scene::Menu,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::session::MemoryStore;

    fn app() -> AppState {
        let store = MemoryStore::new();
        let session = GameSession::open("t", Some("Tess"), &store, TableConfig::default(), 17).unwrap();
        AppState::new(session, Box::new(store))
    }

    #[test]
    fn actions_ignored_outside_a_hand() {
        let mut app = app();
        assert!(!app.handle_input(InputAction::Act(Action::Fold)));
        assert!(!app.handle_input(InputAction::NextRound));
        assert!(app.prompt().is_none());
    }

    #[test]
    fn illegal_hotkey_reports_error_and_keeps_prompt() {
        let mut app = app();
        assert!(app.play());
        for _ in 0..50 {
            if !matches!(app.prompt(), Some(Prompt::HandOver(_))) {
                break;
            }
            app.handle_input(InputAction::NewMatch);
        }
        let before = app.prompt().cloned();
        let legal = match &before {
            Some(Prompt::AwaitAction { legal, .. }) => legal.clone(),
            other => panic!("expected a prompt, got {other:?}"),
        };
        let illegal = if legal.contains(Action::Check) { Action::Call } else { Action::Check };
        assert!(!app.handle_input(InputAction::Act(illegal)));
        assert!(app.action_error().is_some());
        assert_eq!(app.prompt().cloned(), before);
    }
}
