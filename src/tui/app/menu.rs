use crate::session::leaderboard;

use super::{AppState, Scene};

const LEADERBOARD_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Statistics,
    Leaderboard,
    ResetRecord,
    LeaveTable,
}

const MENU_ITEMS: [MenuItem; 5] = [
    MenuItem::Play,
    MenuItem::Statistics,
    MenuItem::Leaderboard,
    MenuItem::ResetRecord,
    MenuItem::LeaveTable,
];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Play if app.prompt().is_some() => "Back to Table".to_string(),
            MenuItem::Play => "New Game".to_string(),
            MenuItem::Statistics => "Statistics".to_string(),
            MenuItem::Leaderboard => "Leaderboard".to_string(),
            MenuItem::ResetRecord => format!("Reset Record (${})", app.session.config().initial_funds),
            MenuItem::LeaveTable => "Leave Table".to_string(),
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|it| it.display(self)).collect()
    }

    pub fn menu_item(&self) -> MenuItem {
        MENU_ITEMS[self.menu_index % MENU_ITEMS.len()]
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }

    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }

    pub fn apply_menu(&mut self) -> bool {
        match self.menu_item() {
            MenuItem::Play => {
                if self.prompt().is_some() {
                    self.scene = Scene::Table;
                    return true;
                }
                let ok = self.play();
                if !ok {
                    self.info = if self.session.can_buy_in() {
                        vec![self.action_error().unwrap_or("Cannot start a match").to_string()]
                    } else {
                        Self::broke_notice(&self.session)
                    };
                }
                ok
            }
            MenuItem::Statistics => {
                self.info = self.statistics_lines();
                false
            }
            MenuItem::Leaderboard => {
                self.info = match leaderboard(self.store.as_ref(), LEADERBOARD_SIZE) {
                    Ok(top) if top.is_empty() => vec!["No players yet.".to_string()],
                    Ok(top) => top
                        .iter()
                        .enumerate()
                        .map(|(i, r)| format!("{}. {} (${})", i + 1, r.name, r.funds))
                        .collect(),
                    Err(e) => vec![format!("Leaderboard unavailable: {e}")],
                };
                false
            }
            MenuItem::ResetRecord => {
                self.info = match self.session.reset_record(self.store.as_mut()) {
                    Ok(()) => {
                        self.prompt = None;
                        vec![format!("Record reset. Bankroll: ${}", self.session.record().funds)]
                    }
                    Err(e) => vec![format!("Reset failed: {e}")],
                };
                false
            }
            MenuItem::LeaveTable => {
                if let Err(e) = self.leave() {
                    self.info = vec![format!("Could not save: {e}")];
                }
                false
            }
        }
    }

    fn statistics_lines(&self) -> Vec<String> {
        let record = self.session.record();
        let s = record.stats();
        vec![
            format!("{}  Funds: ${}", record.name, record.funds),
            format!("Win: {:.1}% of {} hands", s.win_rate, s.hands),
            format!(
                "Fold {:.1}%  Check {:.1}%  Call {:.1}%",
                s.fold_rate, s.check_rate, s.call_rate
            ),
            format!(
                "Bet {:.1}%  Raise {:.1}%  Re-raise {:.1}%  All-In {:.1}%",
                s.bet_rate, s.raise_rate, s.reraise_rate, s.allin_rate
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::session::{GameSession, MemoryStore, PlayerRecord};

    #[test]
    fn broke_player_is_steered_to_reset() {
        let mut store = MemoryStore::new();
        store.insert_raw("b", PlayerRecord::fresh("Broke", 400).to_json().unwrap());
        let session = GameSession::open("b", None, &store, TableConfig::default(), 2).unwrap();
        let mut app = AppState::new(session, Box::new(store));
        assert!(app.info[1].contains("Reset Record"));

        assert_eq!(app.menu_item(), MenuItem::Play);
        assert!(!app.apply_menu());
        assert_eq!(app.scene, Scene::Menu);
        assert!(app.info[0].contains("$400"));

        while app.menu_item() != MenuItem::ResetRecord {
            app.menu_next();
        }
        app.apply_menu();
        assert_eq!(app.session().record().funds, 10_000);

        app.menu_index = 0;
        assert!(app.apply_menu());
        assert_eq!(app.scene, Scene::Table);
    }

    #[test]
    fn menu_wraps_around() {
        let store = MemoryStore::new();
        let session = GameSession::open("m", None, &store, TableConfig::default(), 1).unwrap();
        let mut app = AppState::new(session, Box::new(store));
        app.menu_prev();
        assert_eq!(app.menu_item(), MenuItem::LeaveTable);
        app.menu_next();
        assert_eq!(app.menu_item(), MenuItem::Play);
        assert_eq!(app.menu_items_display()[0], "New Game");
    }
}
