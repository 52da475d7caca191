use crate::agents::Action;
use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an input action. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if app.help_open() {
        if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
            app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }

    let input = match app.scene {
        Scene::Menu => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Up => InputAction::MenuPrev,
            KeyCode::Down => InputAction::MenuNext,
            KeyCode::Enter => InputAction::MenuApply,
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => InputAction::ToggleMenu,
            _ => return false,
        },
        Scene::Table => match code {
            KeyCode::Char('?') => InputAction::ToggleHelp,
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => InputAction::ToggleMenu,
            KeyCode::Left => InputAction::SelectPrev,
            KeyCode::Right | KeyCode::Tab => InputAction::SelectNext,
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Char('f') | KeyCode::Char('F') => InputAction::Act(Action::Fold),
            KeyCode::Char('k') | KeyCode::Char('K') => InputAction::Act(Action::Check),
            KeyCode::Char('c') | KeyCode::Char('C') => InputAction::Act(Action::Call),
            KeyCode::Char('b') | KeyCode::Char('B') => InputAction::Act(Action::Bet),
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Act(Action::Raise),
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Act(Action::AllIn),
            KeyCode::Char('n') | KeyCode::Char('N') => InputAction::NextRound,
            KeyCode::Char('g') | KeyCode::Char('G') => InputAction::NewMatch,
            _ => return false,
        },
    };
    app.handle_input(input);
    false
}
