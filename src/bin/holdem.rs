use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use headsup_holdem::config::TableConfig;
use headsup_holdem::session::{GameSession, JsonFileStore};
use headsup_holdem::tui::{app::AppState, controller};
use ratatui::prelude::*;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Heads-up Texas Hold'em against a computer opponent.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Record key under the data directory
    #[arg(long, default_value = "player")]
    user: String,
    /// Display name stored in the record
    #[arg(long)]
    name: Option<String>,
    /// Directory holding <user>/player_info.json
    #[arg(long, default_value = "users")]
    data_dir: PathBuf,
    /// Seed for shuffles and the opponent's rollouts (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file with table overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log level written to logs/<unix-time>.log
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn unix_time() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

/// The terminal belongs to the TUI, so logs go to a file.
fn init_logging(level: LevelFilter) -> io::Result<()> {
    std::fs::create_dir_all("logs")?;
    let file = std::fs::File::create(format!("logs/{}.log", unix_time()))?;
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file).map_err(io::Error::other)
}

fn load_config(path: Option<&PathBuf>) -> io::Result<TableConfig> {
    let Some(path) = path else {
        return Ok(TableConfig::default());
    };
    let json = std::fs::read_to_string(path)?;
    TableConfig::from_json(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if !io::stdout().is_terminal() {
        println!("headsup-holdem needs a real terminal (TTY). Version: {}", headsup_holdem::VERSION);
        return Ok(());
    }
    init_logging(args.log_level)?;

    let config = load_config(args.config.as_ref())?;
    let store = JsonFileStore::new(&args.data_dir);
    let seed = args.seed.unwrap_or_else(unix_time);
    log::info!("starting for {} with seed {seed}", args.user);

    let session =
        GameSession::open(&args.user, args.name.as_deref(), &store, config, seed).map_err(io::Error::other)?;
    let mut app = AppState::new(session, Box::new(store));

    let mut terminal = setup_terminal()?;
    let res = controller::run(&mut terminal, &mut app, Duration::from_millis(250));

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    if let Err(e) = app.leave() {
        log::warn!("could not save on exit: {e}");
        eprintln!("could not save your record: {e}");
    }
    res
}
