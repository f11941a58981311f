use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};
use swipedeck::{
    catalog::default_catalog,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, DeckEvent, Runner},
    App, AppAction, Session,
};
use tracing::info;

/// swipe through a shuffled image deck, liking or passing each card
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Swipe through a shuffled deck of curated images one card at a time. Press → to like, ← to pass, r to reshuffle."
)]
pub struct Cli {
    /// milliseconds a swiped card takes to leave before the next one is shown
    #[clap(short = 'd', long)]
    settle_ms: Option<u64>,

    /// milliseconds between UI redraws
    #[clap(short = 't', long)]
    tick_ms: Option<u64>,

    /// seed for a reproducible shuffle order
    #[clap(long)]
    seed: Option<u64>,

    /// write the resolved settle/tick values to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line flags win over stored config
    fn resolve_config(&self, stored: Config) -> Config {
        stored.with_overrides(self.settle_ms, self.tick_ms)
    }

    fn new_session(&self) -> Session {
        match self.seed {
            Some(seed) => Session::seeded(default_catalog(), seed),
            None => Session::new(default_catalog()),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init_tracing();

    let store = FileConfigStore::new();
    let config = cli.resolve_config(store.load());
    if let Err(err) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, err).exit();
    }
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    let mut app = App::new(cli.new_session(), config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(app.config().tick_ms),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step(app.next_deadline());
        // Keep drawing until the last queued settle has been drained
        let animating = app.is_animating();
        if app.handle_event(&event, Instant::now()) == AppAction::Quit {
            break;
        }
        if animating || !matches!(event, DeckEvent::Tick) {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    let progress = app.session().progress();
    info!(
        cursor = progress.cursor,
        liked = progress.liked,
        passed = progress.passed,
        "exiting"
    );

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
