use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Input the deck loop reacts to. `Tick` means the wait ran out with
/// nothing to read, either at the redraw interval or at a settle deadline.
#[derive(Clone, Debug)]
pub enum DeckEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize)
pub trait DeckEventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<DeckEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<DeckEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too; only presses are decisions
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => DeckEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => DeckEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(forwarded).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DeckEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed source for headless tests
pub struct TestEventSource {
    rx: Receiver<DeckEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<DeckEvent>) -> Self {
        Self { rx }
    }
}

impl DeckEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DeckEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Waits for the next event, waking early when a settle step falls due
pub struct Runner<E: DeckEventSource> {
    event_source: E,
    tick: Duration,
}

impl<E: DeckEventSource> Runner<E> {
    pub fn new(event_source: E, tick: Duration) -> Self {
        Self { event_source, tick }
    }

    /// The tick interval, cut short by `deadline` if it comes sooner.
    /// A deadline already in the past yields a zero wait.
    pub fn wait_budget(&self, now: Instant, deadline: Option<Instant>) -> Duration {
        match deadline {
            Some(due) => self.tick.min(due.saturating_duration_since(now)),
            None => self.tick,
        }
    }

    /// Next event, or `Tick` once the wait budget runs out
    pub fn step(&self, deadline: Option<Instant>) -> DeckEvent {
        let timeout = self.wait_budget(Instant::now(), deadline);
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => DeckEvent::Tick,
        }
    }
}
