use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::Config;
use crate::runtime::DeckEvent;
use crate::scheduler::SettleQueue;
use crate::session::{Direction, Session, SessionState};

/// What the event loop should do after handling an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Presentation state wrapped around a [`Session`]
#[derive(Debug)]
pub struct App {
    session: Session,
    queue: SettleQueue,
    config: Config,
    now: Instant,
}

impl App {
    pub fn new(session: Session, config: Config) -> Self {
        Self {
            session,
            queue: SettleQueue::new(Duration::from_millis(config.settle_ms)),
            config,
            now: Instant::now(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One pass of the event loop: settle whatever has come due, then react
    /// to `event`. Settling on every event keeps cards moving while keys
    /// arrive faster than the tick interval.
    pub fn handle_event(&mut self, event: &DeckEvent, now: Instant) -> AppAction {
        self.on_tick(now);
        match event {
            DeckEvent::Key(key) => self.handle_key(*key, now),
            DeckEvent::Resize | DeckEvent::Tick => AppAction::Continue,
        }
    }

    /// When the event loop must wake up to settle the next card
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> AppAction {
        self.now = now;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('r') => self.reset(),
            _ if self.session.is_empty() => {}
            KeyCode::Enter if self.session.state() == SessionState::Complete => self.reset(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('x') => {
                self.swipe(Direction::Pass, now);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
                self.swipe(Direction::Like, now);
            }
            _ => {}
        }

        AppAction::Continue
    }

    /// Decide on the current card and schedule its settle step.
    /// Returns false if the session ignored the decision.
    pub fn swipe(&mut self, direction: Direction, now: Instant) -> bool {
        self.now = now;
        match self.session.decide(direction) {
            Some(ticket) => {
                self.queue.schedule(ticket, now);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        // Queued tickets stay put; the new generation makes them stale.
        self.session.reset();
    }

    /// Settle every transition whose delay has elapsed.
    /// Returns true if the cursor moved.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.now = now;
        let mut advanced = false;
        for ticket in self.queue.drain_due(now) {
            if self.session.settle(ticket) {
                advanced = true;
            } else {
                debug!(generation = ticket.generation(), "dropped stale settle ticket");
            }
        }
        advanced
    }

    /// Fraction of the settle delay elapsed for the card in flight
    pub fn transition_progress(&self) -> Option<f64> {
        let ticket = self.session.pending_ticket()?;
        let started = self.queue.started_at(ticket)?;
        let delay = self.queue.delay();
        if delay.is_zero() {
            return Some(1.0);
        }
        let elapsed = self.now.saturating_duration_since(started);
        Some((elapsed.as_secs_f64() / delay.as_secs_f64()).min(1.0))
    }

    /// True while a redraw on every tick is needed for the slide animation
    pub fn is_animating(&self) -> bool {
        !self.queue.is_empty()
    }
}
