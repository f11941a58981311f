use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::ImageTemplate;
use crate::deck::{shuffle, ImageRecord};

/// Which way a card was swiped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Direction {
    /// Swipe right
    Like,
    /// Swipe left
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Browsing,
    Complete,
}

/// Handed out by [`Session::decide`]; redeemed by [`Session::settle`] once the
/// transition delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTicket {
    generation: u64,
    cursor: usize,
}

impl SettleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    direction: Direction,
    ticket: SettleTicket,
}

/// Snapshot of how far through the deck the user is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub cursor: usize,
    pub total: usize,
    pub liked: usize,
    pub passed: usize,
}

/// One browsing pass over a shuffled deck.
///
/// All state changes go through [`decide`](Session::decide),
/// [`settle`](Session::settle) and [`reset`](Session::reset). Calls that are
/// not valid in the current state are ignored rather than reported.
#[derive(Debug)]
pub struct Session {
    catalog: Vec<ImageTemplate>,
    deck: Vec<ImageRecord>,
    cursor: usize,
    liked: BTreeSet<usize>,
    passed: BTreeSet<usize>,
    pending: Option<Pending>,
    generation: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(catalog: Vec<ImageTemplate>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Deterministic shuffles, for reproducible runs and tests
    pub fn seeded(catalog: Vec<ImageTemplate>, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(catalog: Vec<ImageTemplate>, mut rng: StdRng) -> Self {
        let deck = shuffle(&catalog, &mut rng);
        info!(cards = deck.len(), "session started");

        Self {
            catalog,
            deck,
            cursor: 0,
            liked: BTreeSet::new(),
            passed: BTreeSet::new(),
            pending: None,
            generation: 0,
            rng,
        }
    }

    /// Classify the current card and start its transition.
    ///
    /// Returns `None` without touching any state when the deck is exhausted or
    /// another decision has not settled yet.
    pub fn decide(&mut self, direction: Direction) -> Option<SettleTicket> {
        if self.pending.is_some() {
            debug!(%direction, cursor = self.cursor, "decision ignored: transition in flight");
            return None;
        }
        let id = match self.deck.get(self.cursor) {
            Some(record) => record.id,
            None => {
                debug!(%direction, "decision ignored: deck complete");
                return None;
            }
        };

        match direction {
            Direction::Like => self.liked.insert(id),
            Direction::Pass => self.passed.insert(id),
        };

        let ticket = SettleTicket {
            generation: self.generation,
            cursor: self.cursor,
        };
        self.pending = Some(Pending { direction, ticket });
        debug!(%direction, id, generation = self.generation, "decision recorded");

        self.debug_check_invariants();
        Some(ticket)
    }

    /// Finish the transition started by `ticket`.
    ///
    /// Tickets from before a reset, or for a transition that already settled,
    /// are ignored and `false` is returned.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        match self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.cursor += 1;
                self.pending = None;
                debug!(cursor = self.cursor, total = self.deck.len(), "transition settled");
                self.debug_check_invariants();
                true
            }
            _ => {
                debug!(
                    ticket_generation = ticket.generation,
                    generation = self.generation,
                    "stale settle ignored"
                );
                false
            }
        }
    }

    /// Start over with a freshly shuffled deck
    pub fn reset(&mut self) {
        self.generation += 1;
        self.deck = shuffle(&self.catalog, &mut self.rng);
        self.cursor = 0;
        self.liked.clear();
        self.passed.clear();
        self.pending = None;
        info!(generation = self.generation, cards = self.deck.len(), "session reset");
        self.debug_check_invariants();
    }

    pub fn current_item(&self) -> Option<&ImageRecord> {
        self.deck.get(self.cursor)
    }

    /// The card underneath the current one, if any
    pub fn peek_next(&self) -> Option<&ImageRecord> {
        self.deck.get(self.cursor + 1)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.deck.len()
    }

    /// True when the catalog had nothing to deal
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// True while a decision is waiting to settle
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else {
            SessionState::Browsing
        }
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending.map(|p| p.direction)
    }

    /// Ticket for the transition currently in flight
    pub fn pending_ticket(&self) -> Option<SettleTicket> {
        self.pending.map(|p| p.ticket)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn progress(&self) -> Progress {
        Progress {
            cursor: self.cursor,
            total: self.deck.len(),
            liked: self.liked.len(),
            passed: self.passed.len(),
        }
    }

    pub fn deck(&self) -> &[ImageRecord] {
        &self.deck
    }

    pub fn liked_ids(&self) -> &BTreeSet<usize> {
        &self.liked
    }

    pub fn passed_ids(&self) -> &BTreeSet<usize> {
        &self.passed
    }

    /// Liked cards in deck order
    pub fn liked_records(&self) -> Vec<&ImageRecord> {
        self.deck
            .iter()
            .filter(|r| self.liked.contains(&r.id))
            .collect()
    }

    fn debug_check_invariants(&self) {
        let in_flight = usize::from(self.pending.is_some());
        debug_assert!(self.cursor + in_flight <= self.deck.len());
        debug_assert!(self.liked.is_disjoint(&self.passed));
        debug_assert_eq!(self.liked.len() + self.passed.len(), self.cursor + in_flight);
        debug_assert!(self
            .liked
            .iter()
            .chain(self.passed.iter())
            .all(|&id| id < self.cursor + in_flight));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use assert_matches::assert_matches;

    fn swipe(session: &mut Session, direction: Direction) -> bool {
        match session.decide(direction) {
            Some(ticket) => session.settle(ticket),
            None => false,
        }
    }

    #[test]
    fn test_new_session_initial_state() {
        let session = Session::seeded(default_catalog(), 1);
        assert_eq!(
            session.progress(),
            Progress {
                cursor: 0,
                total: 10,
                liked: 0,
                passed: 0
            }
        );
        assert_eq!(session.state(), SessionState::Browsing);
        assert_eq!(session.generation(), 0);
        assert!(!session.is_busy());
        assert_eq!(session.current_item().map(|r| r.id), Some(0));
        assert_eq!(session.peek_next().map(|r| r.id), Some(1));
    }

    #[test]
    fn test_decide_records_tally_before_cursor_moves() {
        let mut session = Session::seeded(default_catalog(), 2);

        let ticket = session.decide(Direction::Like);
        assert_matches!(ticket, Some(t) if t.cursor() == 0 && t.generation() == 0);
        assert_eq!(session.progress().cursor, 0);
        assert!(session.liked_ids().contains(&0));
        assert_eq!(session.pending_direction(), Some(Direction::Like));
        assert!(session.is_busy());

        assert!(session.settle(ticket.unwrap()));
        assert_eq!(session.progress().cursor, 1);
        assert_eq!(session.pending_direction(), None);
        assert_eq!(session.current_item().map(|r| r.id), Some(1));
    }

    #[test]
    fn test_pass_goes_to_passed_set() {
        let mut session = Session::seeded(default_catalog(), 3);
        assert!(swipe(&mut session, Direction::Pass));
        assert!(session.passed_ids().contains(&0));
        assert!(session.liked_ids().is_empty());
    }

    #[test]
    fn test_second_decide_while_pending_is_ignored() {
        let mut session = Session::seeded(default_catalog(), 4);
        let first = session.decide(Direction::Like).unwrap();
        assert_eq!(session.decide(Direction::Pass), None);
        assert_eq!(session.decide(Direction::Like), None);

        assert!(session.settle(first));
        let p = session.progress();
        assert_eq!(p.cursor, 1);
        assert_eq!(p.liked + p.passed, 1);
        assert_eq!(session.pending_direction(), None);
    }

    #[test]
    fn test_replayed_ticket_settles_once() {
        let mut session = Session::seeded(default_catalog(), 5);
        let ticket = session.decide(Direction::Pass).unwrap();
        assert!(session.settle(ticket));
        assert!(!session.settle(ticket));
        assert_eq!(session.progress().cursor, 1);

        // An old ticket must not settle the next transition early
        let _next = session.decide(Direction::Like).unwrap();
        assert!(!session.settle(ticket));
        assert_eq!(session.progress().cursor, 1);
        assert!(session.is_busy());
    }

    #[test]
    fn test_stale_ticket_after_reset_is_ignored() {
        let mut session = Session::seeded(default_catalog(), 6);
        let stale = session.decide(Direction::Like).unwrap();
        session.reset();
        assert_eq!(session.generation(), 1);

        assert!(!session.settle(stale));
        assert_eq!(session.progress().cursor, 0);

        // Even with a new transition pending at the same cursor
        let fresh = session.decide(Direction::Pass).unwrap();
        assert!(!session.settle(stale));
        assert_eq!(session.progress().cursor, 0);
        assert!(session.settle(fresh));
        assert_eq!(session.progress().cursor, 1);
    }

    #[test]
    fn test_full_pass_four_likes_six_passes() {
        let mut session = Session::seeded(default_catalog(), 7);
        for _ in 0..4 {
            assert!(swipe(&mut session, Direction::Like));
        }
        for _ in 0..6 {
            assert!(swipe(&mut session, Direction::Pass));
        }

        assert!(session.is_complete());
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(
            session.progress(),
            Progress {
                cursor: 10,
                total: 10,
                liked: 4,
                passed: 6
            }
        );
        assert_eq!(session.current_item(), None);
        assert_eq!(session.peek_next(), None);
        assert_eq!(session.liked_records().len(), 4);
        assert_eq!(session.passed_ids().len(), 6);
    }

    #[test]
    fn test_decide_after_complete_is_noop() {
        let mut session = Session::seeded(default_catalog(), 8);
        while !session.is_complete() {
            swipe(&mut session, Direction::Like);
        }
        let before = session.progress();
        assert_eq!(session.decide(Direction::Pass), None);
        assert_eq!(session.decide(Direction::Like), None);
        assert_eq!(session.progress(), before);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_peek_next_on_last_card() {
        let mut session = Session::seeded(default_catalog(), 9);
        for _ in 0..9 {
            swipe(&mut session, Direction::Pass);
        }
        assert_eq!(session.current_item().map(|r| r.id), Some(9));
        assert_eq!(session.peek_next(), None);
    }

    #[test]
    fn test_like_then_reset() {
        let mut session = Session::seeded(default_catalog(), 10);
        swipe(&mut session, Direction::Like);
        session.reset();

        assert_eq!(
            session.progress(),
            Progress {
                cursor: 0,
                total: 10,
                liked: 0,
                passed: 0
            }
        );
        assert!(session.liked_ids().is_empty());
        assert!(session.passed_ids().is_empty());
        let ids: Vec<usize> = session.deck().iter().map(|r| r.id).collect();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_reset_mid_transition_clears_pending() {
        let mut session = Session::seeded(default_catalog(), 11);
        session.decide(Direction::Like);
        session.reset();
        assert!(!session.is_busy());
        assert_eq!(session.pending_direction(), None);
        assert!(session.decide(Direction::Pass).is_some());
    }

    #[test]
    fn test_reset_from_complete() {
        let mut session = Session::seeded(default_catalog(), 12);
        while !session.is_complete() {
            swipe(&mut session, Direction::Pass);
        }
        session.reset();
        assert_eq!(session.state(), SessionState::Browsing);
        assert!(session.current_item().is_some());
    }

    #[test]
    fn test_liked_records_in_deck_order() {
        let mut session = Session::seeded(default_catalog(), 13);
        swipe(&mut session, Direction::Like);
        swipe(&mut session, Direction::Pass);
        swipe(&mut session, Direction::Like);
        let ids: Vec<usize> = session.liked_records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert!(session.passed_ids().iter().eq([1].iter()));
    }

    #[test]
    fn test_empty_catalog_session() {
        let mut session = Session::seeded(Vec::new(), 14);
        assert!(session.is_empty());
        assert!(session.is_complete());
        assert_eq!(session.current_item(), None);
        assert_eq!(session.decide(Direction::Like), None);
        session.reset();
        assert!(session.is_empty());
        assert_eq!(session.progress(), Progress::default());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Like.to_string(), "Like");
        assert_eq!(Direction::Pass.to_string(), "Pass");
    }
}
