//! # Tour Session
//!
//! Wraps the proximity resolver with change detection.
//!
//! The resolver recomputes the nearby-board signal on every sample; a
//! lookup should only start when that signal actually switches to a
//! different board. The session detects those transitions and owns the
//! stale-result guard: a lookup finishing for a board that is no
//! longer the current one must be discarded, not presented.

use log::debug;

use crate::core::{Board, Id, LatLon, ProximityResolver};

/// Transition produced by a position or board-set update
///
/// `None` from the session methods means the signal did not change and
/// nothing needs to happen.
#[derive(Debug, Clone, PartialEq)]
pub enum TourEvent {
    /// A different board became the nearby one; start a lookup for it
    Approaching(Board),

    /// No board is nearby any more
    Departed,
}

/// Tracks the current nearby board across updates
pub struct TourSession {
    resolver: ProximityResolver,
    current: Option<Id>,
}

impl TourSession {
    /// Create a session around a resolver
    pub fn new(resolver: ProximityResolver) -> Self {
        Self {
            resolver,
            current: None,
        }
    }

    /// Feed a position sample; `Some` when the nearby board changed
    pub fn on_position(&mut self, position: LatLon) -> Option<TourEvent> {
        let signal = self.resolver.update(position);
        self.transition(signal)
    }

    /// Replace the board set; `Some` when the nearby board changed
    pub fn set_boards(&mut self, boards: Vec<Board>) -> Option<TourEvent> {
        let signal = self.resolver.set_boards(boards);
        self.transition(signal)
    }

    /// The id of the board currently considered nearby
    pub fn current(&self) -> Option<Id> {
        self.current
    }

    /// Whether a lookup result for `id` is still worth presenting
    ///
    /// Call with the board id captured when the lookup started; the
    /// answer is false once a different board (or no board) has taken
    /// over the signal in the meantime.
    pub fn admit(&self, id: Id) -> bool {
        self.current == Some(id)
    }

    /// The wrapped resolver
    pub fn resolver(&self) -> &ProximityResolver {
        &self.resolver
    }

    fn transition(&mut self, signal: Option<Id>) -> Option<TourEvent> {
        if signal == self.current {
            return None;
        }
        self.current = signal;

        match signal {
            Some(id) => {
                let board = self.resolver.nearby_board()?.clone();
                debug!("Approaching {:?} ({})", board.label, id);
                Some(TourEvent::Approaching(board))
            }
            None => {
                debug!("No board nearby any more");
                Some(TourEvent::Departed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TourConfig;

    fn board(label: &str, lat: f64, lon: f64) -> Board {
        Board::new(label, "", LatLon::new(lat, lon))
    }

    fn session_with(boards: Vec<Board>) -> TourSession {
        let mut session = TourSession::new(ProximityResolver::new(TourConfig::default()));
        session.set_boards(boards);
        session
    }

    #[test]
    fn test_approaching_fires_once_per_board() {
        let a = board("A", 0.0, 0.0);
        let mut session = session_with(vec![a.clone()]);

        let event = session.on_position(LatLon::new(0.0, 0.001));
        assert_eq!(event, Some(TourEvent::Approaching(a)));

        // Still next to the same board: no new event
        assert_eq!(session.on_position(LatLon::new(0.0, 0.002)), None);
    }

    #[test]
    fn test_departed_when_leaving_range() {
        let mut session = session_with(vec![board("A", 0.0, 0.0)]);
        session.on_position(LatLon::new(0.0, 0.0));

        let event = session.on_position(LatLon::new(1.0, 1.0));
        assert_eq!(event, Some(TourEvent::Departed));
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_no_event_while_nothing_is_near() {
        let mut session = session_with(vec![board("A", 0.0, 0.0)]);
        assert_eq!(session.on_position(LatLon::new(1.0, 1.0)), None);
        assert_eq!(session.on_position(LatLon::new(2.0, 2.0)), None);
    }

    #[test]
    fn test_switching_boards_fires_new_event() {
        let a = board("A", 0.0, 0.0);
        let b = board("B", 0.0, 0.05);
        let b_id = b.id;
        let mut session = session_with(vec![a, b]);

        session.on_position(LatLon::new(0.0, 0.0));
        let event = session.on_position(LatLon::new(0.0, 0.05));
        match event {
            Some(TourEvent::Approaching(board)) => assert_eq!(board.id, b_id),
            other => panic!("expected Approaching, got {:?}", other),
        }
    }

    #[test]
    fn test_admit_rejects_superseded_lookup() {
        let a = board("A", 0.0, 0.0);
        let b = board("B", 0.0, 0.05);
        let a_id = a.id;
        let b_id = b.id;
        let mut session = session_with(vec![a, b]);

        session.on_position(LatLon::new(0.0, 0.0));
        assert!(session.admit(a_id));

        // A lookup for A is still in flight when B takes over
        session.on_position(LatLon::new(0.0, 0.05));
        assert!(!session.admit(a_id));
        assert!(session.admit(b_id));
    }

    #[test]
    fn test_admit_rejects_after_departure() {
        let a = board("A", 0.0, 0.0);
        let a_id = a.id;
        let mut session = session_with(vec![a]);

        session.on_position(LatLon::new(0.0, 0.0));
        session.on_position(LatLon::new(1.0, 1.0));
        assert!(!session.admit(a_id));
    }

    #[test]
    fn test_board_swap_can_trigger_event() {
        let mut session = TourSession::new(ProximityResolver::new(TourConfig::default()));
        assert_eq!(session.on_position(LatLon::new(0.0, 0.0)), None);

        let a = board("A", 0.0, 0.001);
        let event = session.set_boards(vec![a.clone()]);
        assert_eq!(event, Some(TourEvent::Approaching(a)));
    }
}
