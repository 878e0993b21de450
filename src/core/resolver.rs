//! # Proximity Resolver
//!
//! Turns a stream of position samples and a board set into a single
//! "current nearby board" signal.
//!
//! First-match policy: boards are scanned in their stored order and
//! the first one strictly inside the threshold wins, even when a later
//! board is closer. Swapping in a new board set re-evaluates against
//! the last known position, so an import alone can change the signal.

use std::sync::Arc;

use super::board::Board;
use super::config::TourConfig;
use super::geo::{GroundDistance, LatLon};
use super::id::Id;

/// Resolves the current nearby board from position samples
///
/// Owns its board snapshot and last-known position; construct one
/// instance and pass it to whoever needs the signal.
pub struct ProximityResolver {
    boards: Vec<Board>,
    last_position: Option<LatLon>,
    signal: Option<Id>,
    threshold_m: f64,
    distance: Arc<dyn GroundDistance>,
}

impl ProximityResolver {
    /// Create a resolver with an empty board set
    pub fn new(config: TourConfig) -> Self {
        Self {
            boards: Vec::new(),
            last_position: None,
            signal: None,
            threshold_m: config.threshold_m,
            distance: config.distance,
        }
    }

    /// Feed a new position sample and recompute the signal
    pub fn update(&mut self, position: LatLon) -> Option<Id> {
        self.last_position = Some(position);
        self.signal = self.evaluate();
        self.signal
    }

    /// Replace the board set and recompute against the held position
    pub fn set_boards(&mut self, boards: Vec<Board>) -> Option<Id> {
        self.boards = boards;
        self.signal = self.evaluate();
        self.signal
    }

    /// The current signal: the nearby board's id, or None
    pub fn signal(&self) -> Option<Id> {
        self.signal
    }

    /// The nearby board itself, when there is one
    pub fn nearby_board(&self) -> Option<&Board> {
        let id = self.signal?;
        self.boards.iter().find(|b| b.id == id)
    }

    /// The most recent position sample, if any arrived yet
    pub fn last_position(&self) -> Option<LatLon> {
        self.last_position
    }

    /// The current board snapshot
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// List boards with their distance from the held position
    ///
    /// Sorted nearest-first when a position is known, by label
    /// otherwise. `filter` keeps only labels containing the needle,
    /// case-insensitively.
    pub fn listing(&self, filter: Option<&str>) -> Vec<(Option<f64>, &Board)> {
        let needle = filter.map(str::to_lowercase);
        let mut rows: Vec<(Option<f64>, &Board)> = self
            .boards
            .iter()
            .filter(|b| match &needle {
                Some(n) => b.label.to_lowercase().contains(n),
                None => true,
            })
            .map(|b| {
                let dist = self
                    .last_position
                    .map(|pos| self.distance.distance_m(pos, b.coords));
                (dist, b)
            })
            .collect();

        match self.last_position {
            Some(_) => rows.sort_by(|a, b| {
                let da = a.0.unwrap_or(f64::INFINITY);
                let db = b.0.unwrap_or(f64::INFINITY);
                da.total_cmp(&db)
            }),
            None => rows.sort_by(|a, b| a.1.label.cmp(&b.1.label)),
        }

        rows
    }

    /// First board in stored order strictly inside the threshold
    fn evaluate(&self) -> Option<Id> {
        let position = self.last_position?;
        for board in &self.boards {
            let dist = self.distance.distance_m(position, board.coords);
            if dist < self.threshold_m {
                return Some(board.id);
            }
        }
        None
    }
}
