//! # Board
//!
//! A stored point of interest. The fundamental entity.
//!
//! Boards are created once at import time and read-only afterwards,
//! except for `resolved_title`, which the lookup pipeline fills in
//! when it has confirmed which encyclopedia article matches the label.

use super::geo::LatLon;
use super::id::Id;

/// A point of interest with a label and coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    /// Stable identifier, assigned at creation, never reassigned
    pub id: Id,

    /// Human-readable name, immutable once imported
    pub label: String,

    /// Free-form annotation (e.g., where the board came from)
    pub note: String,

    /// Position, immutable once imported
    pub coords: LatLon,

    /// Encyclopedia article title previously confirmed to match `label`
    ///
    /// Absent until the first successful resolution. Written only by
    /// the lookup pipeline.
    pub resolved_title: Option<String>,
}

impl Board {
    /// Create a new board with a fresh id and no resolved title
    ///
    /// # Example
    /// ```
    /// use tafeltour::core::{Board, LatLon};
    /// let board = Board::new("Stadtmauer", "hand-entered", LatLon::new(49.3786, 10.1787));
    /// assert!(board.resolved_title.is_none());
    /// ```
    pub fn new(label: impl Into<String>, note: impl Into<String>, coords: LatLon) -> Self {
        Self {
            id: Id::now(),
            label: label.into(),
            note: note.into(),
            coords,
            resolved_title: None,
        }
    }

    /// Reconstruct a board from stored parts
    pub fn from_parts(
        id: Id,
        label: String,
        note: String,
        coords: LatLon,
        resolved_title: Option<String>,
    ) -> Self {
        Self {
            id,
            label,
            note,
            coords,
            resolved_title,
        }
    }

    /// The title the pipeline should try first: the cached resolved
    /// title when present, the raw label otherwise
    pub fn search_title(&self) -> &str {
        self.resolved_title.as_deref().unwrap_or(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new("Altes Rathaus", "imported", LatLon::new(49.0, 10.0));
        assert!(!board.id.is_nil());
        assert_eq!(board.label, "Altes Rathaus");
        assert!(board.resolved_title.is_none());
    }

    #[test]
    fn test_search_title_prefers_resolved() {
        let mut board = Board::new("Stadtmauer", "", LatLon::new(49.0, 10.0));
        assert_eq!(board.search_title(), "Stadtmauer");

        board.resolved_title = Some("Stadtmauer Rothenburg".to_string());
        assert_eq!(board.search_title(), "Stadtmauer Rothenburg");
    }

    #[test]
    fn test_ids_are_distinct() {
        let a = Board::new("A", "", LatLon::new(0.0, 0.0));
        let b = Board::new("B", "", LatLon::new(0.0, 0.0));
        assert_ne!(a.id, b.id);
    }
}
