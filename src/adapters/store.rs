//! # Store Adapters
//!
//! Two implementations of the `BoardStore` port:
//! - `MemoryStore` - plain in-memory vector, for tests and demos
//! - `JsonStore` - JSON file on disk, written through on every change
//!
//! ## Format
//!
//! The store file is a versioned JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "boards": [
//!     { "id": "<32 hex chars>", "label": "...", "note": "...",
//!       "lat": 49.3786, "lon": 10.1787,
//!       "resolved_title": "..." (optional) }
//!   ]
//! }
//! ```
//!
//! The core types stay serde-free; this module owns the on-disk
//! record shape and the mapping in both directions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Board, Id, LatLon};
use crate::ports::{BoardStore, StoreError, StoreResult};

/// Current store file version
const VERSION: u32 = 1;

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-memory board store
///
/// Keeps insertion order. Nothing survives the process; use
/// `JsonStore` when boards need to outlive it.
#[derive(Default)]
pub struct MemoryStore {
    boards: Vec<Board>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardStore for MemoryStore {
    fn boards(&self) -> StoreResult<Vec<Board>> {
        Ok(self.boards.clone())
    }

    fn insert(&mut self, boards: Vec<Board>) -> StoreResult<()> {
        self.boards.extend(boards);
        Ok(())
    }

    fn set_resolved_title(&mut self, id: Id, title: &str) -> StoreResult<()> {
        let board = self
            .boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::UnknownBoard(id))?;
        board.resolved_title = Some(title.to_string());
        Ok(())
    }

    fn get(&self, id: Id) -> StoreResult<Option<Board>> {
        Ok(self.boards.iter().find(|b| b.id == id).cloned())
    }

    fn len(&self) -> usize {
        self.boards.len()
    }
}

// ============================================================================
// JSON STORE
// ============================================================================

/// On-disk record for a single board
#[derive(Serialize, Deserialize)]
struct BoardRecord {
    id: String,
    label: String,
    #[serde(default)]
    note: String,
    lat: f64,
    lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_title: Option<String>,
}

/// On-disk document
#[derive(Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    boards: Vec<BoardRecord>,
}

impl From<&Board> for BoardRecord {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id.to_string(),
            label: board.label.clone(),
            note: board.note.clone(),
            lat: board.coords.lat,
            lon: board.coords.lon,
            resolved_title: board.resolved_title.clone(),
        }
    }
}

impl BoardRecord {
    fn into_board(self) -> StoreResult<Board> {
        let id = Id::from_hex(&self.id)
            .map_err(|_| StoreError::Backend(format!("invalid board id {:?}", self.id)))?;
        Ok(Board::from_parts(
            id,
            self.label,
            self.note,
            LatLon::new(self.lat, self.lon),
            self.resolved_title,
        ))
    }
}

/// JSON-file-backed board store
///
/// Every mutation is written through to disk before it returns Ok, so
/// a resolved-title cache update is durable by the time the pipeline
/// reports success.
pub struct JsonStore {
    path: PathBuf,
    boards: Vec<Board>,
}

impl JsonStore {
    /// Open a store file, creating an empty store when the file does
    /// not exist yet
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let boards = if path.exists() {
            Self::load(&path)?
        } else {
            Vec::new()
        };
        Ok(Self { path, boards })
    }

    /// The file this store writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoreResult<Vec<Board>> {
        let data = fs::read_to_string(path)
            .map_err(|e| StoreError::Backend(format!("read {}: {}", path.display(), e)))?;
        let file: StoreFile = serde_json::from_str(&data)
            .map_err(|e| StoreError::Backend(format!("parse {}: {}", path.display(), e)))?;
        if file.version != VERSION {
            return Err(StoreError::Backend(format!(
                "unsupported store version {}",
                file.version
            )));
        }
        file.boards.into_iter().map(BoardRecord::into_board).collect()
    }

    fn save(&self) -> StoreResult<()> {
        let file = StoreFile {
            version: VERSION,
            boards: self.boards.iter().map(BoardRecord::from).collect(),
        };
        let data = serde_json::to_string_pretty(&file)
            .map_err(|e| StoreError::Backend(format!("encode store: {}", e)))?;
        fs::write(&self.path, data)
            .map_err(|e| StoreError::Backend(format!("write {}: {}", self.path.display(), e)))
    }
}

impl BoardStore for JsonStore {
    fn boards(&self) -> StoreResult<Vec<Board>> {
        Ok(self.boards.clone())
    }

    fn insert(&mut self, boards: Vec<Board>) -> StoreResult<()> {
        self.boards.extend(boards);
        self.save()
    }

    fn set_resolved_title(&mut self, id: Id, title: &str) -> StoreResult<()> {
        let board = self
            .boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::UnknownBoard(id))?;
        board.resolved_title = Some(title.to_string());
        self.save()
    }

    fn get(&self, id: Id) -> StoreResult<Option<Board>> {
        Ok(self.boards.iter().find(|b| b.id == id).cloned())
    }

    fn len(&self) -> usize {
        self.boards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(label: &str) -> Board {
        Board::new(label, "test", LatLon::new(49.3786, 10.1787))
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        let b = board("Stadtmauer");
        let id = b.id;
        store.insert(vec![b]).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().unwrap().label, "Stadtmauer");
    }

    #[test]
    fn test_memory_store_preserves_insertion_order() {
        let mut store = MemoryStore::new();
        store.insert(vec![board("Erste"), board("Zweite")]).unwrap();
        store.insert(vec![board("Dritte")]).unwrap();

        let labels: Vec<String> = store
            .boards()
            .unwrap()
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(labels, ["Erste", "Zweite", "Dritte"]);
    }

    #[test]
    fn test_memory_store_set_resolved_title() {
        let mut store = MemoryStore::new();
        let b = board("Stadtmauer");
        let id = b.id;
        store.insert(vec![b]).unwrap();

        store.set_resolved_title(id, "Stadtmauer Rothenburg").unwrap();
        assert_eq!(
            store.get(id).unwrap().unwrap().resolved_title,
            Some("Stadtmauer Rothenburg".to_string())
        );
    }

    #[test]
    fn test_memory_store_unknown_board() {
        let mut store = MemoryStore::new();
        let err = store.set_resolved_title(Id::nil(), "X").unwrap_err();
        assert_eq!(err, StoreError::UnknownBoard(Id::nil()));
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boards.json");

        let b = board("Stadtmauer");
        let id = b.id;
        {
            let mut store = JsonStore::open(&path).unwrap();
            store.insert(vec![b]).unwrap();
        }

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        let loaded = reopened.get(id).unwrap().unwrap();
        assert_eq!(loaded.label, "Stadtmauer");
        assert_eq!(loaded.note, "test");
        assert!((loaded.coords.lat - 49.3786).abs() < 1e-9);
    }

    #[test]
    fn test_json_store_title_write_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boards.json");

        let b = board("Stadtmauer");
        let id = b.id;
        {
            let mut store = JsonStore::open(&path).unwrap();
            store.insert(vec![b]).unwrap();
            store.set_resolved_title(id, "Stadtmauer Rothenburg").unwrap();
            // Dropped without any explicit flush
        }

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(id).unwrap().unwrap().resolved_title,
            Some("Stadtmauer Rothenburg".to_string())
        );
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("fresh.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_store_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boards.json");
        fs::write(&path, r#"{"version": 99, "boards": []}"#).unwrap();

        assert!(JsonStore::open(&path).is_err());
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boards.json");
        fs::write(&path, "not json at all").unwrap();

        assert!(JsonStore::open(&path).is_err());
    }
}
