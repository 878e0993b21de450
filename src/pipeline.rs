//! # Lookup Pipeline
//!
//! Maps a board's label to an encyclopedia article summary.
//!
//! Strategy, short-circuiting on the first usable result:
//! 1. Direct fetch with the cached resolved title, or the raw label
//! 2. Free-text search with the raw label for a candidate title
//! 3. Direct fetch with the candidate; on success the candidate is
//!    cached as the board's resolved title (write-through)
//!
//! Every remote failure is "this step produced nothing" and falls
//! through; the caller only ever sees a summary or nothing. A failed
//! cache write is logged and does not change the returned result.

use log::{debug, warn};

use crate::core::Board;
use crate::ports::{BoardStore, Encyclopedia, PageSummary};

/// A usable article summary
///
/// Only built from pages that passed the usability check, so
/// `extract` is always non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Canonical article title
    pub title: String,

    /// Introductory extract text, non-empty
    pub extract: String,

    /// Thumbnail image URL
    pub thumbnail: Option<String>,

    /// Canonical desktop page URL
    pub page_url: Option<String>,
}

impl From<PageSummary> for Summary {
    fn from(page: PageSummary) -> Self {
        Self {
            title: page.title,
            extract: page.extract,
            thumbnail: page.thumbnail,
            page_url: page.page_url,
        }
    }
}

/// Resolves board labels to article summaries
///
/// Owns the encyclopedia client and the board store it writes resolved
/// titles through.
pub struct LookupPipeline<E, S> {
    client: E,
    store: S,
}

impl<E: Encyclopedia, S: BoardStore> LookupPipeline<E, S> {
    /// Create a pipeline over a client and a store
    pub fn new(client: E, store: S) -> Self {
        Self { client, store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Resolve a board to a summary, or nothing if no usable article
    /// could be found
    ///
    /// Attempts each lookup step at most once per call.
    pub fn resolve(&mut self, board: &Board) -> Option<Summary> {
        let search_title = board.search_title();

        match self.client.summary(search_title) {
            Ok(page) if page.is_usable() => {
                if board.resolved_title.is_none() && search_title != board.label {
                    self.persist_title(board, search_title);
                }
                return Some(page.into());
            }
            Ok(page) => {
                debug!(
                    "Direct lookup for {:?} not usable (kind: {:?})",
                    search_title, page.kind
                );
            }
            Err(err) => {
                debug!("Direct lookup for {:?} failed: {}", search_title, err);
            }
        }

        // Fallback search always uses the original label, never the
        // cached title that just failed
        let candidate = match self.client.search(&board.label) {
            Ok(Some(title)) => title,
            Ok(None) => {
                debug!("No search candidate for {:?}", board.label);
                return None;
            }
            Err(err) => {
                debug!("Search for {:?} failed: {}", board.label, err);
                return None;
            }
        };

        match self.client.summary(&candidate) {
            Ok(page) if page.is_usable() => {
                self.persist_title(board, &candidate);
                Some(page.into())
            }
            Ok(page) => {
                debug!(
                    "Candidate {:?} for {:?} not usable (kind: {:?})",
                    candidate, board.label, page.kind
                );
                None
            }
            Err(err) => {
                debug!("Candidate lookup for {:?} failed: {}", candidate, err);
                None
            }
        }
    }

    fn persist_title(&mut self, board: &Board, title: &str) {
        if let Err(err) = self.store.set_resolved_title(board.id, title) {
            warn!(
                "Could not persist resolved title {:?} for board {:?}: {}",
                title, board.label, err
            );
        }
    }
}
