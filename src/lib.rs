//! # TafelTour
//!
//! Location-triggered encyclopedia lookups for tourist information
//! boards.
//!
//! ## Overview
//!
//! TafelTour watches a stream of position samples, detects when the
//! user is close to a known board ("Tafel"), and fetches a Wikipedia
//! summary for it. Board labels are often imprecise, so the lookup
//! falls back from a direct title fetch to a free-text search, and
//! caches the title that finally worked.
//!
//! ## Key Features
//!
//! - **First-match proximity signal**: boards are scanned in stored
//!   order; the first one within the threshold wins
//! - **Title resolution with fallback**: direct fetch, then fuzzy
//!   search, then fetch of the candidate
//! - **Write-through title cache**: a confirmed article title is
//!   persisted on the board and tried first next time
//! - **Stale-result guard**: a lookup that finishes after its board
//!   stopped being the nearby one is discarded
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tafeltour::adapters::store::JsonStore;
//! use tafeltour::adapters::wikipedia::WikipediaClient;
//! use tafeltour::core::{LatLon, ProximityResolver, TourConfig};
//! use tafeltour::pipeline::LookupPipeline;
//! use tafeltour::ports::BoardStore;
//! use tafeltour::session::{TourEvent, TourSession};
//!
//! let store = JsonStore::open("boards.json")?;
//! let boards = store.boards()?;
//!
//! let mut session = TourSession::new(ProximityResolver::new(TourConfig::default()));
//! session.set_boards(boards);
//!
//! let mut pipeline = LookupPipeline::new(WikipediaClient::for_language("de"), store);
//!
//! if let Some(TourEvent::Approaching(board)) = session.on_position(LatLon::new(49.3786, 10.1787)) {
//!     if let Some(summary) = pipeline.resolve(&board) {
//!         println!("{}: {}", summary.title, summary.extract);
//!     }
//! }
//! ```

pub mod adapters;
pub mod core;
pub mod pipeline;
pub mod ports;
pub mod session;

// Re-exports for convenience
pub use crate::core::{Board, Id, LatLon, ProximityResolver, TourConfig};
pub use adapters::wikipedia::WikipediaClient;
pub use pipeline::{LookupPipeline, Summary};
pub use ports::{BoardStore, Encyclopedia, PageSummary};
pub use session::{TourEvent, TourSession};
