//! # Configuration
//!
//! Tour configuration - define what "nearby" means.
//!
//! Everything is configurable, not hardcoded:
//! - Proximity threshold
//! - Distance function

use super::geo::{GroundDistance, Haversine};
use std::sync::Arc;

/// Default proximity threshold in metres
pub const DEFAULT_THRESHOLD_M: f64 = 1000.0;

/// Tour configuration
///
/// Defines the proximity threshold and the distance function used to
/// evaluate it.
#[derive(Clone)]
pub struct TourConfig {
    /// A board strictly closer than this many metres counts as nearby
    pub threshold_m: f64,

    /// Distance function for proximity checks
    pub distance: Arc<dyn GroundDistance>,
}

impl TourConfig {
    /// Create a configuration with the default threshold and Haversine
    pub fn new() -> Self {
        Self {
            threshold_m: DEFAULT_THRESHOLD_M,
            distance: Arc::new(Haversine),
        }
    }

    /// Set the proximity threshold in metres
    pub fn with_threshold_m(mut self, threshold_m: f64) -> Self {
        self.threshold_m = threshold_m;
        self
    }

    /// Set a custom distance function
    pub fn with_distance<D: GroundDistance + 'static>(mut self, distance: D) -> Self {
        self.distance = Arc::new(distance);
        self
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self::new()
    }
}
