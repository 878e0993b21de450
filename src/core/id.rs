//! # Id
//!
//! Unique identifier for imported boards.
//!
//! Format: 128 bits = [timestamp_ms:48][counter:16][mixed:64]
//! - Timestamp makes ids sort in import order
//! - Counter keeps ids unique within one millisecond
//! - Mixed bits guard against collisions across processes
//! - Round-trips through lowercase hex for the on-disk store

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for uniqueness within the same millisecond
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a board
///
/// 128 bits, timestamp-prefixed, so comparing ids follows creation time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Id([u8; 16]);

/// Error returned when parsing an id from hex fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError;

impl std::fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "id must be 32 lowercase hex characters")
    }
}

impl std::error::Error for ParseIdError {}

impl Id {
    /// Generate a fresh Id for the current moment
    pub fn now() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

        // Mix timestamp and counter through an LCG step for the low bits
        let mixed = timestamp
            .wrapping_mul(6364136223846793005)
            .wrapping_add(counter | 1);

        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&timestamp.to_be_bytes()[2..]);
        bytes[6..8].copy_from_slice(&(counter as u16).to_be_bytes());
        bytes[8..].copy_from_slice(&mixed.to_be_bytes());

        Self(bytes)
    }

    /// Create an Id from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Extract the timestamp component (milliseconds since epoch)
    pub fn timestamp_ms(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf[2..].copy_from_slice(&self.0[..6]);
        u64::from_be_bytes(buf)
    }

    /// The zero Id (useful for testing)
    pub fn nil() -> Self {
        Self([0u8; 16])
    }

    /// Check if this is the zero Id
    pub fn is_nil(&self) -> bool {
        self.0 == [0u8; 16]
    }

    /// Parse an Id from its hex form, as written by `Display`
    pub fn from_hex(s: &str) -> Result<Self, ParseIdError> {
        if s.len() != 32 {
            return Err(ParseIdError);
        }
        let mut bytes = [0u8; 16];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| ParseIdError)?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| ParseIdError)?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
