//! Identity generation.
//!
//! Identities combine a millisecond wall-clock reading with a process-wide
//! sequence number, so two calls in the same millisecond still differ.
//! The clock component never decreases, even if the system clock steps back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond time source.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// Generates opaque string identities that are unique for the generator's lifetime.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last_millis: AtomicU64,
    sequence: AtomicU64,
}

impl IdGenerator {
    /// Create a generator backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create a generator backed by a custom clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last_millis: AtomicU64::new(0),
            sequence: AtomicU64::new(0),
        }
    }

    /// Allocate the next identity.
    pub fn next_id(&self) -> String {
        let now = self.clock.now_millis();
        let millis = self.last_millis.fetch_max(now, Ordering::SeqCst).max(now);
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        format!("{millis}-{seq}")
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last_millis", &self.last_millis.load(Ordering::Relaxed))
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish()
    }
}
