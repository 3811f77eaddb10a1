//! Identifier minting for new graph nodes.
//!
//! Identifiers are `<entity_type>_<token>`. The token comes from an
//! injected [`Clock`] and is forced strictly increasing per [`Minter`], so
//! two submissions in the same millisecond still get distinct subjects.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use ecograph_core::GraphIdentifier;

/// Source of the time-based token.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch (or any monotone stand-in).
    fn now_millis(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

/// Mints graph identifiers from a clock.
///
/// All identifiers minted through one `Minter` are distinct: when the
/// clock has not advanced since the previous call, the token is bumped
/// past the last one issued. Separate processes (or separate `Minter`s)
/// sharing a clock tick can still collide.
pub struct Minter<C = SystemClock> {
    clock: C,
    next_min: AtomicU64,
}

impl Minter<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl Default for Minter<SystemClock> {
    fn default() -> Self {
        Self::system()
    }
}

impl<C: Clock> Minter<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_min: AtomicU64::new(0),
        }
    }

    /// Next strictly increasing token.
    pub fn next_token(&self) -> u64 {
        let now = self.clock.now_millis();
        let mut current = self.next_min.load(Ordering::Relaxed);
        loop {
            let token = now.max(current);
            match self.next_min.compare_exchange_weak(
                current,
                token.saturating_add(1),
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    if token != now {
                        tracing::debug!(clock = now, token, "Clock tick reused; token bumped");
                    }
                    return token;
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Mint a fresh identifier for an entity type.
    pub fn mint(&self, entity_type_key: &str) -> GraphIdentifier {
        GraphIdentifier::new(entity_type_key, self.next_token())
    }
}

impl<C> std::fmt::Debug for Minter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Minter")
            .field("next_min", &self.next_min.load(Ordering::Relaxed))
            .finish()
    }
}
