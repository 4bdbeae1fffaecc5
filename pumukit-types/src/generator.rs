//! Identifier generators.
//!
//! The collection layer never mints identifiers itself; whoever builds an
//! embedded item asks a generator first.

use crate::EmbeddedId;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh embedded-item identifiers.
pub trait IdGenerator: Send + Sync {
    /// Returns an identifier not handed out before by this generator.
    fn new_id(&self) -> EmbeddedId;
}

/// Time-ordered UUID v7 identifiers. The default for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn new_id(&self) -> EmbeddedId {
        EmbeddedId::new()
    }
}

/// Deterministic identifiers `1, 2, 3, ...` encoded as UUIDs.
///
/// Useful for imports that must be reproducible and for tests.
#[derive(Debug, Default)]
pub struct SequentialGenerator {
    next: AtomicU64,
}

impl SequentialGenerator {
    /// Creates a generator whose first identifier is `start`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Creates a generator starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialGenerator {
    fn new_id(&self) -> EmbeddedId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        EmbeddedId::from_uuid(Uuid::from_u128(u128::from(n)))
    }
}
