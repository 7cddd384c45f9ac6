//! Record identifier generation.
//!
//! Create handlers never invent ids themselves; they ask the injected
//! [`IdGenerator`]. The default generator produces 32 lowercase hex
//! characters from a random UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh record identifiers.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Produce an identifier that has not been handed out before.
    fn next_id(&self) -> String;
}

/// Textual form of randomly generated identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// 32 lowercase hex characters, no separators
    #[default]
    Hex,
    /// Hyphenated UUID
    Uuid,
}

/// Random identifier generator backed by UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator {
    strategy: IdStrategy,
}

impl RandomIdGenerator {
    /// Create a generator for the given strategy.
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        let id = Uuid::new_v4();
        match self.strategy {
            IdStrategy::Hex => id.simple().to_string(),
            IdStrategy::Uuid => id.hyphenated().to_string(),
        }
    }
}

/// Deterministic generator yielding `{prefix}{n}` with n counting from 1.
///
/// Useful for tests and fixtures that need predictable ids.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}{}", self.prefix, n)
    }
}
