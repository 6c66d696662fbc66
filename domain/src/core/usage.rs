//! Oracle token accounting.
//!
//! [`UsageCounter`] is owned by an oracle client and accumulates the units
//! consumed by every call. Callers bracket a unit of work with
//! [`UsageCounter::snapshot`] and [`UsageCounter::since`] to read a delta;
//! the counter itself is never reset.

use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prompt/completion/total units for one call or one delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u64,
    pub completion: u64,
    pub total: u64,
}

impl TokenUsage {
    pub fn new(prompt: u64, completion: u64, total: u64) -> Self {
        Self {
            prompt,
            completion,
            total,
        }
    }

    /// Build usage when the provider omits `total` (prompt + completion).
    pub fn from_parts(prompt: u64, completion: u64) -> Self {
        Self::new(prompt, completion, prompt + completion)
    }

    pub fn is_zero(&self) -> bool {
        self.prompt == 0 && self.completion == 0 && self.total == 0
    }
}

impl Add for TokenUsage {
    type Output = TokenUsage;

    fn add(self, rhs: TokenUsage) -> TokenUsage {
        TokenUsage {
            prompt: self.prompt + rhs.prompt,
            completion: self.completion + rhs.completion,
            total: self.total + rhs.total,
        }
    }
}

/// Point-in-time copy of a [`UsageCounter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageSnapshot(TokenUsage);

/// Accumulates oracle usage for the lifetime of its owning client.
#[derive(Debug, Default)]
pub struct UsageCounter {
    prompt: AtomicU64,
    completion: AtomicU64,
    total: AtomicU64,
}

impl UsageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the usage of one call.
    pub fn record(&self, usage: TokenUsage) {
        self.prompt.fetch_add(usage.prompt, Ordering::Relaxed);
        self.completion.fetch_add(usage.completion, Ordering::Relaxed);
        self.total.fetch_add(usage.total, Ordering::Relaxed);
    }

    /// Current accumulated totals.
    pub fn totals(&self) -> TokenUsage {
        TokenUsage {
            prompt: self.prompt.load(Ordering::Relaxed),
            completion: self.completion.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
        }
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot(self.totals())
    }

    /// Usage accumulated since `snapshot` was taken.
    pub fn since(&self, snapshot: &UsageSnapshot) -> TokenUsage {
        let now = self.totals();
        let before = snapshot.0;
        TokenUsage {
            prompt: now.prompt.saturating_sub(before.prompt),
            completion: now.completion.saturating_sub(before.completion),
            total: now.total.saturating_sub(before.total),
        }
    }
}
