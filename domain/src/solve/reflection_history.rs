//! Bounded memory of one candidate lineage.
//!
//! The history feeds repair prompts: when an attempt fails, earlier failures
//! of the same lineage are shown to the oracle alongside the current one.
//! It is cleared whenever a new lineage starts, so candidates never see each
//! other's failures.

use super::attempt::CandidateAttempt;
use std::collections::VecDeque;

/// FIFO of the most recent attempts, never longer than its capacity.
#[derive(Debug, Clone)]
pub struct ReflectionHistory {
    capacity: usize,
    entries: VecDeque<CandidateAttempt>,
}

impl ReflectionHistory {
    /// Create a history holding at most `capacity` attempts (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an attempt, evicting the oldest when full.
    pub fn push(&mut self, attempt: CandidateAttempt) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(attempt);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Most recently recorded attempt.
    pub fn latest(&self) -> Option<&CandidateAttempt> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateAttempt> {
        self.entries.iter()
    }

    /// Failed attempts before the latest one, oldest first.
    ///
    /// At most `capacity - 1` entries are returned so that, together with the
    /// current attempt, a prompt never carries more than `capacity` attempts.
    pub fn prior_failures(&self) -> Vec<&CandidateAttempt> {
        let before_latest = self.entries.len().saturating_sub(1);
        let failures: Vec<&CandidateAttempt> = self
            .entries
            .iter()
            .take(before_latest)
            .filter(|a| !a.success())
            .collect();

        let keep = self.capacity - 1;
        let skip = failures.len().saturating_sub(keep);
        failures.into_iter().skip(skip).collect()
    }
}
