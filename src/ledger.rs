//! Append-only record of concluded rounds, newest first

use crate::types::GuessRecord;

#[derive(Debug, Clone, Default)]
pub struct GuessHistory {
    records: Vec<GuessRecord>,
}

impl GuessHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head so the most recent round comes first.
    /// No dedup, no cap; bounded by the session.
    pub fn record(&mut self, entry: GuessRecord) {
        self.records.insert(0, entry);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recently concluded round
    pub fn latest(&self) -> Option<&GuessRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuessRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<GuessRecord> {
        self.records.clone()
    }
}
