//! Selection set: the organisms marked for side-by-side comparison.
//!
//! Bounded at [`MAX_COMPARE_ITEMS`], deduplicated by taxonomy identifier, and
//! ordered by insertion so the tray lists members in the order they were
//! picked. The set owns no view state: after mutating it, callers run
//! [`sync_view`](crate::page::sync_view) once.

use crate::error::SelectionError;
use crate::types::Candidate;

/// Maximum number of organisms that can be compared at once.
pub const MAX_COMPARE_ITEMS: usize = 5;

/// Minimum number of organisms needed before a comparison can be requested.
pub const MIN_COMPARE_ITEMS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    members: Vec<Candidate>,
    capacity: usize,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::with_capacity(MAX_COMPARE_ITEMS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a candidate.
    ///
    /// A candidate already present is a successful no-op, even when the set
    /// is full. A new candidate beyond capacity is rejected and the set is
    /// left unchanged.
    pub fn add(&mut self, candidate: Candidate) -> Result<(), SelectionError> {
        if self.contains(&candidate.tax_id) {
            return Ok(());
        }
        if self.members.len() >= self.capacity {
            tracing::debug!(tax_id = %candidate.tax_id, capacity = self.capacity, "selection: full");
            return Err(SelectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        tracing::debug!(tax_id = %candidate.tax_id, "selection: add");
        self.members.push(candidate);
        Ok(())
    }

    /// Remove by identifier; absent identifiers are ignored.
    pub fn remove(&mut self, tax_id: &str) {
        self.members.retain(|c| c.tax_id != tax_id);
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    pub fn contains(&self, tax_id: &str) -> bool {
        self.members.iter().any(|c| c.tax_id == tax_id)
    }

    /// Display name recorded for an identifier.
    pub fn name_of(&self, tax_id: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|c| c.tax_id == tax_id)
            .map(|c| c.name.as_str())
    }

    /// Identifiers in insertion order.
    pub fn tax_ids(&self) -> Vec<String> {
        self.members.iter().map(|c| c.tax_id.clone()).collect()
    }

    /// Whether enough members are present to request a comparison.
    pub fn can_compare(&self) -> bool {
        self.members.len() >= MIN_COMPARE_ITEMS
    }
}
