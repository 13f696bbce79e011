use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// One photo as reported by the backend. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    pub url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Outcome of merging a fetched snapshot into the local list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Nothing to do; the list is unchanged (covers the empty-over-empty case).
    NoChange,
    /// This many previously unseen photos were appended.
    Arrived(usize),
    /// The backend reported zero photos while we held some; the list was cleared.
    WipedToEmpty,
}

/// The ordered, deduplicated photo collection.
///
/// Invariants: sorted non-decreasing by `created_at`, no two records share an
/// `id`. Only `reconcile` mutates the list; everything else reads it.
#[derive(Debug, Default)]
pub struct PhotoList {
    records: Vec<PhotoRecord>,
}

impl PhotoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    /// Merge a full backend snapshot into the list.
    ///
    /// Photos whose `id` we already hold are ignored; new ones are appended
    /// and the whole list is re-sorted by `created_at`. The sort is stable,
    /// so records with equal timestamps keep their arrival order. An empty
    /// snapshot over a non-empty list means every photo was deleted.
    pub fn reconcile(&mut self, fetched: Vec<PhotoRecord>) -> ReconcileOutcome {
        if fetched.is_empty() {
            if self.records.is_empty() {
                return ReconcileOutcome::NoChange;
            }
            let dropped = self.records.len();
            self.records.clear();
            debug!(dropped, "backend reports zero photos; list wiped");
            return ReconcileOutcome::WipedToEmpty;
        }

        let mut seen: HashSet<String> = self.records.iter().map(|r| r.id.clone()).collect();
        let mut arrivals = Vec::new();
        for photo in fetched {
            if seen.insert(photo.id.clone()) {
                arrivals.push(photo);
            }
        }

        if arrivals.is_empty() {
            return ReconcileOutcome::NoChange;
        }

        let count = arrivals.len();
        self.records.extend(arrivals);
        self.records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        debug!(count, total = self.records.len(), "new photos merged");
        ReconcileOutcome::Arrived(count)
    }
}
