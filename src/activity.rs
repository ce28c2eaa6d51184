//! Activity timeline data model
//!
//! One `Timeline` is live per in-flight turn; completed turns are frozen into
//! the `SnapshotStore` keyed by the turn's final message id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One human-readable progress step. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub title: String,
    pub data: String,
}

impl ActivityEntry {
    pub fn new(title: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            data: data.into(),
        }
    }
}

/// Ordered, append-only sequence of activity entries for one turn.
///
/// Insertion order is arrival order of the events that produced the entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<ActivityEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ActivityEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a ActivityEntry;
    type IntoIter = std::slice::Iter<'a, ActivityEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Opaque identifier of a turn's final answer message.
///
/// Assigned by the external message producer; not known until the turn is
/// nearly complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(String);

impl TurnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TurnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Write-once archive of frozen timelines, one per completed turn.
///
/// Grows for the lifetime of the session; there is no eviction.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshots: HashMap<TurnId, Timeline>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive a frozen timeline under `turn_id`.
    ///
    /// Keys are never overwritten: a second archive attempt for the same id
    /// is ignored. Returns whether the snapshot was stored.
    pub fn archive(&mut self, turn_id: TurnId, timeline: Timeline) -> bool {
        match self.snapshots.entry(turn_id) {
            std::collections::hash_map::Entry::Occupied(e) => {
                tracing::warn!(turn_id = %e.key(), "Snapshot already archived, keeping original");
                false
            }
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(timeline);
                true
            }
        }
    }

    pub fn get(&self, turn_id: &TurnId) -> Option<&Timeline> {
        self.snapshots.get(turn_id)
    }

    pub fn contains(&self, turn_id: &TurnId) -> bool {
        self.snapshots.contains_key(turn_id)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TurnId, &Timeline)> {
        self.snapshots.iter()
    }
}
