//! Client-side store of a resource's records.
//!
//! A [`Snapshot`] is immutable; applying a [`Change`] returns a new one and
//! leaves the original untouched. Cloning a snapshot is an `Arc` bump, so
//! the render layer can hold one cheaply.

use std::sync::Arc;

use crate::models::{Record, RecordId};

/// Outcome of a completed server call, ready to fold into a snapshot
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    Fetched(Vec<Record>),
    Created(Record),
    Updated(Record),
    Removed(RecordId),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    records: Arc<Vec<Record>>,
}

impl Snapshot {
    pub fn new(records: Vec<Record>) -> Self {
        Snapshot {
            records: Arc::new(records),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn apply(&self, change: Change) -> Snapshot {
        match change {
            Change::Fetched(records) => Snapshot::new(records),
            Change::Created(record) => {
                let mut records = self.records.as_ref().clone();
                records.push(record);
                Snapshot::new(records)
            }
            Change::Updated(record) => Snapshot::new(
                self.records
                    .iter()
                    .map(|r| if r.id == record.id { record.clone() } else { r.clone() })
                    .collect(),
            ),
            Change::Removed(id) => {
                Snapshot::new(self.records.iter().filter(|r| r.id != id).cloned().collect())
            }
        }
    }
}
