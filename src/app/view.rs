//! List view - one per resource, Loading → Ready

use crate::models::{Record, ResourceKind};
use crate::store::{Change, Snapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    /// Waiting on the fetch issued as `request_id`
    Loading { request_id: u64 },
    Ready,
}

#[derive(Clone, Debug)]
pub struct ListView {
    pub kind: ResourceKind,
    pub phase: ViewPhase,
    pub snapshot: Snapshot,
    pub selected: usize,
}

impl ListView {
    pub fn new(kind: ResourceKind) -> Self {
        ListView {
            kind,
            phase: ViewPhase::Ready,
            snapshot: Snapshot::default(),
            selected: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ViewPhase::Loading { .. })
    }

    pub fn begin_load(&mut self, request_id: u64) {
        self.phase = ViewPhase::Loading { request_id };
    }

    fn owns_load(&self, request_id: u64) -> bool {
        self.phase == ViewPhase::Loading { request_id }
    }

    /// Returns false when `request_id` is not the load this view waits on
    pub fn finish_load(&mut self, request_id: u64, records: Vec<Record>) -> bool {
        if !self.owns_load(request_id) {
            return false;
        }
        self.phase = ViewPhase::Ready;
        self.apply(Change::Fetched(records));
        true
    }

    /// A failed load leaves the view ready and empty
    pub fn fail_load(&mut self, request_id: u64) -> bool {
        if !self.owns_load(request_id) {
            return false;
        }
        self.phase = ViewPhase::Ready;
        self.apply(Change::Fetched(Vec::new()));
        true
    }

    pub fn apply(&mut self, change: Change) {
        self.snapshot = self.snapshot.apply(change);
        self.clamp_selection();
    }

    pub fn records(&self) -> &[Record] {
        self.snapshot.records()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.snapshot.records().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.snapshot.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.snapshot.len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.snapshot.len().saturating_sub(1));
    }
}
