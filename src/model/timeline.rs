// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::SnapshotId;
use super::snapshot::Snapshot;

/// The ordered collection of a document's snapshots.
///
/// `current_snapshot_id` is explicit aggregate state, never ambient: every
/// operation that needs "the active snapshot" takes the timeline (or a
/// snapshot id) as a parameter. `snapshot_order` is the display order and is
/// independent of `snapshots` insertion order.
///
/// Coherence invariant: `current_snapshot_id` is in `snapshot_order`, and
/// `snapshot_order` is a duplicate-free permutation of the snapshot ids.
/// The model does not enforce this on every mutation (accessors are plain,
/// like the rest of the model); the ops layer preserves it and the store
/// repairs violations on load.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    current_snapshot_id: SnapshotId,
    snapshot_order: Vec<SnapshotId>,
}

impl Timeline {
    /// A timeline always holds at least one snapshot; the initial one is
    /// current by construction.
    pub fn new(initial: Snapshot) -> Self {
        let current_snapshot_id = initial.snapshot_id().clone();
        let snapshot_order = vec![current_snapshot_id.clone()];
        Self {
            snapshots: vec![initial],
            current_snapshot_id,
            snapshot_order,
        }
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn snapshots_mut(&mut self) -> &mut Vec<Snapshot> {
        &mut self.snapshots
    }

    pub fn current_snapshot_id(&self) -> &SnapshotId {
        &self.current_snapshot_id
    }

    pub fn set_current_snapshot_id(&mut self, snapshot_id: SnapshotId) {
        self.current_snapshot_id = snapshot_id;
    }

    pub fn snapshot_order(&self) -> &[SnapshotId] {
        &self.snapshot_order
    }

    pub fn snapshot_order_mut(&mut self) -> &mut Vec<SnapshotId> {
        &mut self.snapshot_order
    }

    pub fn set_snapshot_order(&mut self, snapshot_order: Vec<SnapshotId>) {
        self.snapshot_order = snapshot_order;
    }

    pub fn snapshot(&self, snapshot_id: &SnapshotId) -> Option<&Snapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.snapshot_id() == snapshot_id)
    }

    pub fn snapshot_mut(&mut self, snapshot_id: &SnapshotId) -> Option<&mut Snapshot> {
        self.snapshots
            .iter_mut()
            .find(|snapshot| snapshot.snapshot_id() == snapshot_id)
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        let current = self.current_snapshot_id.clone();
        self.snapshot(&current)
    }

    pub fn current_snapshot_mut(&mut self) -> Option<&mut Snapshot> {
        let current = self.current_snapshot_id.clone();
        self.snapshot_mut(&current)
    }

    pub fn contains(&self, snapshot_id: &SnapshotId) -> bool {
        self.snapshot(snapshot_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn position_in_order(&self, snapshot_id: &SnapshotId) -> Option<usize> {
        self.snapshot_order.iter().position(|id| id == snapshot_id)
    }

    /// Whether the coherence invariant currently holds.
    pub fn is_coherent(&self) -> bool {
        if !self
            .snapshot_order
            .contains(&self.current_snapshot_id)
        {
            return false;
        }
        if self.snapshot_order.len() != self.snapshots.len() {
            return false;
        }
        self.snapshot_order.iter().all(|id| self.contains(id))
            && self
                .snapshot_order
                .iter()
                .enumerate()
                .all(|(i, id)| self.position_in_order(id) == Some(i))
    }
}
