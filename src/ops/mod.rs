// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot lifecycle operations.
//!
//! Operations mutate a `Timeline` in place. Invalid requests are rejected
//! with a descriptive error and leave the timeline untouched.

use std::fmt;

use crate::model::{Snapshot, SnapshotId, Timeline};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineOpError {
    AlreadyExists { snapshot_id: SnapshotId },
    NotFound { snapshot_id: SnapshotId },
    LastSnapshot { snapshot_id: SnapshotId },
    CurrentSnapshotMissing { snapshot_id: SnapshotId },
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for TimelineOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists { snapshot_id } => {
                write!(f, "snapshot already exists (id={snapshot_id})")
            }
            Self::NotFound { snapshot_id } => {
                write!(f, "snapshot not found (id={snapshot_id})")
            }
            Self::LastSnapshot { snapshot_id } => {
                write!(f, "cannot remove the last snapshot (id={snapshot_id})")
            }
            Self::CurrentSnapshotMissing { snapshot_id } => {
                write!(f, "current snapshot missing from timeline (id={snapshot_id})")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "snapshot order index out of range (index={index}, len={len})")
            }
        }
    }
}

impl std::error::Error for TimelineOpError {}

/// Creates a new snapshot as a deep copy of the active one and appends it to
/// the order. The current selection is left where it is; switching to the new
/// snapshot is a separate `select_snapshot` call.
///
/// The copy covers layout, edges, groups, annotations and the override map.
/// A snapshot without an override map produces a copy without one.
pub fn add_snapshot(
    timeline: &mut Timeline,
    snapshot_id: SnapshotId,
    label: impl Into<String>,
    created_ms: u64,
) -> Result<(), TimelineOpError> {
    if timeline.contains(&snapshot_id) {
        return Err(TimelineOpError::AlreadyExists { snapshot_id });
    }
    let Some(current) = timeline.current_snapshot() else {
        return Err(TimelineOpError::CurrentSnapshotMissing {
            snapshot_id: timeline.current_snapshot_id().clone(),
        });
    };

    let mut snapshot = Snapshot::new(snapshot_id.clone(), label, created_ms);
    *snapshot.layout_mut() = current.layout().clone();
    *snapshot.edges_mut() = current.edges().to_vec();
    *snapshot.groups_mut() = current.groups().to_vec();
    *snapshot.annotations_mut() = current.annotations().to_vec();
    snapshot.set_node_overrides(current.node_overrides().cloned());

    timeline.snapshots_mut().push(snapshot);
    timeline.snapshot_order_mut().push(snapshot_id);
    Ok(())
}

/// Removes a snapshot, returning it. The sole remaining snapshot cannot be
/// removed. Removing the active snapshot moves the selection to the previous
/// neighbour in the order, or the next one when there is no previous.
pub fn remove_snapshot(
    timeline: &mut Timeline,
    snapshot_id: &SnapshotId,
) -> Result<Snapshot, TimelineOpError> {
    let Some(index) = timeline
        .snapshots()
        .iter()
        .position(|snapshot| snapshot.snapshot_id() == snapshot_id)
    else {
        return Err(TimelineOpError::NotFound {
            snapshot_id: snapshot_id.clone(),
        });
    };
    if timeline.len() == 1 {
        return Err(TimelineOpError::LastSnapshot {
            snapshot_id: snapshot_id.clone(),
        });
    }

    if timeline.current_snapshot_id() == snapshot_id {
        let successor = successor_in_order(timeline, snapshot_id).or_else(|| {
            // order out of sync with the snapshot list, fall back to any survivor
            timeline
                .snapshots()
                .iter()
                .map(|snapshot| snapshot.snapshot_id())
                .find(|id| *id != snapshot_id)
                .cloned()
        });
        if let Some(successor) = successor {
            timeline.set_current_snapshot_id(successor);
        }
    }

    let removed = timeline.snapshots_mut().remove(index);
    timeline.snapshot_order_mut().retain(|id| id != snapshot_id);
    Ok(removed)
}

fn successor_in_order(timeline: &Timeline, removed: &SnapshotId) -> Option<SnapshotId> {
    let order = timeline.snapshot_order();
    let position = order.iter().position(|id| id == removed)?;
    position
        .checked_sub(1)
        .and_then(|previous| order.get(previous))
        .or_else(|| order.get(position + 1))
        .cloned()
}

pub fn select_snapshot(
    timeline: &mut Timeline,
    snapshot_id: &SnapshotId,
) -> Result<(), TimelineOpError> {
    if !timeline.contains(snapshot_id) {
        return Err(TimelineOpError::NotFound {
            snapshot_id: snapshot_id.clone(),
        });
    }
    timeline.set_current_snapshot_id(snapshot_id.clone());
    Ok(())
}

pub fn rename_snapshot(
    timeline: &mut Timeline,
    snapshot_id: &SnapshotId,
    label: impl Into<String>,
) -> Result<(), TimelineOpError> {
    let Some(snapshot) = timeline.snapshot_mut(snapshot_id) else {
        return Err(TimelineOpError::NotFound {
            snapshot_id: snapshot_id.clone(),
        });
    };
    snapshot.set_label(label);
    Ok(())
}

pub fn describe_snapshot<T: Into<String>>(
    timeline: &mut Timeline,
    snapshot_id: &SnapshotId,
    description: Option<T>,
) -> Result<(), TimelineOpError> {
    let Some(snapshot) = timeline.snapshot_mut(snapshot_id) else {
        return Err(TimelineOpError::NotFound {
            snapshot_id: snapshot_id.clone(),
        });
    };
    snapshot.set_description(description);
    Ok(())
}

/// Moves a snapshot to `new_index` within the display order. Snapshot
/// contents and the current selection are unaffected.
pub fn reorder_snapshot(
    timeline: &mut Timeline,
    snapshot_id: &SnapshotId,
    new_index: usize,
) -> Result<(), TimelineOpError> {
    let Some(position) = timeline.position_in_order(snapshot_id) else {
        return Err(TimelineOpError::NotFound {
            snapshot_id: snapshot_id.clone(),
        });
    };
    let len = timeline.snapshot_order().len();
    if new_index >= len {
        return Err(TimelineOpError::IndexOutOfRange {
            index: new_index,
            len,
        });
    }
    if new_index == position {
        return Ok(());
    }

    let order = timeline.snapshot_order_mut();
    let id = order.remove(position);
    order.insert(new_index, id);
    Ok(())
}
