// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot merge engine.
//!
//! `merge` projects one snapshot of a document pair into the working diagram
//! the editor renders; `split` folds an edited diagram back into the pair.
//! Both are pure functions over in-memory values; persistence happens
//! elsewhere, at the caller's checkpoints.

use std::collections::BTreeSet;

use crate::model::{
    Diagram, DiagramNode, NodeDefinition, NodeId, NodeOverride, NodeRegistry, Snapshot,
    SnapshotId, Timeline,
};

/// Builds the in-memory diagram for one snapshot.
///
/// `snapshot_id` defaults to the timeline's current snapshot. An unknown id
/// yields an empty diagram (logged, never an error). Iteration is driven by
/// the snapshot's layout keys, so nodes defined in the registry but absent
/// from this snapshot's layout are never emitted.
pub fn merge(
    registry: &NodeRegistry,
    timeline: &Timeline,
    snapshot_id: Option<&SnapshotId>,
) -> Diagram {
    let target_id = snapshot_id.unwrap_or_else(|| timeline.current_snapshot_id());
    let Some(snapshot) = timeline.snapshot(target_id) else {
        log::warn!("snapshot not found for merge (snapshot_id={target_id})");
        return Diagram::new();
    };

    let mut diagram = Diagram::new();

    for (node_id, slot) in snapshot.layout() {
        let Some(definition) = registry.definition(node_id) else {
            log::warn!(
                "layout entry without node definition (snapshot_id={}, node_id={node_id})",
                snapshot.snapshot_id()
            );
            continue;
        };

        // Override wins in full; no field-by-field mixing with the definition.
        let (properties, style) = match snapshot.override_for(node_id) {
            Some(node_override) => (
                node_override.properties().clone(),
                node_override.style().clone(),
            ),
            None => (definition.properties().clone(), definition.style().clone()),
        };

        let mut node = DiagramNode::new(node_id.clone(), definition.kind(), *slot, properties);
        node.set_style(style);
        diagram.nodes_mut().push(node);
    }

    diagram.edges_mut().extend_from_slice(snapshot.edges());
    diagram
        .annotations_mut()
        .extend_from_slice(snapshot.annotations());

    diagram
}

/// Folds the edited diagram back into the document pair, returning updated
/// copies.
///
/// All display-relevant state lands in the current snapshot's override and
/// layout maps. The registry only ever gains definitions for node ids it has
/// not seen before; existing definitions are never rewritten here, so other
/// snapshots falling back to them keep their appearance.
pub fn split(
    diagram: &Diagram,
    registry: &NodeRegistry,
    timeline: &Timeline,
) -> (NodeRegistry, Timeline) {
    if timeline.current_snapshot().is_none() {
        log::warn!(
            "current snapshot missing for split (snapshot_id={}), document left unchanged",
            timeline.current_snapshot_id()
        );
        return (registry.clone(), timeline.clone());
    }

    let mut registry = registry.clone();
    let mut timeline = timeline.clone();

    if let Some(snapshot) = timeline.current_snapshot_mut() {
        capture_into_snapshot(diagram, snapshot);
    }

    for node in diagram.nodes() {
        if registry.contains(node.node_id()) {
            continue;
        }
        let mut definition = NodeDefinition::new(
            node.node_id().clone(),
            node.kind(),
            node.properties().clone(),
        );
        definition.set_style(node.style().clone());
        registry.insert(definition);
    }

    (registry, timeline)
}

/// Writes the diagram into the given snapshot: an override and a layout slot
/// per node, edges and annotations wholesale. Node ids absent from the
/// diagram lose their layout and override entries in this snapshot and
/// nowhere else. Groups are not part of the diagram shape and stay as they
/// are.
fn capture_into_snapshot(diagram: &Diagram, snapshot: &mut Snapshot) {
    for node in diagram.nodes() {
        snapshot.node_overrides_mut().insert(
            node.node_id().clone(),
            NodeOverride::new(node.properties().clone(), node.style().clone()),
        );
        snapshot
            .layout_mut()
            .insert(node.node_id().clone(), node.layout());
    }

    let present: BTreeSet<&NodeId> = diagram.nodes().iter().map(|node| node.node_id()).collect();
    snapshot
        .layout_mut()
        .retain(|node_id, _| present.contains(node_id));
    if snapshot.node_overrides().is_some() {
        snapshot
            .node_overrides_mut()
            .retain(|node_id, _| present.contains(node_id));
    }

    *snapshot.edges_mut() = diagram.edges().to_vec();
    *snapshot.annotations_mut() = diagram.annotations().to_vec();
}
