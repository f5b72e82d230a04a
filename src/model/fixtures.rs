// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{AnnotationId, EdgeId, NodeId, SnapshotId};
use super::kind::NodeKind;
use super::node::{NodeDefinition, NodeProperties, NodeStyle};
use super::registry::NodeRegistry;
use super::snapshot::{Annotation, Edge, LayoutSlot, NodeOverride, Snapshot};
use super::timeline::Timeline;

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn sid(value: &str) -> SnapshotId {
    SnapshotId::new(value).expect("snapshot id")
}

fn definition(id: &str, kind: NodeKind, label: &str, color: Option<&str>) -> NodeDefinition {
    let mut definition = NodeDefinition::new(nid(id), kind, NodeProperties::new(label));
    definition.style_mut().set_color(color);
    definition
}

fn node_override(label: &str, color: &str) -> NodeOverride {
    let mut style = NodeStyle::default();
    style.set_color(Some(color));
    NodeOverride::new(NodeProperties::new(label), style)
}

/// One snapshot, two nodes, one edge, one annotation. `node-1` carries an
/// override, `node-2` resolves through the definition fallback.
pub(crate) fn document_small_pair() -> (NodeRegistry, Timeline) {
    let mut registry = NodeRegistry::new();
    registry.insert(definition(
        "node-1",
        NodeKind::System,
        "Billing",
        Some("#888888"),
    ));
    registry.insert(definition(
        "node-2",
        NodeKind::Container,
        "Postgres",
        None,
    ));

    let mut snapshot = Snapshot::new(sid("snap-current"), "Current", 1_700_000_000_000);
    snapshot
        .layout_mut()
        .insert(nid("node-1"), LayoutSlot::new(100.0, 150.0, 160.0, 80.0));
    snapshot
        .layout_mut()
        .insert(nid("node-2"), LayoutSlot::new(300.0, 150.0, 160.0, 80.0));

    let mut edge = Edge::new(
        EdgeId::new("edge-1").expect("edge id"),
        nid("node-1"),
        nid("node-2"),
    );
    edge.set_label(Some("reads"));
    snapshot.edges_mut().push(edge);

    snapshot.annotations_mut().push(Annotation::new(
        AnnotationId::new("ann-1").expect("annotation id"),
        40.0,
        40.0,
        200.0,
        120.0,
        "Review quarterly",
    ));

    snapshot
        .node_overrides_mut()
        .insert(nid("node-1"), node_override("Billing", "#FF5733"));

    (registry, Timeline::new(snapshot))
}

/// Two snapshots recoloring the same nodes differently through overrides.
/// "Current" shows two green nodes; "Phase 1" shows three blue ones. Editing
/// either side must leave the other side's colors alone.
pub(crate) fn document_snapshot_recolor_regression() -> (NodeRegistry, Timeline) {
    let mut registry = NodeRegistry::new();
    registry.insert(definition("node-1", NodeKind::System, "Node 1", None));
    registry.insert(definition("node-2", NodeKind::System, "Node 2", None));
    registry.insert(definition("node-3", NodeKind::System, "Node 3", None));

    let mut current = Snapshot::new(sid("snap-current"), "Current", 1_700_000_000_000);
    current
        .layout_mut()
        .insert(nid("node-1"), LayoutSlot::new(100.0, 150.0, 160.0, 80.0));
    current
        .layout_mut()
        .insert(nid("node-2"), LayoutSlot::new(300.0, 150.0, 160.0, 80.0));
    current
        .node_overrides_mut()
        .insert(nid("node-1"), node_override("Green Node 1", "#00ff00"));
    current
        .node_overrides_mut()
        .insert(nid("node-2"), node_override("Green Node 2", "#00ff00"));

    let mut phase = Snapshot::new(sid("snap-phase-1"), "Phase 1", 1_700_000_100_000);
    phase
        .layout_mut()
        .insert(nid("node-1"), LayoutSlot::new(100.0, 150.0, 160.0, 80.0));
    phase
        .layout_mut()
        .insert(nid("node-2"), LayoutSlot::new(300.0, 150.0, 160.0, 80.0));
    phase
        .layout_mut()
        .insert(nid("node-3"), LayoutSlot::new(500.0, 150.0, 160.0, 80.0));
    phase
        .node_overrides_mut()
        .insert(nid("node-1"), node_override("Blue Node 1", "#0000ff"));
    phase
        .node_overrides_mut()
        .insert(nid("node-2"), node_override("Blue Node 2", "#0000ff"));
    phase
        .node_overrides_mut()
        .insert(nid("node-3"), node_override("Blue Node 3", "#0000ff"));

    let mut timeline = Timeline::new(current);
    timeline.snapshots_mut().push(phase);
    timeline.snapshot_order_mut().push(sid("snap-phase-1"));

    (registry, timeline)
}

/// A document in the pre-override shape: layout only, `node_overrides` absent.
/// Merging must fall back to the definition's properties and style.
pub(crate) fn document_without_overrides() -> (NodeRegistry, Timeline) {
    let mut registry = NodeRegistry::new();
    registry.insert(definition(
        "node-1",
        NodeKind::System,
        "Legacy",
        Some("#00AA00"),
    ));

    let mut snapshot = Snapshot::new(sid("snap-current"), "Current", 1_600_000_000_000);
    snapshot
        .layout_mut()
        .insert(nid("node-1"), LayoutSlot::new(100.0, 150.0, 160.0, 80.0));

    (registry, Timeline::new(snapshot))
}
