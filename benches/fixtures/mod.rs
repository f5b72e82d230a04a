// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use proteus::model::{
    Annotation, AnnotationId, Diagram, Edge, EdgeId, LayoutSlot, NodeDefinition, NodeId, NodeKind,
    NodeOverride, NodeProperties, NodeRegistry, NodeStyle, Snapshot, SnapshotId, Timeline,
};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("proteus_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub fn checksum_diagram(diagram: &Diagram) -> u64 {
    let mut acc = 0u64;
    for node in diagram.nodes() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node.node_id().as_str().len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node.properties().label().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.layout().x() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.layout().y() as u64);
        if let Some(color) = node.style().color() {
            acc = acc.wrapping_mul(131).wrapping_add(color.len() as u64);
        }
    }
    acc = acc.wrapping_mul(131).wrapping_add(diagram.edges().len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(diagram.annotations().len() as u64);
    acc
}

pub fn checksum_document(registry: &NodeRegistry, timeline: &Timeline) -> u64 {
    let mut acc = registry.len() as u64;
    for snapshot in timeline.snapshots() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(snapshot.layout().len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(snapshot.edges().len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(snapshot.node_overrides().map(|m| m.len()).unwrap_or(0) as u64);
    }
    acc
}

pub mod document {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    pub struct Params {
        pub nodes: usize,
        pub edges: usize,
        pub snapshots: usize,
        pub annotations: usize,
        pub with_overrides: bool,
    }

    impl Params {
        pub const fn new(
            nodes: usize,
            edges: usize,
            snapshots: usize,
            annotations: usize,
            with_overrides: bool,
        ) -> Self {
            Self {
                nodes,
                edges,
                snapshots,
                annotations,
                with_overrides,
            }
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub enum Case {
        Small,
        Medium,
        LargeNoOverrides,
        Large,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Medium => "medium",
                Self::LargeNoOverrides => "large_no_overrides",
                Self::Large => "large",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(10, 12, 2, 2, true),
                Self::Medium => Params::new(120, 200, 4, 10, true),
                Self::LargeNoOverrides => Params::new(1000, 2000, 8, 40, false),
                Self::Large => Params::new(1000, 2000, 8, 40, true),
            }
        }
    }

    pub fn node_id(idx: usize) -> NodeId {
        NodeId::new(format!("bench-node-{idx:06}")).expect("node id")
    }

    pub fn snapshot_id(idx: usize) -> SnapshotId {
        SnapshotId::new(format!("bench-snap-{idx:03}")).expect("snapshot id")
    }

    fn edge_id(idx: usize) -> EdgeId {
        EdgeId::new(format!("bench-edge-{idx:06}")).expect("edge id")
    }

    fn annotation_id(idx: usize) -> AnnotationId {
        AnnotationId::new(format!("bench-ann-{idx:04}")).expect("annotation id")
    }

    fn kind_for(idx: usize) -> NodeKind {
        match idx % 4 {
            0 => NodeKind::Person,
            1 => NodeKind::System,
            2 => NodeKind::Container,
            _ => NodeKind::Component,
        }
    }

    fn color_for(snapshot_idx: usize, node_idx: usize) -> String {
        format!(
            "#{:02x}{:02x}40",
            snapshot_idx.wrapping_mul(29) % 256,
            node_idx.wrapping_mul(53) % 256
        )
    }

    fn snapshot(snapshot_idx: usize, params: Params) -> Snapshot {
        let mut snapshot = Snapshot::new(
            snapshot_id(snapshot_idx),
            format!("Phase {snapshot_idx}"),
            1_700_000_000_000 + snapshot_idx as u64 * 1000,
        );

        for node_idx in 0..params.nodes {
            let x = (node_idx % 40) as f64 * 220.0;
            let y = (node_idx / 40) as f64 * 140.0;
            snapshot
                .layout_mut()
                .insert(node_id(node_idx), LayoutSlot::new(x, y, 160.0, 80.0));
            if params.with_overrides {
                let mut style = NodeStyle::default();
                style.set_color(Some(color_for(snapshot_idx, node_idx)));
                snapshot.node_overrides_mut().insert(
                    node_id(node_idx),
                    NodeOverride::new(
                        NodeProperties::new(format!("Node {node_idx} v{snapshot_idx}")),
                        style,
                    ),
                );
            }
        }

        for idx in 0..params.edges {
            let from_index = (idx.wrapping_mul(7)) % params.nodes;
            let mut to_index = (idx.wrapping_mul(7).wrapping_add(3)) % params.nodes;
            if to_index == from_index {
                to_index = (to_index + 1) % params.nodes;
            }
            let mut edge = Edge::new(edge_id(idx), node_id(from_index), node_id(to_index));
            if idx % 3 == 0 {
                edge.set_label(Some(format!("uses {idx}")));
            }
            snapshot.edges_mut().push(edge);
        }

        for idx in 0..params.annotations {
            snapshot.annotations_mut().push(Annotation::new(
                annotation_id(idx),
                idx as f64 * 60.0,
                -120.0,
                240.0,
                100.0,
                format!("note {idx} for phase {snapshot_idx}"),
            ));
        }

        snapshot
    }

    /// Builds a document pair at the given scale. Every snapshot lays out
    /// every node; overrides (when enabled) relabel and recolor per snapshot.
    /// The current snapshot is the first one.
    pub fn build(params: Params) -> (NodeRegistry, Timeline) {
        assert!(params.nodes >= 2, "document fixture needs >= 2 nodes");
        assert!(params.snapshots >= 1, "document fixture needs >= 1 snapshot");

        let mut registry = NodeRegistry::new();
        for idx in 0..params.nodes {
            let mut properties = NodeProperties::new(format!("Node {idx}"));
            properties.set_technology(Some("Rust"));
            let mut definition = NodeDefinition::new(node_id(idx), kind_for(idx), properties);
            definition.style_mut().set_color(Some("#888888"));
            registry.insert(definition);
        }

        let mut timeline = Timeline::new(snapshot(0, params));
        for snapshot_idx in 1..params.snapshots {
            timeline.snapshots_mut().push(snapshot(snapshot_idx, params));
            timeline
                .snapshot_order_mut()
                .push(snapshot_id(snapshot_idx));
        }

        (registry, timeline)
    }

    pub fn fixture(case: Case) -> (NodeRegistry, Timeline) {
        build(case.params())
    }
}
