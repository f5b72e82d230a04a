// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;
use super::kind::NodeKind;
use super::node::{NodeProperties, NodeStyle};
use super::snapshot::{Annotation, Edge, LayoutSlot};

/// A node as the editor sees it: identity plus the effective properties and
/// style for one snapshot, already layered by the merge engine.
///
/// `properties` and `style` here are snapshot-effective values, not the
/// registry baseline. Feeding them back through `split` records them as the
/// active snapshot's overrides without touching the shared definition.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    node_id: NodeId,
    kind: NodeKind,
    layout: LayoutSlot,
    properties: NodeProperties,
    style: NodeStyle,
}

impl DiagramNode {
    pub fn new(
        node_id: NodeId,
        kind: NodeKind,
        layout: LayoutSlot,
        properties: NodeProperties,
    ) -> Self {
        Self {
            node_id,
            kind,
            layout,
            properties,
            style: NodeStyle::default(),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn layout(&self) -> LayoutSlot {
        self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutSlot {
        &mut self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutSlot) {
        self.layout = layout;
    }

    pub fn properties(&self) -> &NodeProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut NodeProperties {
        &mut self.properties
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut NodeStyle {
        &mut self.style
    }

    pub fn set_style(&mut self, style: NodeStyle) {
        self.style = style;
    }
}

/// The working diagram exchanged with the editor surface.
///
/// Produced by `engine::merge`, consumed by `engine::split`. Holds only what
/// one snapshot renders; nothing registry-wide leaks in. Node, edge and
/// annotation order is whatever the source snapshot yielded, no sort is
/// imposed here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    edges: Vec<Edge>,
    annotations: Vec<Annotation>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<DiagramNode> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.node_id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut DiagramNode> {
        self.nodes.iter_mut().find(|node| node.node_id() == node_id)
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node(node_id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.annotations.is_empty()
    }
}
