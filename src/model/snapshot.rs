// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ids::{AnnotationId, EdgeId, GroupId, NodeId, SnapshotId};
use super::node::{NodeProperties, NodeStyle};

/// One named, independently editable version of the diagram.
///
/// Everything in here is snapshot-local. The layout map decides which node
/// definitions are visible in this snapshot; `node_overrides` (absent on
/// documents written before overrides existed) carries the snapshot's own
/// view of node properties and style, shadowing the definition wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    snapshot_id: SnapshotId,
    label: String,
    description: Option<String>,
    timestamp: Option<String>,
    created_ms: u64,
    layout: BTreeMap<NodeId, LayoutSlot>,
    edges: Vec<Edge>,
    groups: Vec<Group>,
    annotations: Vec<Annotation>,
    node_overrides: Option<BTreeMap<NodeId, NodeOverride>>,
}

impl Snapshot {
    pub fn new(snapshot_id: SnapshotId, label: impl Into<String>, created_ms: u64) -> Self {
        Self {
            snapshot_id,
            label: label.into(),
            description: None,
            timestamp: None,
            created_ms,
            layout: BTreeMap::new(),
            edges: Vec::new(),
            groups: Vec::new(),
            annotations: Vec::new(),
            node_overrides: None,
        }
    }

    pub fn snapshot_id(&self) -> &SnapshotId {
        &self.snapshot_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description<T: Into<String>>(&mut self, description: Option<T>) {
        self.description = description.map(Into::into);
    }

    /// User-facing display date ("Q3 2026", "after migration"); free text,
    /// unrelated to `created_ms`.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub fn set_timestamp<T: Into<String>>(&mut self, timestamp: Option<T>) {
        self.timestamp = timestamp.map(Into::into);
    }

    pub fn created_ms(&self) -> u64 {
        self.created_ms
    }

    pub fn layout(&self) -> &BTreeMap<NodeId, LayoutSlot> {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut BTreeMap<NodeId, LayoutSlot> {
        &mut self.layout
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut Vec<Group> {
        &mut self.groups
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    pub fn node_overrides(&self) -> Option<&BTreeMap<NodeId, NodeOverride>> {
        self.node_overrides.as_ref()
    }

    pub fn set_node_overrides(&mut self, node_overrides: Option<BTreeMap<NodeId, NodeOverride>>) {
        self.node_overrides = node_overrides;
    }

    /// The override map, created empty on first use.
    pub fn node_overrides_mut(&mut self) -> &mut BTreeMap<NodeId, NodeOverride> {
        self.node_overrides.get_or_insert_with(BTreeMap::new)
    }

    /// Layered lookup: the snapshot's override for `node_id`, if any.
    pub fn override_for(&self, node_id: &NodeId) -> Option<&NodeOverride> {
        self.node_overrides
            .as_ref()
            .and_then(|overrides| overrides.get(node_id))
    }
}

/// Where a node sits in one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutSlot {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    locked: bool,
}

impl LayoutSlot {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            locked: false,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

/// A connection between two nodes, local to one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    edge_id: EdgeId,
    source: NodeId,
    target: NodeId,
    label: Option<String>,
    direction: EdgeDirection,
    style: Option<String>,
}

impl Edge {
    pub fn new(edge_id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            edge_id,
            source,
            target,
            label: None,
            direction: EdgeDirection::Forward,
            style: None,
        }
    }

    pub fn edge_id(&self) -> &EdgeId {
        &self.edge_id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: EdgeDirection) {
        self.direction = direction;
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn set_style<T: Into<String>>(&mut self, style: Option<T>) {
        self.style = style.map(Into::into);
    }
}

/// Arrowhead placement of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    #[default]
    Forward,
    Backward,
    Both,
    None,
}

impl EdgeDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}

impl fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEdgeDirectionError;

impl fmt::Display for ParseEdgeDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid edge direction")
    }
}

impl std::error::Error for ParseEdgeDirectionError {}

impl FromStr for EdgeDirection {
    type Err = ParseEdgeDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "both" => Ok(Self::Both),
            "none" => Ok(Self::None),
            _ => Err(ParseEdgeDirectionError),
        }
    }
}

/// A named boundary around a set of nodes, local to one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    group_id: GroupId,
    label: String,
    node_ids: Vec<NodeId>,
    color: Option<String>,
}

impl Group {
    pub fn new(group_id: GroupId, label: impl Into<String>) -> Self {
        Self {
            group_id,
            label: label.into(),
            node_ids: Vec::new(),
            color: None,
        }
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn node_ids_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.node_ids
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.color = color.map(Into::into);
    }
}

/// A sticky note or text box, local to one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    annotation_id: AnnotationId,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    text: String,
    color: Option<String>,
    font_size: Option<u32>,
}

impl Annotation {
    pub fn new(
        annotation_id: AnnotationId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            annotation_id,
            x,
            y,
            width,
            height,
            text: text.into(),
            color: None,
            font_size: None,
        }
    }

    pub fn annotation_id(&self) -> &AnnotationId {
        &self.annotation_id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.color = color.map(Into::into);
    }

    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    pub fn set_font_size(&mut self, font_size: Option<u32>) {
        self.font_size = font_size;
    }
}

/// A snapshot's complete replacement for a node's properties and style.
///
/// Overrides never merge field-by-field with the definition; a present
/// override wins wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOverride {
    properties: NodeProperties,
    style: NodeStyle,
}

impl NodeOverride {
    pub fn new(properties: NodeProperties, style: NodeStyle) -> Self {
        Self { properties, style }
    }

    pub fn properties(&self) -> &NodeProperties {
        &self.properties
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, EdgeDirection, LayoutSlot, NodeOverride, Snapshot};
    use crate::model::{EdgeId, NodeId, NodeProperties, NodeStyle, SnapshotId};

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn snapshot_starts_empty_with_no_overrides() {
        let snapshot = Snapshot::new(SnapshotId::new("snap-1").expect("snapshot id"), "Current", 42);

        assert_eq!(snapshot.label(), "Current");
        assert_eq!(snapshot.created_ms(), 42);
        assert!(snapshot.layout().is_empty());
        assert!(snapshot.edges().is_empty());
        assert!(snapshot.groups().is_empty());
        assert!(snapshot.annotations().is_empty());
        assert_eq!(snapshot.node_overrides(), None);
    }

    #[test]
    fn node_overrides_mut_creates_the_map_once() {
        let mut snapshot =
            Snapshot::new(SnapshotId::new("snap-1").expect("snapshot id"), "Current", 0);
        assert_eq!(snapshot.override_for(&nid("api")), None);

        let override_entry = NodeOverride::new(NodeProperties::new("API"), NodeStyle::default());
        snapshot
            .node_overrides_mut()
            .insert(nid("api"), override_entry.clone());

        assert_eq!(snapshot.override_for(&nid("api")), Some(&override_entry));
        assert_eq!(snapshot.node_overrides().map(|m| m.len()), Some(1));

        snapshot.node_overrides_mut().remove(&nid("api"));
        assert_eq!(snapshot.node_overrides().map(|m| m.len()), Some(0));
    }

    #[test]
    fn layout_slot_updates_position_size_and_lock() {
        let mut slot = LayoutSlot::new(100.0, 150.0, 180.0, 90.0);
        assert!(!slot.locked());

        slot.set_position(10.5, -3.25);
        slot.set_size(200.0, 120.0);
        slot.set_locked(true);

        assert_eq!(slot.x(), 10.5);
        assert_eq!(slot.y(), -3.25);
        assert_eq!(slot.width(), 200.0);
        assert_eq!(slot.height(), 120.0);
        assert!(slot.locked());
    }

    #[test]
    fn edge_defaults_to_forward_direction() {
        let mut edge = Edge::new(
            EdgeId::new("edge-1").expect("edge id"),
            nid("web"),
            nid("api"),
        );

        assert_eq!(edge.direction(), EdgeDirection::Forward);
        assert_eq!(edge.label(), None);

        edge.set_label(Some("calls"));
        edge.set_direction(EdgeDirection::Both);
        edge.set_style(Some("dashed"));

        assert_eq!(edge.label(), Some("calls"));
        assert_eq!(edge.direction(), EdgeDirection::Both);
        assert_eq!(edge.style(), Some("dashed"));
    }

    #[test]
    fn edge_direction_roundtrips_via_str() {
        for direction in [
            EdgeDirection::Forward,
            EdgeDirection::Backward,
            EdgeDirection::Both,
            EdgeDirection::None,
        ] {
            let parsed: EdgeDirection = direction.as_str().parse().expect("parse");
            assert_eq!(parsed, direction);
        }
        assert!("sideways".parse::<EdgeDirection>().is_err());
    }
}
