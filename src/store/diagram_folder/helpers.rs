// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Diagram folder persistence helpers:
/// document json conversion, timeline repair, and safe filesystem writes.
fn write_document_json<T: Serialize>(
    folder_root: &Path,
    path: &Path,
    document: &T,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let json_str = serde_json::to_string_pretty(document).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    write_atomic_in_folder(
        folder_root,
        path,
        format!("{json_str}\n").as_bytes(),
        durability,
    )
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodesDocumentJson {
    #[serde(default = "default_schema_version")]
    version: u32,
    #[serde(default)]
    metadata: DocumentMetaJson,
    #[serde(default)]
    nodes: BTreeMap<String, NodeDefinitionJson>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DocumentMetaJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    created_ms: u64,
    #[serde(default)]
    modified_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphDocumentJson {
    #[serde(default = "default_schema_version")]
    version: u32,
    #[serde(default)]
    metadata: GraphMetaJson,
    timeline: TimelineJson,
    #[serde(default)]
    config: Option<DiagramConfigJson>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GraphMetaJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    node_file: Option<String>,
    #[serde(default)]
    created_ms: u64,
    #[serde(default)]
    modified_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TimelineJson {
    #[serde(default)]
    snapshots: Vec<SnapshotJson>,
    current_snapshot_id: String,
    #[serde(default)]
    snapshot_order: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotJson {
    id: String,
    label: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    created_ms: u64,
    #[serde(default)]
    layout: BTreeMap<String, LayoutSlotJson>,
    #[serde(default)]
    edges: Vec<EdgeJson>,
    #[serde(default)]
    groups: Vec<GroupJson>,
    #[serde(default)]
    annotations: Vec<AnnotationJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_overrides: Option<BTreeMap<String, NodeOverrideJson>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutSlotJson {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeJson {
    id: String,
    source: String,
    target: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GroupJson {
    id: String,
    label: String,
    #[serde(default)]
    node_ids: Vec<String>,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnnotationJson {
    id: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    text: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    font_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeOverrideJson {
    #[serde(default)]
    properties: NodePropertiesJson,
    #[serde(default)]
    style: NodeStyleJson,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeDefinitionJson {
    kind: NodeKindJson,
    #[serde(default)]
    properties: NodePropertiesJson,
    #[serde(default)]
    knowledge: Vec<KnowledgeItemJson>,
    #[serde(default)]
    metrics: BTreeMap<String, f64>,
    #[serde(default)]
    links: NodeLinksJson,
    #[serde(default)]
    style: NodeStyleJson,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NodePropertiesJson {
    #[serde(default)]
    label: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    technology: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NodeStyleJson {
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    shape: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KnowledgeItemJson {
    kind: KnowledgeKindJson,
    title: String,
    #[serde(default)]
    body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NodeLinksJson {
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    children: Vec<String>,
    #[serde(default)]
    diagrams: Vec<String>,
    #[serde(default)]
    external_systems: Vec<String>,
    #[serde(default)]
    dependencies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeKindJson {
    Person,
    System,
    Container,
    Component,
    Code,
    Market,
    Organisation,
    Capability,
}

impl From<NodeKind> for NodeKindJson {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Person => Self::Person,
            NodeKind::System => Self::System,
            NodeKind::Container => Self::Container,
            NodeKind::Component => Self::Component,
            NodeKind::Code => Self::Code,
            NodeKind::Market => Self::Market,
            NodeKind::Organisation => Self::Organisation,
            NodeKind::Capability => Self::Capability,
        }
    }
}

impl From<NodeKindJson> for NodeKind {
    fn from(kind: NodeKindJson) -> Self {
        match kind {
            NodeKindJson::Person => Self::Person,
            NodeKindJson::System => Self::System,
            NodeKindJson::Container => Self::Container,
            NodeKindJson::Component => Self::Component,
            NodeKindJson::Code => Self::Code,
            NodeKindJson::Market => Self::Market,
            NodeKindJson::Organisation => Self::Organisation,
            NodeKindJson::Capability => Self::Capability,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KnowledgeKindJson {
    Note,
    Url,
    Attachment,
}

impl From<KnowledgeKind> for KnowledgeKindJson {
    fn from(kind: KnowledgeKind) -> Self {
        match kind {
            KnowledgeKind::Note => Self::Note,
            KnowledgeKind::Url => Self::Url,
            KnowledgeKind::Attachment => Self::Attachment,
        }
    }
}

impl From<KnowledgeKindJson> for KnowledgeKind {
    fn from(kind: KnowledgeKindJson) -> Self {
        match kind {
            KnowledgeKindJson::Note => Self::Note,
            KnowledgeKindJson::Url => Self::Url,
            KnowledgeKindJson::Attachment => Self::Attachment,
        }
    }
}

fn registry_to_json(registry: &NodeRegistry) -> BTreeMap<String, NodeDefinitionJson> {
    registry
        .definitions()
        .iter()
        .map(|(node_id, definition)| (node_id.to_string(), definition_to_json(definition)))
        .collect()
}

fn registry_from_json(
    nodes_json: BTreeMap<String, NodeDefinitionJson>,
) -> Result<NodeRegistry, StoreError> {
    let mut registry = NodeRegistry::new();
    for (raw_id, definition_json) in nodes_json {
        let node_id = NodeId::new(raw_id.clone()).map_err(|source| StoreError::InvalidId {
            field: "nodes{}",
            value: raw_id,
            source: Box::new(source),
        })?;
        registry.insert(definition_from_json(node_id, definition_json)?);
    }
    Ok(registry)
}

fn definition_to_json(definition: &NodeDefinition) -> NodeDefinitionJson {
    NodeDefinitionJson {
        kind: definition.kind().into(),
        properties: properties_to_json(definition.properties()),
        knowledge: definition
            .knowledge()
            .iter()
            .map(knowledge_item_to_json)
            .collect(),
        metrics: definition.metrics().clone(),
        links: links_to_json(definition.links()),
        style: style_to_json(definition.style()),
    }
}

fn definition_from_json(
    node_id: NodeId,
    definition_json: NodeDefinitionJson,
) -> Result<NodeDefinition, StoreError> {
    let mut definition = NodeDefinition::new(
        node_id,
        definition_json.kind.into(),
        properties_from_json(definition_json.properties),
    );

    *definition.knowledge_mut() = definition_json
        .knowledge
        .into_iter()
        .map(knowledge_item_from_json)
        .collect();
    *definition.metrics_mut() = definition_json.metrics;
    *definition.links_mut() = links_from_json(definition_json.links)?;
    definition.set_style(style_from_json(definition_json.style));

    Ok(definition)
}

fn properties_to_json(properties: &NodeProperties) -> NodePropertiesJson {
    NodePropertiesJson {
        label: properties.label().to_owned(),
        description: properties.description().map(ToOwned::to_owned),
        technology: properties.technology().map(ToOwned::to_owned),
        team: properties.team().map(ToOwned::to_owned),
        status: properties.status().map(ToOwned::to_owned),
    }
}

fn properties_from_json(properties_json: NodePropertiesJson) -> NodeProperties {
    let mut properties = NodeProperties::new(properties_json.label);
    properties.set_description(properties_json.description);
    properties.set_technology(properties_json.technology);
    properties.set_team(properties_json.team);
    properties.set_status(properties_json.status);
    properties
}

fn style_to_json(style: &NodeStyle) -> NodeStyleJson {
    NodeStyleJson {
        color: style.color().map(ToOwned::to_owned),
        icon: style.icon().map(ToOwned::to_owned),
        shape: style.shape().map(ToOwned::to_owned),
    }
}

fn style_from_json(style_json: NodeStyleJson) -> NodeStyle {
    let mut style = NodeStyle::default();
    style.set_color(style_json.color);
    style.set_icon(style_json.icon);
    style.set_shape(style_json.shape);
    style
}

fn knowledge_item_to_json(item: &KnowledgeItem) -> KnowledgeItemJson {
    KnowledgeItemJson {
        kind: item.kind().into(),
        title: item.title().to_owned(),
        body: item.body().to_owned(),
    }
}

fn knowledge_item_from_json(item_json: KnowledgeItemJson) -> KnowledgeItem {
    KnowledgeItem::new(item_json.kind.into(), item_json.title, item_json.body)
}

fn links_to_json(links: &NodeLinks) -> NodeLinksJson {
    NodeLinksJson {
        parent: links.parent().map(ToString::to_string),
        children: links.children().iter().map(ToString::to_string).collect(),
        diagrams: links.diagrams().to_vec(),
        external_systems: links.external_systems().to_vec(),
        dependencies: links
            .dependencies()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn links_from_json(links_json: NodeLinksJson) -> Result<NodeLinks, StoreError> {
    let parse_node_id = |field: &'static str, value: String| -> Result<NodeId, StoreError> {
        NodeId::new(value.clone()).map_err(|source| StoreError::InvalidId {
            field,
            value,
            source: Box::new(source),
        })
    };

    let mut links = NodeLinks::default();
    links.set_parent(
        links_json
            .parent
            .map(|value| parse_node_id("links.parent", value))
            .transpose()?,
    );
    *links.children_mut() = links_json
        .children
        .into_iter()
        .map(|value| parse_node_id("links.children[]", value))
        .collect::<Result<Vec<_>, StoreError>>()?;
    *links.diagrams_mut() = links_json.diagrams;
    *links.external_systems_mut() = links_json.external_systems;
    *links.dependencies_mut() = links_json
        .dependencies
        .into_iter()
        .map(|value| parse_node_id("links.dependencies[]", value))
        .collect::<Result<Vec<_>, StoreError>>()?;

    Ok(links)
}

fn timeline_to_json(timeline: &Timeline) -> TimelineJson {
    TimelineJson {
        snapshots: timeline.snapshots().iter().map(snapshot_to_json).collect(),
        current_snapshot_id: timeline.current_snapshot_id().to_string(),
        snapshot_order: timeline
            .snapshot_order()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn timeline_from_json(
    graph_path: &Path,
    timeline_json: TimelineJson,
) -> Result<Timeline, StoreError> {
    let mut snapshots = timeline_json
        .snapshots
        .into_iter()
        .map(snapshot_from_json)
        .collect::<Result<Vec<_>, StoreError>>()?;

    if snapshots.is_empty() {
        return Err(StoreError::EmptyTimeline {
            path: graph_path.to_path_buf(),
        });
    }

    let first = snapshots.remove(0);
    let mut timeline = Timeline::new(first);
    timeline.snapshots_mut().extend(snapshots);

    let current_snapshot_id = SnapshotId::new(timeline_json.current_snapshot_id.clone()).map_err(
        |source| StoreError::InvalidId {
            field: "timeline.current_snapshot_id",
            value: timeline_json.current_snapshot_id,
            source: Box::new(source),
        },
    )?;
    timeline.set_current_snapshot_id(current_snapshot_id);

    let snapshot_order = timeline_json
        .snapshot_order
        .into_iter()
        .map(|value| {
            SnapshotId::new(value.clone()).map_err(|source| StoreError::InvalidId {
                field: "timeline.snapshot_order[]",
                value,
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    timeline.set_snapshot_order(snapshot_order);

    normalize_loaded_timeline(&mut timeline, graph_path);
    Ok(timeline)
}

/// Repairs timeline coherence after loading: the order must be a
/// duplicate-free permutation of the stored snapshots and the current
/// snapshot must exist. Documents edited by hand or by older versions can
/// violate both.
fn normalize_loaded_timeline(timeline: &mut Timeline, graph_path: &Path) {
    let known: Vec<SnapshotId> = timeline
        .snapshots()
        .iter()
        .map(|snapshot| snapshot.snapshot_id().clone())
        .collect();

    let mut order: Vec<SnapshotId> = Vec::with_capacity(known.len());
    for snapshot_id in timeline.snapshot_order() {
        if known.contains(snapshot_id) && !order.contains(snapshot_id) {
            order.push(snapshot_id.clone());
        }
    }
    for snapshot_id in &known {
        if !order.contains(snapshot_id) {
            order.push(snapshot_id.clone());
        }
    }

    if order.as_slice() != timeline.snapshot_order() {
        log::warn!("repaired incoherent snapshot order (path={graph_path:?})");
        timeline.set_snapshot_order(order.clone());
    }

    if !known.contains(timeline.current_snapshot_id()) {
        if let Some(fallback) = order.first().cloned() {
            log::warn!(
                "current snapshot not found, falling back to first in order (path={graph_path:?}, snapshot_id={}, fallback={fallback})",
                timeline.current_snapshot_id()
            );
            timeline.set_current_snapshot_id(fallback);
        }
    }
}

fn snapshot_to_json(snapshot: &Snapshot) -> SnapshotJson {
    SnapshotJson {
        id: snapshot.snapshot_id().to_string(),
        label: snapshot.label().to_owned(),
        description: snapshot.description().map(ToOwned::to_owned),
        timestamp: snapshot.timestamp().map(ToOwned::to_owned),
        created_ms: snapshot.created_ms(),
        layout: snapshot
            .layout()
            .iter()
            .map(|(node_id, slot)| (node_id.to_string(), layout_slot_to_json(slot)))
            .collect(),
        edges: snapshot.edges().iter().map(edge_to_json).collect(),
        groups: snapshot.groups().iter().map(group_to_json).collect(),
        annotations: snapshot
            .annotations()
            .iter()
            .map(annotation_to_json)
            .collect(),
        node_overrides: snapshot.node_overrides().map(|overrides| {
            overrides
                .iter()
                .map(|(node_id, node_override)| {
                    (node_id.to_string(), node_override_to_json(node_override))
                })
                .collect()
        }),
    }
}

fn snapshot_from_json(snapshot_json: SnapshotJson) -> Result<Snapshot, StoreError> {
    let snapshot_id =
        SnapshotId::new(snapshot_json.id.clone()).map_err(|source| StoreError::InvalidId {
            field: "timeline.snapshots[].id",
            value: snapshot_json.id,
            source: Box::new(source),
        })?;

    let mut snapshot = Snapshot::new(snapshot_id, snapshot_json.label, snapshot_json.created_ms);
    snapshot.set_description(snapshot_json.description);
    snapshot.set_timestamp(snapshot_json.timestamp);

    for (raw_id, slot_json) in snapshot_json.layout {
        let node_id = NodeId::new(raw_id.clone()).map_err(|source| StoreError::InvalidId {
            field: "timeline.snapshots[].layout{}",
            value: raw_id,
            source: Box::new(source),
        })?;
        snapshot
            .layout_mut()
            .insert(node_id, layout_slot_from_json(slot_json));
    }

    *snapshot.edges_mut() = snapshot_json
        .edges
        .into_iter()
        .map(edge_from_json)
        .collect::<Result<Vec<_>, StoreError>>()?;
    *snapshot.groups_mut() = snapshot_json
        .groups
        .into_iter()
        .map(group_from_json)
        .collect::<Result<Vec<_>, StoreError>>()?;
    *snapshot.annotations_mut() = snapshot_json
        .annotations
        .into_iter()
        .map(annotation_from_json)
        .collect::<Result<Vec<_>, StoreError>>()?;

    let node_overrides = snapshot_json
        .node_overrides
        .map(|overrides_json| {
            overrides_json
                .into_iter()
                .map(|(raw_id, override_json)| {
                    let node_id =
                        NodeId::new(raw_id.clone()).map_err(|source| StoreError::InvalidId {
                            field: "timeline.snapshots[].node_overrides{}",
                            value: raw_id,
                            source: Box::new(source),
                        })?;
                    Ok((node_id, node_override_from_json(override_json)))
                })
                .collect::<Result<BTreeMap<_, _>, StoreError>>()
        })
        .transpose()?;
    snapshot.set_node_overrides(node_overrides);

    Ok(snapshot)
}

fn layout_slot_to_json(slot: &LayoutSlot) -> LayoutSlotJson {
    LayoutSlotJson {
        x: slot.x(),
        y: slot.y(),
        width: slot.width(),
        height: slot.height(),
        locked: slot.locked(),
    }
}

fn layout_slot_from_json(slot_json: LayoutSlotJson) -> LayoutSlot {
    let mut slot = LayoutSlot::new(slot_json.x, slot_json.y, slot_json.width, slot_json.height);
    slot.set_locked(slot_json.locked);
    slot
}

fn edge_to_json(edge: &Edge) -> EdgeJson {
    EdgeJson {
        id: edge.edge_id().to_string(),
        source: edge.source().to_string(),
        target: edge.target().to_string(),
        label: edge.label().map(ToOwned::to_owned),
        direction: Some(edge.direction().as_str().to_owned()),
        style: edge.style().map(ToOwned::to_owned),
    }
}

fn edge_from_json(edge_json: EdgeJson) -> Result<Edge, StoreError> {
    let edge_id = EdgeId::new(edge_json.id.clone()).map_err(|source| StoreError::InvalidId {
        field: "timeline.snapshots[].edges[].id",
        value: edge_json.id,
        source: Box::new(source),
    })?;
    let source_id =
        NodeId::new(edge_json.source.clone()).map_err(|source| StoreError::InvalidId {
            field: "timeline.snapshots[].edges[].source",
            value: edge_json.source,
            source: Box::new(source),
        })?;
    let target_id =
        NodeId::new(edge_json.target.clone()).map_err(|source| StoreError::InvalidId {
            field: "timeline.snapshots[].edges[].target",
            value: edge_json.target,
            source: Box::new(source),
        })?;

    // Unknown arrowhead styles from newer versions degrade to the default
    // rather than failing the whole document.
    let direction = match edge_json.direction.as_deref() {
        Some(raw) => raw.parse::<EdgeDirection>().unwrap_or_else(|_| {
            log::warn!("unknown edge direction, using forward (edge_id={edge_id}, value={raw:?})");
            EdgeDirection::default()
        }),
        None => EdgeDirection::default(),
    };

    let mut edge = Edge::new(edge_id, source_id, target_id);
    edge.set_label(edge_json.label);
    edge.set_direction(direction);
    edge.set_style(edge_json.style);
    Ok(edge)
}

fn group_to_json(group: &Group) -> GroupJson {
    GroupJson {
        id: group.group_id().to_string(),
        label: group.label().to_owned(),
        node_ids: group.node_ids().iter().map(ToString::to_string).collect(),
        color: group.color().map(ToOwned::to_owned),
    }
}

fn group_from_json(group_json: GroupJson) -> Result<Group, StoreError> {
    let group_id = GroupId::new(group_json.id.clone()).map_err(|source| StoreError::InvalidId {
        field: "timeline.snapshots[].groups[].id",
        value: group_json.id,
        source: Box::new(source),
    })?;

    let mut group = Group::new(group_id, group_json.label);
    *group.node_ids_mut() = group_json
        .node_ids
        .into_iter()
        .map(|value| {
            NodeId::new(value.clone()).map_err(|source| StoreError::InvalidId {
                field: "timeline.snapshots[].groups[].node_ids[]",
                value,
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    group.set_color(group_json.color);
    Ok(group)
}

fn annotation_to_json(annotation: &Annotation) -> AnnotationJson {
    AnnotationJson {
        id: annotation.annotation_id().to_string(),
        x: annotation.x(),
        y: annotation.y(),
        width: annotation.width(),
        height: annotation.height(),
        text: annotation.text().to_owned(),
        color: annotation.color().map(ToOwned::to_owned),
        font_size: annotation.font_size(),
    }
}

fn annotation_from_json(annotation_json: AnnotationJson) -> Result<Annotation, StoreError> {
    let annotation_id =
        AnnotationId::new(annotation_json.id.clone()).map_err(|source| StoreError::InvalidId {
            field: "timeline.snapshots[].annotations[].id",
            value: annotation_json.id,
            source: Box::new(source),
        })?;

    let mut annotation = Annotation::new(
        annotation_id,
        annotation_json.x,
        annotation_json.y,
        annotation_json.width,
        annotation_json.height,
        annotation_json.text,
    );
    annotation.set_color(annotation_json.color);
    annotation.set_font_size(annotation_json.font_size);
    Ok(annotation)
}

fn node_override_to_json(node_override: &NodeOverride) -> NodeOverrideJson {
    NodeOverrideJson {
        properties: properties_to_json(node_override.properties()),
        style: style_to_json(node_override.style()),
    }
}

fn node_override_from_json(override_json: NodeOverrideJson) -> NodeOverride {
    NodeOverride::new(
        properties_from_json(override_json.properties),
        style_from_json(override_json.style),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DiagramConfigJson {
    #[serde(default)]
    snap_to_grid: Option<bool>,
    #[serde(default)]
    grid_size: Option<u32>,
    #[serde(default)]
    evolution_labels: Option<Vec<String>>,
}

fn config_to_json(config: &DiagramConfig) -> DiagramConfigJson {
    DiagramConfigJson {
        snap_to_grid: Some(config.snap_to_grid()),
        grid_size: Some(config.grid_size()),
        evolution_labels: Some(config.evolution_labels().to_vec()),
    }
}

fn config_from_json(config_json: DiagramConfigJson) -> DiagramConfig {
    let mut config = DiagramConfig::default();
    if let Some(snap_to_grid) = config_json.snap_to_grid {
        config.set_snap_to_grid(snap_to_grid);
    }
    if let Some(grid_size) = config_json.grid_size {
        config.set_grid_size(grid_size);
    }
    if let Some(evolution_labels) = config_json.evolution_labels {
        config.set_evolution_labels(evolution_labels);
    }
    config
}

fn validate_relative_path(field: &'static str, path: &Path) -> Result<(), StoreError> {
    if path.as_os_str().is_empty() {
        return Err(StoreError::InvalidRelativePath {
            field,
            value: path.to_path_buf(),
        });
    }

    if path.is_absolute() {
        return Err(StoreError::InvalidRelativePath {
            field,
            value: path.to_path_buf(),
        });
    }

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => {
                return Err(StoreError::InvalidRelativePath {
                    field,
                    value: path.to_path_buf(),
                });
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

fn to_relative_path(
    folder_root: &Path,
    path: &Path,
    field: &'static str,
) -> Result<PathBuf, StoreError> {
    let relative = if path.is_absolute() {
        path.strip_prefix(folder_root)
            .map(PathBuf::from)
            .map_err(|_| StoreError::PathOutsideFolder {
                folder: folder_root.to_path_buf(),
                path: path.to_path_buf(),
            })?
    } else {
        path.to_path_buf()
    };

    validate_relative_path(field, &relative)?;
    Ok(relative)
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic_in_folder(
    folder_root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    fs::create_dir_all(folder_root).map_err(|source| StoreError::Io {
        path: folder_root.to_path_buf(),
        source,
    })?;

    to_relative_path(folder_root, path, "path")?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".proteus.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
