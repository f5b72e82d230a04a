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

use super::ids::NodeId;
use super::kind::NodeKind;

/// Snapshot-independent identity and semantics of a node.
///
/// One definition exists per node id for the lifetime of the document.
/// Snapshots reference definitions through their layout maps; a definition is
/// never deleted when the last layout entry pointing at it goes away, so a
/// re-added id recovers its knowledge, metrics, and links intact.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefinition {
    node_id: NodeId,
    kind: NodeKind,
    properties: NodeProperties,
    knowledge: Vec<KnowledgeItem>,
    metrics: BTreeMap<String, f64>,
    links: NodeLinks,
    style: NodeStyle,
}

impl NodeDefinition {
    pub fn new(node_id: NodeId, kind: NodeKind, properties: NodeProperties) -> Self {
        Self {
            node_id,
            kind,
            properties,
            knowledge: Vec::new(),
            metrics: BTreeMap::new(),
            links: NodeLinks::default(),
            style: NodeStyle::default(),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn properties(&self) -> &NodeProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut NodeProperties {
        &mut self.properties
    }

    pub fn set_properties(&mut self, properties: NodeProperties) {
        self.properties = properties;
    }

    pub fn knowledge(&self) -> &[KnowledgeItem] {
        &self.knowledge
    }

    pub fn knowledge_mut(&mut self) -> &mut Vec<KnowledgeItem> {
        &mut self.knowledge
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut BTreeMap<String, f64> {
        &mut self.metrics
    }

    pub fn links(&self) -> &NodeLinks {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut NodeLinks {
        &mut self.links
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

/// Free-form semantic metadata shared by definitions and overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeProperties {
    label: String,
    description: Option<String>,
    technology: Option<String>,
    team: Option<String>,
    status: Option<String>,
}

impl NodeProperties {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            technology: None,
            team: None,
            status: None,
        }
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

    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }

    pub fn set_technology<T: Into<String>>(&mut self, technology: Option<T>) {
        self.technology = technology.map(Into::into);
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    pub fn set_team<T: Into<String>>(&mut self, team: Option<T>) {
        self.team = team.map(Into::into);
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status<T: Into<String>>(&mut self, status: Option<T>) {
        self.status = status.map(Into::into);
    }
}

/// Visual defaults on the definition; only consulted when a snapshot carries
/// no override for the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStyle {
    color: Option<String>,
    icon: Option<String>,
    shape: Option<String>,
}

impl NodeStyle {
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.color = color.map(Into::into);
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon<T: Into<String>>(&mut self, icon: Option<T>) {
        self.icon = icon.map(Into::into);
    }

    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    pub fn set_shape<T: Into<String>>(&mut self, shape: Option<T>) {
        self.shape = shape.map(Into::into);
    }
}

/// One attached note, url, or vault attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeItem {
    kind: KnowledgeKind,
    title: String,
    body: String,
}

impl KnowledgeItem {
    pub fn new(kind: KnowledgeKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn kind(&self) -> KnowledgeKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnowledgeKind {
    Note,
    Url,
    Attachment,
}

impl KnowledgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Url => "url",
            Self::Attachment => "attachment",
        }
    }
}

impl fmt::Display for KnowledgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKnowledgeKindError;

impl fmt::Display for ParseKnowledgeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid knowledge kind")
    }
}

impl std::error::Error for ParseKnowledgeKindError {}

impl FromStr for KnowledgeKind {
    type Err = ParseKnowledgeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(Self::Note),
            "url" => Ok(Self::Url),
            "attachment" => Ok(Self::Attachment),
            _ => Err(ParseKnowledgeKindError),
        }
    }
}

/// Structural relations of a definition to the rest of the vault.
///
/// `diagrams` and `external_systems` hold host-vault paths and are treated as
/// opaque strings here; resolving them is the host's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeLinks {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    diagrams: Vec<String>,
    external_systems: Vec<String>,
    dependencies: Vec<NodeId>,
}

impl NodeLinks {
    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }

    pub fn diagrams(&self) -> &[String] {
        &self.diagrams
    }

    pub fn diagrams_mut(&mut self) -> &mut Vec<String> {
        &mut self.diagrams
    }

    pub fn external_systems(&self) -> &[String] {
        &self.external_systems
    }

    pub fn external_systems_mut(&mut self) -> &mut Vec<String> {
        &mut self.external_systems
    }

    pub fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.dependencies
    }
}
