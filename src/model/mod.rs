// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A document is a node registry (shared definitions) plus a timeline of
//! snapshots (per-version layout, edges, annotations and property overrides).

pub mod config;
pub mod diagram;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod kind;
pub mod node;
pub mod registry;
pub mod snapshot;
pub mod timeline;

pub use config::DiagramConfig;
pub use diagram::{Diagram, DiagramNode};
pub use ids::{AnnotationId, EdgeId, GroupId, Id, IdError, NodeId, SnapshotId};
pub use kind::{DiagramKind, NodeKind, ParseDiagramKindError, ParseNodeKindError};
pub use node::{
    KnowledgeItem, KnowledgeKind, NodeDefinition, NodeLinks, NodeProperties, NodeStyle,
    ParseKnowledgeKindError,
};
pub use registry::NodeRegistry;
pub use snapshot::{
    Annotation, Edge, EdgeDirection, Group, LayoutSlot, NodeOverride, ParseEdgeDirectionError,
    Snapshot,
};
pub use timeline::Timeline;
