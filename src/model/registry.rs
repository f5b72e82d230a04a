// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;
use super::node::NodeDefinition;
use std::collections::BTreeMap;

/// The document-wide map of node definitions, shared by every snapshot.
///
/// Definitions accumulate: a node id entering any snapshot registers a
/// definition here, and dropping the id from every snapshot's layout does not
/// remove it. Unreferenced definitions are accepted as orphans rather than
/// garbage collected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRegistry {
    definitions: BTreeMap<NodeId, NodeDefinition>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definitions(&self) -> &BTreeMap<NodeId, NodeDefinition> {
        &self.definitions
    }

    pub fn definition(&self, node_id: &NodeId) -> Option<&NodeDefinition> {
        self.definitions.get(node_id)
    }

    pub fn definition_mut(&mut self, node_id: &NodeId) -> Option<&mut NodeDefinition> {
        self.definitions.get_mut(node_id)
    }

    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.definitions.contains_key(node_id)
    }

    /// Inserts or replaces, returning the previous definition if any.
    pub fn insert(&mut self, definition: NodeDefinition) -> Option<NodeDefinition> {
        self.definitions
            .insert(definition.node_id().clone(), definition)
    }

    /// Registers the definition only when its id is unknown, returning
    /// whether it was inserted. An existing definition is left as it is.
    pub fn insert_if_new(&mut self, definition: NodeDefinition) -> bool {
        if self.contains(definition.node_id()) {
            return false;
        }
        self.insert(definition);
        true
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::NodeRegistry;
    use crate::model::{NodeDefinition, NodeId, NodeKind, NodeProperties};

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn definition(id: &str, label: &str) -> NodeDefinition {
        NodeDefinition::new(nid(id), NodeKind::System, NodeProperties::new(label))
    }

    #[test]
    fn insert_registers_and_replaces_definitions() {
        let mut registry = NodeRegistry::new();

        assert!(registry.insert(definition("node-1", "Billing")).is_none());
        assert!(registry.contains(&nid("node-1")));
        assert_eq!(registry.len(), 1);

        let previous = registry
            .insert(definition("node-1", "Billing v2"))
            .expect("previous definition");
        assert_eq!(previous.properties().label(), "Billing");
        assert_eq!(
            registry
                .definition(&nid("node-1"))
                .map(|d| d.properties().label()),
            Some("Billing v2")
        );
    }

    #[test]
    fn insert_if_new_never_overwrites_an_existing_definition() {
        let mut registry = NodeRegistry::new();
        registry.insert(definition("node-1", "Billing"));

        assert!(!registry.insert_if_new(definition("node-1", "Renamed")));
        assert_eq!(
            registry
                .definition(&nid("node-1"))
                .map(|d| d.properties().label()),
            Some("Billing")
        );

        assert!(registry.insert_if_new(definition("node-2", "Ledger")));
        assert_eq!(registry.len(), 2);
    }
}
