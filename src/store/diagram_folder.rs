// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{
    Annotation, AnnotationId, DiagramConfig, Edge, EdgeDirection, EdgeId, Group, GroupId, IdError,
    KnowledgeItem, KnowledgeKind, LayoutSlot, NodeDefinition, NodeId, NodeKind, NodeLinks,
    NodeOverride, NodeProperties, NodeRegistry, NodeStyle, Snapshot, SnapshotId, Timeline,
};

const NODES_SCHEMA_VERSION: u32 = 2;
const GRAPH_SCHEMA_VERSION: u32 = 2;

const NODES_FILE_SUFFIX: &str = ".nodes.json";
const GRAPH_FILE_SUFFIX: &str = ".graph.json";

/// Errors from loading or saving diagram documents.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: Box<IdError>,
    },
    InvalidStem {
        value: String,
    },
    EmptyTimeline {
        path: PathBuf,
    },
    InvalidRelativePath {
        field: &'static str,
        value: PathBuf,
    },
    PathOutsideFolder {
        folder: PathBuf,
        path: PathBuf,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id for {field}: {value:?}: {source}"),
            Self::InvalidStem { value } => write!(f, "invalid document stem: {value:?}"),
            Self::EmptyTimeline { path } => {
                write!(f, "graph document has no snapshots: {path:?}")
            }
            Self::InvalidRelativePath { field, value } => {
                write!(f, "invalid relative path for {field}: {value:?}")
            }
            Self::PathOutsideFolder { folder, path } => write!(
                f,
                "path is outside document folder: folder={folder:?} path={path:?}"
            ),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::InvalidStem { .. } => None,
            Self::EmptyTimeline { .. } => None,
            Self::InvalidRelativePath { .. } => None,
            Self::PathOutsideFolder { .. } => None,
            Self::SymlinkRefused { .. } => None,
        }
    }
}

/// Everything one document stem persists: the shared node registry, the
/// snapshot timeline, and the canvas config.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramDocument {
    pub registry: NodeRegistry,
    pub timeline: Timeline,
    pub config: DiagramConfig,
}

#[derive(Debug, Clone)]
pub struct DiagramFolder {
    root: PathBuf,
    durability: WriteDurability,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

fn validate_stem(stem: &str) -> Result<(), StoreError> {
    if stem_is_safe(stem) {
        Ok(())
    } else {
        Err(StoreError::InvalidStem {
            value: stem.to_owned(),
        })
    }
}

fn stem_is_safe(stem: &str) -> bool {
    if stem.is_empty() || stem == "." || stem == ".." {
        return false;
    }
    if stem.starts_with('~') || stem.ends_with(' ') || stem.ends_with('.') {
        return false;
    }

    let base = stem.split('.').next().unwrap_or(stem);
    if is_windows_device_name(base) {
        return false;
    }

    for ch in stem.chars() {
        if matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
            return false;
        }
        if ch <= '\u{1f}' || ch == '\u{7f}' {
            return false;
        }
    }

    true
}

fn is_windows_device_name(base: &str) -> bool {
    let base = base.to_ascii_uppercase();
    match base.as_str() {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        _ => {
            if let Some(num) = base.strip_prefix("COM") {
                matches!(num, "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9")
            } else if let Some(num) = base.strip_prefix("LPT") {
                matches!(num, "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9")
            } else {
                false
            }
        }
    }
}

impl DiagramFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn nodes_path(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{stem}{NODES_FILE_SUFFIX}"))
    }

    pub fn graph_path(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{stem}{GRAPH_FILE_SUFFIX}"))
    }

    /// Whether a document with this stem exists. The graph file is the marker;
    /// a nodes file on its own is not a document.
    pub fn exists(&self, stem: &str) -> bool {
        stem_is_safe(stem) && self.graph_path(stem).is_file()
    }

    /// Stems of all documents in the folder, sorted. A missing folder is an
    /// empty folder.
    pub fn list_stems(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(self.root()) {
            Ok(entries) => entries,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut stems = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(stem) = name.strip_suffix(GRAPH_FILE_SUFFIX) else {
                continue;
            };
            if stem_is_safe(stem) && entry.path().is_file() {
                stems.push(stem.to_owned());
            }
        }

        stems.sort();
        Ok(stems)
    }

    /// Loads the document pair for `stem`.
    ///
    /// The graph document is read first; its `metadata.node_file` reference
    /// (validated as a relative path inside the folder) locates the nodes
    /// document. Documents with a newer schema version load best-effort with a
    /// warning. Version `1` graph documents carry snapshots without
    /// `node_overrides`; those load with the override map absent so merge
    /// falls back to registry definitions.
    pub fn load_pair(&self, stem: &str) -> Result<DiagramDocument, StoreError> {
        validate_stem(stem)?;

        let graph_path = self.graph_path(stem);
        let graph_str = fs::read_to_string(&graph_path).map_err(|source| StoreError::Io {
            path: graph_path.clone(),
            source,
        })?;
        let graph_json: GraphDocumentJson =
            serde_json::from_str(&graph_str).map_err(|source| StoreError::Json {
                path: graph_path.clone(),
                source,
            })?;

        if graph_json.version > GRAPH_SCHEMA_VERSION {
            log::warn!(
                "graph document has newer schema version (path={graph_path:?}, version={}, supported={GRAPH_SCHEMA_VERSION}), loading best-effort",
                graph_json.version
            );
        }

        let nodes_path = match graph_json.metadata.node_file.as_deref() {
            Some(node_file) => {
                let relative = PathBuf::from(node_file);
                validate_relative_path("metadata.node_file", &relative)?;
                self.root.join(relative)
            }
            None => self.nodes_path(stem),
        };

        let nodes_str = fs::read_to_string(&nodes_path).map_err(|source| StoreError::Io {
            path: nodes_path.clone(),
            source,
        })?;
        let nodes_json: NodesDocumentJson =
            serde_json::from_str(&nodes_str).map_err(|source| StoreError::Json {
                path: nodes_path.clone(),
                source,
            })?;

        if nodes_json.version > NODES_SCHEMA_VERSION {
            log::warn!(
                "nodes document has newer schema version (path={nodes_path:?}, version={}, supported={NODES_SCHEMA_VERSION}), loading best-effort",
                nodes_json.version
            );
        }

        let registry = registry_from_json(nodes_json.nodes)?;
        let timeline = timeline_from_json(&graph_path, graph_json.timeline)?;
        let config = graph_json.config.map(config_from_json).unwrap_or_default();

        Ok(DiagramDocument {
            registry,
            timeline,
            config,
        })
    }

    /// Writes both documents of `stem` wholesale, atomically (temp file plus
    /// rename). The nodes document lands first so a graph document on disk
    /// never references a nodes file that is not there yet.
    pub fn save_pair(&self, stem: &str, document: &DiagramDocument) -> Result<(), StoreError> {
        #[derive(Debug, Default, Deserialize)]
        struct ExistingMetaJson {
            #[serde(default)]
            metadata: ExistingMetaFieldsJson,
        }

        #[derive(Debug, Default, Deserialize)]
        struct ExistingMetaFieldsJson {
            #[serde(default)]
            created_ms: Option<u64>,
        }

        validate_stem(stem)?;

        let nodes_path = self.nodes_path(stem);
        let graph_path = self.graph_path(stem);

        let read_created_ms = |path: &Path| -> Option<u64> {
            let existing_str = fs::read_to_string(path).ok()?;
            let existing: ExistingMetaJson = serde_json::from_str(&existing_str).ok()?;
            existing.metadata.created_ms
        };

        let modified_ms = now_ms();
        let created_ms = read_created_ms(&graph_path).unwrap_or(modified_ms);

        let nodes_json = NodesDocumentJson {
            version: NODES_SCHEMA_VERSION,
            metadata: DocumentMetaJson {
                name: stem.to_owned(),
                created_ms,
                modified_ms,
            },
            nodes: registry_to_json(&document.registry),
        };
        write_document_json(self.root(), &nodes_path, &nodes_json, self.durability)?;

        let graph_json = GraphDocumentJson {
            version: GRAPH_SCHEMA_VERSION,
            metadata: GraphMetaJson {
                name: stem.to_owned(),
                node_file: Some(format!("{stem}{NODES_FILE_SUFFIX}")),
                created_ms,
                modified_ms,
            },
            timeline: timeline_to_json(&document.timeline),
            config: Some(config_to_json(&document.config)),
        };
        write_document_json(self.root(), &graph_path, &graph_json, self.durability)?;

        Ok(())
    }
}

// Extracted serialization and filesystem helpers for `DiagramFolder`.
include!("diagram_folder/helpers.rs");
