// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// The diagram level a snapshot timeline describes.
///
/// The C4 levels nest (`Context` down to `Code`); `Wardley` is a sibling map
/// type sharing the same node/snapshot machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    Context,
    Container,
    Component,
    Code,
    Wardley,
}

impl DiagramKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Container => "container",
            Self::Component => "component",
            Self::Code => "code",
            Self::Wardley => "wardley",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagramKindError;

impl fmt::Display for ParseDiagramKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid diagram kind")
    }
}

impl std::error::Error for ParseDiagramKindError {}

impl FromStr for DiagramKind {
    type Err = ParseDiagramKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "context" => Ok(Self::Context),
            "container" => Ok(Self::Container),
            "component" => Ok(Self::Component),
            "code" => Ok(Self::Code),
            "wardley" => Ok(Self::Wardley),
            _ => Err(ParseDiagramKindError),
        }
    }
}

/// The capability tag of a node definition.
///
/// This is a closed set; the UI drives rendering and drill-down from the two
/// tables below instead of comparing tag strings at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Person,
    System,
    Container,
    Component,
    Code,
    Market,
    Organisation,
    Capability,
}

impl NodeKind {
    /// Diagram kinds this node kind may appear on.
    ///
    /// C4 kinds also appear one level below their home diagram: a system is
    /// drawn on a container diagram as the context around its containers, and
    /// so on down the nesting.
    pub fn allowed_diagrams(self) -> &'static [DiagramKind] {
        match self {
            Self::Person => &[DiagramKind::Context, DiagramKind::Container],
            Self::System => &[DiagramKind::Context, DiagramKind::Container],
            Self::Container => &[DiagramKind::Container, DiagramKind::Component],
            Self::Component => &[DiagramKind::Component, DiagramKind::Code],
            Self::Code => &[DiagramKind::Code],
            Self::Market => &[DiagramKind::Wardley],
            Self::Organisation => &[DiagramKind::Wardley],
            Self::Capability => &[DiagramKind::Wardley],
        }
    }

    /// The diagram kind a drill-down from this node opens, if any.
    ///
    /// A Wardley capability decomposes into the containers implementing it;
    /// leaf kinds have no child diagram.
    pub fn child_diagram(self) -> Option<DiagramKind> {
        match self {
            Self::System => Some(DiagramKind::Container),
            Self::Container => Some(DiagramKind::Component),
            Self::Component => Some(DiagramKind::Code),
            Self::Capability => Some(DiagramKind::Container),
            Self::Person | Self::Code | Self::Market | Self::Organisation => None,
        }
    }

    pub fn allows_diagram(self, diagram: DiagramKind) -> bool {
        self.allowed_diagrams().contains(&diagram)
    }

    pub fn all() -> &'static [NodeKind] {
        &[
            Self::Person,
            Self::System,
            Self::Container,
            Self::Component,
            Self::Code,
            Self::Market,
            Self::Organisation,
            Self::Capability,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::System => "system",
            Self::Container => "container",
            Self::Component => "component",
            Self::Code => "code",
            Self::Market => "market",
            Self::Organisation => "organisation",
            Self::Capability => "capability",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeKindError;

impl fmt::Display for ParseNodeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid node kind")
    }
}

impl std::error::Error for ParseNodeKindError {}

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person" => Ok(Self::Person),
            "system" => Ok(Self::System),
            "container" => Ok(Self::Container),
            "component" => Ok(Self::Component),
            "code" => Ok(Self::Code),
            "market" => Ok(Self::Market),
            "organisation" => Ok(Self::Organisation),
            "capability" => Ok(Self::Capability),
            _ => Err(ParseNodeKindError),
        }
    }
}
