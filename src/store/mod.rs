// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for diagram documents on disk.
//!
//! The store module reads/writes the document folder format (a `.nodes.json` /
//! `.graph.json` pair per document stem) shared with the canvas frontend.

pub mod diagram_folder;

pub use diagram_folder::{DiagramDocument, DiagramFolder, StoreError, WriteDurability};
