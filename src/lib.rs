// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus — snapshot timelines for architecture diagrams.
//!
//! A diagram document is a registry of node definitions shared by every
//! snapshot, plus a timeline of snapshots that each carry their own layout,
//! edges, and display overrides. [`engine`] merges a snapshot into a drawable
//! diagram and splits an edited diagram back; [`ops`] manages the snapshot
//! lifecycle; [`store`] persists the document pair on disk.

pub mod engine;
pub mod model;
pub mod ops;
pub mod store;
