// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Editor settings persisted alongside the timeline in the graph document.
///
/// Documents written before the config existed omit it entirely; loading
/// falls back to `DiagramConfig::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    snap_to_grid: bool,
    grid_size: u32,
    evolution_labels: Vec<String>,
}

impl DiagramConfig {
    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn set_snap_to_grid(&mut self, snap_to_grid: bool) {
        self.snap_to_grid = snap_to_grid;
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn set_grid_size(&mut self, grid_size: u32) {
        self.grid_size = grid_size;
    }

    /// Labels for the wardley evolution axis, left to right.
    pub fn evolution_labels(&self) -> &[String] {
        &self.evolution_labels
    }

    pub fn set_evolution_labels(&mut self, evolution_labels: Vec<String>) {
        self.evolution_labels = evolution_labels;
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            grid_size: 20,
            evolution_labels: vec![
                "Genesis".to_owned(),
                "Custom Built".to_owned(),
                "Product".to_owned(),
                "Commodity".to_owned(),
            ],
        }
    }
}
