//! Level table
//!
//! The fixed spawn configuration for every level, loadable from an
//! external RON file with fallback to the hardcoded defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Spawn counts for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub zombies: u32,
    pub bombs: u32,
}

/// The ordered level table, indexed by 1-based level number
///
/// Loaded once at startup and read-only for the rest of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTable {
    pub levels: Vec<LevelSpec>,
}

impl LevelTable {
    /// Load from assets/data/levels.ron, falling back to the built-in
    /// table when the file is missing or malformed
    pub fn load() -> Self {
        let path = Path::new("assets/data/levels.ron");
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match ron::from_str::<LevelTable>(&content) {
                    Ok(table) if !table.levels.is_empty() => return table,
                    Ok(_) => log::warn!("levels.ron is empty, using built-in table"),
                    Err(e) => log::warn!("Failed to parse levels.ron: {}", e),
                },
                Err(e) => log::warn!("Failed to read levels.ron: {}", e),
            }
        }
        Self::default()
    }

    /// Spec for a 1-based level number, None when past the table
    pub fn get(&self, level: u32) -> Option<LevelSpec> {
        if level == 0 {
            return None;
        }
        self.levels.get(level as usize - 1).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        default_level_table()
    }
}

/// The built-in 17-level campaign: zombies ramp up while bombs, the
/// player's only tool for thinning them, are taken away
pub fn default_level_table() -> LevelTable {
    let counts: [(u32, u32); 17] = [
        (1, 7),
        (2, 7),
        (3, 7),
        (3, 6),
        (4, 6),
        (5, 6),
        (6, 6),
        (7, 7),
        (7, 6),
        (7, 5),
        (7, 4),
        (7, 3),
        (7, 2),
        (7, 1),
        (7, 0),
        (8, 0),
        (9, 0),
    ];

    LevelTable {
        levels: counts
            .into_iter()
            .map(|(zombies, bombs)| LevelSpec { zombies, bombs })
            .collect(),
    }
}
