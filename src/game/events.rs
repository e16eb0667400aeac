//! Notifications toward the render collaborator
//!
//! The core pushes these into a buffer synchronously as it resolves a
//! move intent; the front-end drains the buffer afterwards. No game
//! logic ever depends on them.

use crate::entities::{EntityId, EntityKind};
use crate::grid::Position;

/// One notification from the simulation core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    EntitySpawned {
        id: EntityId,
        kind: EntityKind,
        position: Position,
    },
    EntityMoved {
        id: EntityId,
        kind: EntityKind,
        position: Position,
    },
    EntityDied {
        id: EntityId,
        kind: EntityKind,
    },
    BombExploded {
        id: EntityId,
        position: Position,
    },
    GameWon,
    GameLost,
    LevelChanged {
        level: u32,
    },
}
