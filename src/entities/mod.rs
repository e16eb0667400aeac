//! Entity model
//!
//! Every occupant of the grid is a flat record with a kind tag.
//! Kind-specific behavior is dispatched by matching on the tag rather
//! than through any inheritance-style machinery.

use crate::grid::Position;

/// Unique id for an entity within one game session
pub type EntityId = u64;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Home,
    Zombie,
    Bomb,
}

impl EntityKind {
    /// Display name for logs and messages
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Home => "home",
            EntityKind::Zombie => "zombie",
            EntityKind::Bomb => "bomb",
        }
    }
}

/// A single occupant of the grid
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub alive: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            alive: true,
        }
    }

    /// Exact cell equality: the sole collision predicate, no distance
    /// threshold of any kind
    pub fn touches(&self, other: &Entity) -> bool {
        self.position == other.position
    }
}
