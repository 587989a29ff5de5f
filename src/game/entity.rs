//! Entity Model
//!
//! Everything tracked by the registry: the single Bot plus any in-flight
//! Abilities. Common fields (position, liveness) live on [`Entity`]; the
//! per-variant payload lives in [`Body`].
//!
//! Liveness is one-way: once `alive` goes false the entity is never mutated
//! again and the next garbage-collection pass removes it.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Registry-assigned entity identifier, monotonically increasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Render-facing entity discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The user-controlled bot
    Bot,
    /// A transient projectile spawned by a cast
    Ability,
}

/// Motion state of an in-flight ability.
///
/// `traveled` is monotonically non-decreasing; the ability expires when it
/// reaches `total_distance`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityMotion {
    /// Cast origin (the bot's position at cast time)
    pub origin: Vec2,
    /// Unit travel direction
    pub direction: Vec2,
    /// Distance from origin to the cast target
    pub total_distance: f64,
    /// Distance covered so far
    pub traveled: f64,
}

impl AbilityMotion {
    /// Motion state for a fresh cast from `origin` toward a target
    /// `total_distance` away along unit `direction`.
    pub fn new(origin: Vec2, direction: Vec2, total_distance: f64) -> Self {
        Self {
            origin,
            direction,
            total_distance,
            traveled: 0.0,
        }
    }
}

/// Variant payload of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Body {
    /// The bot carries no payload; its cooldown state belongs to the
    /// controller instance, not the entity record.
    Bot,
    /// Ability projectile with its motion state.
    Ability(AbilityMotion),
}

/// A registry entry: one live (or not-yet-collected) arena object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Registry-assigned id
    pub id: EntityId,
    /// Current position
    pub position: Vec2,
    /// Liveness flag; false entities are pruned by the next GC pass
    pub alive: bool,
    /// Variant payload
    pub body: Body,
}

impl Entity {
    /// Build a bot entity at `position`. Ids are assigned on insert.
    pub fn bot(position: Vec2) -> Self {
        Self {
            id: EntityId(0),
            position,
            alive: true,
            body: Body::Bot,
        }
    }

    /// Build a live ability entity at its cast origin.
    pub fn ability(motion: AbilityMotion) -> Self {
        Self {
            id: EntityId(0),
            position: motion.origin,
            alive: true,
            body: Body::Ability(motion),
        }
    }

    /// The render-facing kind of this entity.
    #[inline]
    pub fn kind(&self) -> EntityKind {
        match self.body {
            Body::Bot => EntityKind::Bot,
            Body::Ability(_) => EntityKind::Ability,
        }
    }
}
