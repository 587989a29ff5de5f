//! Game Logic Module
//!
//! The entity lifecycle: board geometry, the shared registry, the bot
//! controller, ability motion, and garbage collection.
//!
//! ## Module Structure
//!
//! - `board`: bounds and containment
//! - `entity`: entity model (bot + abilities)
//! - `registry`: the shared, mutation-synchronized entity container
//! - `bot`: movement validation and the cooldown-gated cast
//! - `motion`: per-cast projectile advancement
//! - `gc`: periodic removal of dead entities

pub mod board;
pub mod bot;
pub mod entity;
pub mod gc;
pub mod motion;
pub mod registry;

// Re-export key types
pub use board::Board;
pub use bot::{BotController, CastOutcome, CoordinateError};
pub use entity::{Entity, EntityId, EntityKind};
pub use registry::EntityRegistry;
