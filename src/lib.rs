//! # Bot Arena
//!
//! Minimal real-time arena: a single controllable bot on a bounded board,
//! a cooldown-gated point-projectile ability, and a fixed-cadence render
//! loop over a shared entity registry.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        BOT ARENA                           │
//! ├────────────────────────────────────────────────────────────┤
//! │  core/           - Leaf primitives                         │
//! │  ├── vec2.rs     - Float 2D vector                         │
//! │  └── shutdown.rs - Level-triggered stop signal             │
//! │                                                            │
//! │  game/           - Entity lifecycle                        │
//! │  ├── board.rs    - Bounds and containment                  │
//! │  ├── entity.rs   - Bot + ability entity model              │
//! │  ├── registry.rs - Shared, lock-guarded entity container   │
//! │  ├── bot.rs      - Movement + cooldown-gated casting       │
//! │  ├── motion.rs   - Per-cast projectile tasks               │
//! │  └── gc.rs       - Periodic dead-entity removal            │
//! │                                                            │
//! │  render/         - Render loop + collaborator trait        │
//! │  input/          - Input event dispatch                    │
//! │  arena.rs        - Assembly, run, shutdown                 │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! The registry is the single shared resource. Every iterate, insert,
//! mutate, and remove runs inside one critical section behind its lock;
//! the render loop reads point-in-time snapshots, so a frame never sees a
//! half-applied update. Motion tasks mark entities dead; only the garbage
//! collector removes them. All periodic tasks observe one level-triggered
//! shutdown signal and are joined on the way out; the task set is swapped
//! out of its lock before joining so a draining task can never deadlock
//! against one still spawning.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod core;
pub mod game;
pub mod input;
pub mod render;

// Re-export commonly used types
pub use arena::Arena;
pub use config::{ArenaConfig, OutOfBounds};
pub use core::shutdown::Shutdown;
pub use core::vec2::Vec2;
pub use game::board::Board;
pub use game::bot::{BotController, CastOutcome, CoordinateError};
pub use game::entity::{Entity, EntityId, EntityKind};
pub use game::registry::EntityRegistry;
pub use input::InputEvent;
pub use render::Renderer;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render frame rate (Hz)
pub const RENDER_RATE: u32 = 60;
