//! Arena Configuration
//!
//! The handful of constants fixed at startup. No file or environment
//! configuration; callers build the struct (or take the defaults) before
//! the arena starts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What happens to an ability that travels off the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutOfBounds {
    /// Keep flying; the projectile exits through the board edge and expires
    /// on distance alone.
    #[default]
    Fly,
    /// Expire on the first step that leaves the board.
    Expire,
}

/// Startup constants for the arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Board width
    pub board_width: u32,
    /// Board height
    pub board_height: u32,
    /// Minimum time between successful casts
    pub cooldown: Duration,
    /// Distance an ability covers per motion tick
    pub step_length: f64,
    /// Interval between ability motion steps (decoupled from render cadence)
    pub ability_tick_interval: Duration,
    /// Interval between render frames
    pub render_tick_interval: Duration,
    /// Interval between garbage-collection passes
    pub gc_interval: Duration,
    /// Policy for abilities leaving the board
    pub out_of_bounds: OutOfBounds,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            board_width: 500,
            board_height: 500,
            cooldown: Duration::from_millis(3000),
            step_length: 1.0,
            ability_tick_interval: Duration::from_millis(100),
            // ~60 fps
            render_tick_interval: Duration::from_micros(16_667),
            gc_interval: Duration::from_micros(16_667),
            out_of_bounds: OutOfBounds::Fly,
        }
    }
}
