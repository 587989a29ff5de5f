//! Bot Controller
//!
//! Owns the single bot's cooldown state and validates every movement and
//! cast against the board before anything touches the registry. Position
//! itself lives on the bot's registry entry so the render loop sees it
//! through the same coordination boundary as everything else.
//!
//! Cooldown state is per controller instance. A rejected cast while the
//! cooldown is running is a silent no-op, not an error.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::config::{ArenaConfig, OutOfBounds};
use crate::core::shutdown::Shutdown;
use crate::core::vec2::Vec2;
use crate::game::board::Board;
use crate::game::entity::{AbilityMotion, Entity, EntityId};
use crate::game::motion::run_motion_task;
use crate::game::registry::EntityRegistry;

/// A requested move, translation, or cast target fell outside the board.
///
/// Recoverable: the bot's state is untouched and the caller may retry with
/// a valid coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// `move_to` target outside the board
    #[error("movement target ({x:.1}, {y:.1}) is outside the board")]
    Move {
        /// Rejected x
        x: f64,
        /// Rejected y
        y: f64,
    },
    /// `translate` result outside the board
    #[error("translation target ({x:.1}, {y:.1}) is outside the board")]
    Translate {
        /// Rejected x
        x: f64,
        /// Rejected y
        y: f64,
    },
    /// `cast` target outside the board
    #[error("ability target ({x:.1}, {y:.1}) is outside the board")]
    Cast {
        /// Rejected x
        x: f64,
        /// Rejected y
        y: f64,
    },
}

/// Result of a valid (in-bounds) cast request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOutcome {
    /// A projectile was spawned and its motion task started.
    Cast(EntityId),
    /// The target was the bot's own position: the ability was created
    /// already expired, no motion task.
    Fizzled(EntityId),
    /// The cooldown gate was closed. Nothing was created or changed.
    OnCooldown,
    /// The arena is shutting down. Nothing was created or changed.
    ShuttingDown,
}

/// Controller for the single bot.
pub struct BotController {
    board: Board,
    registry: EntityRegistry,
    bot_id: EntityId,
    cooldown: Duration,
    /// `None` until the first successful cast, so a cast is always
    /// permitted at startup.
    last_cast: Mutex<Option<Instant>>,
    step_length: f64,
    ability_tick_interval: Duration,
    out_of_bounds: OutOfBounds,
    /// Motion tasks spawned by casts; drained on shutdown.
    tasks: Arc<Mutex<JoinSet<()>>>,
    shutdown: Shutdown,
}

impl BotController {
    /// Wire a controller to the bot entity with `bot_id`.
    pub fn new(
        board: Board,
        registry: EntityRegistry,
        bot_id: EntityId,
        config: &ArenaConfig,
        tasks: Arc<Mutex<JoinSet<()>>>,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            board,
            registry,
            bot_id,
            cooldown: config.cooldown,
            last_cast: Mutex::new(None),
            step_length: config.step_length,
            ability_tick_interval: config.ability_tick_interval,
            out_of_bounds: config.out_of_bounds,
            tasks,
            shutdown,
        }
    }

    /// Registry id of the bot entity.
    pub fn bot_id(&self) -> EntityId {
        self.bot_id
    }

    /// The bot's current position.
    pub async fn position(&self) -> Vec2 {
        match self.registry.get(self.bot_id).await {
            Some(entity) => entity.position,
            None => {
                // The bot lives for the process duration; reaching this
                // branch means the controller was wired to a nonexistent
                // entity, which is a programming defect.
                debug_assert!(false, "bot entity missing from registry");
                error!(id = ?self.bot_id, "bot entity missing from registry");
                Vec2::ZERO
            }
        }
    }

    /// Teleport the bot to exactly `(x, y)`.
    pub async fn move_to(&self, x: f64, y: f64) -> Result<(), CoordinateError> {
        if !self.board.contains(x, y) {
            return Err(CoordinateError::Move { x, y });
        }
        self.registry
            .update(self.bot_id, |e| e.position = Vec2::new(x, y))
            .await;
        debug!(x, y, "bot moved");
        Ok(())
    }

    /// Shift the bot by `(dx, dy)`, rejecting the whole step if the result
    /// leaves the board.
    ///
    /// Validation and the position write happen in one registry critical
    /// section, so the position is never left partially updated.
    pub async fn translate(&self, dx: f64, dy: f64) -> Result<Vec2, CoordinateError> {
        let board = self.board;
        let mut result = None;
        self.registry
            .update(self.bot_id, |e| {
                let new = Vec2::new(e.position.x + dx, e.position.y + dy);
                if board.contains(new.x, new.y) {
                    e.position = new;
                    result = Some(Ok(new));
                } else {
                    result = Some(Err(CoordinateError::Translate { x: new.x, y: new.y }));
                }
            })
            .await;
        match result {
            Some(Ok(new)) => {
                debug!(x = new.x, y = new.y, "bot translated");
                Ok(new)
            }
            Some(err) => err,
            None => {
                // Same wiring defect as in `position`; never a live-path
                // outcome, and the fallback reuses the current position so
                // the error payload is a real coordinate, not a raw delta.
                debug_assert!(false, "bot entity missing from registry");
                error!(id = ?self.bot_id, "bot entity missing from registry");
                let at = self.position().await;
                Err(CoordinateError::Translate {
                    x: at.x + dx,
                    y: at.y + dy,
                })
            }
        }
    }

    /// Cast the ability toward `(x, y)`.
    ///
    /// Out-of-bounds targets are a [`CoordinateError`]; a closed cooldown
    /// gate is [`CastOutcome::OnCooldown`] with no observable state change;
    /// a cast at the bot's own position is [`CastOutcome::Fizzled`].
    pub async fn cast(&self, x: f64, y: f64) -> Result<CastOutcome, CoordinateError> {
        if !self.board.contains(x, y) {
            return Err(CoordinateError::Cast { x, y });
        }

        // No new projectiles once shutdown has fired; a task spawned now
        // would outlive the signal it is supposed to observe.
        if self.shutdown.is_triggered() {
            debug!(x, y, "cast ignored, arena shutting down");
            return Ok(CastOutcome::ShuttingDown);
        }

        // Hold the gate for the whole spawn so two racing casts cannot
        // both pass it.
        let mut last_cast = self.last_cast.lock().await;
        let now = Instant::now();
        if let Some(last) = *last_cast {
            if now.duration_since(last) < self.cooldown {
                debug!(x, y, "cast ignored, cooldown active");
                return Ok(CastOutcome::OnCooldown);
            }
        }
        *last_cast = Some(now);

        let origin = self.position().await;
        let target = Vec2::new(x, y);

        let Some(direction) = target.sub(origin).normalize() else {
            // Zero-length cast: spawn it already expired rather than
            // dividing by zero.
            let mut entity = Entity::ability(AbilityMotion::new(origin, Vec2::ZERO, 0.0));
            entity.alive = false;
            let id = self.registry.insert(entity).await;
            debug!(?id, "zero-length cast fizzled");
            return Ok(CastOutcome::Fizzled(id));
        };

        let total_distance = target.distance(origin);
        let motion = AbilityMotion::new(origin, direction, total_distance);
        let id = self.registry.insert(Entity::ability(motion)).await;

        self.tasks.lock().await.spawn(run_motion_task(
            self.registry.clone(),
            id,
            self.board,
            self.step_length,
            self.ability_tick_interval,
            self.out_of_bounds,
            self.shutdown.clone(),
        ));

        info!(?id, origin = %origin, target = %target, total_distance, "ability cast");
        Ok(CastOutcome::Cast(id))
    }
}
