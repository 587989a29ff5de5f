//! Ability Motion
//!
//! Per-cast projectile advancement: a two-state machine (Traveling until
//! the cast distance is covered, then Expired) driven by its own periodic
//! task. The motion cadence is independent of the render cadence, so
//! projectile speed is constant in real time regardless of frame rate.
//!
//! The step itself is a pure function over [`AbilityMotion`]; the task
//! publishes each step through the registry so every position update is
//! atomic with respect to render snapshots.

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, trace};

use crate::config::OutOfBounds;
use crate::core::shutdown::Shutdown;
use crate::core::vec2::Vec2;
use crate::game::board::Board;
use crate::game::entity::{AbilityMotion, Body, EntityId};
use crate::game::registry::EntityRegistry;

/// Outcome of one motion step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Still in flight
    Traveling,
    /// Terminal: the projectile covered its distance (or left the board
    /// under [`OutOfBounds::Expire`])
    Expired,
}

/// Position for a given motion state.
#[inline]
pub fn position_of(motion: &AbilityMotion) -> Vec2 {
    motion.origin.add(motion.direction.scale(motion.traveled))
}

/// Advance a projectile by one step.
///
/// `traveled` never decreases and never exceeds `total_distance`; the final
/// step lands exactly on the target point.
pub fn step(
    motion: &mut AbilityMotion,
    step_length: f64,
    board: &Board,
    policy: OutOfBounds,
) -> Step {
    motion.traveled = (motion.traveled + step_length).min(motion.total_distance);

    if motion.traveled >= motion.total_distance {
        return Step::Expired;
    }

    if policy == OutOfBounds::Expire {
        let pos = position_of(motion);
        if !board.contains(pos.x, pos.y) {
            return Step::Expired;
        }
    }

    Step::Traveling
}

/// Drive one ability until it expires, is killed externally, or the
/// shutdown signal fires.
///
/// Each tick applies [`step`] inside the registry's coordination boundary;
/// on expiry the task marks the entity dead and terminates. Removal is the
/// garbage collector's job.
pub async fn run_motion_task(
    registry: EntityRegistry,
    id: EntityId,
    board: Board,
    step_length: f64,
    tick_interval: Duration,
    policy: OutOfBounds,
    shutdown: Shutdown,
) {
    let mut ticker = interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stop = shutdown.subscribe();

    loop {
        // The flag covers tasks spawned after the signal already fired;
        // their receiver would never see the broadcast.
        if shutdown.is_triggered() {
            debug!(?id, "motion task cancelled by shutdown");
            return;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = stop.recv() => {
                debug!(?id, "motion task cancelled by shutdown");
                return;
            }
        }

        let mut outcome = None;
        let updated = registry
            .update(id, |entity| {
                if let Body::Ability(ref mut motion) = entity.body {
                    let result = step(motion, step_length, &board, policy);
                    entity.position = position_of(motion);
                    outcome = Some(result);
                }
            })
            .await;

        if !updated {
            // Killed or collected out from under us; nothing left to drive.
            debug!(?id, "motion task stopping, entity no longer live");
            return;
        }

        match outcome {
            Some(Step::Traveling) => {
                trace!(?id, "ability advanced");
            }
            Some(Step::Expired) | None => {
                registry.kill(id).await;
                debug!(?id, "ability expired");
                return;
            }
        }
    }
}
