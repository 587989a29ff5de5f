//! Garbage Collector
//!
//! Periodic pruning of dead entities. Motion tasks only mark entities dead;
//! this loop is the only place they are removed, so "mark dead" and
//! "remove" are separate serialized steps through the registry lock.

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

use crate::core::shutdown::Shutdown;
use crate::game::registry::EntityRegistry;

/// Run the collector until the shutdown signal fires.
///
/// Each pass is a single [`EntityRegistry::sweep`], i.e. one critical
/// section under the same boundary as every writer.
pub async fn run_gc_loop(
    registry: EntityRegistry,
    pass_interval: Duration,
    shutdown: Shutdown,
) {
    let mut ticker = interval(pass_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stop = shutdown.subscribe();

    loop {
        if shutdown.is_triggered() {
            debug!("garbage collector stopping");
            return;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = stop.recv() => {
                debug!("garbage collector stopping");
                return;
            }
        }

        let removed = registry.sweep().await;
        if removed > 0 {
            debug!(removed, "collected dead entities");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::entity::{AbilityMotion, Entity};

    fn ability() -> Entity {
        Entity::ability(AbilityMotion::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 5.0))
    }

    #[tokio::test(start_paused = true)]
    async fn test_gc_loop_prunes_dead_entities() {
        let registry = EntityRegistry::new();
        let bot = registry.insert(Entity::bot(Vec2::ZERO)).await;
        let doomed = registry.insert(ability()).await;
        let live = registry.insert(ability()).await;
        registry.kill(doomed).await;

        let shutdown = Shutdown::new();
        let handle = tokio::spawn(run_gc_loop(
            registry.clone(),
            Duration::from_millis(17),
            shutdown.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.trigger();
        handle.await.unwrap();

        let survivors: Vec<_> = registry.snapshot().await.iter().map(|e| e.id).collect();
        assert_eq!(survivors, vec![bot, live]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gc_loop_leaves_live_entities_alone() {
        let registry = EntityRegistry::new();
        registry.insert(Entity::bot(Vec2::ZERO)).await;
        registry.insert(ability()).await;

        let shutdown = Shutdown::new();
        let handle = tokio::spawn(run_gc_loop(
            registry.clone(),
            Duration::from_millis(17),
            shutdown.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.trigger();
        handle.await.unwrap();

        assert_eq!(registry.len().await, 2);
    }
}
