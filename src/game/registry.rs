//! Entity Registry
//!
//! The single shared container of live entities and the coordination
//! boundary around it. Every iterate, insert, mutate, and remove goes
//! through one method here, each of which is one critical section under
//! the registry lock; no caller ever sees the raw `Vec`.
//!
//! The render loop reads point-in-time [`snapshot`](EntityRegistry::snapshot)
//! clones, so a snapshot reflects only fully completed mutations. Marking an
//! entity dead ([`kill`](EntityRegistry::kill), done by motion tasks) and
//! removing it ([`sweep`](EntityRegistry::sweep), done by the garbage
//! collector) are separate serialized writes.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::trace;

use crate::game::entity::{Entity, EntityId, EntityKind};

/// Shared, mutation-synchronized collection of all live entities.
///
/// Cheap to clone; clones share the same underlying container.
#[derive(Clone, Default)]
pub struct EntityRegistry {
    entities: Arc<RwLock<Vec<Entity>>>,
    next_id: Arc<AtomicU32>,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, assigning and returning its id.
    pub async fn insert(&self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id.fetch_add(1, Ordering::Relaxed));
        entity.id = id;
        let mut entities = self.entities.write().await;
        entities.push(entity);
        trace!(?id, kind = ?entity.kind(), "entity inserted");
        id
    }

    /// Point-in-time copy of the registry contents, in insertion order.
    pub async fn snapshot(&self) -> Vec<Entity> {
        self.entities.read().await.clone()
    }

    /// Look up a single entity by id.
    pub async fn get(&self, id: EntityId) -> Option<Entity> {
        self.entities.read().await.iter().find(|e| e.id == id).copied()
    }

    /// Apply `f` to the entity with `id`, provided it exists and is alive.
    ///
    /// Returns whether `f` ran. Dead entities are never mutated; they are
    /// frozen until the garbage collector removes them.
    pub async fn update<F>(&self, id: EntityId, f: F) -> bool
    where
        F: FnOnce(&mut Entity),
    {
        let mut entities = self.entities.write().await;
        match entities.iter_mut().find(|e| e.id == id && e.alive) {
            Some(entity) => {
                f(entity);
                true
            }
            None => false,
        }
    }

    /// Mark the entity with `id` dead. One-way and idempotent.
    ///
    /// Returns whether the flag actually transitioned.
    pub async fn kill(&self, id: EntityId) -> bool {
        let mut entities = self.entities.write().await;
        match entities.iter_mut().find(|e| e.id == id && e.alive) {
            Some(entity) => {
                entity.alive = false;
                trace!(?id, "entity marked dead");
                true
            }
            None => false,
        }
    }

    /// Remove every dead entity, returning how many were dropped.
    pub async fn sweep(&self) -> usize {
        let mut entities = self.entities.write().await;
        let before = entities.len();
        entities.retain(|e| e.alive);
        before - entities.len()
    }

    /// Number of entities currently tracked (dead ones included until swept).
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    /// Whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    /// Number of tracked entities of the given kind.
    pub async fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities
            .read()
            .await
            .iter()
            .filter(|e| e.kind() == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::entity::AbilityMotion;

    fn ability_at(x: f64, y: f64) -> Entity {
        Entity::ability(AbilityMotion::new(
            Vec2::new(x, y),
            Vec2::new(1.0, 0.0),
            5.0,
        ))
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let registry = EntityRegistry::new();
        let a = registry.insert(Entity::bot(Vec2::ZERO)).await;
        let b = registry.insert(ability_at(1.0, 1.0)).await;
        assert!(b > a);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_snapshot_is_point_in_time() {
        let registry = EntityRegistry::new();
        registry.insert(Entity::bot(Vec2::ZERO)).await;
        let snap = registry.snapshot().await;
        registry.insert(ability_at(1.0, 1.0)).await;
        // The earlier snapshot must not see the later insert.
        assert_eq!(snap.len(), 1);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_skips_dead_entities() {
        let registry = EntityRegistry::new();
        let id = registry.insert(ability_at(0.0, 0.0)).await;

        assert!(registry.update(id, |e| e.position = Vec2::new(2.0, 0.0)).await);
        assert!(registry.kill(id).await);
        // Second kill is a no-op, and dead entities are frozen.
        assert!(!registry.kill(id).await);
        assert!(!registry.update(id, |e| e.position = Vec2::new(9.0, 9.0)).await);

        let entity = registry.get(id).await.unwrap();
        assert_eq!(entity.position, Vec2::new(2.0, 0.0));
        assert!(!entity.alive);
    }

    #[tokio::test]
    async fn test_sweep_removes_exactly_the_dead() {
        let registry = EntityRegistry::new();
        let bot = registry.insert(Entity::bot(Vec2::ZERO)).await;
        let dead = registry.insert(ability_at(1.0, 1.0)).await;
        let live = registry.insert(ability_at(2.0, 2.0)).await;
        registry.kill(dead).await;

        assert_eq!(registry.sweep().await, 1);

        let survivors: Vec<EntityId> =
            registry.snapshot().await.iter().map(|e| e.id).collect();
        assert_eq!(survivors, vec![bot, live]);

        // Nothing left to collect.
        assert_eq!(registry.sweep().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_all_recorded() {
        let registry = EntityRegistry::new();
        let mut handles = Vec::new();
        for i in 0..32 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.insert(ability_at(i as f64, 0.0)).await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 32);
        assert_eq!(registry.len().await, 32);
    }
}
