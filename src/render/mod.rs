//! Rendering
//!
//! The render loop and the collaborator boundary it draws through.
//! Window/surface creation and pixel-level drawing stay behind the
//! [`Renderer`] trait; this crate ships a console backend for headless runs.

pub mod console;

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

use crate::core::shutdown::Shutdown;
use crate::game::board::Board;
use crate::game::entity::{Entity, EntityKind};
use crate::game::registry::EntityRegistry;

pub use console::ConsoleRenderer;

/// Drawing collaborator consumed by the render loop.
///
/// Completion is all that matters; no call returns a value.
pub trait Renderer: Send {
    /// Draw the board background.
    fn draw_board(&mut self, board: &Board);
    /// Draw one entity glyph at its position.
    fn draw_entity(&mut self, kind: EntityKind, x: f64, y: f64);
    /// Present the completed frame.
    fn present_frame(&mut self);
}

/// Draw one frame from a registry snapshot.
///
/// Board first, then every entity in snapshot order, then present.
pub fn render_frame(renderer: &mut dyn Renderer, board: &Board, snapshot: &[Entity]) {
    renderer.draw_board(board);
    for entity in snapshot {
        renderer.draw_entity(entity.kind(), entity.position.x, entity.position.y);
    }
    renderer.present_frame();
}

/// Periodic render loop.
pub struct RenderLoop {
    board: Board,
    registry: EntityRegistry,
    renderer: Box<dyn Renderer>,
    frame_interval: Duration,
}

impl RenderLoop {
    /// Build a loop drawing `registry` through `renderer`.
    pub fn new(
        board: Board,
        registry: EntityRegistry,
        renderer: Box<dyn Renderer>,
        frame_interval: Duration,
    ) -> Self {
        Self {
            board,
            registry,
            renderer,
            frame_interval,
        }
    }

    /// Run until the shutdown signal fires.
    ///
    /// Each tick takes a point-in-time snapshot and draws it; the loop
    /// never blocks on other tasks beyond acquiring that snapshot.
    pub async fn run(mut self, shutdown: Shutdown) {
        let mut ticker = interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut stop = shutdown.subscribe();

        loop {
            if shutdown.is_triggered() {
                debug!("render loop stopping");
                return;
            }

            tokio::select! {
                _ = ticker.tick() => {}
                _ = stop.recv() => {
                    debug!("render loop stopping");
                    return;
                }
            }

            let snapshot = self.registry.snapshot().await;
            render_frame(self.renderer.as_mut(), &self.board, &snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::entity::AbilityMotion;

    /// Records the call sequence for assertions.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn draw_board(&mut self, board: &Board) {
            self.calls.push(format!("board {}x{}", board.width(), board.height()));
        }
        fn draw_entity(&mut self, kind: EntityKind, x: f64, y: f64) {
            self.calls.push(format!("{kind:?} at ({x}, {y})"));
        }
        fn present_frame(&mut self) {
            self.calls.push("present".into());
        }
    }

    #[tokio::test]
    async fn test_render_frame_draws_board_entities_present() {
        let board = Board::new(500, 500).unwrap();
        let registry = EntityRegistry::new();
        registry.insert(Entity::bot(Vec2::new(10.0, 20.0))).await;
        registry
            .insert(Entity::ability(AbilityMotion::new(
                Vec2::new(30.0, 40.0),
                Vec2::new(1.0, 0.0),
                5.0,
            )))
            .await;

        let mut renderer = RecordingRenderer::default();
        let snapshot = registry.snapshot().await;
        render_frame(&mut renderer, &board, &snapshot);

        assert_eq!(
            renderer.calls,
            vec![
                "board 500x500".to_string(),
                "Bot at (10, 20)".to_string(),
                "Ability at (30, 40)".to_string(),
                "present".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_loop_presents_frames_until_shutdown() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        struct CountingRenderer(Arc<AtomicUsize>);
        impl Renderer for CountingRenderer {
            fn draw_board(&mut self, _: &Board) {}
            fn draw_entity(&mut self, _: EntityKind, _: f64, _: f64) {}
            fn present_frame(&mut self) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        let frames = Arc::new(AtomicUsize::new(0));
        let board = Board::new(500, 500).unwrap();
        let registry = EntityRegistry::new();
        let render_loop = RenderLoop::new(
            board,
            registry,
            Box::new(CountingRenderer(frames.clone())),
            Duration::from_millis(10),
        );

        let shutdown = Shutdown::new();
        let handle = tokio::spawn(render_loop.run(shutdown.clone()));

        tokio::time::sleep(Duration::from_millis(55)).await;
        shutdown.trigger();
        handle.await.unwrap();

        let presented = frames.load(Ordering::Relaxed);
        assert!(presented >= 5, "expected at least 5 frames, got {presented}");
    }
}
