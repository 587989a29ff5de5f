//! Console Renderer
//!
//! Headless drawing backend: frames become structured log lines instead of
//! pixels. One summary line per second keeps the output readable at 60 fps.

use tracing::{info, trace};

use crate::game::board::Board;
use crate::game::entity::EntityKind;
use crate::render::Renderer;

/// Renderer that reports frames through `tracing`.
pub struct ConsoleRenderer {
    frames_per_summary: u64,
    frame_count: u64,
    bot_glyphs: Vec<(f64, f64)>,
    ability_glyphs: Vec<(f64, f64)>,
}

impl ConsoleRenderer {
    /// Summarize once every `frames_per_summary` presented frames.
    pub fn new(frames_per_summary: u64) -> Self {
        Self {
            frames_per_summary: frames_per_summary.max(1),
            frame_count: 0,
            bot_glyphs: Vec::new(),
            ability_glyphs: Vec::new(),
        }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        // One line per second at 60 fps.
        Self::new(60)
    }
}

impl Renderer for ConsoleRenderer {
    fn draw_board(&mut self, board: &Board) {
        trace!(width = board.width(), height = board.height(), "draw board");
        self.bot_glyphs.clear();
        self.ability_glyphs.clear();
    }

    fn draw_entity(&mut self, kind: EntityKind, x: f64, y: f64) {
        trace!(?kind, x, y, "draw entity");
        match kind {
            EntityKind::Bot => self.bot_glyphs.push((x, y)),
            EntityKind::Ability => self.ability_glyphs.push((x, y)),
        }
    }

    fn present_frame(&mut self) {
        self.frame_count += 1;
        if self.frame_count % self.frames_per_summary == 0 {
            let bot = self
                .bot_glyphs
                .first()
                .map(|(x, y)| format!("({x:.1}, {y:.1})"))
                .unwrap_or_else(|| "<none>".into());
            info!(
                frame = self.frame_count,
                bot = %bot,
                abilities = self.ability_glyphs.len(),
                "frame presented"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_renderer_tracks_glyphs_per_frame() {
        let board = Board::new(500, 500).unwrap();
        let mut renderer = ConsoleRenderer::new(1);

        renderer.draw_board(&board);
        renderer.draw_entity(EntityKind::Bot, 1.0, 2.0);
        renderer.draw_entity(EntityKind::Ability, 3.0, 4.0);
        renderer.present_frame();
        assert_eq!(renderer.bot_glyphs.len(), 1);
        assert_eq!(renderer.ability_glyphs.len(), 1);

        // Next frame starts clean.
        renderer.draw_board(&board);
        assert!(renderer.bot_glyphs.is_empty());
        assert!(renderer.ability_glyphs.is_empty());
        assert_eq!(renderer.frame_count, 1);
    }
}
