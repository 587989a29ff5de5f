//! Input Dispatch
//!
//! Translates raw input events into bot controller calls. The device layer
//! (window events, pointer polling) lives outside this crate and feeds the
//! dispatcher through an mpsc channel.
//!
//! Gesture mapping: secondary pointer click moves the bot to the click
//! point; the cast key fires the ability at the last known pointer
//! position. Coordinate rejections are logged and dropped here, never
//! propagated further.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::shutdown::Shutdown;
use crate::game::bot::BotController;

/// Pointer button identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary (left) button
    Primary,
    /// Secondary (right) button - the move gesture
    Secondary,
}

/// Key identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// The cast key
    Cast,
    /// Any other key (ignored)
    Other(char),
}

/// A raw input event from the device layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `(x, y)`
    PointerMoved {
        /// Pointer x
        x: f64,
        /// Pointer y
        y: f64,
    },
    /// Pointer button released at `(x, y)`
    PointerClick {
        /// Which button
        button: PointerButton,
        /// Click x
        x: f64,
        /// Click y
        y: f64,
    },
    /// Key released
    KeyPress(Key),
}

/// Event-stream consumer driving the bot controller.
pub struct InputDispatcher {
    controller: Arc<BotController>,
    cursor: (f64, f64),
}

impl InputDispatcher {
    /// Build a dispatcher for `controller`. The cursor starts at the
    /// origin until the first `PointerMoved`.
    pub fn new(controller: Arc<BotController>) -> Self {
        Self {
            controller,
            cursor: (0.0, 0.0),
        }
    }

    /// Drain events until the channel closes or shutdown fires.
    pub async fn run(mut self, mut events: mpsc::Receiver<InputEvent>, shutdown: Shutdown) {
        let mut stop = shutdown.subscribe();
        loop {
            // Checked per event so a backlog of queued gestures cannot
            // keep the dispatcher alive past shutdown.
            if shutdown.is_triggered() {
                debug!("input dispatcher stopping");
                return;
            }

            let event = tokio::select! {
                event = events.recv() => match event {
                    Some(event) => event,
                    None => {
                        debug!("input channel closed");
                        return;
                    }
                },
                _ = stop.recv() => {
                    debug!("input dispatcher stopping");
                    return;
                }
            };
            self.dispatch(event).await;
        }
    }

    /// Apply a single event.
    pub async fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.cursor = (x, y);
            }
            InputEvent::PointerClick {
                button: PointerButton::Secondary,
                x,
                y,
            } => {
                self.cursor = (x, y);
                if let Err(err) = self.controller.move_to(x, y).await {
                    warn!(%err, "move rejected");
                }
            }
            InputEvent::PointerClick { .. } => {}
            InputEvent::KeyPress(Key::Cast) => {
                let (x, y) = self.cursor;
                if let Err(err) = self.controller.cast(x, y).await {
                    warn!(%err, "cast rejected");
                }
            }
            InputEvent::KeyPress(Key::Other(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::core::vec2::Vec2;
    use crate::game::board::Board;
    use crate::game::entity::{Entity, EntityKind};
    use crate::game::registry::EntityRegistry;
    use tokio::sync::Mutex;
    use tokio::task::JoinSet;

    async fn dispatcher() -> (InputDispatcher, Arc<BotController>, EntityRegistry) {
        let config = ArenaConfig::default();
        let board = Board::new(config.board_width, config.board_height).unwrap();
        let registry = EntityRegistry::new();
        let bot_id = registry.insert(Entity::bot(Vec2::ZERO)).await;
        let controller = Arc::new(BotController::new(
            board,
            registry.clone(),
            bot_id,
            &config,
            Arc::new(Mutex::new(JoinSet::new())),
            Shutdown::new(),
        ));
        (InputDispatcher::new(controller.clone()), controller, registry)
    }

    #[tokio::test]
    async fn test_secondary_click_moves_the_bot() {
        let (mut dispatcher, controller, _) = dispatcher().await;
        dispatcher
            .dispatch(InputEvent::PointerClick {
                button: PointerButton::Secondary,
                x: 40.0,
                y: 60.0,
            })
            .await;
        assert_eq!(controller.position().await, Vec2::new(40.0, 60.0));
    }

    #[tokio::test]
    async fn test_primary_click_is_ignored() {
        let (mut dispatcher, controller, _) = dispatcher().await;
        dispatcher
            .dispatch(InputEvent::PointerClick {
                button: PointerButton::Primary,
                x: 40.0,
                y: 60.0,
            })
            .await;
        assert_eq!(controller.position().await, Vec2::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cast_key_fires_at_the_cursor() {
        let (mut dispatcher, _, registry) = dispatcher().await;
        dispatcher
            .dispatch(InputEvent::PointerMoved { x: 100.0, y: 100.0 })
            .await;
        dispatcher.dispatch(InputEvent::KeyPress(Key::Cast)).await;
        assert_eq!(registry.count_kind(EntityKind::Ability).await, 1);
    }

    #[tokio::test]
    async fn test_rejected_move_is_swallowed() {
        let (mut dispatcher, controller, _) = dispatcher().await;
        dispatcher
            .dispatch(InputEvent::PointerClick {
                button: PointerButton::Secondary,
                x: 900.0,
                y: 900.0,
            })
            .await;
        // Logged, dropped, and the bot stays put.
        assert_eq!(controller.position().await, Vec2::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_drains_the_channel() {
        let (dispatcher, controller, _) = dispatcher().await;
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(dispatcher.run(rx, Shutdown::new()));

        tx.send(InputEvent::PointerClick {
            button: PointerButton::Secondary,
            x: 10.0,
            y: 20.0,
        })
        .await
        .unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(controller.position().await, Vec2::new(10.0, 20.0));
    }
}
