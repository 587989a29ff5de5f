//! Arena Assembly
//!
//! Wires the board, registry, controller, and background loops together
//! and owns their lifecycle: one broadcast shutdown signal, one task set
//! joined on the way out.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::info;

use crate::config::ArenaConfig;
use crate::core::shutdown::Shutdown;
use crate::core::vec2::Vec2;
use crate::game::board::{Board, InvalidBoard};
use crate::game::bot::BotController;
use crate::game::entity::Entity;
use crate::game::gc::run_gc_loop;
use crate::game::registry::EntityRegistry;
use crate::input::{InputDispatcher, InputEvent};
use crate::render::{RenderLoop, Renderer};

/// The assembled arena: one bot, its controller, and the background tasks
/// that keep the world moving.
pub struct Arena {
    config: ArenaConfig,
    board: Board,
    registry: EntityRegistry,
    controller: Arc<BotController>,
    tasks: Arc<Mutex<JoinSet<()>>>,
    shutdown: Shutdown,
}

impl Arena {
    /// Build an arena from `config`, placing the bot at the origin.
    pub async fn new(config: ArenaConfig) -> Result<Self, InvalidBoard> {
        let board = Board::new(config.board_width, config.board_height)?;
        let registry = EntityRegistry::new();
        let bot_id = registry.insert(Entity::bot(Vec2::ZERO)).await;

        let shutdown = Shutdown::new();
        let tasks = Arc::new(Mutex::new(JoinSet::new()));
        let controller = Arc::new(BotController::new(
            board,
            registry.clone(),
            bot_id,
            &config,
            tasks.clone(),
            shutdown.clone(),
        ));

        info!(
            width = config.board_width,
            height = config.board_height,
            cooldown_ms = config.cooldown.as_millis() as u64,
            "arena created"
        );

        Ok(Self {
            config,
            board,
            registry,
            controller,
            tasks,
            shutdown,
        })
    }

    /// The arena board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// The shared entity registry.
    pub fn registry(&self) -> EntityRegistry {
        self.registry.clone()
    }

    /// The bot controller.
    pub fn controller(&self) -> Arc<BotController> {
        self.controller.clone()
    }

    /// Start the render loop, garbage collector, and input dispatcher.
    ///
    /// Returns once everything is spawned; the tasks run until
    /// [`shutdown`](Arena::shutdown).
    pub async fn run(&self, renderer: Box<dyn Renderer>, input_rx: mpsc::Receiver<InputEvent>) {
        let mut tasks = self.tasks.lock().await;

        let render_loop = RenderLoop::new(
            self.board,
            self.registry.clone(),
            renderer,
            self.config.render_tick_interval,
        );
        tasks.spawn(render_loop.run(self.shutdown.clone()));

        tasks.spawn(run_gc_loop(
            self.registry.clone(),
            self.config.gc_interval,
            self.shutdown.clone(),
        ));

        let dispatcher = InputDispatcher::new(self.controller.clone());
        tasks.spawn(dispatcher.run(input_rx, self.shutdown.clone()));

        info!("arena running");
    }

    /// Signal every task (including in-flight motion tasks) to stop, and
    /// join them all.
    pub async fn shutdown(&self) {
        self.shutdown.trigger();

        // Swap each batch of tasks out of the mutex before joining it.
        // A joined task (the input dispatcher inside a cast) may itself
        // need this lock to finish, so it is never held across join_next.
        // Looping covers tasks spawned while a batch was draining.
        loop {
            let mut draining = std::mem::take(&mut *self.tasks.lock().await);
            if draining.is_empty() {
                break;
            }
            while draining.join_next().await.is_some() {}
        }
        info!("arena stopped");
    }
}
