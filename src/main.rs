//! Bot Arena
//!
//! Headless demo run: scripted input drives the bot through a move, a
//! cast, a cooldown-blocked cast, and a post-cooldown cast while the
//! render loop and garbage collector tick in the background.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bot_arena::input::{InputEvent, Key, PointerButton};
use bot_arena::render::ConsoleRenderer;
use bot_arena::{Arena, ArenaConfig, EntityKind, RENDER_RATE, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Bot Arena v{}", VERSION);
    info!("Render Rate: {} Hz", RENDER_RATE);

    let config = ArenaConfig::default();
    let arena = Arena::new(config).await?;

    let (input_tx, input_rx) = mpsc::channel(32);
    arena
        .run(Box::new(ConsoleRenderer::default()), input_rx)
        .await;

    // Scripted session standing in for a real input device.
    input_tx
        .send(InputEvent::PointerClick {
            button: PointerButton::Secondary,
            x: 250.0,
            y: 250.0,
        })
        .await?;

    input_tx
        .send(InputEvent::PointerMoved { x: 350.0, y: 350.0 })
        .await?;
    input_tx.send(InputEvent::KeyPress(Key::Cast)).await?;

    // Inside the cooldown window: this cast is silently ignored.
    sleep(Duration::from_millis(100)).await;
    input_tx
        .send(InputEvent::PointerMoved { x: 300.0, y: 200.0 })
        .await?;
    input_tx.send(InputEvent::KeyPress(Key::Cast)).await?;

    // Past the cooldown: a second projectile spawns.
    sleep(Duration::from_millis(3000)).await;
    input_tx.send(InputEvent::KeyPress(Key::Cast)).await?;

    // Let the projectiles fly for a while.
    sleep(Duration::from_secs(5)).await;

    let registry = arena.registry();
    let snapshot = registry.snapshot().await;
    info!(
        entities = snapshot.len(),
        abilities = registry.count_kind(EntityKind::Ability).await,
        "final registry state"
    );
    info!("snapshot: {}", serde_json::to_string_pretty(&snapshot)?);

    arena.shutdown().await;
    Ok(())
}
