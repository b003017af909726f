// main.rs
mod game;
mod process_events;
mod render;

use raylib::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use game::config::GameConfig;
use game::error::GameError;
use game::grid::GridMap;
use game::input::KeyEvent;
use game::session::Session;
use process_events::process_events;
use render::scene::Renderer;

fn main() {
    init_tracing();
    info!("=== Counting Trail Startup ===");

    if let Err(err) = run() {
        error!(error = %err, "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run() -> Result<(), GameError> {
    let config = GameConfig::from_env()?;
    info!(title = %config.title, width = config.width, height = config.height, "config_loaded");

    let grid = match &config.map_path {
        Some(path) => GridMap::load(path)?,
        None => GridMap::default_loop()?,
    };
    info!(
        tiles = grid.tiles().count(),
        path_len = grid.eligible_coords().len(),
        "map_loaded"
    );
    let mut session = Session::new(&config, grid)?;

    let (mut window, raylib_thread) = raylib::init()
        .size(config.width, config.height)
        .title(&config.title)
        .build();
    // Escape is handled as a regular quit key below.
    window.set_exit_key(None);
    window.set_target_fps(60);

    let mut renderer = Renderer::new(&mut window, &raylib_thread, &config, &session)?;

    while !window.window_should_close() {
        let events = process_events(&mut window);
        if events.iter().any(KeyEvent::is_quit) {
            info!("quit_requested");
            break;
        }
        for event in &events {
            session.on_key_down(event);
        }

        session.update(window.get_frame_time());
        renderer.draw(&mut window, &raylib_thread, &mut session);
    }

    info!(score = session.score(), "session_ended");
    Ok(())
}
