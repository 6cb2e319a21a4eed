//! Hex Bubbles entry point
//!
//! Native builds run a headless autoplay session: the launcher sweeps across
//! the board and fires at a steady rhythm until the game ends or the time
//! limit is reached. Useful for checking balance and determinism.
//!
//! Usage: `hex-bubbles [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use glam::Vec2;
    use hex_bubbles::Settings;
    use hex_bubbles::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Simulated frame length
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Ten minutes of play
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    /// Frames between shots
    const FIRE_EVERY: u32 = 40;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => match s.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                eprintln!("invalid seed {:?}: {}", s, e);
                std::process::exit(2);
            }
        },
        None => 1,
    };
    let settings = args
        .next()
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();

    log::info!("Hex Bubbles (headless) starting, seed {}", seed);
    let mut state = GameState::new(&settings, seed);
    let width = state.board.width();

    let (mut popped, mut dropped, mut lost) = (0usize, 0usize, 0usize);
    let mut frame = 0;
    while frame < MAX_FRAMES && state.phase != GamePhase::GameOver {
        // Sweep the aim point back and forth above the launcher
        let t = frame as f32 * 0.013;
        let aim = Vec2::new(width * (0.5 + 0.45 * t.sin()), 0.0);
        let input = TickInput {
            aim: Some(aim),
            fire: frame % FIRE_EVERY == 0,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::Popped(p) => popped += p.len(),
                GameEvent::Dropped(d) => dropped += d.len(),
                GameEvent::ShotLost { .. } => lost += 1,
                GameEvent::RowAdded { rows_added } => log::debug!("row {}", rows_added),
                GameEvent::KindUnlocked(kind) => log::info!("{} unlocked", kind.as_str()),
                _ => {}
            }
        }
        frame += 1;
    }

    let summary = serde_json::json!({
        "seed": seed,
        "difficulty": settings.difficulty.as_str(),
        "seconds": frame as f32 * FRAME_DT,
        "game_over": state.phase == GamePhase::GameOver,
        "score": state.score,
        "rows_added": state.rows_added,
        "popped": popped,
        "dropped": dropped,
        "shots_lost": lost,
        "bubbles_left": state.board.occupied_count(),
        "kinds_left": state.board.active_kinds(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not encode summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly; there is no wasm entry point
}
