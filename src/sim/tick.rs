//! Simulation tick
//!
//! One call advances every shot in flight, resolves impacts against the board
//! and runs the row-descent clock. Frame timing belongs to the caller.

use glam::Vec2;

use super::collision::step_with_walls;
use super::kind::BubbleKind;
use super::state::{GameEvent, GamePhase, GameState, Projectile};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position to aim at
    pub aim: Option<Vec2>,
    /// Fire the loaded bubble (click/tap)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.time_ticks += 1;

    if let Some(target) = input.aim {
        state.launcher.aim_at(target);
    }
    if input.fire {
        state.fire();
    }

    // Move shots; anything that touches the board or ceiling is resolved
    // before the next shot moves
    let width = state.board.width();
    let shots = std::mem::take(&mut state.projectiles);
    for mut shot in shots {
        step_with_walls(&mut shot.pos, &mut shot.vel, shot.radius, width, dt);

        let hit = state.board.collides(shot.pos, shot.radius)
            || state.board.hit_top(shot.pos.y, shot.radius);
        if hit {
            resolve_impact(state, &shot);
        } else {
            state.projectiles.push(shot);
        }
    }

    state.time_since_row += dt;
    let cadence = state.difficulty;
    if state.shots_since_pop >= cadence.row_every_shots()
        || state.time_since_row >= cadence.row_every_secs()
    {
        push_row(state);
    }

    let lowest = state.board.lowest_occupied_y();
    state.danger = lowest > state.launcher.pos.y - state.board.radius() * DANGER_RADII;
    if lowest >= state.launcher.pos.y {
        state.phase = GamePhase::GameOver;
        state.projectiles.clear();
        log::info!("Game over, score {}", state.score);
        state.push_event(GameEvent::GameOver { score: state.score });
    }
}

/// Attach, pop, drop, then refresh the launcher's colors (in that order)
fn resolve_impact(state: &mut GameState, shot: &Projectile) {
    let Some(placed) = state.board.snap_and_attach(shot.pos, shot.kind) else {
        log::debug!("Shot {} found no free cell", shot.id);
        state.push_event(GameEvent::ShotLost { kind: shot.kind });
        return;
    };
    state.push_event(GameEvent::Attached(placed));

    let popped = state.board.pop_clusters_from(placed.row, placed.col);
    let dropped = state.board.drop_floaters();
    state.ensure_queue_valid();

    let gained = popped.len() as u64 * POP_SCORE + dropped.len() as u64 * DROP_SCORE;
    if !popped.is_empty() {
        state.push_event(GameEvent::Popped(popped));
    }
    if !dropped.is_empty() {
        state.push_event(GameEvent::Dropped(dropped));
    }
    if gained > 0 {
        state.score += gained;
        state.shots_since_pop = 0;
        state.time_since_row = 0.0;
        state.push_event(GameEvent::Score(state.score));
    }
}

/// Push a new row in from the top, unlocking amber after the second one
fn push_row(state: &mut GameState) {
    if state.rows_added == 2 && !state.unlocked.contains(&BubbleKind::Amber) {
        state.unlocked.push(BubbleKind::Amber);
        log::info!("Unlocked {}", BubbleKind::Amber.as_str());
        state.push_event(GameEvent::KindUnlocked(BubbleKind::Amber));
    }

    state.board.add_row_random(&state.unlocked, &mut state.rng);
    state.rows_added += 1;
    state.shots_since_pop = 0;
    state.time_since_row = 0.0;
    state.ensure_queue_valid();

    log::debug!("Row {} pushed", state.rows_added);
    state.push_event(GameEvent::RowAdded {
        rows_added: state.rows_added,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Difficulty, Settings};
    use crate::sim::board::Board;
    use crate::sim::grid::Cell;

    const DT: f32 = 1.0 / 60.0;

    fn empty_game() -> GameState {
        let mut state = GameState::new(&Settings::default(), 1234);
        state.board = Board::empty(800.0, 600.0, BUBBLE_RADIUS);
        state.refresh_pool();
        state
    }

    /// Tick until no shot is in flight (or give up)
    fn settle(state: &mut GameState) {
        for _ in 0..600 {
            if state.projectiles.is_empty() {
                return;
            }
            tick(state, &TickInput::default(), DT);
        }
        panic!("shot never landed");
    }

    fn fire_straight_up(state: &mut GameState) {
        let target = state.launcher.pos - Vec2::new(0.0, 100.0);
        tick(
            state,
            &TickInput {
                aim: Some(target),
                fire: true,
                ..Default::default()
            },
            DT,
        );
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = empty_game();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Paused ticks do nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_shot_sticks_to_ceiling() {
        let mut state = empty_game();
        state.launcher.next = BubbleKind::Green;
        fire_straight_up(&mut state);
        settle(&mut state);

        // Launcher x = 400 sits between columns 13 (386) and 14 (414)
        let placed: Vec<_> = state.board.placed().collect();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].row, 0);
        assert!(placed[0].col == 13 || placed[0].col == 14);
        assert_eq!(placed[0].kind, BubbleKind::Green);

        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::Attached(p) if p.kind == BubbleKind::Green));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_match_pops_and_scores() {
        let mut state = empty_game();
        // Two greens on the ceiling straight above the launcher
        state.board.set_kind(0, 13, Some(BubbleKind::Green));
        state.board.set_kind(0, 14, Some(BubbleKind::Green));
        // A blue hanging off them falls once the greens pop
        state.board.set_kind(1, 13, Some(BubbleKind::Blue));
        state.launcher.next = BubbleKind::Green;
        state.shots_since_pop = 3;

        // Come in from the side so the shot lands next to the pair
        let target = state.board.geometry().center(Cell::new(0, 12));
        tick(
            &mut state,
            &TickInput {
                aim: Some(target),
                fire: true,
                ..Default::default()
            },
            DT,
        );
        settle(&mut state);

        let events = state.drain_events();
        let popped = events.iter().find_map(|e| match e {
            GameEvent::Popped(p) => Some(p.len()),
            _ => None,
        });
        assert_eq!(popped, Some(3));
        assert!(state.board.is_empty());
        assert_eq!(state.score, 3 * POP_SCORE + DROP_SCORE);
        assert_eq!(state.shots_since_pop, 0);
        assert!(events.contains(&GameEvent::Score(state.score)));
    }

    #[test]
    fn test_shots_bounce_off_walls() {
        let mut state = empty_game();
        let left = state.launcher.pos + Vec2::new(-100.0, -20.0);
        tick(
            &mut state,
            &TickInput {
                aim: Some(left),
                fire: true,
                ..Default::default()
            },
            DT,
        );
        let mut bounced = false;
        for _ in 0..600 {
            if let Some(shot) = state.projectiles.first() {
                assert!(shot.pos.x >= shot.radius && shot.pos.x <= 800.0 - shot.radius);
                bounced |= shot.vel.x > 0.0;
            } else {
                break;
            }
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(bounced);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.board.occupied_count(), 1);
    }

    #[test]
    fn test_row_after_shots_without_pop() {
        let mut state = empty_game();
        state.difficulty = Difficulty::Ramp;
        state.shots_since_pop = 4;
        fire_straight_up(&mut state);

        // Fifth shot triggers a row right away
        assert_eq!(state.rows_added, 1);
        assert_eq!(state.shots_since_pop, 0);
        assert_eq!(
            state.board.placed().filter(|p| p.row == 0).count(),
            state.board.geometry().row_len(0)
        );
    }

    #[test]
    fn test_row_after_timeout() {
        let mut state = empty_game();
        state.difficulty = Difficulty::Easy;
        for _ in 0..(20.0 / MAX_FRAME_DT) as usize + 2 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert_eq!(state.rows_added, 1);
    }

    #[test]
    fn test_amber_unlocks_on_third_row() {
        let mut state = empty_game();
        for expected in 1..=3 {
            state.shots_since_pop = state.difficulty.row_every_shots();
            tick(&mut state, &TickInput::default(), DT);
            assert_eq!(state.rows_added, expected);
            assert_eq!(
                state.unlocked.contains(&BubbleKind::Amber),
                expected == 3,
                "after row {}",
                expected
            );
        }
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::KindUnlocked(BubbleKind::Amber)));
    }

    #[test]
    fn test_danger_and_game_over() {
        let mut state = empty_game();
        let geometry = state.board.geometry().clone();
        let launcher_y = state.launcher.pos.y;

        // A bubble just above the danger line
        let near = (0..geometry.row_count())
            .rev()
            .find(|&r| geometry.center(Cell::new(r, 0)).y < launcher_y)
            .unwrap();
        state.board.set_kind(near, 0, Some(BubbleKind::Red));
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.danger);
        assert_eq!(state.phase, GamePhase::Playing);

        state.board.set_kind(near + 1, 0, Some(BubbleKind::Red));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));

        // Further ticks do nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_determinism() {
        let run = |seed: u64| {
            let mut state = GameState::new(&Settings::default(), seed);
            for i in 0..600 {
                let x = 100.0 + (i * 37 % 600) as f32;
                let input = TickInput {
                    aim: Some(Vec2::new(x, 100.0)),
                    fire: i % 45 == 0,
                    ..Default::default()
                };
                tick(&mut state, &input, DT);
            }
            state
        };

        let a = run(99999);
        let b = run(99999);
        assert_eq!(a.score, b.score);
        assert_eq!(a.rows_added, b.rows_added);
        assert_eq!(a.projectiles, b.projectiles);
        assert_eq!(
            a.board.placed().collect::<Vec<_>>(),
            b.board.placed().collect::<Vec<_>>()
        );
    }
}
