//! Game state and core simulation types
//!
//! Everything the tick needs lives here: the board, shots in flight, the
//! launcher and its queue, scoring and the row-descent clock.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::board::{Board, Placed};
use super::kind::{BubbleKind, START_KINDS};
use crate::consts::*;
use crate::settings::{Difficulty, Settings};
use crate::{angle_to, direction};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Bubbles reached the launcher
    GameOver,
}

/// A shot in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: BubbleKind,
}

/// The cannon at the bottom of the board
#[derive(Debug, Clone, PartialEq)]
pub struct Launcher {
    pub pos: Vec2,
    /// Screen-space angle, -π/2 is straight up
    pub angle: f32,
    /// Kind fired next
    pub next: BubbleKind,
    /// Kind after that
    pub after_next: BubbleKind,
}

impl Launcher {
    /// Launcher spot for a board size
    pub fn position_for(width: f32, height: f32) -> Vec2 {
        Vec2::new(
            (width / 2.0).floor(),
            (height - (height * 0.12).min(120.0)).floor(),
        )
    }

    /// Point toward `target`, limited to the upward fan
    pub fn aim_at(&mut self, target: Vec2) {
        self.angle = angle_to(self.pos, target).clamp(AIM_MIN, AIM_MAX);
    }
}

/// Things the host may want to react to (sound, HUD, effects)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A shot became part of the board
    Attached(Placed),
    /// A shot found no free cell and vanished
    ShotLost { kind: BubbleKind },
    /// Cluster removed by a match
    Popped(Vec<Placed>),
    /// Bubbles that lost their connection to the ceiling
    Dropped(Vec<Placed>),
    /// Score changed
    Score(u64),
    /// A new row was pushed in from the top
    RowAdded { rows_added: u32 },
    /// A new kind joined the row pool
    KindUnlocked(BubbleKind),
    /// Run ended
    GameOver { score: u64 },
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub board: Board,
    pub launcher: Launcher,
    /// Shots in flight (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Kinds the launcher may load, derived from the board
    pub color_pool: Vec<BubbleKind>,
    /// Kinds new rows are drawn from
    pub unlocked: Vec<BubbleKind>,
    pub score: u64,
    pub shots_since_pop: u32,
    /// Seconds since the last row or scoring shot
    pub time_since_row: f32,
    pub rows_added: u32,
    /// Lowest bubble is close to the launcher
    pub danger: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game for the given options and seed
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let (width, height) = board_size(settings.width, settings.height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = Board::new(width, height, BUBBLE_RADIUS, &mut rng);

        let mut state = Self {
            seed,
            rng,
            difficulty: settings.difficulty,
            phase: GamePhase::Playing,
            board,
            launcher: Launcher {
                pos: Launcher::position_for(width, height),
                angle: -std::f32::consts::FRAC_PI_2,
                next: START_KINDS[0],
                after_next: START_KINDS[1],
            },
            projectiles: Vec::new(),
            color_pool: START_KINDS.to_vec(),
            unlocked: START_KINDS.to_vec(),
            score: 0,
            shots_since_pop: 0,
            time_since_row: 0.0,
            rows_added: 0,
            danger: false,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.refill_queue();
        log::info!(
            "New game {}x{} seed={} difficulty={}",
            width,
            height,
            seed,
            state.difficulty.as_str()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Resize the play field. The board is rebuilt empty.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.board.resize(width, height);
        self.launcher.pos = Launcher::position_for(width, height);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Fire the loaded kind along the current aim
    pub fn fire(&mut self) {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos: self.launcher.pos,
            vel: direction(self.launcher.angle) * SHOT_SPEED,
            radius: self.board.radius(),
            kind: self.launcher.next,
        });
        self.shots_since_pop += 1;
        self.advance_queue();
    }

    /// Rebuild the color pool from the board (start kinds when it is empty)
    pub fn refresh_pool(&mut self) {
        let kinds = self.board.active_kinds();
        self.color_pool = if kinds.is_empty() {
            START_KINDS.to_vec()
        } else {
            kinds.into_iter().collect()
        };
    }

    /// Replace queued kinds that are no longer on the board
    pub fn ensure_queue_valid(&mut self) {
        self.refresh_pool();
        if !self.color_pool.contains(&self.launcher.next) {
            self.launcher.next = self.random_from_pool();
        }
        if !self.color_pool.contains(&self.launcher.after_next) {
            self.launcher.after_next = self.random_from_pool();
        }
    }

    fn refill_queue(&mut self) {
        self.refresh_pool();
        self.launcher.next = self.random_from_pool();
        self.launcher.after_next = self.random_from_pool();
    }

    fn advance_queue(&mut self) {
        self.refresh_pool();
        self.launcher.next = self.launcher.after_next;
        self.launcher.after_next = self.random_from_pool();
    }

    fn random_from_pool(&mut self) -> BubbleKind {
        let i = self.rng.random_range(0..self.color_pool.len());
        self.color_pool[i]
    }
}

/// Host-requested size, with anything under 200 px replaced by the default
fn board_size(width: f32, height: f32) -> (f32, f32) {
    let width = if width < MIN_BOARD_SIDE { DEFAULT_WIDTH } else { width };
    let height = if height < MIN_BOARD_SIDE { DEFAULT_HEIGHT } else { height };
    (width, height)
}
