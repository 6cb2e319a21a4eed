//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (row-major for cells, by id for shots)
//! - No rendering or platform dependencies

pub mod board;
pub mod collision;
pub mod grid;
pub mod kind;
pub mod state;
pub mod tick;

pub use board::{Board, Placed};
pub use collision::{CollisionResult, circles_overlap, reflect_velocity, step_with_walls};
pub use grid::{Cell, GridGeometry, hex_neighbors};
pub use kind::{BubbleKind, START_KINDS};
pub use state::{GameEvent, GamePhase, GameState, Launcher, Projectile};
pub use tick::{TickInput, tick};
