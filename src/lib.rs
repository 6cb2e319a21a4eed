//! Hex Bubbles - A hex-grid bubble shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hex grid, board, projectiles, game state)
//! - `palette`: Per-kind colors and symbols for an external renderer
//! - `settings`: Host-supplied game options

pub mod palette;
pub mod settings;
pub mod sim;

pub use palette::Palette;
pub use settings::{Difficulty, Settings, Theme};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Bubble radius in pixels (grid bubbles and projectiles)
    pub const BUBBLE_RADIUS: f32 = 14.0;
    /// Gap between the board edge and the outermost bubble edge
    pub const BOARD_MARGIN: f32 = 8.0;
    /// Rows filled when a board is created
    pub const INITIAL_ROWS: usize = 5;

    /// Fallback board size when the host gives something too small
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
    pub const MIN_BOARD_SIDE: f32 = 200.0;

    /// Longest frame the simulation will integrate in one tick (seconds)
    pub const MAX_FRAME_DT: f32 = 0.032;

    /// Projectile speed in pixels per second
    pub const SHOT_SPEED: f32 = 480.0;
    /// Aim limits (radians, screen space where -π/2 is straight up)
    pub const AIM_MIN: f32 = -5.0 * std::f32::consts::PI / 6.0;
    pub const AIM_MAX: f32 = -std::f32::consts::PI / 6.0;

    /// Points per popped / dropped bubble
    pub const POP_SCORE: u64 = 10;
    pub const DROP_SCORE: u64 = 5;

    /// Combined radius shrink so contact triggers at visual touch
    pub const CONTACT_TOLERANCE: f32 = 0.5;
    /// How far inside the top row a shot must reach to stick to the ceiling
    pub const CEILING_SLACK: f32 = 0.4;
    /// Danger warning distance above the launcher, in radii
    pub const DANGER_RADII: f32 = 3.0;
}

/// Unit direction for a screen-space angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Screen-space angle from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
