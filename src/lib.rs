//! Letter Drop - an alphabet-catching arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio playback and input capture live in the embedding shell.
//! The shell reads `sim::GameState` once per frame, feeds a sampled
//! `sim::TickInput` into `sim::tick`, and drains `sim::GameEvent`s for
//! side effects (letter sounds, round-over UI).

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in seconds (60 Hz, one display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield dimensions (portrait canvas)
    pub const PLAYFIELD_WIDTH: f32 = 600.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 150.0;
    pub const BASKET_HEIGHT: f32 = 75.0;
    /// Horizontal key speed (pixels/sec)
    pub const BASKET_SPEED: f32 = 600.0;
    /// Gap between basket top and playfield bottom
    pub const BASKET_BOTTOM_MARGIN: f32 = 100.0;

    /// Falling symbol glyph box
    pub const SYMBOL_WIDTH: f32 = 60.0;
    pub const SYMBOL_HEIGHT: f32 = 60.0;
    /// Base fall speed (pixels/sec)
    pub const SYMBOL_FALL_SPEED: f32 = 120.0;

    /// Seconds between spawns while running
    pub const SPAWN_INTERVAL: f32 = 2.0;
    /// Seconds a caught letter rides the basket before the target advances
    pub const CATCH_WINDOW: f32 = 3.0;
}

/// Clamp a basket x position to the playfield
#[inline]
pub fn clamp_to_playfield(x: f32, basket_width: f32, playfield_width: f32) -> f32 {
    x.clamp(0.0, (playfield_width - basket_width).max(0.0))
}
