//! Data-driven game balance
//!
//! Every gameplay constant the simulation consumes lives here so a round can
//! be re-balanced from a JSON file without recompiling. Defaults reproduce
//! the original arcade feel.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield dimensions (overridden by the shell on resize)
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Basket ===
    pub basket_width: f32,
    pub basket_height: f32,
    /// Horizontal speed when a key is held (pixels/sec)
    pub basket_speed: f32,
    /// Distance from playfield bottom to basket top
    pub basket_bottom_margin: f32,

    // === Falling symbols ===
    /// Glyph collision box
    pub symbol_width: f32,
    pub symbol_height: f32,
    /// Base fall speed (pixels/sec)
    pub fall_speed: f32,
    /// Extra fall speed per point of score (pixels/sec). Zero keeps fall
    /// speed constant for the whole round.
    pub fall_speed_per_point: f32,

    // === Timing ===
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
    /// Seconds the caught letter is displayed before the target advances
    pub catch_window: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,
            basket_speed: BASKET_SPEED,
            basket_bottom_margin: BASKET_BOTTOM_MARGIN,
            symbol_width: SYMBOL_WIDTH,
            symbol_height: SYMBOL_HEIGHT,
            fall_speed: SYMBOL_FALL_SPEED,
            fall_speed_per_point: 0.0,
            spawn_interval: SPAWN_INTERVAL,
            catch_window: CATCH_WINDOW,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults.
    ///
    /// A broken or missing tuning file must never block the game, so all
    /// failures are logged and swallowed.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {path}");
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {path}: {e} - using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {path}: {e} - using defaults");
                Self::default()
            }
        }
    }
}
