//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{symbol_hits_basket, symbol_off_bottom};
pub use state::{
    Basket, CaughtDisplay, FallingSymbol, GameEvent, GameState, RngState, RoundState,
    TargetSequence,
};
pub use tick::{TickInput, tick};
