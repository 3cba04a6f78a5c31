//! Basket/symbol collision predicates
//!
//! Pure functions over positions so they can be exercised without a full
//! game state.

use glam::Vec2;

use super::state::Basket;

/// True when a falling glyph has reached the basket.
///
/// The glyph's bottom edge must have entered the basket band and its
/// horizontal center must lie within the basket span. There is no lower
/// bound on the band: the first tick that crosses the basket top resolves
/// the symbol, so it can never pass through.
pub fn symbol_hits_basket(symbol_pos: Vec2, symbol_size: Vec2, basket: &Basket) -> bool {
    let bottom = symbol_pos.y + symbol_size.y;
    let center_x = symbol_pos.x + symbol_size.x / 2.0;
    bottom > basket.pos.y && center_x > basket.pos.x && center_x < basket.pos.x + basket.width
}

/// True when a symbol has fallen past the playfield bottom uncaught
pub fn symbol_off_bottom(symbol_y: f32, playfield_height: f32) -> bool {
    symbol_y > playfield_height
}
