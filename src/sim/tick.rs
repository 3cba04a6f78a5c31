//! Fixed timestep simulation tick
//!
//! One call per display frame while the round is running. Both periodic
//! activities of the original design - the spawn interval and the
//! catch-window expiry - are time accumulators advanced by the injected
//! `dt`, so a round can be replayed or unit-tested without wall-clock
//! delays.

use glam::Vec2;

use super::collision::{symbol_hits_basket, symbol_off_bottom};
use super::state::{Basket, CaughtDisplay, GameEvent, GameState, RoundState};
use crate::clamp_to_playfield;

/// Input sample for a single tick (deterministic)
///
/// The shell writes these from its event handlers; the simulation only ever
/// reads the latest sample, once per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Left key currently held
    pub left_held: bool,
    /// Right key currently held
    pub right_held: bool,
    /// Active pointer/touch x position; takes precedence over the key flags
    pub pointer_x: Option<f32>,
}

/// Advance the game state by one fixed timestep (seconds)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.round_state != RoundState::Running {
        return;
    }
    state.time += f64::from(dt);

    update_basket(state, input, dt);
    run_spawner(state, dt);
    move_and_collide(state, dt);
    update_caught(state);
}

/// Apply the latest input sample to the basket, clamped to the playfield
fn update_basket(state: &mut GameState, input: &TickInput, dt: f32) {
    let field_width = state.tuning.playfield_width;
    let basket = &mut state.basket;
    let x = if let Some(pointer_x) = input.pointer_x {
        // Pointer steers directly; the basket centers under it
        pointer_x - basket.width / 2.0
    } else {
        let mut x = basket.pos.x;
        if input.left_held {
            x -= basket.speed * dt;
        }
        if input.right_held {
            x += basket.speed * dt;
        }
        x
    };
    basket.pos.x = clamp_to_playfield(x, basket.width, field_width);
}

/// Elapse the spawn period and emit symbols when it fires
fn run_spawner(state: &mut GameState, dt: f32) {
    if state.tuning.spawn_interval <= 0.0 {
        return;
    }
    state.spawn_timer -= dt;
    while state.spawn_timer <= 0.0 {
        state.spawn_timer += state.tuning.spawn_interval;
        // While the target letter is riding the basket there is nothing to
        // hunt, so the field is not flooded with doomed duplicates
        let target_pending = state
            .caught
            .as_ref()
            .is_some_and(|c| c.text == state.target.symbol());
        if !target_pending {
            state.spawn_symbol();
        }
    }
}

/// Advance symbols and resolve catch/miss collisions against the basket
fn move_and_collide(state: &mut GameState, dt: f32) {
    let symbol_size = Vec2::new(state.tuning.symbol_width, state.tuning.symbol_height);
    let field_height = state.tuning.playfield_height;
    let target = state.target.symbol();
    let basket = state.basket.clone();
    // A catch already in its grace window blocks further catches
    let grace_open = state.caught.is_none();
    let mut caught_text: Option<char> = None;

    state.symbols.retain_mut(|symbol| {
        symbol.pos.y += symbol.speed * dt;
        if symbol_hits_basket(symbol.pos, symbol_size, &basket) {
            if symbol.text == target && grace_open && caught_text.is_none() {
                caught_text = Some(symbol.text);
            }
            // Wrong letters vanish on contact; no penalty
            return false;
        }
        // Fell through uncaught; no penalty either
        !symbol_off_bottom(symbol.pos.y, field_height)
    });

    if let Some(text) = caught_text {
        state.score += 1;
        state.events.push(GameEvent::LetterCaught(text));
        // Any airborne copies of the caught letter are consumed with it
        state.symbols.retain(|s| s.text != text);
        state.caught = Some(CaughtDisplay {
            text,
            pos: display_pos(&state.basket, symbol_size.x),
            time_caught: state.time,
        });
        log::debug!("Caught '{}' (score {})", text, state.score);
    }
}

/// Keep the caught letter riding the basket and expire its grace window
fn update_caught(state: &mut GameState) {
    let display = display_pos(&state.basket, state.tuning.symbol_width);
    let window = f64::from(state.tuning.catch_window);
    let expired = match state.caught.as_mut() {
        None => return,
        Some(caught) => {
            caught.pos.x = display.x;
            caught.pos.y = display.y;
            state.time - caught.time_caught >= window
        }
    };
    if expired {
        state.caught = None;
        state.advance_target();
    }
}

/// Render position for the caught letter: centered over the basket mouth
fn display_pos(basket: &Basket, symbol_width: f32) -> Vec2 {
    Vec2::new(
        basket.center_x() - symbol_width / 2.0,
        basket.pos.y + basket.height / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::FallingSymbol;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345);
        state.start();
        state
    }

    /// Place a symbol so its next tick of movement crosses the basket top
    fn drop_on_basket(state: &mut GameState, text: char) {
        let id = state.next_entity_id();
        let x = state.basket.center_x() - state.tuning.symbol_width / 2.0;
        let y = state.basket.pos.y - state.tuning.symbol_height;
        state.symbols.push(FallingSymbol {
            id,
            text,
            pos: Vec2::new(x, y),
            speed: state.tuning.fall_speed,
        });
    }

    fn run_ticks(state: &mut GameState, n: usize) {
        let input = TickInput::default();
        for _ in 0..n {
            tick(state, &input, SIM_DT);
        }
    }

    #[test]
    fn test_tick_noop_outside_running() {
        let mut state = GameState::new(12345);
        run_ticks(&mut state, 300);
        assert_eq!(state.time, 0.0);
        assert!(state.symbols.is_empty());

        state.start();
        state.pause();
        let frozen = state.time;
        run_ticks(&mut state, 300);
        assert_eq!(state.time, frozen);
    }

    #[test]
    fn test_spawner_emits_target_on_period() {
        let mut state = running_state();
        assert!(state.symbols.is_empty());

        // Spawn period is 2s; a bit over two periods yields two symbols
        run_ticks(&mut state, 125);
        assert_eq!(state.symbols.len(), 1);
        run_ticks(&mut state, 125);
        assert_eq!(state.symbols.len(), 2);

        for symbol in &state.symbols {
            assert_eq!(symbol.text, 'A');
            assert!(symbol.pos.x >= 0.0);
            assert!(
                symbol.pos.x <= state.tuning.playfield_width - state.tuning.symbol_width
            );
        }
    }

    #[test]
    fn test_catch_scores_and_advances_after_window() {
        let mut state = running_state();
        drop_on_basket(&mut state, 'A');

        run_ticks(&mut state, 1);
        assert_eq!(state.score, 1);
        assert!(state.symbols.is_empty());
        let caught = state.caught.as_ref().expect("catch should be pending");
        assert_eq!(caught.text, 'A');
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LetterCaught('A'))
        );

        // Still inside the 3s grace window
        run_ticks(&mut state, 170);
        assert!(state.caught.is_some());
        assert_eq!(state.target.symbol(), 'A');

        // Window expires: caught clears, target advances exactly one letter
        run_ticks(&mut state, 15);
        assert!(state.caught.is_none());
        assert_eq!(state.target.symbol(), 'B');
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::TargetAdvanced('B'))
        );
    }

    #[test]
    fn test_wrong_letter_removed_without_score() {
        let mut state = running_state();
        drop_on_basket(&mut state, 'Q');

        run_ticks(&mut state, 1);
        assert_eq!(state.score, 0);
        assert!(state.symbols.is_empty());
        assert!(state.caught.is_none());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_grace_window_blocks_second_catch() {
        let mut state = running_state();
        drop_on_basket(&mut state, 'A');
        run_ticks(&mut state, 1);
        assert_eq!(state.score, 1);

        // A second 'A' arrives while the first rides the basket
        drop_on_basket(&mut state, 'A');
        run_ticks(&mut state, 1);
        assert_eq!(state.score, 1);
        assert!(state.symbols.is_empty());
    }

    #[test]
    fn test_catch_consumes_airborne_duplicates() {
        let mut state = running_state();
        drop_on_basket(&mut state, 'A');
        // A duplicate still high above the basket
        let id = state.next_entity_id();
        state.symbols.push(FallingSymbol {
            id,
            text: 'A',
            pos: Vec2::new(10.0, 50.0),
            speed: state.tuning.fall_speed,
        });

        run_ticks(&mut state, 1);
        assert_eq!(state.score, 1);
        assert!(state.symbols.is_empty());
    }

    #[test]
    fn test_spawner_suppressed_while_target_pending() {
        let mut state = running_state();
        drop_on_basket(&mut state, 'A');
        run_ticks(&mut state, 1);
        assert!(state.caught.is_some());

        // The 3s grace window covers a full spawn period; nothing spawns
        run_ticks(&mut state, 130);
        assert!(state.symbols.is_empty());
    }

    #[test]
    fn test_caught_display_rides_basket() {
        let mut state = running_state();
        drop_on_basket(&mut state, 'A');
        run_ticks(&mut state, 1);

        let input = TickInput {
            pointer_x: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        let caught = state.caught.as_ref().unwrap();
        let expected_x = state.basket.center_x() - state.tuning.symbol_width / 2.0;
        assert!((caught.pos.x - expected_x).abs() < 0.001);
    }

    #[test]
    fn test_catching_z_ends_round() {
        let mut state = running_state();
        while state.target.symbol() != 'Z' {
            state.target.advance();
        }
        drop_on_basket(&mut state, 'Z');
        run_ticks(&mut state, 1);
        assert_eq!(state.score, 1);

        // Grace window expires past 'Z': terminal, field cleared
        run_ticks(&mut state, 190);
        assert_eq!(state.round_state, RoundState::Ended);
        assert!(state.symbols.is_empty());
        assert!(state.caught.is_none());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::RoundEnded { score: 1 })
        );

        // Further ticks (spawn period included) are no-ops
        run_ticks(&mut state, 300);
        assert!(state.symbols.is_empty());
        assert_eq!(state.round_state, RoundState::Ended);
    }

    #[test]
    fn test_uncaught_symbol_falls_through() {
        let mut state = running_state();
        // No background spawns; watch a single symbol far from the basket
        state.tuning.spawn_interval = 0.0;
        let id = state.next_entity_id();
        state.symbols.push(FallingSymbol {
            id,
            text: 'A',
            pos: Vec2::new(0.0, 0.0),
            speed: state.tuning.fall_speed,
        });
        state.basket.pos.x = state.tuning.playfield_width - state.basket.width;

        // 800px at 120px/s is under 8 seconds
        run_ticks(&mut state, 60 * 8);
        assert_eq!(state.score, 0);
        assert!(state.symbols.iter().all(|s| s.id != id));
    }

    #[test]
    fn test_pointer_overrides_keys() {
        let mut state = running_state();
        let input = TickInput {
            left_held: true,
            right_held: false,
            pointer_x: Some(500.0),
        };
        tick(&mut state, &input, SIM_DT);
        let expected = 500.0 - state.basket.width / 2.0;
        assert!((state.basket.pos.x - expected).abs() < 0.001);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();

        let inputs = [
            TickInput {
                right_held: true,
                ..Default::default()
            },
            TickInput {
                pointer_x: Some(120.0),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                left_held: true,
                ..Default::default()
            },
        ];

        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
            state1.drain_events();
            state2.drain_events();
        }

        let json1 = serde_json::to_string(&state1).unwrap();
        let json2 = serde_json::to_string(&state2).unwrap();
        assert_eq!(json1, json2);
    }

    proptest! {
        #[test]
        fn prop_basket_stays_clamped(
            pointer_xs in proptest::collection::vec(-2000.0f32..2000.0, 1..200)
        ) {
            let mut state = running_state();
            for x in pointer_xs {
                let input = TickInput {
                    pointer_x: Some(x),
                    ..Default::default()
                };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.basket.pos.x >= 0.0);
                prop_assert!(
                    state.basket.pos.x
                        <= state.tuning.playfield_width - state.basket.width
                );
            }
        }

        #[test]
        fn prop_score_never_decreases(
            seed in 0u64..1_000,
            lefts in proptest::collection::vec(any::<bool>(), 1..400)
        ) {
            let mut state = GameState::with_tuning(seed, crate::Tuning::default());
            state.start();
            let mut last = 0;
            for left in lefts {
                let input = TickInput {
                    left_held: left,
                    right_held: !left,
                    ..Default::default()
                };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
