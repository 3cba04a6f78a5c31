//! Letter Drop entry point
//!
//! Headless autoplay demo: runs a full A-Z round under the fixed-step loop
//! and consumes boundary events the way an embedding shell would. Usage:
//!
//! ```text
//! letter-drop [seed] [tuning.json]
//! ```

use letter_drop::Tuning;
use letter_drop::consts::SIM_DT;
use letter_drop::sim::{GameEvent, GameState, RoundState, TickInput, tick};

/// Ten simulated minutes; a full round takes well under this
const MAX_FRAMES: u64 = 60 * 600;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(default_seed);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(&path),
        None => Tuning::default(),
    };

    log::info!("Letter Drop (headless) starting with seed {seed}");

    let mut state = GameState::with_tuning(seed, tuning);
    state.start();

    let mut frames: u64 = 0;
    while state.round_state == RoundState::Running && frames < MAX_FRAMES {
        let input = autoplay_input(&state);
        tick(&mut state, &input, SIM_DT);
        frames += 1;

        for event in state.drain_events() {
            match event {
                // A real shell would forward this to its audio layer
                GameEvent::LetterCaught(letter) => log::info!("caught '{letter}'"),
                GameEvent::TargetAdvanced(letter) => log::info!("target is now '{letter}'"),
                GameEvent::RoundEnded { score } => log::info!("round over, score {score}"),
            }
        }
    }

    println!(
        "Final score: {} after {:.1}s simulated",
        state.score,
        frames as f32 * SIM_DT
    );
}

fn default_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Steer the basket under the lowest symbol carrying the current target
fn autoplay_input(state: &GameState) -> TickInput {
    let target = state.target.symbol();
    let chase = state
        .symbols
        .iter()
        .filter(|s| s.text == target)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    TickInput {
        pointer_x: chase.map(|s| s.pos.x + state.tuning.symbol_width / 2.0),
        ..Default::default()
    }
}
