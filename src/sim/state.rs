//! Game state and core simulation types
//!
//! Everything the renderer snapshots once per frame lives here, along with
//! the lifecycle transitions driven by external UI controls.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Tuning;
use crate::clamp_to_playfield;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Not ticking - fresh controller or paused mid-round
    Idle,
    /// Active gameplay
    Running,
    /// Target sequence exhausted (or round exited); terminal until restart
    Ended,
}

/// The player's basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed when a key is held (pixels/sec)
    pub speed: f32,
}

impl Basket {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// A letter falling toward the basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingSymbol {
    pub id: u32,
    pub text: char,
    /// Top-left corner of the glyph box
    pub pos: Vec2,
    /// Fall speed (pixels/sec), fixed at spawn time
    pub speed: f32,
}

/// The just-caught letter riding the basket during the grace window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaughtDisplay {
    pub text: char,
    /// Render position, re-bound to the basket center every tick
    pub pos: Vec2,
    /// Simulation time the catch happened (seconds)
    pub time_caught: f64,
}

/// The fixed A-Z progression the player must match in order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSequence {
    index: u8,
}

impl TargetSequence {
    /// The letter currently being hunted
    pub fn symbol(&self) -> char {
        (b'A' + self.index) as char
    }

    /// Move the cursor forward. Returns the new target, or `None` past 'Z'.
    pub fn advance(&mut self) -> Option<char> {
        if self.index >= 25 {
            None
        } else {
            self.index += 1;
            Some(self.symbol())
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// Boundary signals for the embedding shell (audio, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Play the sound for this letter; the audio layer may drop it silently
    LetterCaught(char),
    /// The target cursor moved to a new letter
    TargetAdvanced(char),
    /// The round is over
    RoundEnded { score: u32 },
}

/// RNG state wrapper for serialization
///
/// Each draw seeds a fresh PCG stream so spawn positions are reproducible
/// from `(seed, stream)` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Draw a value in `[0, 1)`
    pub fn next_unit(&mut self) -> f32 {
        let mut rng = Pcg32::new(self.seed, self.stream);
        self.stream = self.stream.wrapping_add(1);
        rng.random_range(0.0..1.0)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Gameplay tuning values
    pub tuning: Tuning,
    /// Current phase
    pub round_state: RoundState,
    /// Correct catches so far; never decreases within a round
    pub score: u32,
    /// A-Z cursor
    pub target: TargetSequence,
    /// Player basket
    pub basket: Basket,
    /// Active falling symbols (sorted by id for determinism)
    pub symbols: Vec<FallingSymbol>,
    /// At most one caught letter in its grace window
    pub caught: Option<CaughtDisplay>,
    /// Simulation clock (seconds since round start)
    pub time: f64,
    /// Seconds until the next spawn attempt
    pub spawn_timer: f32,
    /// Pending boundary events, drained by the shell
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new controller in `Idle` with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new controller in `Idle` with explicit tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let basket = Basket {
            pos: Vec2::new(
                (tuning.playfield_width - tuning.basket_width) / 2.0,
                tuning.playfield_height - tuning.basket_bottom_margin,
            ),
            width: tuning.basket_width,
            height: tuning.basket_height,
            speed: tuning.basket_speed,
        };
        Self {
            seed,
            rng_state: RngState::new(seed),
            tuning,
            round_state: RoundState::Idle,
            score: 0,
            target: TargetSequence::default(),
            basket,
            symbols: Vec::new(),
            caught: None,
            time: 0.0,
            spawn_timer: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending boundary events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin or resume the round.
    ///
    /// `Idle -> Running` re-centers the basket and restarts the spawn
    /// period; `Ended -> Running` is a full restart.
    pub fn start(&mut self) {
        match self.round_state {
            RoundState::Running => {}
            RoundState::Ended => self.reset(),
            RoundState::Idle => {
                self.center_basket();
                self.spawn_timer = self.tuning.spawn_interval;
                self.round_state = RoundState::Running;
                log::info!("Round running, target '{}'", self.target.symbol());
            }
        }
    }

    /// Freeze the round in place. Symbols stop falling and the spawn period
    /// stops elapsing because `tick` no-ops outside `Running`.
    pub fn pause(&mut self) {
        if self.round_state == RoundState::Running {
            self.round_state = RoundState::Idle;
            log::info!("Round paused at score {}", self.score);
        }
    }

    /// Zero the round and start again from 'A'
    pub fn reset(&mut self) {
        self.score = 0;
        self.target.reset();
        self.symbols.clear();
        self.caught = None;
        self.time = 0.0;
        self.round_state = RoundState::Idle;
        self.start();
    }

    /// Force the round over from any state (the shell's Exit control)
    pub fn exit(&mut self) {
        if self.round_state != RoundState::Ended {
            self.end_round();
        }
    }

    /// New playfield bounds from the shell (resize-driven). The basket is
    /// re-clamped so it never leaves the visible field.
    pub fn set_playfield(&mut self, width: f32, height: f32) {
        self.tuning.playfield_width = width;
        self.tuning.playfield_height = height;
        self.basket.pos.x = clamp_to_playfield(self.basket.pos.x, self.basket.width, width);
    }

    /// Advance the target cursor, ending the round past 'Z'
    pub(crate) fn advance_target(&mut self) {
        match self.target.advance() {
            Some(next) => self.events.push(GameEvent::TargetAdvanced(next)),
            None => self.end_round(),
        }
    }

    pub(crate) fn end_round(&mut self) {
        self.round_state = RoundState::Ended;
        self.symbols.clear();
        self.caught = None;
        log::info!("Round ended, final score {}", self.score);
        self.events.push(GameEvent::RoundEnded { score: self.score });
    }

    /// Spawn one symbol carrying the current target letter at a random x
    pub(crate) fn spawn_symbol(&mut self) {
        let max_x = (self.tuning.playfield_width - self.tuning.symbol_width).max(0.0);
        let x = self.rng_state.next_unit() * max_x;
        let speed =
            self.tuning.fall_speed + self.score as f32 * self.tuning.fall_speed_per_point;
        let id = self.next_entity_id();
        self.symbols.push(FallingSymbol {
            id,
            text: self.target.symbol(),
            pos: Vec2::new(x, -self.tuning.symbol_height),
            speed,
        });
    }

    fn center_basket(&mut self) {
        self.basket.pos = Vec2::new(
            (self.tuning.playfield_width - self.basket.width) / 2.0,
            self.tuning.playfield_height - self.tuning.basket_bottom_margin,
        );
    }
}
