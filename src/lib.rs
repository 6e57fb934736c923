//! EcoSphere Games - deterministic cores for two small arcade/idle games
//!
//! Core modules:
//! - `eco`: Turn-based ecosystem simulation (resources, events, policies, hidden corruptor)
//! - `catcher`: Falling-item catcher loop (spawn, physics, collision)
//! - `rng`: Injectable random sources and weighted table picks
//! - `settings`: Runtime pacing and seed configuration
//!
//! Rendering and input wiring are left to the embedding frontend: it reads the
//! view types produced here and calls the mutating entry points.

pub mod catcher;
pub mod eco;
pub mod rng;
pub mod settings;

pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use settings::{Pace, Settings};

/// Game configuration constants
pub mod consts {
    // === Ecosystem ===

    /// Upper bound for planet health and stability
    pub const MAX_STAT: i32 = 100;
    /// Lowest cost any action can be scaled down to
    pub const MIN_RESOURCE_COST: i32 = 1;
    /// Cost reduction per research level (5%)
    pub const RESEARCH_DISCOUNT: f64 = 0.05;
    /// Surviving this many turns without losing wins the game
    pub const SURVIVAL_TURNS: u32 = 50;
    /// Real-time interval between ecosystem turns at normal pace
    pub const BASE_TICK_INTERVAL_MS: u64 = 5000;

    /// Stability below this damages health each turn
    pub const UNSTABLE_THRESHOLD: i32 = 35;
    /// Stability above this (with enough biodiversity) regenerates health
    pub const THRIVING_STABILITY: i32 = 75;
    pub const THRIVING_BIODIVERSITY: i32 = 40;
    /// Energy or water below this damages health each turn
    pub const SHORTAGE_THRESHOLD: i32 = 10;

    /// Corruptor wins when health and stability both fall below these
    pub const CORRUPTOR_WIN_HEALTH: i32 = 15;
    pub const CORRUPTOR_WIN_STABILITY: i32 = 20;

    pub const EVENT_CHANCE: f64 = 0.12;
    pub const POLICY_CHANCE: f64 = 0.08;
    pub const POLICY_PASS_CHANCE: f64 = 0.60;
    /// Turns between a proposal and its vote deadline
    pub const POLICY_VOTE_TURNS: u32 = 2;
    pub const SABOTAGE_CHANCE: f64 = 0.25;
    pub const ACCUSATION_PASS_CHANCE: f64 = 0.60;
    /// Stability lost when an innocent neighbor is ejected
    pub const WRONG_ACCUSATION_PENALTY: i32 = 15;
    /// Stability lost when an accusation vote fails
    pub const FAILED_ACCUSATION_PENALTY: i32 = 5;

    // === Catcher ===

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 500.0;
    pub const PLAY_HEIGHT: f32 = 500.0;

    /// Player (caveman) defaults
    pub const PLAYER_WIDTH: f32 = 35.0;
    pub const PLAYER_HEIGHT: f32 = 45.0;
    /// Distance from the player's top edge to the bottom of the play area
    pub const PLAYER_FLOOR_OFFSET: f32 = 50.0;
    /// Horizontal speed (units per frame)
    pub const PLAYER_SPEED: f32 = 7.0;

    /// Frames between item spawns
    pub const SPAWN_INTERVAL_FRAMES: u32 = 60;
    /// Display refresh interval at normal pace (~60 Hz)
    pub const BASE_FRAME_INTERVAL_MS: u64 = 16;
}

/// Clamp a stat into `[0, MAX_STAT]`
#[inline]
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(0, consts::MAX_STAT)
}

/// Clamp an unbounded resource to be non-negative
#[inline]
pub fn floor_zero(value: i32) -> i32 {
    value.max(0)
}
