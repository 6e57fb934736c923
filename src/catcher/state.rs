//! Catcher state and core simulation types

use std::sync::atomic::{AtomicBool, Ordering};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::rng::{RandomSource, SeededRandom, Weighted};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatcherPhase {
    /// Items falling, player moving
    Playing,
    /// A hazard hit the player; waiting for restart
    GameOver,
}

/// Falling item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Orange fruit
    CommonFruit,
    /// Gold fruit
    RareFruit,
    /// Stone
    Hazard,
}

/// Static properties of an item kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSpec {
    pub kind: ItemKind,
    pub radius: f32,
    /// Units per frame
    pub fall_speed: f32,
    pub score: u32,
    /// Spawn probability
    pub probability: f64,
}

impl Weighted for ItemSpec {
    fn weight(&self) -> f64 {
        self.probability
    }
}

/// Spawn table, walked in order by cumulative probability
pub static ITEM_TABLE: [ItemSpec; 3] = [
    ItemSpec {
        kind: ItemKind::CommonFruit,
        radius: 12.0,
        fall_speed: 2.5,
        score: 1,
        probability: 0.60,
    },
    ItemSpec {
        kind: ItemKind::RareFruit,
        radius: 10.0,
        fall_speed: 3.5,
        score: 5,
        probability: 0.10,
    },
    ItemSpec {
        kind: ItemKind::Hazard,
        radius: 15.0,
        fall_speed: 4.0,
        score: 0,
        probability: 0.30,
    },
];

impl ItemKind {
    pub fn spec(&self) -> &'static ItemSpec {
        match self {
            ItemKind::CommonFruit => &ITEM_TABLE[0],
            ItemKind::RareFruit => &ITEM_TABLE[1],
            ItemKind::Hazard => &ITEM_TABLE[2],
        }
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, ItemKind::Hazard)
    }
}

/// A falling item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    /// Circle center
    pub pos: Vec2,
    pub radius: f32,
    pub fall_speed: f32,
    pub score: u32,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2) -> Self {
        let spec = kind.spec();
        Self {
            id,
            kind,
            pos,
            radius: spec.radius,
            fall_speed: spec.fall_speed,
            score: spec.score,
        }
    }

    /// True once the top of the circle is below the play area
    pub fn is_below(&self, floor: f32) -> bool {
        self.pos.y - self.radius > floor
    }
}

/// The player (caveman); moves horizontally only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity this frame
    pub dx: f32,
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (PLAY_WIDTH - PLAYER_WIDTH) / 2.0,
                PLAY_HEIGHT - PLAYER_FLOOR_OFFSET,
            ),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            dx: 0.0,
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Set `dx` from held keys; both or neither held means standing still
    pub fn steer(&mut self, left: bool, right: bool) {
        self.dx = match (left, right) {
            (true, false) => -self.speed,
            (false, true) => self.speed,
            _ => 0.0,
        };
    }

    /// Advance by `dx` and clamp to `[0, play_width - width]`
    pub fn advance(&mut self, play_width: f32) {
        let max_x = (play_width - self.width).max(0.0);
        self.pos.x = (self.pos.x + self.dx).clamp(0.0, max_x);
    }
}

/// Held direction keys, written by input callbacks and read once per frame
///
/// Each direction is a single atomic flag, so concurrent writers resolve
/// last-writer-wins and a frame never observes a torn value.
#[derive(Debug, Default)]
pub struct InputFlags {
    left: AtomicBool,
    right: AtomicBool,
}

/// A frame's view of the held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

impl InputFlags {
    pub fn set_left(&self, held: bool) {
        self.left.store(held, Ordering::Relaxed);
    }

    pub fn set_right(&self, held: bool) {
        self.right.store(held, Ordering::Relaxed);
    }

    /// Key-down handler; ignored while the run is over
    pub fn press(&self, left: bool, phase: CatcherPhase) {
        if phase == CatcherPhase::GameOver {
            return;
        }
        if left {
            self.set_left(true);
        } else {
            self.set_right(true);
        }
    }

    /// Key-up handler; always clears
    pub fn release(&self, left: bool) {
        if left {
            self.set_left(false);
        } else {
            self.set_right(false);
        }
    }

    pub fn clear(&self) {
        self.set_left(false);
        self.set_right(false);
    }

    pub fn snapshot(&self) -> HeldKeys {
        HeldKeys {
            left: self.left.load(Ordering::Relaxed),
            right: self.right.load(Ordering::Relaxed),
        }
    }
}

/// Complete catcher session
#[derive(Debug, Clone)]
pub struct CatcherState<R: RandomSource = SeededRandom> {
    pub phase: CatcherPhase,
    pub score: u32,
    pub player: Player,
    /// Live items (spawn order)
    pub items: Vec<Item>,
    /// Frames since the last spawn
    pub spawn_timer: u32,
    /// Frames simulated this run
    pub frame: u64,
    /// Play area size
    pub bounds: Vec2,
    pub(crate) rng: R,
    next_id: u32,
}

impl CatcherState<SeededRandom> {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SeededRandom::new(seed))
    }
}

impl<R: RandomSource> CatcherState<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            phase: CatcherPhase::Playing,
            score: 0,
            player: Player::default(),
            items: Vec::new(),
            spawn_timer: 0,
            frame: 0,
            bounds: Vec2::new(PLAY_WIDTH, PLAY_HEIGHT),
            rng,
            next_id: 1,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == CatcherPhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Start a new run; only allowed once the current one is over
    ///
    /// Keys still held from the lost run are released.
    pub fn restart(&mut self, keys: &InputFlags) -> bool {
        if !self.is_game_over() {
            return false;
        }
        log::info!("Restarting catcher (last score {})", self.score);
        keys.clear();
        self.score = 0;
        self.items.clear();
        self.player = Player::default();
        self.spawn_timer = 0;
        self.frame = 0;
        self.phase = CatcherPhase::Playing;
        true
    }

    /// Snapshot for renderers
    pub fn view(&self) -> CatcherView {
        CatcherView {
            phase: self.phase,
            score: self.score,
            player: self.player.clone(),
            items: self.items.clone(),
        }
    }
}

/// What a renderer draws each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatcherView {
    pub phase: CatcherPhase,
    pub score: u32,
    pub player: Player,
    pub items: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_table_sums_to_one() {
        let total: f64 = ITEM_TABLE.iter().map(|s| s.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
        for spec in &ITEM_TABLE {
            assert_eq!(spec.kind.spec(), spec);
        }
    }

    #[test]
    fn test_steer() {
        let mut player = Player::default();
        player.steer(true, false);
        assert_eq!(player.dx, -PLAYER_SPEED);
        player.steer(false, true);
        assert_eq!(player.dx, PLAYER_SPEED);
        player.steer(true, true);
        assert_eq!(player.dx, 0.0);
        player.steer(false, false);
        assert_eq!(player.dx, 0.0);
    }

    #[test]
    fn test_advance_clamps() {
        let mut player = Player::default();
        player.pos.x = 3.0;
        player.steer(true, false);
        player.advance(PLAY_WIDTH);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = PLAY_WIDTH - PLAYER_WIDTH - 2.0;
        player.steer(false, true);
        player.advance(PLAY_WIDTH);
        assert_eq!(player.pos.x, PLAY_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_input_flags() {
        let flags = InputFlags::default();
        flags.press(true, CatcherPhase::Playing);
        assert_eq!(flags.snapshot(), HeldKeys { left: true, right: false });
        flags.press(false, CatcherPhase::GameOver);
        assert!(!flags.snapshot().right);
        flags.release(true);
        assert_eq!(flags.snapshot(), HeldKeys::default());
    }

    #[test]
    fn test_restart_only_when_over() {
        let keys = InputFlags::default();
        let mut state = CatcherState::new(1);
        state.score = 12;
        assert!(!state.restart(&keys));
        assert_eq!(state.score, 12);

        state.phase = CatcherPhase::GameOver;
        state.frame = 300;
        state.spawn_timer = 40;
        assert!(state.restart(&keys));
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.spawn_timer, 0);
        assert_eq!(state.phase, CatcherPhase::Playing);
    }

    #[test]
    fn test_restart_releases_held_keys() {
        let keys = InputFlags::default();
        let mut state = CatcherState::new(2);
        keys.press(true, state.phase);
        keys.press(false, state.phase);

        // Still playing: nothing restarts and the keys stay down
        assert!(!state.restart(&keys));
        assert_eq!(keys.snapshot(), HeldKeys { left: true, right: true });

        state.phase = CatcherPhase::GameOver;
        assert!(state.restart(&keys));
        assert_eq!(keys.snapshot(), HeldKeys::default());
    }
}
