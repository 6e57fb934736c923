//! Catcher arcade module
//!
//! A single-screen game: catch falling fruit, avoid falling stones. Advances
//! one fixed step per display frame:
//! - Input is sampled once at the start of each frame
//! - Physics use per-frame speeds, no delta-time scaling
//! - A hazard hit latches game over until [`CatcherState::restart`]

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::circle_rect_overlap;
pub use spawn::spawn_item;
pub use state::{
    CatcherPhase, CatcherState, CatcherView, HeldKeys, ITEM_TABLE, InputFlags, Item, ItemKind,
    ItemSpec, Player,
};
pub use tick::{FrameInput, FrameReport, tick};
