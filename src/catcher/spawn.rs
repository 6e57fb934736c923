//! Item spawning

use glam::Vec2;

use super::state::{ITEM_TABLE, Item, ItemKind};
use crate::rng::{RandomSource, pick_weighted};

/// Roll an item kind from the spawn table
pub fn roll_kind<R: RandomSource + ?Sized>(rng: &mut R) -> ItemKind {
    pick_weighted(rng, &ITEM_TABLE)
        .map(|spec| spec.kind)
        .unwrap_or(ItemKind::CommonFruit)
}

/// Build a new item just above the play area
///
/// The whole circle starts inside `[0, width]` horizontally and fully
/// above the top edge.
pub fn spawn_item<R: RandomSource + ?Sized>(rng: &mut R, id: u32, width: f32) -> Item {
    let kind = roll_kind(rng);
    let radius = kind.spec().radius;
    let span = (width - 2.0 * radius).max(0.0);
    let x = rng.next_f64() as f32 * span + radius;
    Item::new(id, kind, Vec2::new(x, -radius))
}
