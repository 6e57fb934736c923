//! The hidden corruptor's sabotage, and background neighbor drift

use super::journal::GameLog;
use super::state::{NeighborRegistry, ResourceState};
use crate::clamp_stat;
use crate::consts::SABOTAGE_CHANCE;
use crate::rng::RandomSource;

/// What the corruptor did this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sabotage {
    DrainHealth(i32),
    Destabilize(i32),
    StrikeNeighbor { index: usize, damage: i32 },
}

/// One corruptor step
///
/// Acts only while the corruptor is unidentified and still in the galaxy.
/// Sabotage rolls partition `[0, 1)` into health `[0, 0.4)`, stability
/// `[0.4, 0.7)` and neighbor `[0.7, 1)`; a neighbor strike with no valid
/// target does nothing.
pub fn step_adversary<R: RandomSource + ?Sized>(
    res: &mut ResourceState,
    neighbors: &mut NeighborRegistry,
    rng: &mut R,
    journal: &mut GameLog,
) -> Option<Sabotage> {
    if res.game_over || res.corruptor_identified || !neighbors.corruptor().is_active() {
        return None;
    }
    if !rng.chance(SABOTAGE_CHANCE) {
        return None;
    }

    let roll = rng.next_f64();
    if roll < 0.4 {
        let damage = rng.int_between(2, 5);
        res.health = clamp_stat(res.health - damage);
        journal.push(
            res.turn,
            format!("A sudden malfunction drains vital systems! (-{damage} Health)"),
        );
        Some(Sabotage::DrainHealth(damage))
    } else if roll < 0.7 {
        let loss = rng.int_between(3, 10);
        res.stability = clamp_stat(res.stability - loss);
        journal.push(
            res.turn,
            format!("Strange interference patterns destabilize the planet! (-{loss} Stability)"),
        );
        Some(Sabotage::Destabilize(loss))
    } else {
        let targets = neighbors.innocent_targets();
        if targets.is_empty() {
            return None;
        }
        let index = targets[rng.index(targets.len())];
        let damage = rng.int_between(5, 14);
        let target = neighbors.get_mut(index)?;
        target.adjust_health(-damage);
        journal.push(
            res.turn,
            format!(
                "Whispers from the void... {}'s planet suffers a major setback.",
                target.name()
            ),
        );
        Some(Sabotage::StrikeNeighbor { index, damage })
    }
}

/// Background fluctuation so the galaxy feels alive
///
/// Active innocents drift by `[-3, 3]`; an active corruptor recovers `[0, 2]`.
pub fn drift_neighbors<R: RandomSource + ?Sized>(neighbors: &mut NeighborRegistry, rng: &mut R) {
    for neighbor in neighbors.iter_mut().filter(|n| n.is_active()) {
        let delta = if neighbor.is_corruptor() {
            rng.int_between(0, 2)
        } else {
            rng.int_between(-3, 3)
        };
        neighbor.adjust_health(delta);
    }
}
