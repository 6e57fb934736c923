//! Galactic events
//!
//! At most one event is active. Its one-shot effect fires on the turn it
//! starts; afterwards it only counts down.

use serde::{Deserialize, Serialize};

use super::journal::GameLog;
use super::state::{ActiveEvent, ResourceState};
use crate::consts::EVENT_CHANCE;
use crate::rng::{RandomSource, Weighted, pick_weighted};
use crate::{clamp_stat, floor_zero};

/// Event catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    SolarFlare,
    AsteroidImpact,
    MicrometeoriteShower,
    CosmicBloom,
    GalacticRecession,
}

impl EventKind {
    /// Every event, drawn with equal weight
    pub const ALL: [EventKind; 5] = [
        EventKind::SolarFlare,
        EventKind::AsteroidImpact,
        EventKind::MicrometeoriteShower,
        EventKind::CosmicBloom,
        EventKind::GalacticRecession,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::SolarFlare => "Solar Flare",
            EventKind::AsteroidImpact => "Asteroid Impact",
            EventKind::MicrometeoriteShower => "Micrometeorite Shower",
            EventKind::CosmicBloom => "Cosmic Bloom",
            EventKind::GalacticRecession => "Galactic Recession",
        }
    }

    /// Turns the event stays active
    pub fn duration(&self) -> u32 {
        match self {
            EventKind::SolarFlare => 3,
            EventKind::AsteroidImpact => 1,
            EventKind::MicrometeoriteShower => 4,
            EventKind::CosmicBloom => 4,
            EventKind::GalacticRecession => 5,
        }
    }

    /// Apply the one-shot effect and describe it
    fn apply<R: RandomSource + ?Sized>(&self, res: &mut ResourceState, rng: &mut R) -> String {
        match self {
            EventKind::SolarFlare => {
                res.energy += 25;
                res.water = floor_zero(res.water - 20);
                "Solar Flare: Energy surged (+25 E), but water evaporated (-20 W)!".to_string()
            }
            EventKind::AsteroidImpact => {
                let damage = rng.int_between(5, 19);
                res.health = clamp_stat(res.health - damage);
                let dna_gain = rng.int_between(5, 14);
                res.dna += dna_gain;
                format!(
                    "Asteroid Impact: Planet damaged (-{damage} Health), but found rare samples \
                     (+{dna_gain} DNA)!"
                )
            }
            EventKind::MicrometeoriteShower => {
                let loss = 5;
                res.stability = clamp_stat(res.stability - loss);
                format!("Micrometeorite Shower: Planetary shields strained (-{loss} Stability).")
            }
            EventKind::CosmicBloom => {
                res.dna += 15;
                res.biodiversity += 5;
                "Cosmic Bloom: Strange spores enhance local life (+15 DNA, +5 Biodiversity)!"
                    .to_string()
            }
            // TODO: halt passive resource drift while the recession is active
            EventKind::GalacticRecession => {
                "Galactic Recession: Passive resource generation halted temporarily.".to_string()
            }
        }
    }
}

impl Weighted for EventKind {
    fn weight(&self) -> f64 {
        1.0
    }
}

/// One event step: count down the active event, then maybe start a new one
pub fn step_event<R: RandomSource + ?Sized>(
    slot: &mut Option<ActiveEvent>,
    res: &mut ResourceState,
    rng: &mut R,
    journal: &mut GameLog,
) {
    if let Some(event) = slot.as_mut() {
        event.turns_remaining = event.turns_remaining.saturating_sub(1);
        if event.turns_remaining == 0 {
            journal.push(res.turn, format!("Event ended: {}.", event.kind.name()));
            *slot = None;
        }
    }

    if slot.is_none() && rng.chance(EVENT_CHANCE) {
        trigger_event(slot, res, &mut *rng, journal);
    }
}

/// Start a random event and fire its effect once
pub fn trigger_event<R: RandomSource + ?Sized>(
    slot: &mut Option<ActiveEvent>,
    res: &mut ResourceState,
    rng: &mut R,
    journal: &mut GameLog,
) {
    let Some(&kind) = pick_weighted(&mut *rng, &EventKind::ALL) else {
        return;
    };
    start_event(kind, slot, res, rng, journal);
}

/// Start a specific event and fire its effect once
pub fn start_event<R: RandomSource + ?Sized>(
    kind: EventKind,
    slot: &mut Option<ActiveEvent>,
    res: &mut ResourceState,
    rng: &mut R,
    journal: &mut GameLog,
) {
    *slot = Some(ActiveEvent {
        kind,
        turns_remaining: kind.duration(),
    });
    journal.push(
        res.turn,
        format!(
            "New Galactic Event: {} starts! Duration: {} turns.",
            kind.name(),
            kind.duration()
        ),
    );
    let effect = kind.apply(res, rng);
    journal.push(res.turn, effect);
}
