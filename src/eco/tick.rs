//! Discrete turn advance
//!
//! Core loop that advances the ecosystem one turn. Step order is fixed: later
//! steps see (and may override) the effects of earlier ones, and the terminal
//! check always runs last.

use super::adversary::{Sabotage, drift_neighbors, step_adversary};
use super::events::step_event;
use super::policy::{Resolution, step_policy};
use super::state::{Ecosystem, Outcome, ResourceState};
use crate::consts::*;
use crate::rng::RandomSource;
use crate::{clamp_stat, floor_zero};

/// What happened during one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u32,
    pub health_delta: i32,
    pub policy_resolution: Option<Resolution>,
    pub sabotage: Option<Sabotage>,
    /// Set if this turn ended the game
    pub outcome: Option<Outcome>,
}

/// Passive energy/water drift from stability and biodiversity
fn apply_resource_drift(res: &mut ResourceState) {
    let passive_energy = res.stability.div_euclid(15) - 1;
    let passive_water = res.biodiversity.div_euclid(8) - 1;
    res.energy = floor_zero(res.energy + passive_energy);
    res.water = floor_zero(res.water + passive_water);
}

/// Sum of this turn's health changes, before clamping
fn health_drift(res: &ResourceState) -> (i32, Vec<&'static str>) {
    let mut delta = 0;
    let mut notes = Vec::new();
    if res.stability < UNSTABLE_THRESHOLD {
        delta -= 2;
        notes.push("Planet unstable! Ecosystem suffering.");
    } else if res.stability > THRIVING_STABILITY
        && res.biodiversity > THRIVING_BIODIVERSITY
        && res.health < MAX_STAT
    {
        delta += 1;
    }
    if res.water < SHORTAGE_THRESHOLD || res.energy < SHORTAGE_THRESHOLD {
        delta -= 1;
        notes.push("Critical resource shortage! Ecosystem suffering.");
    }
    (delta, notes)
}

impl<R: RandomSource> Ecosystem<R> {
    /// Advance the simulation by one turn
    ///
    /// Called once per scheduling period. Returns `None` once the game is over.
    pub fn advance_turn(&mut self) -> Option<TurnReport> {
        if self.resources.game_over {
            return None;
        }

        self.resources.turn += 1;
        let turn = self.resources.turn;
        self.note(format!("--- Turn {turn} Start ---"));

        apply_resource_drift(&mut self.resources);

        let (health_delta, notes) = health_drift(&self.resources);
        for note in notes {
            self.note(note);
        }
        self.resources.health = clamp_stat(self.resources.health + health_delta);

        step_event(
            &mut self.event,
            &mut self.resources,
            &mut self.rng,
            &mut self.journal,
        );

        let policy_resolution = step_policy(&mut self.policy, turn, &mut self.rng, &mut self.journal);

        let sabotage = if self.resources.corruptor_identified {
            None
        } else {
            step_adversary(
                &mut self.resources,
                &mut self.neighbors,
                &mut self.rng,
                &mut self.journal,
            )
        };

        drift_neighbors(&mut self.neighbors, &mut self.rng);

        let outcome = self.check_game_over();
        self.note(format!("--- Turn {turn} End ---"));

        Some(TurnReport {
            turn,
            health_delta,
            policy_resolution,
            sabotage,
            outcome,
        })
    }

    /// Latch the game-over state if a terminal condition holds
    ///
    /// Priority: collapse, then corruptor win, then survival. Returns the
    /// outcome if this call ended the game.
    pub fn check_game_over(&mut self) -> Option<Outcome> {
        let res = &self.resources;
        if res.game_over {
            return None;
        }

        let outcome = if res.health <= 0 {
            Outcome::Collapse
        } else if !res.corruptor_identified
            && res.health < CORRUPTOR_WIN_HEALTH
            && res.stability < CORRUPTOR_WIN_STABILITY
        {
            let corruptor = self.neighbors.corruptor_mut();
            corruptor.reveal();
            Outcome::CorruptorWins {
                corruptor: corruptor.name().to_string(),
            }
        } else if !res.corruptor_identified && res.turn >= SURVIVAL_TURNS {
            Outcome::SurvivalWin
        } else {
            return None;
        };

        self.finish(outcome.clone());
        Some(outcome)
    }

    /// Latch game over with the given outcome
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.resources.game_over {
            return;
        }
        self.resources.game_over = true;
        self.note(outcome.message());
        log::info!("Ecosystem session ended on turn {}: {:?}", self.resources.turn, outcome);
        self.outcome = Some(outcome);
    }
}
