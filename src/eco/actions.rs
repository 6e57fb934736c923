//! Player-triggered actions
//!
//! Each entry point runs to completion, is a no-op once the game is over, and
//! finishes with a terminal-state check. Invalid targets are ignored rather
//! than reported as errors.

use serde::{Deserialize, Serialize};

use super::policy;
use super::state::{Ecosystem, Outcome};
use crate::clamp_stat;
use crate::consts::{
    ACCUSATION_PASS_CHANCE, FAILED_ACCUSATION_PENALTY, MIN_RESOURCE_COST, RESEARCH_DISCOUNT,
    WRONG_ACCUSATION_PENALTY,
};
use crate::rng::RandomSource;

/// Result of a player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action changed the state
    Applied,
    /// Valid, but the player could not afford it
    Declined,
    /// Game over or invalid target; nothing happened
    Ignored,
}

/// Gatherable resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Energy,
    Water,
    Dna,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Energy => "energy",
            ResourceKind::Water => "water",
            ResourceKind::Dna => "dna",
        }
    }

    /// (amount gathered, health cost)
    fn yield_and_cost(&self) -> (i32, i32) {
        match self {
            ResourceKind::Energy => (10, 1),
            ResourceKind::Water => (10, 1),
            ResourceKind::Dna => (5, 2),
        }
    }
}

/// Development projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevelopKind {
    Flora,
    Fauna,
}

impl DevelopKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevelopKind::Flora => "Flora",
            DevelopKind::Fauna => "Fauna",
        }
    }
}

/// Result of an accusation vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The corruptor was ejected; guardians win
    CorruptorEjected,
    /// An innocent neighbor was ejected
    InnocentEjected,
    /// The vote failed; nobody was ejected
    VoteFailed,
}

/// Base cost reduced 5% per research level, never below 1
pub fn scaled_cost(base: i32, research_level: u32) -> i32 {
    let efficiency = 1.0 - f64::from(research_level) * RESEARCH_DISCOUNT;
    ((f64::from(base) * efficiency).floor() as i32).max(MIN_RESOURCE_COST)
}

impl<R: RandomSource> Ecosystem<R> {
    /// Gather a resource at a small health cost
    pub fn gather_resource(&mut self, kind: ResourceKind) -> ActionOutcome {
        if self.resources.game_over {
            return ActionOutcome::Ignored;
        }
        let (gain, health_cost) = kind.yield_and_cost();
        let res = &mut self.resources;
        match kind {
            ResourceKind::Energy => res.energy += gain,
            ResourceKind::Water => res.water += gain,
            ResourceKind::Dna => res.dna += gain,
        }
        res.health = clamp_stat(res.health - health_cost);
        self.note(format!(
            "Gathered {gain} {}. Health decreased by {health_cost}.",
            kind.as_str()
        ));
        self.check_game_over();
        ActionOutcome::Applied
    }

    /// Spend resources to grow biodiversity and stability
    pub fn develop(&mut self, kind: DevelopKind) -> ActionOutcome {
        if self.resources.game_over {
            return ActionOutcome::Ignored;
        }
        let level = self.resources.research_level;
        let (cost_e, cost_w, cost_d) = match kind {
            DevelopKind::Flora => (scaled_cost(20, level), scaled_cost(10, level), 0),
            DevelopKind::Fauna => (
                scaled_cost(15, level),
                scaled_cost(15, level),
                scaled_cost(5, level),
            ),
        };
        let res = &self.resources;
        if res.energy < cost_e || res.water < cost_w || res.dna < cost_d {
            self.note(format!("Not enough resources to develop {}.", kind.as_str()));
            return ActionOutcome::Declined;
        }

        let res = &mut self.resources;
        res.energy -= cost_e;
        res.water -= cost_w;
        res.dna -= cost_d;
        let message = match kind {
            DevelopKind::Flora => {
                res.biodiversity += 5;
                res.stability = clamp_stat(res.stability + 2);
                res.virtual_trees += 10;
                format!("Developed Flora (+5 Bio, +2 Stability). Cost: {cost_e}E, {cost_w}W.")
            }
            DevelopKind::Fauna => {
                res.biodiversity += 10;
                res.stability = clamp_stat(res.stability + 5);
                format!(
                    "Developed Fauna (+10 Bio, +5 Stability). Cost: {cost_e}E, {cost_w}W, {cost_d}D."
                )
            }
        };
        self.note(message);
        self.check_game_over();
        ActionOutcome::Applied
    }

    /// Raise the research level, making every cost cheaper
    pub fn research(&mut self) -> ActionOutcome {
        if self.resources.game_over {
            return ActionOutcome::Ignored;
        }
        let level = self.resources.research_level;
        let (cost_e, cost_d) = (scaled_cost(30, level), scaled_cost(10, level));
        if self.resources.energy < cost_e || self.resources.dna < cost_d {
            self.note("Not enough resources for Research.");
            return ActionOutcome::Declined;
        }
        let res = &mut self.resources;
        res.energy -= cost_e;
        res.dna -= cost_d;
        res.research_level += 1;
        res.stability = clamp_stat(res.stability + 5);
        let message = format!(
            "Research successful! Level {} reached (+5 Stability). Efficiency increased. \
             Cost: {cost_e}E, {cost_d}D.",
            res.research_level
        );
        self.note(message);
        self.check_game_over();
        ActionOutcome::Applied
    }

    /// Try to steal energy and water; healthier targets are harder to rob
    pub fn steal_from_neighbor(&mut self, index: usize) -> ActionOutcome {
        if self.resources.game_over {
            return ActionOutcome::Ignored;
        }
        let Some(target) = self.neighbors.get(index).filter(|n| n.is_active()) else {
            return ActionOutcome::Ignored;
        };
        let name = target.name().to_string();
        let success_chance = (0.6 - f64::from(target.health) / 250.0).max(0.1);
        self.note(format!("Attempting to steal from {name}..."));

        if self.rng.chance(success_chance) {
            let stolen_e = self.rng.int_between(4, 11);
            let stolen_w = self.rng.int_between(4, 11);
            let damage = self.rng.int_between(3, 7);
            self.resources.energy += stolen_e;
            self.resources.water += stolen_w;
            if let Some(target) = self.neighbors.get_mut(index) {
                target.adjust_health(-damage);
            }
            self.note(format!(
                "Success! Stole {stolen_e} Energy and {stolen_w} Water from {name}. Their health \
                 decreased."
            ));
        } else {
            let retaliation = self.rng.int_between(3, 8);
            self.resources.health = clamp_stat(self.resources.health - retaliation);
            self.note(format!(
                "Failed! Stealing attempt detected by {name}. Suffered {retaliation} retaliation \
                 damage."
            ));
        }
        self.check_game_over();
        ActionOutcome::Applied
    }

    /// Call a galaxy-wide vote to eject a neighbor
    ///
    /// Returns `None` when the accusation is not allowed (game over, corruptor
    /// already found, target missing or already ejected).
    pub fn accuse(&mut self, index: usize) -> Option<Verdict> {
        if self.resources.game_over || self.resources.corruptor_identified {
            return None;
        }
        let target = self.neighbors.get(index).filter(|n| n.is_active())?;
        let name = target.name().to_string();
        self.note(format!("You initiated a vote to eject {name}..."));

        let verdict = if self.rng.chance(ACCUSATION_PASS_CHANCE) {
            self.note(format!("The vote passes! {name} is ejected from the galaxy."));
            let target = self.neighbors.get_mut(index)?;
            target.eject();
            if target.is_corruptor() {
                target.reveal();
                self.resources.corruptor_identified = true;
                self.finish(Outcome::GuardiansWin { corruptor: name });
                Verdict::CorruptorEjected
            } else {
                self.note(format!(
                    "FAILURE! {name} was an innocent Guardian! The Corruptor remains hidden..."
                ));
                self.resources.stability =
                    clamp_stat(self.resources.stability - WRONG_ACCUSATION_PENALTY);
                self.note(format!(
                    "Galactic trust shattered. Stability decreased by {WRONG_ACCUSATION_PENALTY}."
                ));
                Verdict::InnocentEjected
            }
        } else {
            self.note(format!(
                "The vote fails! {name} remains. The failed accusation causes further tension."
            ));
            self.resources.stability =
                clamp_stat(self.resources.stability - FAILED_ACCUSATION_PENALTY);
            Verdict::VoteFailed
        };
        self.check_game_over();
        Some(verdict)
    }

    /// Cast the player's one vote on the open policy
    pub fn cast_vote(&mut self, vote_yes: bool) -> ActionOutcome {
        let turn = self.resources.turn;
        if policy::cast_vote(
            &mut self.policy,
            self.resources.game_over,
            turn,
            vote_yes,
            &mut self.journal,
        ) {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Ignored
        }
    }
}
