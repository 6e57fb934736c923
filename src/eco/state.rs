//! Ecosystem state and core simulation types
//!
//! `Ecosystem` is the single simulation context: it owns the resources, the
//! neighbor registry, the active event/policy slots, the journal and the
//! random source. Presentation code reads it through [`Ecosystem::view`].

use serde::{Deserialize, Serialize};

use super::events::EventKind;
use super::journal::{DEFAULT_MAX_ENTRIES, GameLog};
use crate::rng::{RandomSource, SeededRandom};

/// Names of the rival planets, in display order
pub const NEIGHBOR_NAMES: [&str; 5] = [
    "Xylar Delta",
    "Cygnus Station",
    "Kepler Mock-2",
    "Andoria Colony",
    "Proxima Centauri B",
];

/// The player's planet: resources, stats and one-way latches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub planet_name: String,
    /// Planet health, kept in `[0, 100]`
    pub health: i32,
    pub biodiversity: i32,
    /// Kept in `[0, 100]`
    pub stability: i32,
    pub energy: i32,
    pub water: i32,
    pub dna: i32,
    /// Never decreases
    pub research_level: u32,
    pub virtual_trees: u32,
    pub turn: u32,
    /// Latched once; only a full reset clears it
    pub game_over: bool,
    /// Latched once the corruptor has been ejected
    pub corruptor_identified: bool,
}

impl Default for ResourceState {
    fn default() -> Self {
        Self {
            planet_name: "Genesis Prime".to_string(),
            health: 100,
            biodiversity: 10,
            stability: 50,
            energy: 50,
            water: 50,
            dna: 10,
            research_level: 0,
            virtual_trees: 0,
            turn: 0,
            game_over: false,
            corruptor_identified: false,
        }
    }
}

impl ResourceState {
    /// Cost reduction from research, as a percentage for display
    pub fn efficiency_percent(&self) -> u32 {
        self.research_level * 5
    }
}

/// A rival planet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    name: String,
    /// Kept in `[0, 100]`
    pub health: i32,
    is_corruptor: bool,
    is_ejected: bool,
    is_revealed_corruptor: bool,
}

impl Neighbor {
    fn new(name: impl Into<String>, health: i32, is_corruptor: bool) -> Self {
        Self {
            name: name.into(),
            health: crate::clamp_stat(health),
            is_corruptor,
            is_ejected: false,
            is_revealed_corruptor: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Never leaves the crate; presentation only sees [`NeighborView`]
    pub(crate) fn is_corruptor(&self) -> bool {
        self.is_corruptor
    }

    pub fn is_ejected(&self) -> bool {
        self.is_ejected
    }

    pub fn is_revealed_corruptor(&self) -> bool {
        self.is_revealed_corruptor
    }

    /// Still taking part in the galaxy
    pub fn is_active(&self) -> bool {
        !self.is_ejected
    }

    pub(crate) fn eject(&mut self) {
        self.is_ejected = true;
    }

    pub(crate) fn reveal(&mut self) {
        if self.is_corruptor {
            self.is_revealed_corruptor = true;
        }
    }

    /// Apply a health delta, clamped to `[0, 100]`
    pub(crate) fn adjust_health(&mut self, delta: i32) {
        self.health = crate::clamp_stat(self.health + delta);
    }
}

/// All neighbors, exactly one of which is the corruptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRegistry {
    neighbors: Vec<Neighbor>,
    corruptor_index: usize,
}

impl NeighborRegistry {
    /// Create the standard roster with random health and a random corruptor
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let healths: Vec<i32> = NEIGHBOR_NAMES
            .iter()
            .map(|_| rng.int_between(80, 100))
            .collect();
        let corruptor_index = rng.index(NEIGHBOR_NAMES.len());
        Self::from_parts(NEIGHBOR_NAMES.iter().copied().zip(healths), corruptor_index)
            .unwrap_or_else(|| Self::single(NEIGHBOR_NAMES[0]))
    }

    /// Build a registry from `(name, health)` pairs with an explicit corruptor
    ///
    /// Returns `None` if the roster is empty or the index is out of range.
    pub fn from_parts<'a>(
        roster: impl IntoIterator<Item = (&'a str, i32)>,
        corruptor_index: usize,
    ) -> Option<Self> {
        let neighbors: Vec<Neighbor> = roster
            .into_iter()
            .enumerate()
            .map(|(i, (name, health))| Neighbor::new(name, health, i == corruptor_index))
            .collect();
        if corruptor_index >= neighbors.len() {
            return None;
        }
        Some(Self {
            neighbors,
            corruptor_index,
        })
    }

    fn single(name: &str) -> Self {
        Self {
            neighbors: vec![Neighbor::new(name, 100, true)],
            corruptor_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Neighbor> {
        self.neighbors.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Neighbor> {
        self.neighbors.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> {
        self.neighbors.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Neighbor> {
        self.neighbors.iter_mut()
    }

    pub(crate) fn corruptor_index(&self) -> usize {
        self.corruptor_index
    }

    pub(crate) fn corruptor(&self) -> &Neighbor {
        &self.neighbors[self.corruptor_index]
    }

    pub(crate) fn corruptor_mut(&mut self) -> &mut Neighbor {
        &mut self.neighbors[self.corruptor_index]
    }

    /// Indices of non-ejected neighbors other than the corruptor
    pub(crate) fn innocent_targets(&self) -> Vec<usize> {
        self.neighbors
            .iter()
            .enumerate()
            .filter(|(i, n)| *i != self.corruptor_index && n.is_active())
            .map(|(i, _)| i)
            .collect()
    }
}

/// The galactic event currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: EventKind,
    /// Counts down each turn; the event clears when it reaches 0
    pub turns_remaining: u32,
}

/// The policy currently open for voting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePolicy {
    pub id: u32,
    pub proposal: String,
    /// Turn the proposal was made on
    pub proposed_turn: u32,
    /// Resolved on the first turn at or past this one
    pub vote_deadline_turn: u32,
    pub player_has_voted: bool,
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Planet health reached zero
    Collapse,
    /// Planet fell to the corruptor's sabotage
    CorruptorWins { corruptor: String },
    /// Survived long enough without unmasking the corruptor
    SurvivalWin,
    /// The corruptor was ejected by vote
    GuardiansWin { corruptor: String },
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Collapse => {
                "Your planet's ecosystem has collapsed! GAME OVER.".to_string()
            }
            Outcome::CorruptorWins { corruptor } => format!(
                "Your planet is on the brink, defenses failing... The Corruptor's sabotage \
                 prevails! Corruptors win! GAME OVER. The Corruptor was {corruptor}."
            ),
            Outcome::SurvivalWin => "You have successfully guided your planet through numerous \
                 challenges! The Corruptor remains hidden, but your world endures. Guardians Win \
                 (Survival)!"
                .to_string(),
            Outcome::GuardiansWin { corruptor } => format!(
                "SUCCESS! {corruptor} was the Corruptor! The galaxy is safe. Guardians win!"
            ),
        }
    }

    /// True for outcomes the player counts as a win
    pub fn is_player_win(&self) -> bool {
        matches!(self, Outcome::SurvivalWin | Outcome::GuardiansWin { .. })
    }
}

/// Complete ecosystem session
///
/// Only the engine entry points mutate a session; callers get read-only
/// accessors.
#[derive(Debug, Clone)]
pub struct Ecosystem<R: RandomSource = SeededRandom> {
    pub(crate) resources: ResourceState,
    pub(crate) neighbors: NeighborRegistry,
    pub(crate) event: Option<ActiveEvent>,
    pub(crate) policy: Option<ActivePolicy>,
    /// Set together with `resources.game_over`
    pub(crate) outcome: Option<Outcome>,
    pub(crate) journal: GameLog,
    pub(crate) rng: R,
}

impl Ecosystem<SeededRandom> {
    /// Start a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SeededRandom::new(seed))
    }
}

impl<R: RandomSource> Ecosystem<R> {
    /// Start a new session drawing from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::with_rng_and_log(rng, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_rng_and_log(mut rng: R, max_log_entries: usize) -> Self {
        let neighbors = NeighborRegistry::generate(&mut rng);
        Self::with_roster_and_log(rng, neighbors, max_log_entries)
    }

    /// Start a session with a fixed neighbor roster; draws nothing from `rng`
    pub fn with_roster(rng: R, neighbors: NeighborRegistry) -> Self {
        Self::with_roster_and_log(rng, neighbors, DEFAULT_MAX_ENTRIES)
    }

    fn with_roster_and_log(rng: R, neighbors: NeighborRegistry, max_log_entries: usize) -> Self {
        let mut eco = Self {
            resources: ResourceState::default(),
            neighbors,
            event: None,
            policy: None,
            outcome: None,
            journal: GameLog::with_capacity(max_log_entries),
            rng,
        };
        eco.announce_start();
        eco
    }

    /// Full game restart; the random stream continues
    pub fn reset(&mut self) {
        self.neighbors = NeighborRegistry::generate(&mut self.rng);
        self.resources = ResourceState::default();
        self.event = None;
        self.policy = None;
        self.outcome = None;
        self.journal.clear();
        self.announce_start();
    }

    fn announce_start(&mut self) {
        log::debug!(
            "Corruptor is {} at index {}",
            self.neighbors.corruptor().name(),
            self.neighbors.corruptor_index()
        );
        self.journal.push(
            0,
            "Simulation started. Balance your world, watch your neighbors, and survive.",
        );
    }

    pub fn is_game_over(&self) -> bool {
        self.resources.game_over
    }

    pub fn resources(&self) -> &ResourceState {
        &self.resources
    }

    pub fn neighbors(&self) -> &NeighborRegistry {
        &self.neighbors
    }

    pub fn event(&self) -> Option<ActiveEvent> {
        self.event
    }

    pub fn policy(&self) -> Option<&ActivePolicy> {
        self.policy.as_ref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn journal(&self) -> &GameLog {
        &self.journal
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Record a journal line stamped with the current turn
    pub(crate) fn note(&mut self, message: impl Into<String>) {
        self.journal.push(self.resources.turn, message);
    }

    /// Presentation-facing projection of the session
    pub fn view(&self) -> EcoView {
        let game_over = self.resources.game_over;
        let neighbors: Vec<NeighborView> = self
            .neighbors
            .iter()
            .enumerate()
            .map(|(index, n)| NeighborView::project(index, n))
            .collect();
        let accusation_targets = if game_over || self.resources.corruptor_identified {
            Vec::new()
        } else {
            neighbors
                .iter()
                .filter(|n| !n.is_ejected)
                .map(|n| n.index)
                .collect()
        };
        EcoView {
            resources: self.resources.clone(),
            efficiency_percent: self.resources.efficiency_percent(),
            neighbors,
            event: self.event.map(|e| EventView {
                name: e.kind.name(),
                turns_remaining: e.turns_remaining,
            }),
            policy: self.policy.as_ref().map(|p| PolicyView {
                id: p.id,
                proposal: p.proposal.clone(),
                vote_deadline_turn: p.vote_deadline_turn,
            }),
            can_vote: self
                .policy
                .as_ref()
                .is_some_and(|p| !p.player_has_voted && !game_over),
            accusation_targets,
            outcome: self.outcome.as_ref().map(Outcome::message),
        }
    }
}

/// Neighbor as shown to the player; the corruptor flag only appears once revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborView {
    pub index: usize,
    pub name: String,
    pub health: i32,
    pub is_ejected: bool,
    pub is_revealed_corruptor: bool,
}

impl NeighborView {
    fn project(index: usize, neighbor: &Neighbor) -> Self {
        Self {
            index,
            name: neighbor.name().to_string(),
            health: neighbor.health,
            is_ejected: neighbor.is_ejected(),
            is_revealed_corruptor: neighbor.is_revealed_corruptor(),
        }
    }

    /// Status suffix used by text frontends
    pub fn status(&self) -> &'static str {
        match (self.is_ejected, self.is_revealed_corruptor) {
            (true, true) => " (Ejected - Was Corruptor!)",
            (true, false) => " (Ejected)",
            (false, true) => " (Corruptor!)",
            (false, false) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub name: &'static str,
    pub turns_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyView {
    pub id: u32,
    pub proposal: String,
    pub vote_deadline_turn: u32,
}

/// Everything a renderer needs after a state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EcoView {
    pub resources: ResourceState,
    pub efficiency_percent: u32,
    pub neighbors: Vec<NeighborView>,
    pub event: Option<EventView>,
    pub policy: Option<PolicyView>,
    pub can_vote: bool,
    /// Neighbors that may currently be accused
    pub accusation_targets: Vec<usize>,
    pub outcome: Option<String>,
}
