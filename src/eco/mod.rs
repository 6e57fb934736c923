//! Ecosystem simulation module
//!
//! A turn-based planet-management game against a hidden saboteur. The module
//! is pure and deterministic given its random source:
//! - Turns advance only through [`Ecosystem::advance_turn`]
//! - Player actions execute to completion before anything else mutates state
//! - All randomness flows through the session's [`crate::rng::RandomSource`]
//! - No rendering or platform dependencies

pub mod actions;
pub mod adversary;
pub mod events;
pub mod journal;
pub mod policy;
pub mod state;
pub mod tick;

pub use actions::{ActionOutcome, DevelopKind, ResourceKind, Verdict, scaled_cost};
pub use adversary::Sabotage;
pub use events::EventKind;
pub use journal::{GameLog, LogEntry};
pub use policy::{POLICY_CATALOG, PolicyProposal, Resolution};
pub use state::{
    ActiveEvent, ActivePolicy, EcoView, Ecosystem, EventView, NEIGHBOR_NAMES, Neighbor,
    NeighborRegistry, NeighborView, Outcome, PolicyView, ResourceState,
};
pub use tick::TurnReport;
