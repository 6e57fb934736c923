//! Galactic policy proposals
//!
//! At most one proposal is open. It resolves on the first turn at or past its
//! vote deadline with a fixed pass chance; the player's vote is recorded but
//! does not change the odds.

use serde::Serialize;

use super::journal::GameLog;
use super::state::ActivePolicy;
use crate::consts::{POLICY_CHANCE, POLICY_PASS_CHANCE, POLICY_VOTE_TURNS};
use crate::rng::{RandomSource, Weighted, pick_weighted};

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyProposal {
    pub id: u32,
    pub text: &'static str,
}

impl Weighted for PolicyProposal {
    fn weight(&self) -> f64 {
        1.0
    }
}

/// Every proposal, drawn with equal weight
pub const POLICY_CATALOG: [PolicyProposal; 4] = [
    PolicyProposal {
        id: 1,
        text: "Enforce Strict Pollution Control (All Actions: +1 Health Cost, +2 Stability/turn)",
    },
    PolicyProposal {
        id: 2,
        text: "Subsidize Water Purification (+5 Water/turn, -5 Energy/turn)",
    },
    PolicyProposal {
        id: 3,
        text: "Mandatory Biodiversity Scan (All Players: -10 DNA, +10 Stability)",
    },
    PolicyProposal {
        id: 4,
        text: "Emergency Energy Hoarding (Gather Energy: -50% Yield, +5 Stability/turn)",
    },
];

/// How a proposal was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Passed,
    Failed,
}

/// One policy step: resolve a due proposal, then maybe propose a new one
///
/// Returns the resolution if a proposal closed this turn.
pub fn step_policy<R: RandomSource + ?Sized>(
    slot: &mut Option<ActivePolicy>,
    turn: u32,
    rng: &mut R,
    journal: &mut GameLog,
) -> Option<Resolution> {
    let mut resolved = None;
    if let Some(policy) = slot.take_if(|p| turn >= p.vote_deadline_turn) {
        let passed = rng.chance(POLICY_PASS_CHANCE);
        journal.push(
            turn,
            format!(
                "Policy Vote Ended: \"{}\" {}.",
                policy.proposal,
                if passed { "PASSED" } else { "FAILED" }
            ),
        );
        if passed {
            apply_policy_effect(policy.id, turn, journal);
        }
        resolved = Some(if passed {
            Resolution::Passed
        } else {
            Resolution::Failed
        });
    }

    if slot.is_none() && rng.chance(POLICY_CHANCE) {
        propose_policy(slot, turn, rng, journal);
    }
    resolved
}

/// Open a random proposal with a deadline two turns out
pub fn propose_policy<R: RandomSource + ?Sized>(
    slot: &mut Option<ActivePolicy>,
    turn: u32,
    rng: &mut R,
    journal: &mut GameLog,
) {
    let Some(proposal) = pick_weighted(rng, &POLICY_CATALOG) else {
        return;
    };
    let policy = ActivePolicy {
        id: proposal.id,
        proposal: proposal.text.to_string(),
        proposed_turn: turn,
        vote_deadline_turn: turn + POLICY_VOTE_TURNS,
        player_has_voted: false,
    };
    journal.push(
        turn,
        format!(
            "New Policy Proposal: {} (Vote ends after Turn {})",
            policy.proposal, policy.vote_deadline_turn
        ),
    );
    *slot = Some(policy);
}

/// Passed policies are announced only; their effects are not modelled yet
fn apply_policy_effect(policy_id: u32, turn: u32, journal: &mut GameLog) {
    journal.push(
        turn,
        format!("Policy {policy_id} effects are now active (Conceptual)."),
    );
}

/// Record the player's single vote on the open proposal
///
/// Returns false when there is nothing to vote on, the player already voted,
/// or the game is over.
pub fn cast_vote(
    slot: &mut Option<ActivePolicy>,
    game_over: bool,
    turn: u32,
    vote_yes: bool,
    journal: &mut GameLog,
) -> bool {
    if game_over {
        return false;
    }
    let Some(policy) = slot.as_mut().filter(|p| !p.player_has_voted) else {
        return false;
    };
    policy.player_has_voted = true;
    journal.push(
        turn,
        format!(
            "You voted {} on \"{}\".",
            if vote_yes { "YES" } else { "NO" },
            policy.proposal
        ),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    #[test]
    fn test_proposal_deadline_is_two_turns_out() {
        let mut slot = None;
        let mut log = GameLog::default();
        // Proposal roll, then catalog pick
        let mut rng = ScriptedRandom::new([0.01, 0.3], 0.9);
        assert!(step_policy(&mut slot, 7, &mut rng, &mut log).is_none());
        let policy = slot.clone().map(|p| (p.id, p.proposed_turn, p.vote_deadline_turn));
        assert_eq!(policy, Some((2, 7, 9)));
    }

    #[test]
    fn test_resolves_on_deadline_not_before() {
        let mut slot = None;
        let mut log = GameLog::default();
        let mut rng = ScriptedRandom::new([0.0, 0.0], 0.9);
        step_policy(&mut slot, 3, &mut rng, &mut log);
        assert!(slot.is_some());

        assert!(step_policy(&mut slot, 4, &mut rng, &mut log).is_none());
        assert!(slot.is_some());

        // 0.9 >= 0.6 pass chance -> fails
        assert_eq!(
            step_policy(&mut slot, 5, &mut rng, &mut log),
            Some(Resolution::Failed)
        );
        assert!(slot.is_none());
        assert!(log.contains("FAILED"));
    }

    #[test]
    fn test_passed_policy_is_announced() {
        let mut slot = Some(ActivePolicy {
            id: 3,
            proposal: POLICY_CATALOG[2].text.to_string(),
            proposed_turn: 1,
            vote_deadline_turn: 3,
            player_has_voted: true,
        });
        let mut log = GameLog::default();
        let mut rng = ScriptedRandom::new([0.1], 0.9);
        assert_eq!(
            step_policy(&mut slot, 3, &mut rng, &mut log),
            Some(Resolution::Passed)
        );
        assert!(log.contains("Policy 3 effects are now active"));
    }

    #[test]
    fn test_vote_once_per_policy() {
        let mut slot = None;
        let mut log = GameLog::default();
        assert!(!cast_vote(&mut slot, false, 1, true, &mut log));

        let mut rng = ScriptedRandom::constant(0.0);
        propose_policy(&mut slot, 1, &mut rng, &mut log);
        assert!(!cast_vote(&mut slot, true, 1, true, &mut log));
        assert!(cast_vote(&mut slot, false, 1, false, &mut log));
        assert!(!cast_vote(&mut slot, false, 1, true, &mut log));
        assert!(slot.is_some_and(|p| p.player_has_voted));
        assert!(log.contains("You voted NO"));
    }
}
